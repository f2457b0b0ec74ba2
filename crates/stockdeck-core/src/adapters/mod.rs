//! Data source adapters.
//!
//! - [`SimulatedSource`] shuffles, caps and randomly fails the bundled dataset.
//! - [`ScriptedSource`] replays a fixed list of outcomes, for tests and demos.

mod scripted;
mod simulated;

pub use scripted::ScriptedSource;
pub use simulated::{shuffled, SimulatedSource, FETCH_FAILURE_MESSAGE};
