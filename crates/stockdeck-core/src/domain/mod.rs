//! # Domain Models
//!
//! Canonical types for the watchlist.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`StockRecord`] | One instrument snapshot with capital and futures prices |
//! | [`RecordId`] | Numeric or string record identifier |
//! | [`Movement`] | Positive/negative classification of the day's change |
//! | [`Dataset`] | Validated fixed collection the simulated source draws from |
//! | [`UtcDateTime`] | UTC timestamp |
//!
//! Records may be incomplete (missing symbol or prices). That is a valid
//! state for a collection member; it only matters when a record is opened
//! for detail viewing.

mod dataset;
mod record;
mod timestamp;

pub use dataset::Dataset;
pub use record::{Movement, RecordId, StockRecord};
pub use timestamp::UtcDateTime;
