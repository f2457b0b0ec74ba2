//! # Stockdeck Core
//!
//! Data shaping and presentation state for a stock watchlist with capital
//! market and futures prices.
//!
//! ## Overview
//!
//! - **Domain models** for stock records and the bundled dataset
//! - **Data source trait** with a simulated flaky source and a scripted one
//! - **Pipeline**: symbol filter, stable sort, fixed-size pagination
//! - **Load state machine** with single-slot fetch tokens
//! - **View state**: search, sort, orientation, density, page, selection
//! - **Session** tying all of the above to a tokio task per fetch
//! - **Formatting** in the en-IN convention, plus the output envelope
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Simulated and scripted data sources |
//! | [`card`] | Per-record display values for list rows |
//! | [`config`] | Layered watchlist configuration |
//! | [`data_source`] | Data source trait and structured errors |
//! | [`domain`] | Stock records, ids, dataset, timestamps |
//! | [`envelope`] | Response envelope with metadata |
//! | [`error`] | Core error types |
//! | [`format`] | Price, percentage and relative-time formatting |
//! | [`load_state`] | Idle/loading/success/error state machine |
//! | [`notify`] | Fetch outcome notifications |
//! | [`pipeline`] | Filter, sort, paginate |
//! | [`selection`] | Detail resolution for the selected record |
//! | [`session`] | Single-owner session and render snapshot |
//! | [`trend`] | Synthetic price trend |
//! | [`view_state`] | Display preferences and navigation |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stockdeck_core::{Dataset, SimulatedSource, WatchlistSession};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = SimulatedSource::new(Dataset::bundled()?);
//!     let mut session = WatchlistSession::new(Arc::new(source));
//!
//!     session.refresh();
//!     session.settle().await;
//!     session.set_search_query("tc");
//!
//!     for card in session.snapshot().content.cards() {
//!         println!("{:?} {}", card.symbol, card.headline_text());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Data Source     │────▶│ Load State       │
//! │ (Adapter Trait) │     │ Machine          │
//! └─────────────────┘     └────────┬─────────┘
//!                                  │ records
//!                                  ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ View State      │────▶│ Filter → Sort →  │
//! │ + Selection     │     │ Paginate         │
//! └─────────────────┘     └────────┬─────────┘
//!                                  │
//!                                  ▼
//!                         ┌──────────────────┐
//!                         │ Snapshot         │
//!                         │ (cards, detail)  │
//!                         └──────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Fetch failures never escape as errors; they become
//! [`LoadState::Error`] and are recoverable with
//! [`WatchlistSession::retry`]. Construction-time problems (bad dataset,
//! bad config) are reported as [`CoreError`].

pub mod adapters;
pub mod card;
pub mod config;
pub mod data_source;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod format;
pub mod load_state;
pub mod notify;
pub mod pipeline;
pub mod selection;
pub mod session;
pub mod trend;
pub mod view_state;

pub use adapters::{ScriptedSource, SimulatedSource, FETCH_FAILURE_MESSAGE};
pub use card::StockCard;
pub use config::WatchlistConfig;
pub use data_source::{DataSource, FetchFuture, SourceError, SourceErrorKind};
pub use domain::{Dataset, Movement, RecordId, StockRecord, UtcDateTime};
pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta, SCHEMA_VERSION};
pub use error::{CoreError, ValidationError};
pub use load_state::{FetchToken, LoadMachine, LoadState, LoadStatus};
pub use notify::{FetchNotifier, NoopNotifier, TracingNotifier, REFRESH_SUCCESS_MESSAGE};
pub use pipeline::{Page, PAGE_SIZE};
pub use selection::{resolve_detail, DetailCard, DetailIssue, DetailResolution, DetailView};
pub use session::{Content, FetchOutcome, PageInfo, WatchlistSession, WatchlistSnapshot};
pub use view_state::{Density, Orientation, SortDirection, SortKey, ViewState};
