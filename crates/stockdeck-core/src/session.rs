//! Single-owner watchlist session.
//!
//! [`WatchlistSession`] ties a [`DataSource`] to the load state machine,
//! the view state and the detail selection. Fetches run on a spawned tokio
//! task; the session owns the only handle to it. Starting a new fetch
//! aborts the previous task and invalidates its token, and dropping the
//! session aborts whatever is still pending.
//!
//! The session is driven from one task: call [`WatchlistSession::refresh`]
//! (or [`retry`](WatchlistSession::retry)) and later
//! [`settle`](WatchlistSession::settle) to apply the result. View edits in
//! between act on the view only and never touch the fetch.

use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinHandle;

use crate::card::StockCard;
use crate::data_source::{DataSource, SourceError};
use crate::load_state::{FetchToken, LoadMachine, LoadState, LoadStatus};
use crate::notify::{FetchNotifier, TracingNotifier};
use crate::pipeline::{ordered_matches, paginate, total_pages, PAGE_SIZE};
use crate::selection::DetailView;
use crate::trend::trend_for;
use crate::{
    Density, Orientation, RecordId, SortDirection, SortKey, StockRecord, UtcDateTime, ViewState,
};

type FetchResult = Result<Vec<StockRecord>, SourceError>;

struct PendingFetch {
    token: FetchToken,
    handle: JoinHandle<FetchResult>,
}

/// Result of a settled fetch, as applied to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Loaded { records: usize },
    Failed(SourceError),
}

pub struct WatchlistSession {
    source: Arc<dyn DataSource>,
    notifier: Arc<dyn FetchNotifier>,
    machine: LoadMachine,
    view: ViewState,
    pending: Option<PendingFetch>,
    trend_rng: fastrand::Rng,
    trend: Option<(RecordId, Vec<f64>)>,
}

impl std::fmt::Debug for WatchlistSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchlistSession")
            .field("source", &self.source.id())
            .field("state", &self.machine.state().status())
            .field("view", &self.view)
            .field("fetching", &self.pending.is_some())
            .finish()
    }
}

impl WatchlistSession {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            source,
            notifier: Arc::new(TracingNotifier),
            machine: LoadMachine::default(),
            view: ViewState::default(),
            pending: None,
            trend_rng: fastrand::Rng::new(),
            trend: None,
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn FetchNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_trend_rng(mut self, rng: fastrand::Rng) -> Self {
        self.trend_rng = rng;
        self
    }

    pub fn with_view(mut self, view: ViewState) -> Self {
        self.view = view;
        self
    }

    pub fn source_id(&self) -> &'static str {
        self.source.id()
    }

    pub fn load_state(&self) -> &LoadState {
        self.machine.state()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Current collection; empty unless the last fetch succeeded.
    pub fn records(&self) -> &[StockRecord] {
        self.machine.state().records()
    }

    pub fn is_fetching(&self) -> bool {
        self.pending.is_some()
    }

    // ---------------------------------------------------------------------
    // Fetch lifecycle
    // ---------------------------------------------------------------------

    /// Enter `Loading` and spawn a fetch. Any pending fetch is aborted first.
    ///
    /// Must be called from within a tokio runtime.
    pub fn refresh(&mut self) -> FetchToken {
        self.start_fetch("refresh")
    }

    /// Same transition as [`refresh`](Self::refresh), issued after an error.
    pub fn retry(&mut self) -> FetchToken {
        self.start_fetch("retry")
    }

    fn start_fetch(&mut self, reason: &'static str) -> FetchToken {
        if let Some(previous) = self.pending.take() {
            previous.handle.abort();
            tracing::debug!(
                token = previous.token.generation(),
                "aborted superseded fetch"
            );
        }

        let token = self.machine.begin();
        let source = Arc::clone(&self.source);
        let handle = tokio::spawn(async move { source.fetch().await });
        tracing::info!(
            source = self.source.id(),
            token = token.generation(),
            reason,
            "fetch started"
        );

        self.pending = Some(PendingFetch { token, handle });
        token
    }

    /// Wait for the pending fetch and apply its result.
    ///
    /// Returns `None` when nothing is pending or the task was cancelled.
    pub async fn settle(&mut self) -> Option<FetchOutcome> {
        let PendingFetch { token, handle } = self.pending.take()?;
        let result = match handle.await {
            Ok(result) => result,
            Err(join_error) if join_error.is_cancelled() => {
                tracing::debug!(token = token.generation(), "fetch task cancelled");
                return None;
            }
            Err(join_error) => {
                tracing::error!(error = %join_error, "fetch task failed");
                Err(SourceError::internal("fetch task failed"))
            }
        };
        Some(self.apply(token, result))
    }

    /// Apply the pending fetch only if its task has already finished.
    pub async fn settle_if_finished(&mut self) -> Option<FetchOutcome> {
        let finished = self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.handle.is_finished());
        if finished {
            self.settle().await
        } else {
            None
        }
    }

    /// Drop the pending fetch without applying it. State is left as is.
    pub fn teardown(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
            self.machine.invalidate();
            tracing::debug!(token = pending.token.generation(), "fetch torn down");
        }
    }

    fn apply(&mut self, token: FetchToken, result: FetchResult) -> FetchOutcome {
        match result {
            Ok(records) => {
                let count = records.len();
                if self.machine.succeed(token, records, UtcDateTime::now()) {
                    tracing::info!(records = count, "fetch succeeded");
                    let total = self.total_pages();
                    self.view.clamp_page(total);
                    self.refresh_trend();
                    self.notifier.on_fetch_success();
                }
                FetchOutcome::Loaded { records: count }
            }
            Err(error) => {
                if self.machine.fail(token, error.message()) {
                    tracing::warn!(code = error.code(), error = %error, "fetch failed");
                    self.notifier.on_fetch_error(error.message());
                }
                FetchOutcome::Failed(error)
            }
        }
    }

    // ---------------------------------------------------------------------
    // View preferences and navigation
    // ---------------------------------------------------------------------

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.view.set_search_query(query);
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.view.set_sort_key(key);
    }

    pub fn set_sort_direction(&mut self, direction: SortDirection) {
        self.view.set_sort_direction(direction);
    }

    pub fn toggle_sort_direction(&mut self) {
        self.view.toggle_sort_direction();
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.view.set_orientation(orientation);
    }

    pub fn set_density(&mut self, density: Density) {
        self.view.set_density(density);
    }

    pub fn toggle_density(&mut self) {
        self.view.toggle_density();
    }

    /// Page count for the current query over the current collection.
    pub fn total_pages(&self) -> usize {
        total_pages(ordered_matches(self.records(), &self.view).len(), PAGE_SIZE)
    }

    pub fn next_page(&mut self) {
        let total = self.total_pages();
        self.view.next_page(total);
    }

    pub fn prev_page(&mut self) {
        self.view.prev_page();
    }

    pub fn go_to_page(&mut self, page: usize) {
        let total = self.total_pages();
        self.view.go_to_page(page, total);
    }

    // ---------------------------------------------------------------------
    // Selection
    // ---------------------------------------------------------------------

    pub fn select(&mut self, id: RecordId) {
        self.view.select(id);
        self.refresh_trend();
    }

    pub fn close_detail(&mut self) {
        self.view.close_detail();
        self.trend = None;
    }

    /// Detail for the open selection, resolved against the current collection.
    pub fn detail(&self) -> Option<DetailView> {
        self.detail_at(UtcDateTime::now())
    }

    fn detail_at(&self, now: UtcDateTime) -> Option<DetailView> {
        let id = self.view.selected_record_id()?;
        let trend = match &self.trend {
            Some((trend_id, points)) if trend_id.matches(id) => points.clone(),
            _ => Vec::new(),
        };
        Some(DetailView::build(self.records(), id, trend, now))
    }

    /// Regenerate the trend for the selected record from the current collection.
    fn refresh_trend(&mut self) {
        let Some(id) = self.view.selected_record_id().cloned() else {
            self.trend = None;
            return;
        };
        let record = self
            .machine
            .state()
            .records()
            .iter()
            .find(|record| record.id.matches(&id));
        self.trend = record
            .and_then(|record| trend_for(record, &mut self.trend_rng))
            .map(|points| (id, points));
    }

    // ---------------------------------------------------------------------
    // Rendering
    // ---------------------------------------------------------------------

    pub fn snapshot(&self) -> WatchlistSnapshot {
        self.snapshot_at(UtcDateTime::now())
    }

    /// Everything a renderer needs, derived from the current state.
    pub fn snapshot_at(&self, now: UtcDateTime) -> WatchlistSnapshot {
        let state = self.machine.state();
        let matches = ordered_matches(state.records(), &self.view);
        let page = paginate(&matches, PAGE_SIZE, self.view.current_page());

        let content = match state {
            LoadState::Idle => Content::Idle,
            LoadState::Loading => Content::Loading {
                placeholders: PAGE_SIZE,
            },
            LoadState::Error { message } => Content::Error {
                message: message.clone(),
            },
            LoadState::Success { .. } if page.items.is_empty() => Content::Empty {
                message: empty_message(self.view.search_query()),
            },
            LoadState::Success { .. } => Content::Items {
                cards: page
                    .items
                    .iter()
                    .map(|record| StockCard::derive(record, &self.view, now))
                    .collect(),
            },
        };

        WatchlistSnapshot {
            load: state.status(),
            fetched_at: state.fetched_at(),
            updated: state
                .fetched_at()
                .map(|at| crate::format::relative_time(at, now)),
            view: self.view.clone(),
            page: PageInfo {
                page_number: page.page_number,
                total_pages: page.total_pages,
                total_items: page.total_items,
                page_size: page.page_size,
                has_prev: page.has_prev(),
                has_next: page.has_next(),
            },
            content,
            detail: self.detail_at(now),
        }
    }
}

impl Drop for WatchlistSession {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
        }
    }
}

/// `No stocks found for "<query>"`, or a bare message for an empty collection.
pub fn empty_message(query: &str) -> String {
    if query.is_empty() {
        "No stocks found".to_owned()
    } else {
        format!("No stocks found for \"{query}\"")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WatchlistSnapshot {
    pub load: LoadStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<UtcDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    pub view: ViewState,
    pub content: Content,
    pub page: PageInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<DetailView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Content {
    Idle,
    /// Skeleton rows while the fetch is in flight.
    Loading { placeholders: usize },
    Error { message: String },
    Empty { message: String },
    Items { cards: Vec<StockCard> },
}

impl Content {
    pub fn cards(&self) -> &[StockCard] {
        match self {
            Self::Items { cards } => cards,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub page_number: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub page_size: usize,
    pub has_prev: bool,
    pub has_next: bool,
}
