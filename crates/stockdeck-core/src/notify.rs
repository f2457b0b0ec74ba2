//! Fetch outcome notifications.

/// Message announced after every successful fetch.
pub const REFRESH_SUCCESS_MESSAGE: &str = "Watchlist refreshed!";

/// Receives fire-and-forget fetch outcomes. Implementations must not block.
pub trait FetchNotifier: Send + Sync {
    fn on_fetch_success(&self);

    /// `message` is the source error message, unchanged.
    fn on_fetch_error(&self, message: &str);
}

/// Emits outcomes as tracing events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl FetchNotifier for TracingNotifier {
    fn on_fetch_success(&self) {
        tracing::info!(target: "stockdeck::notify", "{REFRESH_SUCCESS_MESSAGE}");
    }

    fn on_fetch_error(&self, message: &str) {
        tracing::warn!(target: "stockdeck::notify", "{message}");
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl FetchNotifier for NoopNotifier {
    fn on_fetch_success(&self) {}

    fn on_fetch_error(&self, _message: &str) {}
}
