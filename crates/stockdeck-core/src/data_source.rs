//! Data source trait and error types.
//!
//! A [`DataSource`] hands back the raw, unordered collection of
//! [`StockRecord`]s for one fetch cycle. It is called once per fetch; retries
//! are a user decision and go through the session, never the adapter.
//!
//! # Example
//!
//! ```rust,ignore
//! use stockdeck_core::{DataSource, Dataset, SimulatedSource};
//!
//! async fn first_symbol(source: &SimulatedSource) -> Option<String> {
//!     let records = source.fetch().await.ok()?;
//!     records.first()?.symbol().map(str::to_owned)
//! }
//! ```

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::StockRecord;

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    Unavailable,
    Internal,
}

/// Structured source error surfaced to the load state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
}

impl SourceError {
    /// Transient failure; the user may retry.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

pub type FetchFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Vec<StockRecord>, SourceError>> + Send + 'a>>;

/// Source adapter contract.
///
/// Implementations must be `Send + Sync`: the session moves a shared handle
/// into a spawned task for every fetch.
pub trait DataSource: Send + Sync {
    /// Short identifier reported in output metadata.
    fn id(&self) -> &'static str;

    /// Fetches one collection. Single attempt; resolves to the full
    /// collection or an error, never partial data.
    fn fetch(&self) -> FetchFuture<'_>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_errors_are_retryable() {
        let error = SourceError::unavailable("Data fetch failed. Please retry.");
        assert!(error.retryable());
        assert_eq!(error.code(), "source.unavailable");
        assert_eq!(
            error.to_string(),
            "Data fetch failed. Please retry. (source.unavailable)"
        );
    }

    #[test]
    fn internal_errors_are_not_retryable() {
        let error = SourceError::internal("boom");
        assert_eq!(error.kind(), SourceErrorKind::Internal);
        assert!(!error.retryable());
    }
}
