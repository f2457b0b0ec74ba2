use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crate::data_source::{DataSource, FetchFuture, SourceError};
use crate::StockRecord;

type Outcome = Result<Vec<StockRecord>, SourceError>;

/// Deterministic source that replays queued outcomes in order.
///
/// Once the queue is drained every further fetch repeats the last outcome,
/// so a script of one success behaves like a stable endpoint.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    queue: Mutex<VecDeque<Outcome>>,
    last: Mutex<Option<Outcome>>,
    latency: Duration,
    calls: Mutex<usize>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then_succeed(self, records: Vec<StockRecord>) -> Self {
        self.push(Ok(records));
        self
    }

    pub fn then_fail(self, message: impl Into<String>) -> Self {
        self.push(Err(SourceError::unavailable(message)));
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Number of fetches started so far.
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, outcome: Outcome) {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(outcome);
    }

    fn next_outcome(&self) -> Outcome {
        let next = self
            .queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        match next {
            Some(outcome) => {
                *last = Some(outcome.clone());
                outcome
            }
            None => last
                .clone()
                .unwrap_or_else(|| Err(SourceError::internal("scripted source has no outcomes"))),
        }
    }
}

impl DataSource for ScriptedSource {
    fn id(&self) -> &'static str {
        "scripted"
    }

    fn fetch(&self) -> FetchFuture<'_> {
        *self.calls.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        // Outcome is taken at call time so fetch order, not resolve order, decides it.
        let outcome = self.next_outcome();
        Box::pin(async move {
            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }
            outcome
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_in_order_then_repeats_last() {
        let record =
            StockRecord::new(1, Some("TCS"), Some(100.0), Some(105.0), 0.5).expect("valid");
        let source = ScriptedSource::new()
            .then_fail("Data fetch failed. Please retry.")
            .then_succeed(vec![record.clone()]);

        assert!(source.fetch().await.is_err());
        assert_eq!(source.fetch().await.expect("ok"), vec![record.clone()]);
        assert_eq!(source.fetch().await.expect("ok"), vec![record]);
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test]
    async fn empty_script_is_an_internal_error() {
        let error = ScriptedSource::new().fetch().await.expect_err("must fail");
        assert!(!error.retryable());
    }
}
