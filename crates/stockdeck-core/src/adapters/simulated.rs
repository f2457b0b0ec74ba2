use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crate::data_source::{DataSource, FetchFuture, SourceError};
use crate::{Dataset, StockRecord, WatchlistConfig};

/// Message carried by every simulated transient failure.
pub const FETCH_FAILURE_MESSAGE: &str = "Data fetch failed. Please retry.";

/// Local dataset dressed up as a flaky network endpoint.
///
/// Each fetch waits for the configured latency, fails with probability
/// `failure_rate`, and otherwise returns a shuffled copy of the dataset
/// capped at `fetch_limit` records. The random generator is owned by the
/// adapter and can be seeded for deterministic runs.
#[derive(Debug)]
pub struct SimulatedSource {
    dataset: Dataset,
    failure_rate: f64,
    latency: Duration,
    fetch_limit: usize,
    rng: Mutex<fastrand::Rng>,
}

impl SimulatedSource {
    pub fn new(dataset: Dataset) -> Self {
        Self::from_config(dataset, &WatchlistConfig::default())
    }

    pub fn from_config(dataset: Dataset, config: &WatchlistConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };

        Self {
            dataset,
            failure_rate: config.failure_rate,
            latency: config.latency(),
            fetch_limit: config.fetch_limit,
            rng: Mutex::new(rng),
        }
    }

    pub fn with_rng(mut self, rng: fastrand::Rng) -> Self {
        self.rng = Mutex::new(rng);
        self
    }

    pub fn with_failure_rate(mut self, failure_rate: f64) -> Self {
        self.failure_rate = failure_rate;
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_fetch_limit(mut self, fetch_limit: usize) -> Self {
        self.fetch_limit = fetch_limit;
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// One Bernoulli trial followed, on success, by shuffle and cap.
    fn draw(&self) -> Result<Vec<StockRecord>, SourceError> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

        if rng.f64() < self.failure_rate {
            return Err(SourceError::unavailable(FETCH_FAILURE_MESSAGE));
        }

        let mut records = shuffled(self.dataset.records(), &mut rng);
        records.truncate(self.fetch_limit);
        Ok(records)
    }
}

impl DataSource for SimulatedSource {
    fn id(&self) -> &'static str {
        "simulated"
    }

    fn fetch(&self) -> FetchFuture<'_> {
        Box::pin(async move {
            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }
            self.draw()
        })
    }
}

/// Fisher-Yates shuffle into a new vector; `items` is left untouched.
pub fn shuffled<T: Clone>(items: &[T], rng: &mut fastrand::Rng) -> Vec<T> {
    let mut result = items.to_vec();
    for index in (1..result.len()).rev() {
        let swap_with = rng.usize(..=index);
        result.swap(index, swap_with);
    }
    result
}
