//! Fetch lifecycle: `Idle → Loading → Success | Error`.
//!
//! Each fetch is identified by a [`FetchToken`]. Only the token handed out
//! by the most recent [`LoadMachine::begin`] may resolve the machine; a
//! superseded or invalidated token is ignored, so a late result can never
//! overwrite a newer one.

use serde::Serialize;

use crate::{StockRecord, UtcDateTime};

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Idle,
    Loading,
    Success {
        records: Vec<StockRecord>,
        fetched_at: UtcDateTime,
    },
    Error {
        message: String,
    },
}

/// Data-free discriminant of [`LoadState`], for rendering and output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    Idle,
    Loading,
    Success,
    Error,
}

impl LoadState {
    pub fn status(&self) -> LoadStatus {
        match self {
            Self::Idle => LoadStatus::Idle,
            Self::Loading => LoadStatus::Loading,
            Self::Success { .. } => LoadStatus::Success,
            Self::Error { .. } => LoadStatus::Error,
        }
    }

    /// Current collection; empty unless the last fetch succeeded.
    pub fn records(&self) -> &[StockRecord] {
        match self {
            Self::Success { records, .. } => records,
            _ => &[],
        }
    }

    pub fn fetched_at(&self) -> Option<UtcDateTime> {
        match self {
            Self::Success { fetched_at, .. } => Some(*fetched_at),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { message } => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchToken(u64);

impl FetchToken {
    pub const fn generation(self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
pub struct LoadMachine {
    state: LoadState,
    generation: u64,
    in_flight: Option<FetchToken>,
}

impl Default for LoadMachine {
    fn default() -> Self {
        Self {
            state: LoadState::Idle,
            generation: 0,
            in_flight: None,
        }
    }
}

impl LoadMachine {
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn in_flight(&self) -> Option<FetchToken> {
        self.in_flight
    }

    /// Enter `Loading` and hand out a fresh token. Any earlier token stops
    /// being accepted. The previous collection is dropped.
    pub fn begin(&mut self) -> FetchToken {
        self.generation += 1;
        let token = FetchToken(self.generation);
        if let Some(previous) = self.in_flight.replace(token) {
            tracing::debug!(
                superseded = previous.generation(),
                current = token.generation(),
                "fetch superseded"
            );
        }
        self.state = LoadState::Loading;
        token
    }

    /// Resolve to `Success`. Returns `false` and changes nothing when
    /// `token` is not the current in-flight token.
    pub fn succeed(
        &mut self,
        token: FetchToken,
        records: Vec<StockRecord>,
        fetched_at: UtcDateTime,
    ) -> bool {
        if !self.accept(token) {
            return false;
        }
        self.state = LoadState::Success {
            records,
            fetched_at,
        };
        true
    }

    /// Resolve to `Error`. Same token rule as [`succeed`](Self::succeed).
    pub fn fail(&mut self, token: FetchToken, message: impl Into<String>) -> bool {
        if !self.accept(token) {
            return false;
        }
        self.state = LoadState::Error {
            message: message.into(),
        };
        true
    }

    /// Stop accepting the in-flight token, if any. State is left as is.
    pub fn invalidate(&mut self) -> Option<FetchToken> {
        self.in_flight.take()
    }

    fn accept(&mut self, token: FetchToken) -> bool {
        if self.in_flight == Some(token) {
            self.in_flight = None;
            true
        } else {
            tracing::debug!(token = token.generation(), "ignoring stale fetch result");
            false
        }
    }
}
