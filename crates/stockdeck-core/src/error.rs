use thiserror::Error;

/// Validation and contract errors exposed by `stockdeck-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("record id '{id}' appears more than once in the dataset")]
    DuplicateRecordId { id: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },

    #[error("timestamp must be RFC3339: '{value}'")]
    InvalidTimestamp { value: String },

    #[error("invalid sort key '{value}', expected one of change, capital, futures")]
    InvalidSortKey { value: String },
    #[error("invalid sort direction '{value}', expected asc or desc")]
    InvalidSortDirection { value: String },
    #[error("invalid orientation '{value}', expected futures-first or capital-first")]
    InvalidOrientation { value: String },
    #[error("invalid density '{value}', expected compact or grid")]
    InvalidDensity { value: String },

    #[error("failure rate {value} must be within [0, 1]")]
    InvalidFailureRate { value: String },
    #[error("fetch limit must be greater than zero")]
    ZeroFetchLimit,

    #[error("request_id must be at least 8 characters")]
    InvalidRequestId,
    #[error("schema_version must match vMAJOR.MINOR.PATCH: '{value}'")]
    InvalidSchemaVersion { value: String },
    #[error("source id cannot be empty")]
    EmptySource,
    #[error("error code cannot be empty")]
    EmptyErrorCode,
    #[error("error message cannot be empty")]
    EmptyErrorMessage,
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
