use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] stockdeck_core::ValidationError),

    #[error(transparent)]
    Core(#[from] stockdeck_core::CoreError),

    #[error("strict mode failed: warnings={warning_count}, errors={error_count}")]
    StrictModeViolation {
        warning_count: usize,
        error_count: usize,
    },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Core(_) => 2,
            Self::StrictModeViolation { .. } => 5,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_violations_exit_with_five() {
        let error = CliError::StrictModeViolation {
            warning_count: 1,
            error_count: 0,
        };
        assert_eq!(error.exit_code(), 5);
        assert_eq!(error.to_string(), "strict mode failed: warnings=1, errors=0");
    }

    #[test]
    fn bad_config_is_a_usage_error() {
        let error = CliError::from(stockdeck_core::ValidationError::ZeroFetchLimit);
        assert_eq!(error.exit_code(), 2);
    }
}
