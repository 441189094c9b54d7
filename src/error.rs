use thiserror::Error;

use crate::domain::Indicator;

/// Fatal error for a `wbc` run: a message plus the process exit code.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Failure to load one indicator. These never end the run; the indicator's
/// table is replaced by an empty one.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, DNS, timeout or body read failure.
    #[error("request for {indicator} failed: {source}")]
    Network {
        indicator: Indicator,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-2xx status.
    #[error("request for {indicator} returned status {status}")]
    Status { indicator: Indicator, status: u16 },

    /// Malformed JSON or a response missing the expected fields.
    #[error("could not parse response for {indicator}: {message}")]
    Parse { indicator: Indicator, message: String },
}

impl FetchError {
    pub fn indicator(&self) -> Indicator {
        match self {
            FetchError::Network { indicator, .. }
            | FetchError::Status { indicator, .. }
            | FetchError::Parse { indicator, .. } => *indicator,
        }
    }

    pub fn parse(indicator: Indicator, message: impl Into<String>) -> Self {
        FetchError::Parse {
            indicator,
            message: message.into(),
        }
    }
}
