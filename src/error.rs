use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Per-request rejections from the submit path.
///
/// None of these mutate queue state; a rejected request leaves the queue
/// exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("trade code must be between 00000000 and 99999999, got {0}")]
    InvalidCode(u64),

    #[error("you are already in that queue; wait for your pending trade to finish")]
    AlreadyInQueue,

    #[error("that can't be traded: {0}")]
    NotTradeable(String),

    #[error("the request failed validation: {0}")]
    InvalidPayload(String),
}

/// Errors surfaced by the automation device while executing a trade.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("trade canceled: {0}")]
    Canceled(String),

    #[error("device fault: {0}")]
    Device(String),

    #[error("connection to console lost: {0}")]
    ConnectionLost(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Submit(#[from] SubmitError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
