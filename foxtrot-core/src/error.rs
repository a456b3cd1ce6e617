use thiserror::Error;

/// Main error type for Foxtrot client operations
#[derive(Error, Debug)]
pub enum FoxtrotError {
    #[error("Connection error: {0}")]
    Connection(#[from] std::io::Error),

    #[error("Timeout")]
    Timeout,

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Malformed reply line: {0}")]
    MalformedReply(String),

    #[error("Unknown variable: {0}")]
    UnknownVariable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for Foxtrot client operations
pub type FoxtrotResult<T> = Result<T, FoxtrotError>;
