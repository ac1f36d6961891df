use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Refresh settings require an OnRefreshListener")]
    MissingListener,

    #[error("Refresh settings require a loading indicator")]
    MissingIndicator,

    #[error("Invalid refresh threshold: {0} (must be a positive, finite distance)")]
    InvalidThreshold(f64),

    #[error("Invalid refresh delay: {0}s (must be non-negative and finite)")]
    InvalidRefreshDelay(f64),
}

pub type Result<T> = std::result::Result<T, Error>;
