use std::num::ParseIntError;
use thiserror::Error;

/// Errors produced by this crate.
#[derive(Error, Debug)]
pub enum DvbSubError {
    /// Reading a config file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A sample reached its end without a presentation time. The packet
    /// framer must supply one on every aligned packet start.
    #[error("sample finished without a presentation time")]
    SampleTimeUnset,

    /// A track was asked to commit bytes it never received.
    #[error("invalid sample: {0}")]
    InvalidSample(String),

    /// A config document is malformed.
    #[error("config error: {0}")]
    Config(String),

    /// A numeric config value failed to parse.
    #[error("parse int error: {0}")]
    ParseInt(#[from] ParseIntError),
}

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, DvbSubError>;
