//! Error types for skillrank

use thiserror::Error;

/// Result type for skillrank operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring an evaluator or loading its inputs.
///
/// Scoring itself never fails: unknown skills and empty rankings are
/// reflected in the analysis instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid evaluator configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Lexicon asset violates its invariants
    #[error("invalid lexicon: {0}")]
    InvalidLexicon(String),

    /// Ideal ranking input could not be interpreted
    #[error("invalid ideal ranking: {0}")]
    InvalidIdealRanking(String),

    /// Serialization error (serde_json)
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
