//! Errors at the feed boundary
//!
//! The gesture core never fails; these cover config files, post sources,
//! gesture scripts and the feed controller.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Post source failed: {message}")]
    Source { message: String },

    #[error("Script error on line {line}: {message}")]
    Script { line: usize, message: String },

    #[error("No interactive card: the feed is caught up")]
    NoTopCard,
}

pub type Result<T> = std::result::Result<T, FeedError>;
