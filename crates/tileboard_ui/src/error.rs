//! # Board Error Types
//!
//! All errors that can occur while driving a tile board.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in the board layer.
#[derive(Error, Debug)]
pub enum BoardError {
    /// The message already has a live (or departing) item.
    #[error("message already registered: {0}")]
    DuplicateMessage(String),

    /// The message has no item.
    #[error("message not registered: {0}")]
    UnknownMessage(String),

    /// The item is being removed and cannot be moved or removed again.
    #[error("item is departing: {0}")]
    ItemDeparting(String),

    /// Invalid board configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("cannot read configuration {path}: {source}")]
    ConfigRead {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for a board.
    #[error("cannot parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type for board operations.
pub type BoardResult<T> = Result<T, BoardError>;
