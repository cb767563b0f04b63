//! Error types

use std::path::PathBuf;

/// Reasons an inbound message is not a render envelope. The widget drops
/// such messages without surfacing anything to the host.
#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    #[error("message is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unexpected message type {0:?}")]
    WrongType(Option<String>),

    #[error("unexpected message source {0:?}")]
    WrongSource(Option<String>),

    #[error("message has no payload object")]
    MissingPayload,

    #[error("payload has no columns array")]
    MissingColumns,

    #[error("payload columns are empty")]
    EmptyColumns,

    #[error("column {index} is not a {{key, label}} object")]
    InvalidColumn { index: usize },

    #[error("payload has no rows array")]
    MissingRows,

    #[error("row {index} is not an object")]
    InvalidRow { index: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
