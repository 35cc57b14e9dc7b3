//! Error types for the persistence layer.
//!
//! None of these cross the load or import boundary: `load_state` degrades to
//! defaults and `import_game_data` degrades to `None`. They exist so the
//! cause can be logged and so `save_state` can report a failed write.

use std::path::PathBuf;

/// A storage backend failed.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File that was being accessed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The key contains characters that cannot name a slot.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Saving a state failed.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// The storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The state could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A transfer string could not be produced or decoded.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// The input was empty or whitespace.
    #[error("Transfer string is empty")]
    Empty,

    /// The input is not an even-length hex string.
    #[error("Transfer string is not valid hex")]
    InvalidHex,

    /// The input is too short to carry a checksum.
    #[error("Transfer string is truncated")]
    Truncated,

    /// The checksum does not match the decoded payload.
    #[error("Checksum mismatch: expected {expected:08x}, found {found:08x}")]
    ChecksumMismatch {
        /// Checksum carried by the string.
        expected: u32,
        /// Checksum of the decoded payload.
        found: u32,
    },

    /// The payload is not the expected JSON shape.
    #[error("Payload error: {0}")]
    Payload(#[from] serde_json::Error),

    /// The game data lacks a required top-level key.
    #[error("Game data is missing required key {0:?}")]
    MissingKey(&'static str),
}
