//! Error types for the headless runner.

use nightshift_save::{SaveError, TransferError};

use crate::config::ConfigError;

/// Errors that can occur while running a session.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration is invalid or unreadable.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Writing the save slot failed.
    #[error("save error: {0}")]
    Save(#[from] SaveError),

    /// Building a transfer string failed.
    #[error("transfer error: {0}")]
    Transfer(#[from] TransferError),

    /// A command line could not be understood.
    #[error("bad command: {0}")]
    Command(String),
}
