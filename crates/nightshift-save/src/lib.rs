//! Persistence for the Nightshift simulation.
//!
//! Save slots are JSON documents in a [`Storage`] backend. Loading always
//! yields a usable state; saving reports failures to the caller. Transfer
//! strings move a state between installations as a single opaque line.
//!
//! # Modules
//!
//! - [`error`] -- Storage, save, and transfer error types
//! - [`slot`] -- `load_state` / `save_state` with default merging and transient reset
//! - [`storage`] -- The [`Storage`] trait with file and in-memory backends
//! - [`transfer`] -- Export and import of obfuscated transfer strings

pub mod error;
pub mod slot;
pub mod storage;
pub mod transfer;

// Re-export primary types for convenience.
pub use error::{SaveError, StorageError, TransferError};
pub use slot::{DEFAULT_SLOT, load_state, load_state_at, save_state};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use transfer::{
    EXPORT_VERSION, ExportMetadata, decode_game_data, export_game_data, export_game_data_at,
    get_export_metadata, import_game_data,
};
