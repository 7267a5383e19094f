//src/error/src/lib.rs
//! Errors of the persistence layer
//!
//! Inventory and equipment operations report their own typed errors; this
//! crate covers what can go wrong once containers are written to disk or read
//! back: IO, encoding, stale versions and snapshots that fail validation.

use bincode::error::{DecodeError, EncodeError};
use thiserror::Error;

use bag::{ConfigError, SnapshotError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Save system error: {0}")]
    SaveError(#[from] anyhow::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// Slot number outside the store's range
    #[error("Invalid save slot {slot} (store holds {max})")]
    InvalidSlot { slot: usize, max: usize },

    #[error("Corrupted save data")]
    CorruptedSave,

    #[error("Incompatible save version: {0}")]
    VersionMismatch(String),

    /// Decoded fine, but the containers inside break their own rules
    #[error("Invalid inventory data: {0}")]
    InvalidInventoryData(#[from] SnapshotError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

impl From<DecodeError> for StoreError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::UnexpectedEnd { .. } | DecodeError::Utf8 { .. } => StoreError::CorruptedSave,
            other => StoreError::DeserializationError(other.to_string()),
        }
    }
}

impl From<EncodeError> for StoreError {
    fn from(err: EncodeError) -> Self {
        StoreError::SerializationError(err.to_string())
    }
}

/// Turns an error into a message fit for a player.
pub fn handle_error(error: &StoreError) -> String {
    match error {
        StoreError::CorruptedSave => "Save data is corrupted and cannot be loaded".to_string(),
        StoreError::InvalidSlot { slot, .. } => format!("There is no save slot {slot}"),
        StoreError::VersionMismatch(v) => format!("Save was written by an incompatible version: {v}"),
        StoreError::IoError(e) => match e.kind() {
            std::io::ErrorKind::NotFound => "Save file does not exist".to_string(),
            std::io::ErrorKind::PermissionDenied => "No permission to access the save file".to_string(),
            _ => format!("IO error: {e}"),
        },
        _ => error.to_string(),
    }
}
