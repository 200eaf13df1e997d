//! Persistence for inventory contents

pub mod inventory_data;

pub use inventory_data::InventorySnapshot;

use crate::inventory::InventoryError;

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Errors that can occur during persistence operations
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Snapshot has {found} slots, inventory has {expected}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("Snapshot rejected: {0}")]
    Inventory(#[from] InventoryError),
}
