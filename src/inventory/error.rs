/// Result type for inventory operations
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Errors raised by the slot store and the drag controller.
///
/// None of these are expected during normal play: storage running out and missing
/// crafting materials are reported through return values instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("invalid state for slot {index}: {reason}")]
    InvalidSlotState { index: usize, reason: String },

    #[error("slot {index} is out of range (inventory has {len} slots)")]
    SlotOutOfRange { index: usize, len: usize },

    #[error("operation not allowed while a stack is held")]
    DragInProgress,

    #[error("a stack is already held")]
    AlreadyHolding,

    #[error("no stack is held")]
    NothingHeld,

    #[error("slot {0} is empty")]
    EmptySlot(usize),

    #[error("inventory layout needs at least one hotbar slot")]
    NoHotbar,
}

impl InventoryError {
    pub(crate) fn invalid(index: usize, reason: impl Into<String>) -> Self {
        InventoryError::InvalidSlotState {
            index,
            reason: reason.into(),
        }
    }
}
