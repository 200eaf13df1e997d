pub mod allocator;
pub mod drag;
pub mod drop_handler;
pub mod error;
pub mod item;
pub mod player_inventory;
pub mod slot;
pub mod slot_store;

pub use allocator::{capacity_for, deposit};
pub use drag::{DragController, DragState, DropOutcome};
pub use drop_handler::{DroppedItem, WorldSpawner};
pub use error::{InventoryError, InventoryResult};
pub use item::ItemStack;
pub use player_inventory::{HotbarObserver, Inventory, ItemTooltip, SelectedItem};
pub use slot::{Slot, SlotView};
pub use slot_store::{InventoryLayout, SlotStore};
