//! Slotted item storage, stack placement, drag-and-drop transfer and recipe crafting
//! for a tile-based game.

pub mod config;
pub mod crafting;
pub mod inventory;
pub mod item;
pub mod persistence;
pub mod ui;

pub use config::{ConfigError, InventoryConfig};
pub use crafting::{CraftOutcome, CraftPolicy, CraftingEngine, Ingredient, Recipe, RecipeRegistry};
pub use inventory::{
    deposit, DragController, DragState, DropOutcome, DroppedItem, Inventory, InventoryError,
    InventoryLayout, InventoryResult, ItemStack, Slot, SlotStore, SlotView, WorldSpawner,
};
pub use item::{ItemCatalog, ItemDefinition, ItemId, ItemRegistry, DEFAULT_MAX_STACK};
pub use persistence::{InventorySnapshot, PersistenceError};
pub use ui::{HotbarProjector, InputAction, InventoryInputHandler, InventoryKey, InventoryUI, PanelLayout};
