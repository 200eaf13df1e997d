pub mod hotbar;
pub mod inventory_input;
pub mod inventory_ui;

pub use hotbar::{HotbarProjector, HOTBAR_SIZE};
pub use inventory_input::{InputAction, InventoryInputHandler, InventoryKey};
pub use inventory_ui::{InventoryUI, InventoryUIState, PanelLayout, UIRect};
