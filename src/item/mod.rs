pub mod item_registry;
pub mod item_type;

pub use item_registry::{ItemError, ItemRegistry, ItemResult};
pub use item_type::{ItemCatalog, ItemDefinition, ItemId, Placement, DEFAULT_MAX_STACK};
