use crate::config::ConfigFormat;
use crate::item::{ItemCatalog, ItemDefinition, ItemId, DEFAULT_MAX_STACK};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Result type for catalog operations
pub type ItemResult<T> = Result<T, ItemError>;

/// Errors raised while building an item catalog
#[derive(Debug, thiserror::Error)]
pub enum ItemError {
    #[error("item '{0}' declares a max stack of 0")]
    ZeroMaxStack(ItemId),

    #[error("item '{0}' is registered twice")]
    DuplicateItem(ItemId),

    #[error("failed to read item catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse item catalog: {0}")]
    Parse(String),
}

/// On-disk shape of an item catalog
#[derive(Debug, Default, Serialize, Deserialize)]
struct ItemCatalogFile {
    #[serde(default)]
    items: Vec<ItemDefinition>,
}

/// Registry for all item types
#[derive(Debug, Clone)]
pub struct ItemRegistry {
    items: HashMap<ItemId, ItemDefinition>,
    /// Registration order, used for listing
    order: Vec<ItemId>,
    default_max_stack: u32,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            order: Vec::new(),
            default_max_stack: DEFAULT_MAX_STACK,
        }
    }

    /// Override the cap used for ids missing from the catalog
    pub fn with_default_max_stack(mut self, cap: u32) -> Self {
        self.default_max_stack = cap.max(1);
        self
    }

    /// Register a new item
    pub fn register(&mut self, item: ItemDefinition) -> ItemResult<()> {
        if item.max_stack == 0 {
            return Err(ItemError::ZeroMaxStack(item.id));
        }
        if self.items.contains_key(&item.id) {
            return Err(ItemError::DuplicateItem(item.id));
        }

        self.order.push(item.id.clone());
        self.items.insert(item.id.clone(), item);
        Ok(())
    }

    /// Get an item by ID
    pub fn get_item(&self, id: &ItemId) -> Option<&ItemDefinition> {
        self.items.get(id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate definitions in registration order
    pub fn iter(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.order.iter().filter_map(|id| self.items.get(id))
    }

    /// Initialize with the default item set
    pub fn init_default_items(&mut self) -> ItemResult<()> {
        self.register(
            ItemDefinition::new("stone", "Stone", 999)
                .with_description("A small chunk of rock. Useful for crafting tools and building."),
        )?;
        self.register(
            ItemDefinition::new("fish", "Fish", 999)
                .with_description("A fresh catch! Can be cooked or sold for gold."),
        )?;
        self.register(
            ItemDefinition::new("carrot", "Carrot", 999)
                .with_description("A crunchy orange vegetable. Restores a little stamina."),
        )?;
        self.register(
            ItemDefinition::new("stoneAxe", "Stone Axe", 1)
                .with_description("A basic tool for chopping wood and breaking small rocks."),
        )?;
        self.register(
            ItemDefinition::new("campfire", "Campfire", 99)
                .with_description("Placeable campfire that lights up the night.")
                .with_placement("campfire", false),
        )?;
        self.register(
            ItemDefinition::new("fence", "Wood Fence", 99)
                .with_description("Placeable wooden fence segment.")
                .with_placement("fence", true),
        )?;
        Ok(())
    }

    /// Build a registry from TOML text (`[[items]]` tables)
    pub fn from_toml_str(text: &str) -> ItemResult<Self> {
        let file: ItemCatalogFile =
            toml::from_str(text).map_err(|e| ItemError::Parse(e.to_string()))?;
        Self::from_definitions(file.items)
    }

    /// Build a registry from JSON text (`{ "items": [...] }`)
    pub fn from_json_str(text: &str) -> ItemResult<Self> {
        let file: ItemCatalogFile =
            serde_json::from_str(text).map_err(|e| ItemError::Parse(e.to_string()))?;
        Self::from_definitions(file.items)
    }

    /// Load a catalog file, picking the format from its extension
    pub fn load<P: AsRef<Path>>(path: P) -> ItemResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let registry = match ConfigFormat::from_path(path) {
            Some(ConfigFormat::Json) => Self::from_json_str(&text)?,
            Some(ConfigFormat::Toml) => Self::from_toml_str(&text)?,
            None => {
                return Err(ItemError::Parse(format!(
                    "unsupported catalog extension: {}",
                    path.display()
                )))
            }
        };
        log::info!("Loaded {} items from {}", registry.len(), path.display());
        Ok(registry)
    }

    fn from_definitions(definitions: Vec<ItemDefinition>) -> ItemResult<Self> {
        let mut registry = Self::new();
        for definition in definitions {
            registry.register(definition)?;
        }
        Ok(registry)
    }
}

impl ItemCatalog for ItemRegistry {
    fn resolve_item(&self, id: &ItemId) -> Option<&ItemDefinition> {
        self.get_item(id)
    }

    fn default_max_stack(&self) -> u32 {
        self.default_max_stack
    }
}

impl Default for ItemRegistry {
    fn default() -> Self {
        let mut registry = Self::new();
        if let Err(e) = registry.init_default_items() {
            log::error!("Failed to register built-in items: {}", e);
            debug_assert!(false, "built-in items must register: {e}");
        }
        registry
    }
}
