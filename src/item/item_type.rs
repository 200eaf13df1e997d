use serde::{Deserialize, Serialize};
use std::fmt;

/// Stack cap applied to item ids the catalog does not know about
pub const DEFAULT_MAX_STACK: u32 = 999;

/// Unique identifier for an item type
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// World block an item turns into when used from the hotbar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Block id handed to the world when placing
    pub block: String,
    /// Whether the block may overlap the actor placing it
    #[serde(default)]
    pub on_player: bool,
}

/// Static catalog entry for one item type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub id: ItemId,
    /// Display name shown in tooltips
    #[serde(default)]
    pub name: String,
    /// Tooltip body
    #[serde(default)]
    pub description: String,
    /// Largest count a single slot may hold (1 = non-stackable)
    #[serde(alias = "maxStack")]
    pub max_stack: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement>,
}

impl ItemDefinition {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, max_stack: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            max_stack,
            placement: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_placement(mut self, block: impl Into<String>, on_player: bool) -> Self {
        self.placement = Some(Placement {
            block: block.into(),
            on_player,
        });
        self
    }

    /// Check if more than one of this item fits in a slot
    pub fn is_stackable(&self) -> bool {
        self.max_stack > 1
    }

    /// Check if this item places a block when used
    pub fn is_placeable(&self) -> bool {
        self.placement.is_some()
    }
}

/// Lookup of item definitions by id.
///
/// Every component that needs a stack cap goes through `max_stack_for`, so an id missing
/// from the catalog degrades to `default_max_stack` instead of failing the operation.
pub trait ItemCatalog {
    fn resolve_item(&self, id: &ItemId) -> Option<&ItemDefinition>;

    fn default_max_stack(&self) -> u32 {
        DEFAULT_MAX_STACK
    }

    /// Cap for `id`, warning when the id is not in the catalog
    fn max_stack_for(&self, id: &ItemId) -> u32 {
        match self.resolve_item(id) {
            Some(definition) => definition.max_stack,
            None => {
                let fallback = self.default_max_stack();
                log::warn!("Unknown item '{}', using default stack cap {}", id, fallback);
                fallback
            }
        }
    }

    /// Same cap as `max_stack_for` without logging, for repeated per-slot checks
    fn stack_cap(&self, id: &ItemId) -> u32 {
        self.resolve_item(id)
            .map_or_else(|| self.default_max_stack(), |definition| definition.max_stack)
    }
}
