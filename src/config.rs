//! Inventory configuration
//!
//! Loaded from TOML; every field has a default so an empty file is a valid config.

use crate::crafting::CraftPolicy;
use crate::inventory::InventoryLayout;
use crate::item::DEFAULT_MAX_STACK;
use crate::ui::PanelLayout;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Data file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Some(ConfigFormat::Json),
            Some("toml") => Some(ConfigFormat::Toml),
            _ => None,
        }
    }
}

/// Inventory configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Slots outside the hotbar
    pub general_count: usize,
    /// Trailing slots exposed as the hotbar
    pub hotbar_count: usize,
    /// Stack cap for ids missing from the item catalog
    pub default_max_stack: u32,
    pub craft_policy: CraftPolicy,
    pub panel: PanelLayout,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            general_count: 36,
            hotbar_count: 9,
            default_max_stack: DEFAULT_MAX_STACK,
            craft_policy: CraftPolicy::default(),
            panel: PanelLayout::default(),
        }
    }
}

impl InventoryConfig {
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let config = Self::from_toml_str(&fs::read_to_string(path)?)?;
        log::info!("Loaded inventory config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.hotbar_count == 0 {
            return Err(ConfigError::Invalid("hotbar_count must be at least 1".into()));
        }
        if self.default_max_stack == 0 {
            return Err(ConfigError::Invalid("default_max_stack must be at least 1".into()));
        }
        if self.panel.columns == 0 {
            return Err(ConfigError::Invalid("panel.columns must be at least 1".into()));
        }
        Ok(())
    }

    pub fn layout(&self) -> InventoryLayout {
        InventoryLayout::new(self.general_count, self.hotbar_count)
    }
}
