use crate::inventory::{Inventory, SlotView};
use crate::persistence::{PersistenceError, PersistenceResult};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::path::Path;

/// Saved inventory contents: one `{ itemId, count }` entry per slot, in index order.
///
/// The held stack is never part of a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InventorySnapshot {
    slots: Vec<SlotView>,
}

impl InventorySnapshot {
    pub fn new(slots: Vec<SlotView>) -> Self {
        Self { slots }
    }

    /// Capture the current slot contents
    pub fn capture(inventory: &Inventory) -> Self {
        Self::new(inventory.snapshot())
    }

    pub fn slots(&self) -> &[SlotView] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Replace the inventory's slots with this snapshot.
    ///
    /// The slot count must match exactly; a held stack or an invalid slot rejects the
    /// whole snapshot.
    pub fn apply(&self, inventory: &mut Inventory) -> PersistenceResult<()> {
        if self.slots.len() != inventory.len() {
            return Err(PersistenceError::LengthMismatch {
                expected: inventory.len(),
                found: self.slots.len(),
            });
        }
        inventory.restore(&self.slots)?;
        Ok(())
    }

    pub fn to_json(&self) -> PersistenceResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> PersistenceResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Save snapshot to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> PersistenceResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // Write to a `<name>.tmp` sibling first
        let mut temp_name = path.file_name().map(OsString::from).unwrap_or_default();
        temp_name.push(".tmp");
        let temp_path = path.with_file_name(temp_name);
        fs::write(&temp_path, self.to_json()?)?;
        fs::rename(&temp_path, path)?;

        log::info!("Saved {} inventory slots to {}", self.slots.len(), path.display());
        Ok(())
    }

    /// Load snapshot from file
    pub fn load<P: AsRef<Path>>(path: P) -> PersistenceResult<Self> {
        let path = path.as_ref();
        let snapshot = Self::from_json(&fs::read_to_string(path)?)?;
        log::info!("Loaded {} inventory slots from {}", snapshot.len(), path.display());
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{InventoryError, InventoryLayout};
    use crate::item::{ItemId, ItemRegistry};
    use std::rc::Rc;
    use tempfile::TempDir;

    fn inventory() -> Inventory {
        Inventory::new(InventoryLayout::new(2, 2), Rc::new(ItemRegistry::default())).expect("layout")
    }

    #[test]
    fn test_json_shape() {
        let mut inventory = inventory();
        inventory.add_item("fish", 3).expect("deposit");
        let json = InventorySnapshot::capture(&inventory).to_json().expect("serialize");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

        assert_eq!(value[0], serde_json::json!({ "itemId": null, "count": 0 }));
        assert_eq!(value[2], serde_json::json!({ "itemId": "fish", "count": 3 }));
    }

    #[test]
    fn test_accepts_id_alias() {
        let text = r#"[{ "id": "stone", "count": 4 }, { "itemId": null, "count": 0 }, {}, { "id": "carrot", "count": 0 }]"#;
        let snapshot = InventorySnapshot::from_json(text).expect("parse");
        let mut inventory = inventory();
        snapshot.apply(&mut inventory).expect("apply");

        assert_eq!(inventory.count(&ItemId::new("stone")), 4);
        assert!(inventory.slot(3).map_or(false, |slot| slot.is_empty()));
    }

    #[test]
    fn test_length_mismatch() {
        let mut inventory = inventory();
        let snapshot = InventorySnapshot::new(vec![SlotView::default(); 3]);
        assert!(matches!(
            snapshot.apply(&mut inventory),
            Err(PersistenceError::LengthMismatch { expected: 4, found: 3 })
        ));
    }

    #[test]
    fn test_rejects_over_cap() {
        let mut inventory = inventory();
        let text = r#"[{ "id": "stoneAxe", "count": 3 }, {}, {}, {}]"#;
        let snapshot = InventorySnapshot::from_json(text).expect("parse");
        assert!(matches!(
            snapshot.apply(&mut inventory),
            Err(PersistenceError::Inventory(InventoryError::InvalidSlotState { index: 0, .. }))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("saves").join("inventory.json");

        let mut inventory = inventory();
        inventory.add_item("stone", 1200).expect("deposit");
        let snapshot = InventorySnapshot::capture(&inventory);
        snapshot.save(&path).expect("save");
        assert!(!path.with_file_name("inventory.json.tmp").exists());

        let loaded = InventorySnapshot::load(&path).expect("load");
        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn test_save_leaves_same_stem_tmp_file_alone() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("inventory.json");
        let neighbour = temp_dir.path().join("inventory.tmp");
        fs::write(&neighbour, "unrelated").expect("write neighbour");

        InventorySnapshot::capture(&inventory()).save(&path).expect("save");

        assert_eq!(fs::read_to_string(&neighbour).expect("read neighbour"), "unrelated");
        assert!(!temp_dir.path().join("inventory.json.tmp").exists());
        assert!(path.exists());
    }
}
