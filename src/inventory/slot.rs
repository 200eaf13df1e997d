//! Canonical slot representation.
//!
//! A slot is either empty or holds one non-empty stack. Zero-count stacks never
//! survive construction: they collapse into the empty slot, so callers only ever
//! test emptiness one way.

use super::ItemStack;
use crate::item::ItemId;
use serde::{Deserialize, Serialize};

/// A single storage cell
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Slot {
    item: Option<ItemStack>,
}

impl Slot {
    /// Create an empty slot
    pub fn empty() -> Self {
        Self { item: None }
    }

    /// Create a slot with an item; a zero-count stack yields the empty slot
    pub fn with_item(item: ItemStack) -> Self {
        if item.is_empty() {
            Self::empty()
        } else {
            Self { item: Some(item) }
        }
    }

    pub fn of(item_id: impl Into<ItemId>, count: u32) -> Self {
        Self::with_item(ItemStack::new(item_id, count))
    }

    /// Check if slot is empty
    pub fn is_empty(&self) -> bool {
        self.item.is_none()
    }

    /// Get the item stack in this slot
    pub fn get_item(&self) -> Option<&ItemStack> {
        self.item.as_ref()
    }

    pub fn item_id(&self) -> Option<&ItemId> {
        self.item.as_ref().map(|stack| &stack.item_id)
    }

    /// Count held, zero when empty
    pub fn count(&self) -> u32 {
        self.item.as_ref().map_or(0, |stack| stack.count)
    }

    /// Check if this slot holds `item_id`
    pub fn holds(&self, item_id: &ItemId) -> bool {
        self.item_id() == Some(item_id)
    }

    /// Take the stack out, leaving the slot empty
    pub fn take_item(&mut self) -> Option<ItemStack> {
        self.item.take()
    }

    pub fn into_item(self) -> Option<ItemStack> {
        self.item
    }
}

impl From<ItemStack> for Slot {
    fn from(stack: ItemStack) -> Self {
        Slot::with_item(stack)
    }
}

impl From<Option<ItemStack>> for Slot {
    fn from(stack: Option<ItemStack>) -> Self {
        stack.map_or_else(Slot::empty, Slot::with_item)
    }
}

/// Flat `{ itemId | null, count }` form of a slot.
///
/// Used for the hotbar view handed to renderers and for save data. The item field
/// accepts both `itemId` and `id` on input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotView {
    #[serde(alias = "id")]
    pub item_id: Option<ItemId>,
    #[serde(default)]
    pub count: u32,
}

impl From<&Slot> for SlotView {
    fn from(slot: &Slot) -> Self {
        match slot.get_item() {
            Some(stack) => SlotView {
                item_id: Some(stack.item_id.clone()),
                count: stack.count,
            },
            None => SlotView::default(),
        }
    }
}

impl SlotView {
    pub fn is_empty(&self) -> bool {
        self.item_id.is_none()
    }

    /// Normalize into a slot. An id with a zero count is treated as empty; a count
    /// without an id is rejected.
    pub fn to_slot(&self) -> Result<Slot, String> {
        match (&self.item_id, self.count) {
            (Some(id), count) => Ok(Slot::of(id.clone(), count)),
            (None, 0) => Ok(Slot::empty()),
            (None, count) => Err(format!("count {} without an item id", count)),
        }
    }
}
