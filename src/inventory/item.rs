use crate::item::ItemId;
use serde::{Deserialize, Serialize};

/// Represents a stack of items
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemStack {
    pub item_id: ItemId,
    pub count: u32,
}

impl ItemStack {
    /// Create a new item stack
    pub fn new(item_id: impl Into<ItemId>, count: u32) -> Self {
        Self {
            item_id: item_id.into(),
            count,
        }
    }

    /// Create a single item
    pub fn single(item_id: impl Into<ItemId>) -> Self {
        Self::new(item_id, 1)
    }

    /// Check if this stack can take more of `other` under `max_stack`
    pub fn can_merge_with(&self, other: &ItemStack, max_stack: u32) -> bool {
        self.item_id == other.item_id && self.count < max_stack
    }

    /// Room left in this stack under `max_stack`
    pub fn spare(&self, max_stack: u32) -> u32 {
        max_stack.saturating_sub(self.count)
    }

    /// Try to add items to this stack, returns remaining items
    pub fn try_add(&mut self, count: u32, max_stack: u32) -> u32 {
        let to_add = count.min(self.spare(max_stack));
        self.count += to_add;
        count - to_add
    }

    /// Split the stack, taking up to the specified count
    pub fn split(&mut self, count: u32) -> Option<ItemStack> {
        if count == 0 || self.count == 0 {
            return None;
        }
        let taken = count.min(self.count);
        self.count -= taken;
        Some(ItemStack::new(self.item_id.clone(), taken))
    }

    /// Check if stack is empty
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Check if stack is full
    pub fn is_full(&self, max_stack: u32) -> bool {
        self.count >= max_stack
    }
}
