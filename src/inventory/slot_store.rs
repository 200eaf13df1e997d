use super::{InventoryError, InventoryResult, ItemStack, Slot, SlotView};
use crate::item::{ItemCatalog, ItemId};
use std::ops::Range;

/// Shape of the slot index space: general slots first, hotbar slots trailing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryLayout {
    pub general_count: usize,
    pub hotbar_count: usize,
}

impl InventoryLayout {
    pub fn new(general_count: usize, hotbar_count: usize) -> Self {
        Self {
            general_count,
            hotbar_count,
        }
    }

    /// Total slot count
    pub fn len(&self) -> usize {
        self.general_count + self.hotbar_count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn general_range(&self) -> Range<usize> {
        0..self.general_count
    }

    pub fn hotbar_range(&self) -> Range<usize> {
        self.general_count..self.len()
    }

    pub fn is_hotbar(&self, index: usize) -> bool {
        self.hotbar_range().contains(&index)
    }

    /// Map a hotbar position (0..hotbar_count) to its slot index
    pub fn hotbar_slot(&self, position: usize) -> Option<usize> {
        (position < self.hotbar_count).then(|| self.general_count + position)
    }

    /// Placement pools in priority order: hotbar, then general
    pub fn deposit_pools(&self) -> [Range<usize>; 2] {
        [self.hotbar_range(), self.general_range()]
    }
}

impl Default for InventoryLayout {
    fn default() -> Self {
        Self::new(36, 9)
    }
}

/// Fixed-length ordered slot storage.
///
/// All writes go through [`SlotStore::set`] (or [`SlotStore::take`], which can only
/// empty a slot), so every slot always satisfies `count <= max_stack(item)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotStore {
    slots: Vec<Slot>,
    layout: InventoryLayout,
}

impl SlotStore {
    /// Create a store with every slot empty
    pub fn new(layout: InventoryLayout) -> Self {
        Self {
            slots: vec![Slot::empty(); layout.len()],
            layout,
        }
    }

    pub fn layout(&self) -> InventoryLayout {
        self.layout
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Get a slot by index
    pub fn get(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// Get a slot by index, failing when out of range
    pub fn slot(&self, index: usize) -> InventoryResult<&Slot> {
        self.slots.get(index).ok_or(InventoryError::SlotOutOfRange {
            index,
            len: self.slots.len(),
        })
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Slot)> {
        self.slots.iter().enumerate()
    }

    /// Check that `slot` may be written at `index`
    pub fn validate<C: ItemCatalog + ?Sized>(
        &self,
        index: usize,
        slot: &Slot,
        catalog: &C,
    ) -> InventoryResult<()> {
        self.slot(index)?;
        if let Some(stack) = slot.get_item() {
            let cap = catalog.stack_cap(&stack.item_id);
            if stack.count > cap {
                return Err(InventoryError::invalid(
                    index,
                    format!("{} x{} exceeds max stack {}", stack.item_id, stack.count, cap),
                ));
            }
        }
        Ok(())
    }

    /// Write a slot, rejecting writes that break the stack cap
    pub fn set<C: ItemCatalog + ?Sized>(
        &mut self,
        index: usize,
        slot: Slot,
        catalog: &C,
    ) -> InventoryResult<()> {
        self.validate(index, &slot, catalog)?;
        self.slots[index] = slot;
        Ok(())
    }

    /// Empty a slot, returning its previous stack
    pub fn take(&mut self, index: usize) -> InventoryResult<Option<ItemStack>> {
        let len = self.slots.len();
        self.slots
            .get_mut(index)
            .map(Slot::take_item)
            .ok_or(InventoryError::SlotOutOfRange { index, len })
    }

    /// Empty every slot
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.take_item();
        }
    }

    /// First slot index matching `predicate`
    pub fn find<P>(&self, mut predicate: P) -> Option<usize>
    where
        P: FnMut(&Slot) -> bool,
    {
        self.slots.iter().position(|slot| predicate(slot))
    }

    /// First empty slot index
    pub fn first_empty(&self) -> Option<usize> {
        self.find(Slot::is_empty)
    }

    /// Total count of `item_id` across all slots
    pub fn sum(&self, item_id: &ItemId) -> u64 {
        self.slots
            .iter()
            .filter(|slot| slot.holds(item_id))
            .map(|slot| u64::from(slot.count()))
            .sum()
    }

    /// Flat view of every slot in index order
    pub fn views(&self) -> Vec<SlotView> {
        self.slots.iter().map(SlotView::from).collect()
    }

    /// Replace the whole slot sequence after checking each slot.
    ///
    /// Nothing is written unless every slot passes.
    pub fn replace_all<C: ItemCatalog + ?Sized>(
        &mut self,
        slots: Vec<Slot>,
        catalog: &C,
    ) -> InventoryResult<()> {
        if slots.len() != self.slots.len() {
            return Err(InventoryError::invalid(
                slots.len(),
                format!("expected {} slots, got {}", self.slots.len(), slots.len()),
            ));
        }
        for (index, slot) in slots.iter().enumerate() {
            self.validate(index, slot, catalog)?;
        }
        self.slots = slots;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemRegistry;

    fn store() -> SlotStore {
        SlotStore::new(InventoryLayout::new(4, 2))
    }

    #[test]
    fn test_store_initialization() {
        let store = store();
        assert_eq!(store.len(), 6);
        assert!(store.slots().iter().all(Slot::is_empty));
        assert_eq!(store.layout().hotbar_range(), 4..6);
        assert_eq!(store.layout().general_range(), 0..4);
    }

    #[test]
    fn test_layout_helpers() {
        let layout = InventoryLayout::new(4, 2);
        assert!(layout.is_hotbar(4));
        assert!(!layout.is_hotbar(3));
        assert_eq!(layout.hotbar_slot(1), Some(5));
        assert_eq!(layout.hotbar_slot(2), None);
        assert_eq!(layout.deposit_pools(), [4..6, 0..4]);
    }

    #[test]
    fn test_set_rejects_over_cap() {
        let catalog = ItemRegistry::default();
        let mut store = store();

        store
            .set(0, Slot::of("stoneAxe", 1), &catalog)
            .expect("one axe fits");
        let err = store
            .set(1, Slot::of("stoneAxe", 2), &catalog)
            .expect_err("two axes exceed the cap");
        assert!(matches!(err, InventoryError::InvalidSlotState { index: 1, .. }));
        assert!(store.get(1).map_or(false, Slot::is_empty));
    }

    #[test]
    fn test_set_out_of_range() {
        let catalog = ItemRegistry::default();
        let mut store = store();
        assert_eq!(
            store.set(6, Slot::of("stone", 1), &catalog),
            Err(InventoryError::SlotOutOfRange { index: 6, len: 6 })
        );
        assert!(store.get(6).is_none());
    }

    #[test]
    fn test_sum_and_find() {
        let catalog = ItemRegistry::default();
        let mut store = store();
        store.set(1, Slot::of("stone", 5), &catalog).expect("write");
        store.set(4, Slot::of("stone", 7), &catalog).expect("write");
        store.set(2, Slot::of("fish", 1), &catalog).expect("write");

        assert_eq!(store.sum(&ItemId::new("stone")), 12);
        assert_eq!(store.sum(&ItemId::new("carrot")), 0);
        assert_eq!(store.find(|slot| slot.holds(&ItemId::new("fish"))), Some(2));
        assert_eq!(store.first_empty(), Some(0));
    }

    #[test]
    fn test_sum_past_u32_range() {
        let mut catalog = ItemRegistry::new();
        catalog
            .register(crate::item::ItemDefinition::new("gold", "Gold", 3_000_000_000))
            .expect("register");
        let mut store = store();
        store.set(0, Slot::of("gold", 3_000_000_000), &catalog).expect("write");
        store.set(5, Slot::of("gold", 3_000_000_000), &catalog).expect("write");

        assert_eq!(store.sum(&ItemId::new("gold")), 6_000_000_000);
    }

    #[test]
    fn test_take_empties_slot() {
        let catalog = ItemRegistry::default();
        let mut store = store();
        store.set(3, Slot::of("carrot", 2), &catalog).expect("write");

        assert_eq!(store.take(3), Ok(Some(ItemStack::new("carrot", 2))));
        assert_eq!(store.take(3), Ok(None));
        assert!(store.take(9).is_err());
    }

    #[test]
    fn test_replace_all_is_all_or_nothing() {
        let catalog = ItemRegistry::default();
        let mut store = store();
        store.set(0, Slot::of("fish", 1), &catalog).expect("write");

        let mut bad = vec![Slot::empty(); 6];
        bad[0] = Slot::of("stone", 3);
        bad[5] = Slot::of("stoneAxe", 4);
        assert!(store.replace_all(bad, &catalog).is_err());
        assert_eq!(store.get(0), Some(&Slot::of("fish", 1)));

        assert!(store.replace_all(vec![Slot::empty(); 3], &catalog).is_err());

        let mut good = vec![Slot::empty(); 6];
        good[5] = Slot::of("stoneAxe", 1);
        store.replace_all(good, &catalog).expect("valid slots are accepted");
        assert!(store.get(0).map_or(false, Slot::is_empty));
        assert_eq!(store.get(5), Some(&Slot::of("stoneAxe", 1)));
    }
}
