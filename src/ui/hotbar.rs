//! Read-only hotbar view over the trailing slots of a store.

use crate::inventory::{SlotStore, SlotView};

/// Default number of hotbar slots
pub const HOTBAR_SIZE: usize = 9;

/// Derives the hotbar view and tracks the selected hotbar position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotbarProjector {
    size: usize,
    selected: usize,
    view: Vec<SlotView>,
}

impl HotbarProjector {
    /// A `size` of zero is raised to one; `Inventory::new` refuses such layouts outright
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            size,
            selected: 0,
            view: vec![SlotView::default(); size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Recompute the view from the trailing `size` slots of `store`.
    ///
    /// Every position is filled: empty slots (and positions past a store shorter than
    /// the hotbar) show as `{ item_id: None, count: 0 }`.
    pub fn project(&mut self, store: &SlotStore) -> &[SlotView] {
        let start = store.len().saturating_sub(self.size);
        let mut view: Vec<SlotView> = store.slots()[start..].iter().map(SlotView::from).collect();
        view.resize(self.size, SlotView::default());
        self.view = view;
        &self.view
    }

    /// View as of the last `project` call
    pub fn view(&self) -> &[SlotView] {
        &self.view
    }

    /// Selected hotbar position, in `0..size`
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_view(&self) -> &SlotView {
        &self.view[self.selected]
    }

    /// Store index of the selected hotbar position
    pub fn selected_slot_index(&self, store: &SlotStore) -> usize {
        store.len().saturating_sub(self.size) + self.selected
    }

    /// Select a position, clamping out-of-range requests into range
    pub fn select(&mut self, index: usize) {
        self.selected = index.min(self.size - 1);
    }

    /// Select by number key `1..=size`; any other key is ignored.
    ///
    /// Returns whether the key was accepted.
    pub fn select_key(&mut self, key: u32) -> bool {
        match usize::try_from(key) {
            Ok(key) if (1..=self.size).contains(&key) => {
                self.select(key - 1);
                true
            }
            _ => false,
        }
    }

    /// Move the selection by `delta` positions, wrapping at either end
    pub fn cycle(&mut self, delta: i32) {
        let size = self.size as i64;
        let next = (self.selected as i64 + i64::from(delta)).rem_euclid(size);
        self.selected = next as usize;
    }
}

impl Default for HotbarProjector {
    fn default() -> Self {
        Self::new(HOTBAR_SIZE)
    }
}
