//! Player inventory facade.
//!
//! Owns the slot store, the drag controller and the hotbar view, and keeps the hotbar
//! in step with the store: every successful mutation reprojects it and notifies the
//! observer, if one is installed.

use super::allocator::deposit;
use super::drag::{DragController, DropOutcome};
use super::{
    InventoryError, InventoryLayout, InventoryResult, ItemStack, Slot, SlotStore, SlotView,
    WorldSpawner,
};
use crate::config::InventoryConfig;
use crate::crafting::{CraftOutcome, CraftPolicy, CraftingEngine, Ingredient, Recipe, RecipeRegistry};
use crate::item::{ItemCatalog, ItemDefinition, ItemId, ItemRegistry};
use crate::ui::HotbarProjector;
use glam::Vec2;
use std::fmt;
use std::rc::Rc;

/// Callback receiving the fresh hotbar view and the selected hotbar position
pub type HotbarObserver = Box<dyn FnMut(&[SlotView], usize)>;

/// Stack in the selected hotbar slot plus its catalog entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectedItem<'a> {
    pub slot_index: usize,
    pub stack: &'a ItemStack,
    /// `None` when the id is not in the catalog
    pub definition: Option<&'a ItemDefinition>,
}

/// Tooltip text for a slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemTooltip {
    pub name: String,
    pub description: String,
    pub count: u32,
}

pub struct Inventory {
    store: SlotStore,
    drag: DragController,
    hotbar: HotbarProjector,
    items: Rc<ItemRegistry>,
    crafting: CraftingEngine,
    observer: Option<HotbarObserver>,
}

impl Inventory {
    /// Create an empty inventory; the layout must have at least one hotbar slot
    pub fn new(layout: InventoryLayout, items: Rc<ItemRegistry>) -> InventoryResult<Self> {
        if layout.hotbar_count == 0 {
            return Err(InventoryError::NoHotbar);
        }
        Ok(Self::build(layout, items))
    }

    fn build(layout: InventoryLayout, items: Rc<ItemRegistry>) -> Self {
        let store = SlotStore::new(layout);
        let mut hotbar = HotbarProjector::new(layout.hotbar_count);
        hotbar.project(&store);
        Self {
            store,
            drag: DragController::new(),
            hotbar,
            items,
            crafting: CraftingEngine::default(),
            observer: None,
        }
    }

    pub fn from_config(config: &InventoryConfig, items: Rc<ItemRegistry>) -> InventoryResult<Self> {
        Ok(Self::new(config.layout(), items)?.with_policy(config.craft_policy))
    }

    pub fn with_policy(mut self, policy: CraftPolicy) -> Self {
        self.crafting = CraftingEngine::new(policy);
        self
    }

    /// Install the callback run after every mutation
    pub fn set_hotbar_observer<F>(&mut self, observer: F)
    where
        F: FnMut(&[SlotView], usize) + 'static,
    {
        self.observer = Some(Box::new(observer));
    }

    pub fn clear_hotbar_observer(&mut self) {
        self.observer = None;
    }

    pub fn store(&self) -> &SlotStore {
        &self.store
    }

    pub fn layout(&self) -> InventoryLayout {
        self.store.layout()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.store.get(index)
    }

    pub fn items(&self) -> &ItemRegistry {
        &self.items
    }

    pub fn policy(&self) -> CraftPolicy {
        self.crafting.policy()
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn is_holding(&self) -> bool {
        self.drag.is_holding()
    }

    pub fn held(&self) -> Option<&ItemStack> {
        self.drag.held()
    }

    pub fn hotbar(&self) -> &HotbarProjector {
        &self.hotbar
    }

    /// Total count of `item_id` across all slots, excluding anything held
    pub fn count(&self, item_id: &ItemId) -> u64 {
        self.store.sum(item_id)
    }

    /// Slot contents in index order
    pub fn snapshot(&self) -> Vec<SlotView> {
        self.store.views()
    }

    /// Deposit `count` items, returning the leftover that did not fit
    pub fn add_item(&mut self, item_id: impl Into<ItemId>, count: u32) -> InventoryResult<u32> {
        let item_id = item_id.into();
        let leftover = deposit(&mut self.store, &*self.items, &item_id, count)?;
        if leftover > 0 {
            log::warn!(
                "Inventory full, {} of {} x{} did not fit",
                leftover,
                item_id,
                count
            );
        }
        self.refresh_hotbar();
        Ok(leftover)
    }

    pub fn can_craft(&self, recipe: &Recipe) -> bool {
        self.crafting.can_craft(&self.store, recipe)
    }

    pub fn missing(&self, recipe: &Recipe) -> Vec<Ingredient> {
        self.crafting.missing(&self.store, recipe)
    }

    pub fn craftable<'r>(&self, recipes: &'r RecipeRegistry) -> Vec<&'r Recipe> {
        self.crafting.craftable(&self.store, recipes)
    }

    pub fn craft(&mut self, recipe: &Recipe) -> InventoryResult<CraftOutcome> {
        let outcome = self.crafting.craft(&mut self.store, &*self.items, recipe)?;
        if outcome.is_crafted() {
            self.refresh_hotbar();
        }
        Ok(outcome)
    }

    pub fn pick_up(&mut self, index: usize) -> InventoryResult<()> {
        self.drag.pick_up(&mut self.store, index)?;
        self.refresh_hotbar();
        Ok(())
    }

    pub fn drop_on_slot(&mut self, index: usize) -> InventoryResult<DropOutcome> {
        let outcome = self.drag.drop_on_slot(&mut self.store, &*self.items, index)?;
        self.refresh_hotbar();
        Ok(outcome)
    }

    /// Hand the held stack to the world at `position`
    pub fn drop_outside<S: WorldSpawner + ?Sized>(
        &mut self,
        spawner: &mut S,
        position: Vec2,
    ) -> InventoryResult<ItemStack> {
        let dropped = self.drag.drop_outside(spawner, position)?;
        self.refresh_hotbar();
        Ok(dropped)
    }

    /// Put the held stack back; returns the count still held
    pub fn cancel_drag(&mut self) -> InventoryResult<u32> {
        let leftover = self.drag.cancel(&mut self.store, &*self.items)?;
        self.refresh_hotbar();
        Ok(leftover)
    }

    pub fn selected_hotbar_index(&self) -> usize {
        self.hotbar.selected()
    }

    /// Select a hotbar position, clamped into range
    pub fn select_hotbar_slot(&mut self, position: usize) {
        self.hotbar.select(position);
        self.notify();
    }

    /// Select by number key; returns false for keys outside `1..=hotbar size`
    pub fn select_key(&mut self, key: u32) -> bool {
        let accepted = self.hotbar.select_key(key);
        if accepted {
            self.notify();
        }
        accepted
    }

    pub fn cycle_hotbar(&mut self, delta: i32) {
        self.hotbar.cycle(delta);
        self.notify();
    }

    /// The stack in the selected hotbar slot, with its placement data
    pub fn selected_item(&self) -> Option<SelectedItem<'_>> {
        let slot_index = self.hotbar.selected_slot_index(&self.store);
        let stack = self.store.get(slot_index)?.get_item()?;
        Some(SelectedItem {
            slot_index,
            stack,
            definition: self.items.resolve_item(&stack.item_id),
        })
    }

    /// Remove up to `count` items from the selected hotbar slot
    pub fn consume_selected(&mut self, count: u32) -> InventoryResult<Option<ItemStack>> {
        let index = self.hotbar.selected_slot_index(&self.store);
        let Some(mut stack) = self.store.slot(index)?.get_item().cloned() else {
            return Ok(None);
        };
        let Some(removed) = stack.split(count.min(stack.count)) else {
            return Ok(None);
        };
        self.store.set(index, Slot::with_item(stack), &*self.items)?;
        log::debug!("Consumed {} x{} from slot {}", removed.item_id, removed.count, index);
        self.refresh_hotbar();
        Ok(Some(removed))
    }

    /// Tooltip for the stack in `index`, `None` for an empty slot
    pub fn describe(&self, index: usize) -> Option<ItemTooltip> {
        let stack = self.store.get(index)?.get_item()?;
        let tooltip = match self.items.resolve_item(&stack.item_id) {
            Some(definition) => ItemTooltip {
                name: definition.name.clone(),
                description: definition.description.clone(),
                count: stack.count,
            },
            None => ItemTooltip {
                name: stack.item_id.to_string(),
                description: String::new(),
                count: stack.count,
            },
        };
        Some(tooltip)
    }

    /// Replace every slot from a snapshot.
    ///
    /// Refused while a stack is held; otherwise the snapshot must match the slot count
    /// and every slot must satisfy the stack invariants, or nothing changes.
    pub fn restore(&mut self, views: &[SlotView]) -> InventoryResult<()> {
        if self.drag.is_holding() {
            return Err(InventoryError::DragInProgress);
        }
        let slots = views
            .iter()
            .enumerate()
            .map(|(index, view)| view.to_slot().map_err(|reason| InventoryError::invalid(index, reason)))
            .collect::<InventoryResult<Vec<Slot>>>()?;
        self.store.replace_all(slots, &*self.items)?;
        log::info!("Restored inventory with {} slots", views.len());
        self.refresh_hotbar();
        Ok(())
    }

    fn refresh_hotbar(&mut self) {
        self.hotbar.project(&self.store);
        self.notify();
    }

    fn notify(&mut self) {
        let selected = self.hotbar.selected();
        if let Some(observer) = self.observer.as_mut() {
            observer(self.hotbar.view(), selected);
        }
    }
}

impl fmt::Debug for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inventory")
            .field("store", &self.store)
            .field("drag", &self.drag)
            .field("hotbar", &self.hotbar)
            .field("policy", &self.crafting.policy())
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::build(InventoryLayout::default(), Rc::new(ItemRegistry::default()))
    }
}
