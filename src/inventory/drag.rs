//! Held-stack state machine behind click-to-drag inventory interaction.
//!
//! `Idle` ⇄ `Holding`. A stack leaves the store on pick-up and goes back on a slot
//! drop, or leaves the inventory entirely on an outside drop.

use super::allocator::deposit;
use super::{InventoryError, InventoryResult, ItemStack, Slot, SlotStore, WorldSpawner};
use crate::item::ItemCatalog;
use glam::Vec2;

/// Drag state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Holding {
        held: ItemStack,
        /// Slot the stack was lifted from; cleared by a swap
        origin: Option<usize>,
    },
}

/// What a drop onto a slot did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// Held stack moved into an empty slot
    Placed,
    /// Held stack merged into a matching stack; `overflow` items are still held
    Merged { overflow: u32 },
    /// Held stack swapped with a different item, which is now held
    Swapped,
}

#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_holding(&self) -> bool {
        matches!(self.state, DragState::Holding { .. })
    }

    /// Stack currently in hand, for drawing the drag ghost
    pub fn held(&self) -> Option<&ItemStack> {
        match &self.state {
            DragState::Holding { held, .. } => Some(held),
            DragState::Idle => None,
        }
    }

    pub fn origin(&self) -> Option<usize> {
        match &self.state {
            DragState::Holding { origin, .. } => *origin,
            DragState::Idle => None,
        }
    }

    /// Lift the whole stack out of `index`
    pub fn pick_up(&mut self, store: &mut SlotStore, index: usize) -> InventoryResult<()> {
        if self.is_holding() {
            return Err(InventoryError::AlreadyHolding);
        }
        if store.slot(index)?.is_empty() {
            return Err(InventoryError::EmptySlot(index));
        }

        let held = store.take(index)?.ok_or(InventoryError::EmptySlot(index))?;
        log::debug!("Picked up {} x{} from slot {}", held.item_id, held.count, index);
        self.state = DragState::Holding {
            held,
            origin: Some(index),
        };
        Ok(())
    }

    /// Release the held stack onto slot `index`
    pub fn drop_on_slot<C: ItemCatalog + ?Sized>(
        &mut self,
        store: &mut SlotStore,
        catalog: &C,
        index: usize,
    ) -> InventoryResult<DropOutcome> {
        let DragState::Holding { held, origin } = &self.state else {
            return Err(InventoryError::NothingHeld);
        };
        let destination = store.slot(index)?.clone();

        let (next, outcome) = match destination.into_item() {
            None => {
                store.set(index, Slot::with_item(held.clone()), catalog)?;
                (DragState::Idle, DropOutcome::Placed)
            }
            Some(existing) if existing.item_id == held.item_id => {
                let max_stack = catalog.max_stack_for(&held.item_id);
                let total = u64::from(existing.count) + u64::from(held.count);
                // A slot already at or over the cap keeps its count
                let placed = total.min(u64::from(max_stack.max(existing.count))) as u32;
                // placed >= existing.count, so the overflow never exceeds the held count
                let overflow = (total - u64::from(placed)) as u32;
                if placed != existing.count {
                    store.set(index, Slot::of(held.item_id.clone(), placed), catalog)?;
                }
                let next = if overflow == 0 {
                    DragState::Idle
                } else {
                    DragState::Holding {
                        held: ItemStack::new(held.item_id.clone(), overflow),
                        origin: *origin,
                    }
                };
                (next, DropOutcome::Merged { overflow })
            }
            Some(existing) => {
                store.set(index, Slot::with_item(held.clone()), catalog)?;
                let next = DragState::Holding {
                    held: existing,
                    origin: None,
                };
                (next, DropOutcome::Swapped)
            }
        };

        log::debug!("Dropped on slot {}: {:?}", index, outcome);
        self.state = next;
        Ok(outcome)
    }

    /// Release the held stack outside the inventory surface, handing it to the world
    pub fn drop_outside<S: WorldSpawner + ?Sized>(
        &mut self,
        spawner: &mut S,
        position: Vec2,
    ) -> InventoryResult<ItemStack> {
        let DragState::Holding { held, .. } = std::mem::take(&mut self.state) else {
            return Err(InventoryError::NothingHeld);
        };
        log::debug!(
            "Dropped {} x{} into the world at ({}, {})",
            held.item_id,
            held.count,
            position.x,
            position.y
        );
        spawner.spawn_dropped_item(&held.item_id, held.count, position);
        Ok(held)
    }

    /// Put the held stack back.
    ///
    /// Returns it verbatim to its origin slot when that slot is still empty. Otherwise
    /// the stack is deposited through the allocator; whatever does not fit stays held
    /// and is returned as the leftover count.
    pub fn cancel<C: ItemCatalog + ?Sized>(
        &mut self,
        store: &mut SlotStore,
        catalog: &C,
    ) -> InventoryResult<u32> {
        let DragState::Holding { held, origin } = &self.state else {
            return Err(InventoryError::NothingHeld);
        };

        if let Some(index) = *origin {
            if store.slot(index)?.is_empty() {
                store.set(index, Slot::with_item(held.clone()), catalog)?;
                log::debug!("Returned {} x{} to slot {}", held.item_id, held.count, index);
                self.state = DragState::Idle;
                return Ok(0);
            }
        }

        let leftover = deposit(store, catalog, &held.item_id, held.count)?;
        self.state = if leftover == 0 {
            DragState::Idle
        } else {
            DragState::Holding {
                held: ItemStack::new(held.item_id.clone(), leftover),
                origin: None,
            }
        };
        Ok(leftover)
    }
}
