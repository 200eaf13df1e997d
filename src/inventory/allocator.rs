//! Merge-then-fill stack placement shared by item pickup and crafting output.

use super::{InventoryResult, ItemStack, Slot, SlotStore};
use crate::item::{ItemCatalog, ItemId};

/// Place `count` of `item_id` into the store and return what did not fit.
///
/// Pool order is hotbar first, then general slots, each scanned in ascending index.
/// Pass one tops up existing stacks of the item, pass two fills empty slots. A nonzero
/// return means the store ran out of room; it is not an error.
pub fn deposit<C: ItemCatalog + ?Sized>(
    store: &mut SlotStore,
    catalog: &C,
    item_id: &ItemId,
    count: u32,
) -> InventoryResult<u32> {
    if count == 0 {
        return Ok(0);
    }

    let max_stack = catalog.max_stack_for(item_id);
    let pools = store.layout().deposit_pools();
    let mut remaining = count;

    // Pass 1: merge into existing stacks
    for index in pools.iter().cloned().flatten() {
        if remaining == 0 {
            break;
        }
        let Some(stack) = store.get(index).and_then(Slot::get_item) else {
            continue;
        };
        if stack.item_id != *item_id {
            continue;
        }
        let spare = stack.spare(max_stack);
        if spare == 0 {
            continue;
        }
        let add = spare.min(remaining);
        let merged = ItemStack::new(item_id.clone(), stack.count + add);
        store.set(index, Slot::with_item(merged), catalog)?;
        remaining -= add;
    }

    // Pass 2: fill empty slots
    for index in pools.iter().cloned().flatten() {
        if remaining == 0 {
            break;
        }
        if !store.get(index).map_or(false, Slot::is_empty) {
            continue;
        }
        let put = max_stack.min(remaining);
        store.set(index, Slot::of(item_id.clone(), put), catalog)?;
        remaining -= put;
    }

    log::debug!(
        "Deposited {}/{} {} ({} left over)",
        count - remaining,
        count,
        item_id,
        remaining
    );
    Ok(remaining)
}

/// How many of `item_id` the store could still absorb
pub fn capacity_for<C: ItemCatalog + ?Sized>(store: &SlotStore, catalog: &C, item_id: &ItemId) -> u64 {
    let max_stack = catalog.stack_cap(item_id);
    store
        .slots()
        .iter()
        .map(|slot| match slot.get_item() {
            None => u64::from(max_stack),
            Some(stack) if stack.item_id == *item_id => u64::from(stack.spare(max_stack)),
            Some(_) => 0,
        })
        .sum()
}
