//! Routes pointer, key and scroll events to the inventory.

use crate::inventory::{DropOutcome, Inventory, InventoryResult, ItemStack, WorldSpawner};
use crate::ui::inventory_ui::InventoryUI;
use glam::Vec2;

/// Keys the inventory reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryKey {
    /// Number row key, `1` selects the first hotbar slot
    Digit(u32),
    KeyE,
    Escape,
}

impl InventoryKey {
    /// Map a typed character, as the console and text-driven front ends deliver keys
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'e' | 'E' => Some(InventoryKey::KeyE),
            '\u{1b}' => Some(InventoryKey::Escape),
            _ => c.to_digit(10).map(InventoryKey::Digit),
        }
    }
}

/// What an input event did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    Ignored,
    /// Panel opened or closed
    Toggled { open: bool },
    PickedUp(usize),
    Dropped { index: usize, outcome: DropOutcome },
    DroppedOutside(ItemStack),
    Selected(usize),
}

/// Handles input for the inventory system
#[derive(Debug, Clone)]
pub struct InventoryInputHandler {
    ui: InventoryUI,
}

impl InventoryInputHandler {
    pub fn new(ui: InventoryUI) -> Self {
        Self { ui }
    }

    pub fn ui(&self) -> &InventoryUI {
        &self.ui
    }

    pub fn is_open(&self) -> bool {
        self.ui.is_open()
    }

    pub fn resize(&mut self, screen_width: f32, screen_height: f32) {
        self.ui.resize(screen_width, screen_height);
    }

    /// Handle a primary-button press at `point`.
    ///
    /// A held stack released off the panel goes to the world at `actor_position`. With
    /// the panel closed nothing else reacts; otherwise the close button toggles the panel
    /// and a slot hit drops or picks up. Clicks on empty slots with nothing held, and
    /// on bare panel, are ignored.
    pub fn handle_mouse_down<S: WorldSpawner + ?Sized>(
        &mut self,
        point: Vec2,
        actor_position: Vec2,
        inventory: &mut Inventory,
        spawner: &mut S,
    ) -> InventoryResult<InputAction> {
        if inventory.is_holding() && !self.ui.contains(point) {
            let dropped = inventory.drop_outside(spawner, actor_position)?;
            return Ok(InputAction::DroppedOutside(dropped));
        }
        if !self.ui.is_open() {
            return Ok(InputAction::Ignored);
        }
        if self.ui.close_button_hit(point) {
            return self.toggle(inventory);
        }

        let Some(index) = self.ui.slot_at(point) else {
            return Ok(InputAction::Ignored);
        };
        if inventory.is_holding() {
            let outcome = inventory.drop_on_slot(index)?;
            Ok(InputAction::Dropped { index, outcome })
        } else if inventory.slot(index).map_or(true, |slot| slot.is_empty()) {
            Ok(InputAction::Ignored)
        } else {
            inventory.pick_up(index)?;
            Ok(InputAction::PickedUp(index))
        }
    }

    /// Handle key press event
    pub fn handle_key(&mut self, key: InventoryKey, inventory: &mut Inventory) -> InventoryResult<InputAction> {
        match key {
            InventoryKey::KeyE => self.toggle(inventory),
            InventoryKey::Escape if self.ui.is_open() => self.toggle(inventory),
            InventoryKey::Escape => Ok(InputAction::Ignored),
            // Number keys are reserved for the panel while it is open
            InventoryKey::Digit(_) if self.ui.is_open() => Ok(InputAction::Ignored),
            InventoryKey::Digit(n) => {
                if inventory.select_key(n) {
                    Ok(InputAction::Selected(inventory.selected_hotbar_index()))
                } else {
                    Ok(InputAction::Ignored)
                }
            }
        }
    }

    /// Handle mouse wheel for hotbar selection; scrolling up moves left
    pub fn handle_scroll(&mut self, delta: f32, inventory: &mut Inventory) -> InputAction {
        if delta > 0.0 {
            inventory.cycle_hotbar(-1);
        } else if delta < 0.0 {
            inventory.cycle_hotbar(1);
        } else {
            return InputAction::Ignored;
        }
        InputAction::Selected(inventory.selected_hotbar_index())
    }

    /// Open or close the panel. Closing puts any held stack back first.
    fn toggle(&mut self, inventory: &mut Inventory) -> InventoryResult<InputAction> {
        if self.ui.is_open() && inventory.is_holding() {
            let leftover = inventory.cancel_drag()?;
            if leftover > 0 {
                // Nowhere to put it; keep the panel open so the stack stays reachable
                log::warn!("Cannot close inventory, {} held items do not fit", leftover);
                return Ok(InputAction::Ignored);
            }
        }
        self.ui.toggle();
        log::debug!("Inventory panel {}", if self.ui.is_open() { "opened" } else { "closed" });
        Ok(InputAction::Toggled {
            open: self.ui.is_open(),
        })
    }
}
