use crate::item::ItemId;
use glam::Vec2;

/// World-side collaborator that turns a released stack into a pickup entity.
///
/// Fire-and-forget: the inventory never looks at what the world does with it.
pub trait WorldSpawner {
    fn spawn_dropped_item(&mut self, item_id: &ItemId, count: u32, position: Vec2);
}

/// A stack handed to the world
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedItem {
    pub item_id: ItemId,
    pub count: u32,
    pub position: Vec2,
}

/// Collects drops instead of spawning entities; useful headless and in tests
impl WorldSpawner for Vec<DroppedItem> {
    fn spawn_dropped_item(&mut self, item_id: &ItemId, count: u32, position: Vec2) {
        self.push(DroppedItem {
            item_id: item_id.clone(),
            count,
            position,
        });
    }
}
