//! Inventory panel geometry: where each slot sits on screen and what a pointer hits.
//!
//! Positions are authored in the panel texture's native pixels and scaled up; the
//! panel is centred in the view.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned screen rectangle; edges count as inside
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UIRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl UIRect {
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Panel texture layout, in native texture pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelLayout {
    pub panel_size: Vec2,
    /// Native-to-screen scale factor
    pub scale: f32,
    pub slot_size: f32,
    /// Top-left of general slot 0
    pub slot_origin: Vec2,
    /// Distance between neighbouring slot origins
    pub slot_pitch: f32,
    /// General slots per row
    pub columns: usize,
    /// Y of the hotbar row
    pub hotbar_row_y: f32,
    pub close_button_origin: Vec2,
    pub close_button_size: Vec2,
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self {
            panel_size: Vec2::new(162.0, 101.0),
            scale: 4.0,
            slot_size: 12.0,
            slot_origin: Vec2::new(10.5, 18.0),
            slot_pitch: 16.0,
            columns: 9,
            hotbar_row_y: 83.0,
            close_button_origin: Vec2::new(148.0, 4.0),
            close_button_size: Vec2::new(10.0, 10.0),
        }
    }
}

impl PanelLayout {
    /// Screen-space top-left of the panel centred in `view`
    pub fn panel_origin(&self, view: Vec2) -> Vec2 {
        (view - self.panel_size * self.scale) / 2.0
    }

    pub fn panel_rect(&self, view: Vec2) -> UIRect {
        let origin = self.panel_origin(view);
        let size = self.panel_size * self.scale;
        UIRect {
            x: origin.x,
            y: origin.y,
            width: size.x,
            height: size.y,
        }
    }

    /// Native position of a slot: general slots row-major, hotbar slots on their own row
    fn slot_native(&self, index: usize, general_count: usize) -> Vec2 {
        let columns = self.columns.max(1);
        if index < general_count {
            let col = (index % columns) as f32;
            let row = (index / columns) as f32;
            self.slot_origin + Vec2::new(col, row) * self.slot_pitch
        } else {
            let col = (index - general_count) as f32;
            Vec2::new(self.slot_origin.x + col * self.slot_pitch, self.hotbar_row_y)
        }
    }

    pub fn slot_rect(&self, index: usize, general_count: usize, view: Vec2) -> UIRect {
        let position = self.panel_origin(view) + self.slot_native(index, general_count) * self.scale;
        let size = self.slot_size * self.scale;
        UIRect {
            x: position.x,
            y: position.y,
            width: size,
            height: size,
        }
    }

    pub fn close_button_rect(&self, view: Vec2) -> UIRect {
        let position = self.panel_origin(view) + self.close_button_origin * self.scale;
        let size = self.close_button_size * self.scale;
        UIRect {
            x: position.x,
            y: position.y,
            width: size.x,
            height: size.y,
        }
    }
}

/// State of the inventory UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryUIState {
    Closed,
    Open,
}

/// Inventory panel: open state plus hit-testing against the current view size
#[derive(Debug, Clone)]
pub struct InventoryUI {
    state: InventoryUIState,
    layout: PanelLayout,
    view: Vec2,
    general_count: usize,
    slot_count: usize,
}

impl InventoryUI {
    pub fn new(layout: PanelLayout, general_count: usize, slot_count: usize, screen_width: f32, screen_height: f32) -> Self {
        Self {
            state: InventoryUIState::Closed,
            layout,
            view: Vec2::new(screen_width, screen_height),
            general_count,
            slot_count,
        }
    }

    /// Update screen dimensions
    pub fn resize(&mut self, screen_width: f32, screen_height: f32) {
        self.view = Vec2::new(screen_width, screen_height);
    }

    pub fn open(&mut self) {
        self.state = InventoryUIState::Open;
    }

    pub fn close(&mut self) {
        self.state = InventoryUIState::Closed;
    }

    /// Toggle inventory open/closed
    pub fn toggle(&mut self) {
        match self.state {
            InventoryUIState::Open => self.close(),
            InventoryUIState::Closed => self.open(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.state == InventoryUIState::Open
    }

    pub fn state(&self) -> InventoryUIState {
        self.state
    }

    pub fn layout(&self) -> &PanelLayout {
        &self.layout
    }

    /// Whether `point` lies on the panel surface
    pub fn contains(&self, point: Vec2) -> bool {
        self.layout.panel_rect(self.view).contains(point)
    }

    pub fn close_button_hit(&self, point: Vec2) -> bool {
        self.layout.close_button_rect(self.view).contains(point)
    }

    pub fn slot_rect(&self, index: usize) -> Option<UIRect> {
        (index < self.slot_count).then(|| self.layout.slot_rect(index, self.general_count, self.view))
    }

    /// First slot whose rectangle contains `point`
    pub fn slot_at(&self, point: Vec2) -> Option<usize> {
        (0..self.slot_count).find(|&index| {
            self.layout
                .slot_rect(index, self.general_count, self.view)
                .contains(point)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW_W: f32 = 960.0;
    const VIEW_H: f32 = 640.0;

    fn ui() -> InventoryUI {
        InventoryUI::new(PanelLayout::default(), 36, 45, VIEW_W, VIEW_H)
    }

    fn centre(rect: UIRect) -> Vec2 {
        Vec2::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0)
    }

    #[test]
    fn test_panel_is_centred() {
        let rect = PanelLayout::default().panel_rect(Vec2::new(VIEW_W, VIEW_H));
        assert_eq!(rect.x, (VIEW_W - 648.0) / 2.0);
        assert_eq!(rect.y, (VIEW_H - 404.0) / 2.0);
        assert_eq!(rect.width, 648.0);
    }

    #[test]
    fn test_slot_positions() {
        let ui = ui();
        let origin = PanelLayout::default().panel_origin(Vec2::new(VIEW_W, VIEW_H));

        let first = ui.slot_rect(0).expect("slot 0 exists");
        assert_eq!((first.x, first.y), (origin.x + 42.0, origin.y + 72.0));
        assert_eq!(first.width, 48.0);

        // Slot 10 is row 1, column 1
        let tenth = ui.slot_rect(10).expect("slot 10 exists");
        assert_eq!((tenth.x, tenth.y), (origin.x + 106.0, origin.y + 136.0));

        // First hotbar slot sits on the hotbar row
        let hotbar = ui.slot_rect(36).expect("slot 36 exists");
        assert_eq!((hotbar.x, hotbar.y), (origin.x + 42.0, origin.y + 332.0));

        assert!(ui.slot_rect(45).is_none());
    }

    #[test]
    fn test_slot_at_round_trip() {
        let ui = ui();
        for index in [0, 8, 9, 20, 35, 36, 44] {
            let rect = ui.slot_rect(index).expect("slot exists");
            assert_eq!(ui.slot_at(centre(rect)), Some(index));
        }
        assert_eq!(ui.slot_at(Vec2::new(0.0, 0.0)), None);
    }

    #[test]
    fn test_contains_and_close_button() {
        let ui = ui();
        let panel = PanelLayout::default().panel_rect(Vec2::new(VIEW_W, VIEW_H));
        assert!(ui.contains(centre(panel)));
        assert!(ui.contains(Vec2::new(panel.x, panel.y)));
        assert!(!ui.contains(Vec2::new(panel.x - 1.0, panel.y)));

        let close = PanelLayout::default().close_button_rect(Vec2::new(VIEW_W, VIEW_H));
        assert!(ui.close_button_hit(centre(close)));
        assert_eq!(ui.slot_at(centre(close)), None);
    }

    #[test]
    fn test_toggle() {
        let mut ui = ui();
        assert!(!ui.is_open());
        ui.toggle();
        assert_eq!(ui.state(), InventoryUIState::Open);
        ui.toggle();
        assert!(!ui.is_open());
    }

    #[test]
    fn test_resize_moves_panel() {
        let mut ui = ui();
        let before = ui.slot_rect(0).expect("slot 0");
        ui.resize(VIEW_W + 100.0, VIEW_H);
        let after = ui.slot_rect(0).expect("slot 0");
        assert_eq!(after.x, before.x + 50.0);
        assert_eq!(after.y, before.y);
    }
}
