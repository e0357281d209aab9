//! Pointer input collected by the platform between frames

use glam::Vec2;

/// Latest pointer state, in screen pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub position: Vec2,
    pub pressed: bool,
}

impl PointerState {
    pub fn moved(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn down(&mut self, position: Vec2) {
        self.position = position;
        self.pressed = true;
    }

    pub fn up(&mut self) {
        self.pressed = false;
    }
}
