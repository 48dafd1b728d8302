//! Buffered host input
//!
//! Hosts push discrete key and pointer events; the engine drains them once
//! per frame.

use crate::sim::TickInput;

/// Logical direction keys; every other key is ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "d" | "D" => Some(Key::Right),
            _ => None,
        }
    }
}

/// Held keys plus the latest pointer position
#[derive(Debug, Clone, Default)]
pub struct InputState {
    left: bool,
    right: bool,
    pointer_x: Option<f32>,
}

impl InputState {
    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Left => self.left = true,
            Key::Right => self.right = true,
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Left => self.left = false,
            Key::Right => self.right = false,
        }
    }

    /// Latest pointer x wins
    pub fn pointer_move(&mut self, x: f32) {
        self.pointer_x = Some(x);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_idle(&self) -> bool {
        !self.left && !self.right && self.pointer_x.is_none()
    }

    /// Snapshot for the next frame. Held keys persist; the pointer is consumed.
    pub fn take_tick_input(&mut self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
            pointer_x: self.pointer_x.take(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_key_mapping() {
        assert_eq!(Key::from_dom_key("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_dom_key("ArrowRight"), Some(Key::Right));
        assert_eq!(Key::from_dom_key("ArrowUp"), None);
        assert_eq!(Key::from_dom_key(" "), None);
    }

    #[test]
    fn test_keys_persist_pointer_consumed() {
        let mut input = InputState::default();
        input.key_down(Key::Left);
        input.pointer_move(10.0);
        input.pointer_move(42.0);

        let first = input.take_tick_input();
        assert!(first.left && !first.right);
        assert_eq!(first.pointer_x, Some(42.0));

        let second = input.take_tick_input();
        assert!(second.left);
        assert_eq!(second.pointer_x, None);

        input.key_up(Key::Left);
        assert!(input.is_idle());
    }

    #[test]
    fn test_clear() {
        let mut input = InputState::default();
        input.key_down(Key::Right);
        input.pointer_move(5.0);
        input.clear();
        assert!(input.is_idle());
    }
}
