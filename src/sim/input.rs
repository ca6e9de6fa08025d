//! Input contract
//!
//! The host captures keyboard events; the simulation only sees level
//! (`is_down`) and edge (`is_pressed`) queries, snapshotted once per tick
//! into a [`TickInput`].

use std::collections::HashSet;

/// Logical keys the simulation understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Sword swing
    Attack,
    PlaceBomb,
    ThrowBoomerang,
    FireBow,
    /// World map overlay toggle
    Map,
    /// Title / retry confirm
    Start,
    /// Leave the game-over screen
    Back,
}

/// Level and edge queries over the host's key state
pub trait InputSource {
    /// Key is currently held
    fn is_down(&self, key: Key) -> bool;
    /// Key went down this frame (true only on the first frame)
    fn is_pressed(&self, key: Key) -> bool;
}

/// Key state tracker fed by host key events
#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    current: HashSet<Key>,
    previous: HashSet<Key>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        self.current.insert(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.current.remove(&key);
    }

    /// Latch the current state so the next frame's edges are computed
    /// against it. Call once per frame after the tick consumed input.
    pub fn end_frame(&mut self) {
        self.previous.clone_from(&self.current);
    }
}

impl InputSource for Keyboard {
    fn is_down(&self, key: Key) -> bool {
        self.current.contains(&key)
    }

    fn is_pressed(&self, key: Key) -> bool {
        self.current.contains(&key) && !self.previous.contains(&key)
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    // Held directions
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    // One-shot actions
    pub attack: bool,
    pub bomb: bool,
    pub boomerang: bool,
    pub bow: bool,
    pub map: bool,
    pub start: bool,
    pub back: bool,
}

impl TickInput {
    /// Snapshot an input source for one tick
    pub fn from_source(source: &impl InputSource) -> Self {
        Self {
            up: source.is_down(Key::Up),
            down: source.is_down(Key::Down),
            left: source.is_down(Key::Left),
            right: source.is_down(Key::Right),
            attack: source.is_pressed(Key::Attack),
            bomb: source.is_pressed(Key::PlaceBomb),
            boomerang: source.is_pressed(Key::ThrowBoomerang),
            bow: source.is_pressed(Key::FireBow),
            map: source.is_pressed(Key::Map),
            start: source.is_pressed(Key::Start),
            back: source.is_pressed(Key::Back),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pressed_only_on_first_frame() {
        let mut kb = Keyboard::new();
        kb.key_down(Key::Attack);
        assert!(kb.is_pressed(Key::Attack));
        assert!(kb.is_down(Key::Attack));

        kb.end_frame();
        assert!(!kb.is_pressed(Key::Attack));
        assert!(kb.is_down(Key::Attack));

        kb.key_up(Key::Attack);
        kb.end_frame();
        kb.key_down(Key::Attack);
        assert!(kb.is_pressed(Key::Attack));
    }

    #[test]
    fn test_tick_input_snapshot() {
        let mut kb = Keyboard::new();
        kb.key_down(Key::Left);
        kb.key_down(Key::FireBow);
        let input = TickInput::from_source(&kb);
        assert!(input.left);
        assert!(input.bow);
        assert!(!input.attack);

        kb.end_frame();
        let input = TickInput::from_source(&kb);
        assert!(input.left);
        assert!(!input.bow);
    }
}
