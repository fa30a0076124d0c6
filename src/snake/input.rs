//! Snake keyboard bindings
//!
//! Arrow keys plus both QWERTY (WASD) and AZERTY (ZQSD) letter layouts.

use crate::grid::Direction;

/// Key that toggles pause
pub const PAUSE_KEY: &str = " ";

/// A decoded key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeKey {
    Steer(Direction),
    TogglePause,
}

/// Map a `KeyboardEvent.key` value to a snake command
pub fn map_key(key: &str) -> Option<SnakeKey> {
    let dir = match key {
        PAUSE_KEY => return Some(SnakeKey::TogglePause),
        "ArrowUp" | "w" | "W" | "z" | "Z" => Direction::Up,
        "ArrowDown" | "s" | "S" => Direction::Down,
        "ArrowLeft" | "a" | "A" | "q" | "Q" => Direction::Left,
        "ArrowRight" | "d" | "D" => Direction::Right,
        _ => return None,
    };
    Some(SnakeKey::Steer(dir))
}
