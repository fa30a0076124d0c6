//! Snake game
//!
//! A single snake on a fixed board, up to three food items, one tick per
//! timer firing. Pure and deterministic for a given seed; no rendering or
//! platform dependencies.

pub mod input;
pub mod session;
pub mod state;
pub mod tick;

pub use input::{PAUSE_KEY, SnakeKey, map_key};
pub use session::{KeyResponse, SnakeSession};
pub use state::{GamePhase, GameState};
pub use tick::{Collision, TickOutcome, tick};
