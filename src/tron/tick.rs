//! Tron tick
//!
//! Players are processed one after the other against the shared grid, so a
//! later player already sees the trail an earlier one laid down this tick.

use crate::grid::in_bounds;

use super::state::TronState;

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TronTick {
    /// Round already decided; nothing moved
    Idle,
    Moved,
    /// `loser` hit a wall or a solid trail. Players after it did not move.
    Eliminated { loser: usize },
}

/// Advance both players by one cell at time `now_ms`
pub fn tick(state: &mut TronState, now_ms: f64) -> TronTick {
    if state.players.iter().any(|p| !p.alive) {
        return TronTick::Idle;
    }

    let cleared = state.grid.sweep(now_ms);
    if cleared > 0 {
        log::trace!("Cleared {} expired trail cells", cleared);
    }

    let grid = &mut state.grid;
    for (index, player) in state.players.iter_mut().enumerate() {
        let previous = player.cell();
        player.pos += player.dir.delta().as_vec2();
        let cell = player.cell();

        if !in_bounds(cell, grid.size()) || grid.is_solid(cell, now_ms) {
            player.alive = false;
            log::info!("{} player crashed at ({}, {})", player.name, cell.x, cell.y);
            return TronTick::Eliminated { loser: index };
        }

        grid.mark(previous, now_ms, player.trail_color);
    }

    TronTick::Moved
}

#[cfg(test)]
mod tests {
    use glam::{IVec2, Vec2};

    use super::*;
    use crate::grid::Direction;
    use crate::settings::TronSettings;
    use crate::tron::state::CellPhase;

    fn new_state() -> TronState {
        TronState::new(9, TronSettings::default())
    }

    #[test]
    fn test_move_marks_previous_cell() {
        let mut state = new_state();
        assert_eq!(tick(&mut state, 0.0), TronTick::Moved);
        assert_eq!(state.players[0].cell(), IVec2::new(3, 50));
        assert_eq!(state.players[1].cell(), IVec2::new(96, 50));
        assert!(state.grid.is_solid(IVec2::new(2, 50), 0.0));
        assert!(state.grid.is_solid(IVec2::new(97, 50), 0.0));
        // The cell the vehicle sits on is not trail yet
        assert_eq!(state.grid.phase_at(IVec2::new(3, 50), 0.0), CellPhase::Empty);
    }

    #[test]
    fn test_wall_eliminates() {
        let mut state = new_state();
        state.players[0].dir = Direction::Left;
        state.players[0].pos = Vec2::new(0.0, 10.0);
        assert_eq!(tick(&mut state, 0.0), TronTick::Eliminated { loser: 0 });
        assert!(!state.players[0].alive);
        // Blue never moved this tick
        assert_eq!(state.players[1].cell(), IVec2::new(97, 50));
        // No more movement once the round is decided
        assert_eq!(tick(&mut state, 50.0), TronTick::Idle);
    }

    #[test]
    fn test_fresh_own_trail_is_fatal() {
        let mut state = new_state();
        let red = state.players[0].trail_color;
        state.grid.mark(IVec2::new(3, 50), 1000.0, red);
        assert_eq!(tick(&mut state, 1000.0 + 4999.0), TronTick::Eliminated { loser: 0 });
    }

    #[test]
    fn test_fading_trail_is_passable() {
        let mut state = new_state();
        let red = state.players[0].trail_color;
        state.grid.mark(IVec2::new(3, 50), 0.0, red);
        assert_eq!(tick(&mut state, 5500.0), TronTick::Moved);
        assert!(state.players[0].alive);
    }

    #[test]
    fn test_expired_trail_is_cleared_and_passable() {
        let mut state = new_state();
        let red = state.players[0].trail_color;
        state.grid.mark(IVec2::new(3, 50), 0.0, red);
        assert_eq!(tick(&mut state, 6001.0), TronTick::Moved);
        assert_eq!(state.players[0].cell(), IVec2::new(3, 50));
        // Sweep cleared it before Red drove onto it; Red's trail is at (2, 50)
        assert_eq!(state.grid.phase_at(IVec2::new(3, 50), 6001.0), CellPhase::Empty);
    }

    #[test]
    fn test_turning_into_own_trail() {
        let mut state = new_state();
        let mut now = 0.0;
        // Red: right, down, left, up -> back onto its first trail cell
        for dir in [Direction::Down, Direction::Left, Direction::Up] {
            assert_eq!(tick(&mut state, now), TronTick::Moved);
            now += 50.0;
            state.players[0].steer(dir);
        }
        assert_eq!(tick(&mut state, now), TronTick::Eliminated { loser: 0 });
    }

    #[test]
    fn test_head_on_resolves_by_evaluation_order() {
        // Adjacent and facing: Red steps onto Blue's cell (not trail yet) and
        // lays trail behind it; Blue then steps onto that fresh trail.
        let mut state = new_state();
        state.players[0].pos = Vec2::new(49.0, 50.0);
        state.players[1].pos = Vec2::new(50.0, 50.0);
        assert_eq!(tick(&mut state, 0.0), TronTick::Eliminated { loser: 1 });
        assert!(state.players[0].alive);

        // One cell apart: both land on (50, 50) this tick, then Red runs into
        // the trail Blue left at (51, 50) first.
        let mut state = new_state();
        state.players[0].pos = Vec2::new(49.0, 50.0);
        state.players[1].pos = Vec2::new(51.0, 50.0);
        assert_eq!(tick(&mut state, 0.0), TronTick::Moved);
        assert_eq!(state.players[0].cell(), state.players[1].cell());
        assert_eq!(tick(&mut state, 50.0), TronTick::Eliminated { loser: 0 });
    }
}
