//! Snake tick
//!
//! One call per timer firing: move, collide, eat, grow or shrink.

use crate::consts::TILE_COUNT;
use crate::grid::in_bounds;

use super::state::{GamePhase, GameState};

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Wall,
    SelfHit,
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running (paused or over); nothing moved
    Idle,
    Moved,
    Ate {
        score: u32,
        /// Set when the tick interval changed and the timer must be rescheduled
        new_interval_ms: Option<u32>,
    },
    GameOver(Collision),
}

/// Advance the snake by one step
pub fn tick(state: &mut GameState) -> TickOutcome {
    if state.phase != GamePhase::Running {
        return TickOutcome::Idle;
    }

    state.dir = state.next_dir;
    let head = state.head() + state.dir.delta();

    if !in_bounds(head, TILE_COUNT) {
        return game_over(state, Collision::Wall);
    }
    if state.occupies(head) {
        return game_over(state, Collision::SelfHit);
    }

    state.snake.push_front(head);

    let Some(eaten) = state.food.iter().position(|f| *f == head) else {
        state.snake.pop_back();
        return TickOutcome::Moved;
    };

    state.food.swap_remove(eaten);
    state.score += 1;
    state.replenish_food();

    let settings = &state.settings;
    let new_interval_ms = if state.score.checked_rem(settings.speedup_every) == Some(0)
        && state.interval_ms > settings.min_interval_ms
    {
        state.interval_ms = state
            .interval_ms
            .saturating_sub(settings.interval_step_ms)
            .max(settings.min_interval_ms);
        log::debug!("Snake speed up: {} ms per tick", state.interval_ms);
        Some(state.interval_ms)
    } else {
        None
    };

    TickOutcome::Ate {
        score: state.score,
        new_interval_ms,
    }
}

fn game_over(state: &mut GameState, collision: Collision) -> TickOutcome {
    state.phase = GamePhase::GameOver;
    log::info!(
        "Snake game over ({:?}) with score {} and length {}",
        collision,
        state.score,
        state.len()
    );
    TickOutcome::GameOver(collision)
}
