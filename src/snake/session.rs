//! Snake session: game state plus the timer that drives it

use crate::scheduler::TickScheduler;

use super::input::{SnakeKey, map_key};
use super::state::{GamePhase, GameState};
use super::tick::{TickOutcome, tick};

/// What a key press did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResponse {
    Ignored,
    Steered,
    Paused,
    Resumed,
}

/// Owns the snake state and its repeating tick.
///
/// Every timer operation (start, cancel, reschedule) goes through here so the
/// timer always matches the game phase.
pub struct SnakeSession<S: TickScheduler> {
    pub state: GameState,
    scheduler: S,
}

impl<S: TickScheduler> SnakeSession<S> {
    /// Start a session; the timer begins firing right away
    pub fn new(state: GameState, mut scheduler: S) -> Self {
        scheduler.schedule(state.interval_ms);
        log::info!("Snake started at {} ms per tick", state.interval_ms);
        Self { state, scheduler }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Timer callback
    pub fn on_tick(&mut self) -> TickOutcome {
        let outcome = tick(&mut self.state);
        match outcome {
            TickOutcome::Ate {
                new_interval_ms: Some(ms),
                ..
            } => self.scheduler.reschedule(ms),
            TickOutcome::GameOver(_) => self.scheduler.cancel(),
            _ => {}
        }
        outcome
    }

    /// Keyboard callback (`KeyboardEvent.key`)
    pub fn on_key(&mut self, key: &str) -> KeyResponse {
        match map_key(key) {
            Some(SnakeKey::Steer(dir)) => {
                if self.state.steer(dir) {
                    KeyResponse::Steered
                } else {
                    KeyResponse::Ignored
                }
            }
            Some(SnakeKey::TogglePause) => match self.state.toggle_pause() {
                Some(GamePhase::Paused) => {
                    self.scheduler.cancel();
                    log::info!("Snake paused");
                    KeyResponse::Paused
                }
                Some(_) => {
                    if !self.scheduler.is_active() {
                        self.scheduler.schedule(self.state.interval_ms);
                    }
                    log::info!("Snake resumed");
                    KeyResponse::Resumed
                }
                None => KeyResponse::Ignored,
            },
            None => KeyResponse::Ignored,
        }
    }

    /// Pointer click on the board: restarts after a game over
    pub fn on_click(&mut self) -> bool {
        if !self.state.restart() {
            return false;
        }
        self.scheduler.reschedule(self.state.interval_ms);
        true
    }
}

#[cfg(test)]
mod tests {
    use glam::IVec2;

    use super::*;
    use crate::grid::Direction;
    use crate::scheduler::ManualScheduler;
    use crate::settings::SnakeSettings;

    fn new_session() -> SnakeSession<ManualScheduler> {
        let state = GameState::new(3, SnakeSettings::default());
        SnakeSession::new(state, ManualScheduler::new())
    }

    #[test]
    fn test_timer_starts_with_session() {
        let session = new_session();
        assert_eq!(session.scheduler().interval(), Some(120));
    }

    #[test]
    fn test_pause_cancels_and_resume_restarts_timer() {
        let mut session = new_session();
        assert_eq!(session.on_key(" "), KeyResponse::Paused);
        assert!(!session.scheduler().is_active());
        assert_eq!(session.scheduler_mut().advance(1000), 0);

        assert_eq!(session.on_key(" "), KeyResponse::Resumed);
        assert_eq!(session.scheduler().interval(), Some(120));
        assert!(session.state.is_running());
    }

    #[test]
    fn test_reverse_key_ignored() {
        let mut session = new_session();
        assert_eq!(session.on_key("ArrowLeft"), KeyResponse::Ignored);
        assert_eq!(session.state.next_dir, Direction::Right);
        // Ignored, but still a game key
        assert!(map_key("ArrowLeft").is_some());
        assert_eq!(session.on_key("ArrowUp"), KeyResponse::Steered);
    }

    #[test]
    fn test_wall_hit_stops_timer_and_click_restarts() {
        let mut session = new_session();
        session.state.food.clear();
        session.state.snake = [IVec2::new(19, 3), IVec2::new(18, 3)].into_iter().collect();

        let due = session.scheduler_mut().advance(120);
        assert_eq!(due, 1);
        assert!(matches!(session.on_tick(), TickOutcome::GameOver(_)));
        assert!(!session.scheduler().is_active());

        // Pause is disabled once the game is over
        assert_eq!(session.on_key(" "), KeyResponse::Ignored);
        assert!(!session.scheduler().is_active());

        assert!(session.on_click());
        assert!(session.state.is_running());
        assert_eq!(session.scheduler().interval(), Some(120));
        assert_eq!(session.state.len(), 5);
    }

    #[test]
    fn test_click_while_running_does_nothing() {
        let mut session = new_session();
        let starts = session.scheduler().starts;
        assert!(!session.on_click());
        assert_eq!(session.scheduler().starts, starts);
    }

    #[test]
    fn test_speed_up_reschedules_timer() {
        let mut session = new_session();
        session.state.score = 2;
        let ahead = session.state.head() + Direction::Right.delta();
        session.state.food.retain(|f| *f != ahead);
        session.state.food.push(ahead);

        session.on_tick();
        assert_eq!(session.state.score, 3);
        assert_eq!(session.scheduler().interval(), Some(112));
        assert_eq!(session.scheduler().starts, 2);
    }
}
