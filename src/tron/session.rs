//! Tron session: one round, its tick timer and the end-of-round animation

use crate::scheduler::TickScheduler;

use super::explosion::{Explosion, ExplosionFrame, FadingCell};
use super::state::{CellPhase, TronState};
use super::tick::{TronTick, tick};

/// Where the round is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Active,
    /// Tick timer stopped, explosion animating
    Exploding { loser: usize },
    /// Animation done, banner shown. Only a reload starts a new round.
    Finished { winner: usize },
}

/// What a display frame did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// No animation running
    Idle,
    Animating(ExplosionFrame),
    /// Animation just completed
    Finished { winner: usize },
}

pub struct TronSession<S: TickScheduler> {
    pub state: TronState,
    scheduler: S,
    explosion: Option<Explosion>,
    phase: RoundPhase,
}

impl<S: TickScheduler> TronSession<S> {
    /// Start the round; the tick timer begins firing right away
    pub fn new(state: TronState, mut scheduler: S) -> Self {
        scheduler.schedule(state.settings.tick_interval_ms);
        log::info!("Tron round started");
        Self {
            state,
            scheduler,
            explosion: None,
            phase: RoundPhase::Active,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn explosion(&self) -> Option<&Explosion> {
        self.explosion.as_ref()
    }

    /// Whether the display should keep requesting frames
    pub fn wants_frames(&self) -> bool {
        matches!(self.phase, RoundPhase::Exploding { .. })
    }

    /// Timer callback
    pub fn on_tick(&mut self, now_ms: f64) -> TronTick {
        if self.phase != RoundPhase::Active {
            return TronTick::Idle;
        }
        let outcome = tick(&mut self.state, now_ms);
        if let TronTick::Eliminated { loser } = outcome {
            self.end_round(loser, now_ms);
        }
        outcome
    }

    /// Keyboard callback. Ignored once the round is decided.
    pub fn on_key(&mut self, key: &str) -> bool {
        self.phase == RoundPhase::Active && self.state.handle_key(key)
    }

    /// Display frame callback (`requestAnimationFrame` timestamp)
    pub fn on_frame(&mut self, timestamp_ms: f64) -> FrameOutcome {
        let RoundPhase::Exploding { loser } = self.phase else {
            return FrameOutcome::Idle;
        };
        let Some(explosion) = self.explosion.as_mut() else {
            return FrameOutcome::Idle;
        };

        let frame = explosion.advance(timestamp_ms);
        if !frame.finished {
            return FrameOutcome::Animating(frame);
        }

        let winner = Self::winner_of(loser);
        self.phase = RoundPhase::Finished { winner };
        log::info!("{} player wins", self.state.players[winner].name);
        FrameOutcome::Finished { winner }
    }

    /// Banner text once the round is finished
    pub fn winner_text(&self) -> Option<String> {
        match self.phase {
            RoundPhase::Finished { winner } => {
                Some(format!("{} player wins!", self.state.players[winner].name))
            }
            _ => None,
        }
    }

    fn winner_of(loser: usize) -> usize {
        1 - loser
    }

    fn end_round(&mut self, loser: usize, now_ms: f64) {
        self.scheduler.cancel();

        // The whole board fades in the loser's color
        let loser_color = self.state.players[loser].trail_color;
        let cells = self
            .state
            .grid
            .occupied(now_ms)
            .filter_map(|(cell, _, phase)| {
                let base_opacity = match phase {
                    CellPhase::Solid => 1.0,
                    CellPhase::Fading { opacity } => opacity,
                    CellPhase::Empty | CellPhase::Expired => return None,
                };
                Some(FadingCell {
                    cell,
                    color: loser_color,
                    base_opacity,
                })
            })
            .collect::<Vec<_>>();

        let player = &self.state.players[loser];
        let settings = &self.state.settings;
        log::info!(
            "Round over: {} eliminated, fading {} trail cells",
            player.name,
            cells.len()
        );
        self.explosion = Some(Explosion::new(
            player.pos,
            player.trail_color,
            settings.explosion_particles,
            cells,
            settings.explosion_duration_ms,
            &mut self.state.rng,
        ));
        self.phase = RoundPhase::Exploding { loser };
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::grid::Direction;
    use crate::scheduler::ManualScheduler;
    use crate::settings::TronSettings;

    fn new_session() -> TronSession<ManualScheduler> {
        TronSession::new(TronState::new(11, TronSettings::default()), ManualScheduler::new())
    }

    /// Drive Red into the left wall on the next tick
    fn crash_red(session: &mut TronSession<ManualScheduler>) {
        session.state.players[0].pos = Vec2::new(0.0, 20.0);
        session.state.players[0].dir = Direction::Left;
    }

    #[test]
    fn test_timer_runs_at_fixed_interval() {
        let session = new_session();
        assert_eq!(session.scheduler().interval(), Some(50));
        assert_eq!(session.phase(), RoundPhase::Active);
        assert!(!session.wants_frames());
    }

    #[test]
    fn test_elimination_stops_timer_and_starts_explosion() {
        let mut session = new_session();
        session.on_tick(0.0);
        session.on_tick(50.0);
        crash_red(&mut session);

        assert_eq!(session.on_tick(100.0), TronTick::Eliminated { loser: 0 });
        assert!(!session.scheduler().is_active());
        assert_eq!(session.phase(), RoundPhase::Exploding { loser: 0 });
        assert!(session.wants_frames());

        let explosion = session.explosion().unwrap();
        assert_eq!(explosion.particles.len(), 20);
        assert_eq!(explosion.color, session.state.players[0].trail_color);
        // Two ticks for each of the two players
        assert_eq!(explosion.cells.len(), 4);
        assert!(explosion.particles.iter().all(|p| p.pos == Vec2::new(-1.0, 20.0)));
    }

    #[test]
    fn test_fade_snapshot_uses_loser_color() {
        let mut session = new_session();
        session.on_tick(0.0);
        session.on_tick(50.0);
        crash_red(&mut session);
        session.on_tick(100.0);

        let red = session.state.players[0].trail_color;
        let cells = &session.explosion().unwrap().cells;
        // Blue's trail is in the snapshot too, drawn red
        assert!(cells.iter().any(|c| c.cell.x > 50));
        assert!(cells.iter().all(|c| c.color == red));
    }

    #[test]
    fn test_no_input_or_ticks_after_round_end() {
        let mut session = new_session();
        crash_red(&mut session);
        session.on_tick(0.0);

        assert!(!session.on_key("ArrowUp"));
        assert_eq!(session.state.players[1].dir, Direction::Left);
        let blue = session.state.players[1].pos;
        assert_eq!(session.on_tick(50.0), TronTick::Idle);
        assert_eq!(session.state.players[1].pos, blue);
    }

    #[test]
    fn test_banner_after_animation() {
        let mut session = new_session();
        crash_red(&mut session);
        session.on_tick(0.0);
        assert_eq!(session.winner_text(), None);

        assert!(matches!(session.on_frame(10_000.0), FrameOutcome::Animating(_)));
        assert!(matches!(session.on_frame(10_500.0), FrameOutcome::Animating(_)));
        assert_eq!(session.on_frame(11_000.0), FrameOutcome::Finished { winner: 1 });
        assert_eq!(session.phase(), RoundPhase::Finished { winner: 1 });
        assert_eq!(session.winner_text().as_deref(), Some("Blue player wins!"));
        assert!(!session.wants_frames());
        assert_eq!(session.on_frame(11_016.0), FrameOutcome::Idle);
    }

    #[test]
    fn test_frames_idle_while_active() {
        let mut session = new_session();
        assert_eq!(session.on_frame(0.0), FrameOutcome::Idle);
    }

    #[test]
    fn test_steering_while_active() {
        let mut session = new_session();
        assert!(session.on_key("s"));
        assert_eq!(session.state.players[0].dir, Direction::Down);
    }
}
