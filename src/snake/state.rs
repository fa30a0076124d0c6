//! Snake game state

use std::collections::VecDeque;

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::error::{ArcadeError, Result};
use crate::grid::Direction;
use crate::settings::SnakeSettings;

/// Current phase of a snake run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Running,
    Paused,
    /// Terminal until the player clicks to restart
    GameOver,
}

/// Complete snake state, owned by a single session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Body cells, head first
    pub snake: VecDeque<IVec2>,
    pub food: Vec<IVec2>,
    /// Direction applied on the last tick
    pub dir: Direction,
    /// Direction latched at the next tick
    pub next_dir: Direction,
    pub score: u32,
    pub interval_ms: u32,
    pub phase: GamePhase,
    pub settings: SnakeSettings,
    rng: Pcg32,
}

impl GameState {
    /// Create a running game with freshly placed food
    pub fn new(seed: u64, settings: SnakeSettings) -> Self {
        let mut state = Self {
            snake: VecDeque::new(),
            food: Vec::with_capacity(settings.max_food),
            dir: Direction::Right,
            next_dir: Direction::Right,
            score: 0,
            interval_ms: settings.initial_interval_ms,
            phase: GamePhase::Running,
            settings,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.reset();
        state
    }

    /// Put the snake back at the start and clear score and food
    fn reset(&mut self) {
        let (hx, hy) = SNAKE_START_HEAD;
        self.snake = (0..SNAKE_START_LENGTH)
            .map(|i| IVec2::new(hx - i, hy))
            .collect();
        self.dir = Direction::Right;
        self.next_dir = Direction::Right;
        self.food.clear();
        self.replenish_food();
        self.score = 0;
        self.interval_ms = self.settings.initial_interval_ms;
        self.phase = GamePhase::Running;
    }

    /// Restart after a game over. Returns false in any other phase.
    pub fn restart(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        self.reset();
        log::info!("Snake restarted");
        true
    }

    pub fn head(&self) -> IVec2 {
        self.snake[0]
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn occupies(&self, cell: IVec2) -> bool {
        self.snake.contains(&cell)
    }

    /// Queue a direction for the next tick.
    ///
    /// Rejects the reverse of the direction currently applied, and everything
    /// once the game is over. Returns whether the direction was accepted.
    pub fn steer(&mut self, dir: Direction) -> bool {
        if self.phase == GamePhase::GameOver || dir == self.dir.opposite() {
            return false;
        }
        if dir != self.next_dir {
            log::debug!("Snake turning {:?}", dir);
        }
        self.next_dir = dir;
        true
    }

    /// Toggle between running and paused. Returns the new phase, or `None`
    /// when the game is over.
    pub fn toggle_pause(&mut self) -> Option<GamePhase> {
        self.phase = match self.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            GamePhase::GameOver => return None,
        };
        Some(self.phase)
    }

    /// Drop one food item on a random free cell
    pub fn place_food(&mut self) -> Result<IVec2> {
        let attempts = self.settings.placement_attempts;
        for _ in 0..attempts {
            let cell = IVec2::new(
                self.rng.random_range(0..TILE_COUNT),
                self.rng.random_range(0..TILE_COUNT),
            );
            if !self.occupies(cell) && !self.food.contains(&cell) {
                self.food.push(cell);
                return Ok(cell);
            }
        }
        Err(ArcadeError::FoodPlacement { attempts })
    }

    /// Top food back up to capacity. Stops quietly (with a warning) when the
    /// board is too crowded to find a free cell.
    pub fn replenish_food(&mut self) {
        while self.food.len() < self.settings.max_food {
            if let Err(e) = self.place_food() {
                log::warn!("{} ({} of {} food on board)", e, self.food.len(), self.settings.max_food);
                break;
            }
        }
    }
}
