//! Tron game state: players and the trail grid

use glam::{IVec2, Vec2};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::TRON_GRID;
use crate::grid::{Direction, in_bounds};
use crate::settings::TronSettings;
use crate::{Rgba, rgb};

/// Key names (`KeyboardEvent.key`) for one player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,
}

impl Controls {
    pub fn new(up: &str, down: &str, left: &str, right: &str) -> Self {
        Self {
            up: up.to_owned(),
            down: down.to_owned(),
            left: left.to_owned(),
            right: right.to_owned(),
        }
    }

    /// Direction bound to `key`, if any
    pub fn direction_for(&self, key: &str) -> Option<Direction> {
        if key == self.up {
            Some(Direction::Up)
        } else if key == self.down {
            Some(Direction::Down)
        } else if key == self.left {
            Some(Direction::Left)
        } else if key == self.right {
            Some(Direction::Right)
        } else {
            None
        }
    }
}

/// A light-cycle
#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    /// Position in grid units
    pub pos: Vec2,
    pub dir: Direction,
    pub trail_color: Rgba,
    pub vehicle_color: Rgba,
    pub controls: Controls,
    pub alive: bool,
}

impl Player {
    /// Grid cell under the player
    pub fn cell(&self) -> IVec2 {
        self.pos.floor().as_ivec2()
    }

    /// Turn immediately. Only perpendicular turns are accepted, so a player
    /// can never reverse into its own trail.
    pub fn steer(&mut self, dir: Direction) -> bool {
        if !self.dir.is_perpendicular(dir) {
            return false;
        }
        self.dir = dir;
        true
    }
}

/// Where a trail cell is in its solid -> fading -> cleared lifecycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellPhase {
    Empty,
    /// Blocks movement
    Solid,
    /// Passable, drawn at `opacity`
    Fading { opacity: f32 },
    /// Past the fade window; cleared on the next sweep
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailCell {
    pub occupied: bool,
    pub stamped_at_ms: f64,
    pub color: Rgba,
}

impl TrailCell {
    const EMPTY: TrailCell = TrailCell {
        occupied: false,
        stamped_at_ms: 0.0,
        color: [0.0; 4],
    };
}

/// Square grid of time-stamped trail cells
#[derive(Debug, Clone)]
pub struct TrailGrid {
    size: i32,
    cells: Vec<TrailCell>,
    lifetime_ms: f64,
    fade_ms: f64,
}

impl TrailGrid {
    pub fn new(size: i32, lifetime_ms: f64, fade_ms: f64) -> Self {
        Self {
            size,
            cells: vec![TrailCell::EMPTY; (size * size) as usize],
            lifetime_ms,
            fade_ms,
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    fn index(&self, cell: IVec2) -> Option<usize> {
        in_bounds(cell, self.size).then(|| (cell.y * self.size + cell.x) as usize)
    }

    pub fn get(&self, cell: IVec2) -> Option<&TrailCell> {
        self.index(cell).map(|i| &self.cells[i])
    }

    /// Lifecycle phase of `cell` at time `now_ms`
    pub fn phase_at(&self, cell: IVec2, now_ms: f64) -> CellPhase {
        match self.get(cell) {
            Some(c) if c.occupied => self.phase_of(c, now_ms),
            _ => CellPhase::Empty,
        }
    }

    fn phase_of(&self, cell: &TrailCell, now_ms: f64) -> CellPhase {
        let age = now_ms - cell.stamped_at_ms;
        if age <= self.lifetime_ms {
            CellPhase::Solid
        } else if age <= self.lifetime_ms + self.fade_ms {
            let opacity = 1.0 - (age - self.lifetime_ms) / self.fade_ms;
            CellPhase::Fading {
                opacity: opacity as f32,
            }
        } else {
            CellPhase::Expired
        }
    }

    pub fn is_solid(&self, cell: IVec2, now_ms: f64) -> bool {
        self.phase_at(cell, now_ms) == CellPhase::Solid
    }

    /// Stamp a cell as trail. Out-of-bounds cells are ignored.
    pub fn mark(&mut self, cell: IVec2, now_ms: f64, color: Rgba) {
        if let Some(i) = self.index(cell) {
            self.cells[i] = TrailCell {
                occupied: true,
                stamped_at_ms: now_ms,
                color,
            };
        }
    }

    /// Clear every cell past its fade window; returns how many were cleared
    pub fn sweep(&mut self, now_ms: f64) -> usize {
        let limit = self.lifetime_ms + self.fade_ms;
        let mut cleared = 0;
        for cell in self.cells.iter_mut().filter(|c| c.occupied) {
            if now_ms - cell.stamped_at_ms > limit {
                *cell = TrailCell::EMPTY;
                cleared += 1;
            }
        }
        cleared
    }

    /// Occupied cells with their current phase, row by row
    pub fn occupied(&self, now_ms: f64) -> impl Iterator<Item = (IVec2, &TrailCell, CellPhase)> + '_ {
        self.cells.iter().enumerate().filter(|(_, c)| c.occupied).map(move |(i, c)| {
            let cell = IVec2::new(i as i32 % self.size, i as i32 / self.size);
            (cell, c, self.phase_of(c, now_ms))
        })
    }
}

/// Complete Tron state for one round
#[derive(Debug, Clone)]
pub struct TronState {
    pub players: [Player; 2],
    pub grid: TrailGrid,
    pub settings: TronSettings,
    pub(crate) rng: Pcg32,
}

impl TronState {
    /// Two players facing each other across the middle row
    pub fn new(seed: u64, settings: TronSettings) -> Self {
        let mid = TRON_GRID as f32 * 0.5;
        let players = [
            Player {
                name: "Red".to_owned(),
                pos: Vec2::new(2.0, mid),
                dir: Direction::Right,
                trail_color: rgb(0xff0000),
                vehicle_color: rgb(0xffbebe),
                controls: Controls::new("z", "s", "q", "d"),
                alive: true,
            },
            Player {
                name: "Blue".to_owned(),
                pos: Vec2::new((TRON_GRID - 3) as f32, mid),
                dir: Direction::Left,
                trail_color: rgb(0x0000ff),
                vehicle_color: rgb(0xd1d1ff),
                controls: Controls::new("ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight"),
                alive: true,
            },
        ];
        Self {
            players,
            grid: TrailGrid::new(TRON_GRID, settings.trail_lifetime_ms, settings.trail_fade_ms),
            settings,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Apply a key press to every player bound to it
    pub fn handle_key(&mut self, key: &str) -> bool {
        let mut accepted = false;
        for player in self.players.iter_mut().filter(|p| p.alive) {
            if let Some(dir) = player.controls.direction_for(key) {
                accepted |= player.steer(dir);
            }
        }
        accepted
    }

    /// Whether `key` is one of the players' controls, accepted or not
    pub fn binds(&self, key: &str) -> bool {
        self.players
            .iter()
            .any(|p| p.controls.direction_for(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIFE: f64 = 5000.0;
    const FADE: f64 = 1000.0;

    #[test]
    fn test_cell_lifecycle() {
        let mut grid = TrailGrid::new(10, LIFE, FADE);
        let cell = IVec2::new(3, 4);
        assert_eq!(grid.phase_at(cell, 0.0), CellPhase::Empty);

        grid.mark(cell, 1000.0, rgb(0xff0000));
        assert_eq!(grid.phase_at(cell, 1000.0), CellPhase::Solid);
        assert_eq!(grid.phase_at(cell, 6000.0), CellPhase::Solid);
        assert_eq!(
            grid.phase_at(cell, 6500.0),
            CellPhase::Fading { opacity: 0.5 }
        );
        assert!(!grid.is_solid(cell, 6500.0));
        assert_eq!(grid.phase_at(cell, 7000.0), CellPhase::Fading { opacity: 0.0 });
        assert_eq!(grid.phase_at(cell, 7001.0), CellPhase::Expired);
    }

    #[test]
    fn test_sweep_clears_only_expired() {
        let mut grid = TrailGrid::new(10, LIFE, FADE);
        grid.mark(IVec2::new(0, 0), 0.0, rgb(0xff0000));
        grid.mark(IVec2::new(1, 0), 2000.0, rgb(0x0000ff));

        assert_eq!(grid.sweep(6000.0), 0);
        assert_eq!(grid.sweep(6001.0), 1);
        assert_eq!(grid.phase_at(IVec2::new(0, 0), 6001.0), CellPhase::Empty);
        assert_eq!(grid.occupied(6001.0).count(), 1);
    }

    #[test]
    fn test_out_of_bounds_is_empty() {
        let mut grid = TrailGrid::new(10, LIFE, FADE);
        grid.mark(IVec2::new(-1, 0), 0.0, rgb(0xff0000));
        assert_eq!(grid.phase_at(IVec2::new(-1, 0), 0.0), CellPhase::Empty);
        assert!(grid.get(IVec2::new(10, 0)).is_none());
    }

    #[test]
    fn test_occupied_reports_coordinates() {
        let mut grid = TrailGrid::new(10, LIFE, FADE);
        grid.mark(IVec2::new(7, 2), 0.0, rgb(0x00ff00));
        let (cell, trail, phase) = grid.occupied(100.0).next().unwrap();
        assert_eq!(cell, IVec2::new(7, 2));
        assert_eq!(trail.color, rgb(0x00ff00));
        assert_eq!(phase, CellPhase::Solid);
    }

    #[test]
    fn test_controls_and_steering() {
        let mut state = TronState::new(1, TronSettings::default());
        // Red moves right: left is a reversal, up is fine
        assert!(!state.handle_key("q"));
        assert_eq!(state.players[0].dir, Direction::Right);
        assert!(state.handle_key("z"));
        assert_eq!(state.players[0].dir, Direction::Up);
        // Blue is untouched by Red's keys
        assert_eq!(state.players[1].dir, Direction::Left);
        assert!(state.handle_key("ArrowDown"));
        assert_eq!(state.players[1].dir, Direction::Down);
        assert!(!state.handle_key("Enter"));
    }

    #[test]
    fn test_rejected_turn_is_still_bound() {
        let state = TronState::new(1, TronSettings::default());
        // Blue moving left cannot reverse, but the arrow key is still its own
        assert!(state.players[1].controls.direction_for("ArrowRight").is_some());
        assert!(state.binds("ArrowRight"));
        assert!(state.binds("q"));
        assert!(!state.binds("Enter"));
        assert!(!state.binds("w"));
    }

    #[test]
    fn test_starting_positions() {
        let state = TronState::new(1, TronSettings::default());
        assert_eq!(state.players[0].cell(), IVec2::new(2, 50));
        assert_eq!(state.players[1].cell(), IVec2::new(97, 50));
    }
}
