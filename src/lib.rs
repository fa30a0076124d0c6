//! Canvas Arcade - Snake and Tron light-cycles for the browser
//!
//! Core modules:
//! - `snake`: Snake simulation (tick, collisions, food, pause/restart)
//! - `tron`: Two-player light-cycle simulation with fading trails
//! - `renderer`: WebGPU rendering pipeline and scene builders
//! - `platform`: Browser glue (DOM, timers, input)
//! - `settings`: Data-driven game tuning

pub mod assets;
pub mod error;
pub mod grid;
#[cfg(target_arch = "wasm32")]
pub mod platform;
pub mod renderer;
pub mod scheduler;
pub mod settings;
pub mod snake;
pub mod texture;
pub mod tron;

pub use error::{ArcadeError, Result};
pub use grid::Direction;
pub use settings::{Settings, SnakeSettings, TronSettings};

/// RGBA color with components in 0..=1
pub type Rgba = [f32; 4];

/// Build an opaque color from a `0xRRGGBB` literal
pub const fn rgb(hex: u32) -> Rgba {
    rgba(hex, 1.0)
}

/// Build a color from a `0xRRGGBB` literal and an alpha
pub const fn rgba(hex: u32, alpha: f32) -> Rgba {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        alpha,
    ]
}

/// Same color with a different alpha
#[inline]
pub fn with_alpha(color: Rgba, alpha: f32) -> Rgba {
    [color[0], color[1], color[2], alpha]
}

/// Game configuration constants
pub mod consts {
    /// Snake board is TILE_COUNT x TILE_COUNT tiles
    pub const TILE_COUNT: i32 = 20;
    /// Snake canvas edge in pixels
    pub const SNAKE_CANVAS_PX: u32 = 400;
    /// Starting snake length
    pub const SNAKE_START_LENGTH: i32 = 5;
    /// Head cell at (re)start; the body trails to the left
    pub const SNAKE_START_HEAD: (i32, i32) = (12, 10);

    /// Tron grid is TRON_GRID x TRON_GRID cells
    pub const TRON_GRID: i32 = 100;
    /// Pixels removed from the smaller viewport edge when sizing the Tron canvas
    pub const TRON_CANVAS_MARGIN: u32 = 40;

    /// Canvas element both games draw on
    pub const CANVAS_ID: &str = "gameCanvas";
}
