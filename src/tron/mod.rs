//! Two-player light-cycle game
//!
//! Both players move one cell per tick and leave trail cells that stay
//! solid for a while, fade, and then clear. A crash ends the round with an
//! explosion; there is no restart short of reloading the page.

pub mod explosion;
pub mod session;
pub mod state;
pub mod tick;

pub use explosion::{Explosion, ExplosionFrame, FadingCell, Particle};
pub use session::{FrameOutcome, RoundPhase, TronSession};
pub use state::{CellPhase, Controls, Player, TrailCell, TrailGrid, TronState};
pub use tick::{TronTick, tick};
