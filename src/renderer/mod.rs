//! WebGPU rendering module
//!
//! Scenes are plain triangle lists in canvas pixels built from game state;
//! [`RenderState`] uploads them and draws with alpha blending.

pub mod pipeline;
pub mod shapes;
pub mod snake_scene;
pub mod tron_scene;
pub mod vertex;

pub use pipeline::RenderState;
pub use snake_scene::build_snake_scene;
pub use tron_scene::{build_explosion_frame, build_tron_scene};
pub use vertex::Vertex;
