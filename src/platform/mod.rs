//! Browser glue
//!
//! Looks up the canvas, picks the game from its `data-game` attribute and
//! wires DOM events, the interval timer and animation frames to the game
//! sessions.

mod dom;
mod image;
mod snake_app;
mod timer;
mod tron_app;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlCanvasElement;

use crate::Rgba;
use crate::consts::CANVAS_ID;
use crate::error::{ArcadeError, Result};
use crate::renderer::{RenderState, Vertex};
use crate::settings::Settings;

pub use image::decode_svg;
pub use timer::IntervalScheduler;

/// Canvas attribute naming the game to run
pub const GAME_ATTRIBUTE: &str = "data-game";

pub(crate) fn js_error(context: &str, value: JsValue) -> ArcadeError {
    ArcadeError::Platform(format!("{}: {:?}", context, value))
}

/// Find the game canvas and start the game it asks for
pub async fn run() -> Result<()> {
    let window = web_sys::window().ok_or_else(|| ArcadeError::Platform("no window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| ArcadeError::Platform("no document".into()))?;

    let canvas: HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| ArcadeError::Platform(format!("no #{} element", CANVAS_ID)))?
        .dyn_into()
        .map_err(|_| ArcadeError::Platform(format!("#{} is not a canvas", CANVAS_ID)))?;

    let settings = Settings::load(&canvas);

    match canvas.get_attribute(GAME_ATTRIBUTE).as_deref() {
        Some("tron") => tron_app::start(window, document, canvas, settings.tron).await,
        Some("snake") => snake_app::start(window, document, canvas, settings.snake).await,
        None => {
            log::info!("No {} attribute, starting snake", GAME_ATTRIBUTE);
            snake_app::start(window, document, canvas, settings.snake).await
        }
        Some(other) => Err(ArcadeError::Platform(format!("unknown game '{}'", other))),
    }
}

/// Set up WebGPU (or WebGL2 as a fallback) on the canvas
async fn create_renderer(canvas: &HtmlCanvasElement, background: Rgba) -> Result<RenderState> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
        ..Default::default()
    });

    let surface = instance
        .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
        .map_err(|e| ArcadeError::Graphics(format!("Failed to create surface: {}", e)))?;

    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await
        .map_err(|e| ArcadeError::Graphics(format!("Failed to get adapter: {}", e)))?;

    log::info!("Using adapter: {:?}", adapter.get_info().name);

    RenderState::new(surface, &adapter, canvas.width(), canvas.height(), background).await
}

/// Draw one frame, recovering from a lost surface
fn present(renderer: &mut RenderState, vertices: &[Vertex]) {
    match renderer.render(vertices) {
        Ok(()) => {}
        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
            renderer.resize(renderer.size.0, renderer.size.1);
        }
        Err(wgpu::SurfaceError::OutOfMemory) => {
            log::error!("Out of memory!");
        }
        Err(e) => log::warn!("Render error: {:?}", e),
    }
}
