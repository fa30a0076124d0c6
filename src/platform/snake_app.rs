//! Snake in the browser: timer, keyboard, click-to-restart and the HUD

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, Window};

use super::timer::IntervalScheduler;
use super::{create_renderer, dom, image, js_error, present};
use crate::assets::{APPLE_RASTER_SIZE, APPLE_SVG, ImageAsset};
use crate::consts::SNAKE_CANVAS_PX;
use crate::error::Result;
use crate::renderer::vertex::colors;
use crate::renderer::{RenderState, build_snake_scene};
use crate::settings::SnakeSettings;
use crate::snake::{GameState, KeyResponse, SnakeSession, TickOutcome, map_key};
use crate::texture::SnakeArt;

struct SnakeApp {
    session: SnakeSession<IntervalScheduler>,
    renderer: RenderState,
    art: SnakeArt,
    food: ImageAsset,
    document: Document,
    // Dropped after the session so the interval is cleared first
    _tick: Closure<dyn FnMut()>,
}

impl SnakeApp {
    fn on_tick(&mut self) {
        if self.session.on_tick() != TickOutcome::Idle {
            self.render();
        }
    }

    fn render(&mut self) {
        let vertices = build_snake_scene(
            &self.session.state,
            &self.art,
            self.food.texture(),
            SNAKE_CANVAS_PX,
        );
        present(&mut self.renderer, &vertices);
        dom::update_snake_hud(&self.document, &self.session.state);
    }
}

pub async fn start(
    window: Window,
    document: Document,
    canvas: HtmlCanvasElement,
    settings: SnakeSettings,
) -> Result<()> {
    canvas.set_width(SNAKE_CANVAS_PX);
    canvas.set_height(SNAKE_CANVAS_PX);
    let renderer = create_renderer(&canvas, colors::SNAKE_BACKGROUND).await?;

    let seed = js_sys::Date::now() as u64;
    log::info!("Snake seed: {}", seed);
    let state = GameState::new(seed, settings);

    let app = Rc::new_cyclic(|weak: &Weak<RefCell<SnakeApp>>| {
        let weak = weak.clone();
        let tick = Closure::<dyn FnMut()>::new(move || {
            if let Some(app) = weak.upgrade() {
                app.borrow_mut().on_tick();
            }
        });
        let scheduler = IntervalScheduler::new(window.clone(), &tick);
        RefCell::new(SnakeApp {
            session: SnakeSession::new(state, scheduler),
            renderer,
            art: SnakeArt::build(),
            food: ImageAsset::default(),
            document: document.clone(),
            _tick: tick,
        })
    });
    app.borrow_mut().render();

    // Keyboard
    {
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let key = event.key();
            // Bound keys never scroll the page, even when rejected
            if map_key(&key).is_some() {
                event.prevent_default();
            }
            let mut a = app.borrow_mut();
            let response = a.session.on_key(&key);
            if matches!(response, KeyResponse::Paused | KeyResponse::Resumed) {
                a.render();
            }
        });
        window
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
            .map_err(|e| js_error("keydown listener", e))?;
        closure.forget();
    }

    // Click restarts after a game over
    {
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let mut a = app.borrow_mut();
            if a.session.on_click() {
                a.render();
            }
        });
        canvas
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .map_err(|e| js_error("click listener", e))?;
        closure.forget();
    }

    // Food image decodes in the background; the fallback is drawn until then
    {
        let app = Rc::downgrade(&app);
        wasm_bindgen_futures::spawn_local(async move {
            let result = image::decode_svg(&document, APPLE_SVG, APPLE_RASTER_SIZE)
                .await
                .map_err(|e| e.to_string());
            if let Some(app) = app.upgrade() {
                let mut a = app.borrow_mut();
                a.food.settle(result);
                a.render();
            }
        });
    }

    log::info!("Snake running");
    Ok(())
}
