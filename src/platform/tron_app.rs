//! Tron in the browser: timer, keyboard, resize and the explosion animation

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Event, HtmlCanvasElement, KeyboardEvent, Window};

use super::timer::IntervalScheduler;
use super::{create_renderer, dom, js_error, present};
use crate::error::Result;
use crate::renderer::tron_scene::{canvas_px, cell_px};
use crate::renderer::vertex::colors;
use crate::renderer::{RenderState, build_explosion_frame, build_tron_scene};
use crate::settings::TronSettings;
use crate::tron::{FrameOutcome, RoundPhase, TronSession, TronState, TronTick};

struct TronApp {
    session: TronSession<IntervalScheduler>,
    renderer: RenderState,
    canvas: HtmlCanvasElement,
    window: Window,
    document: Document,
    cell_px: f32,
    _tick: Closure<dyn FnMut()>,
}

impl TronApp {
    /// Returns true when the round just ended and the animation should start
    fn on_tick(&mut self) -> bool {
        match self.session.on_tick(js_sys::Date::now()) {
            TronTick::Idle => false,
            TronTick::Moved => {
                self.render(js_sys::Date::now());
                false
            }
            TronTick::Eliminated { .. } => true,
        }
    }

    /// Returns true while more frames are wanted
    fn on_frame(&mut self, timestamp_ms: f64) -> bool {
        match self.session.on_frame(timestamp_ms) {
            FrameOutcome::Idle => false,
            FrameOutcome::Animating(_) => {
                self.render(timestamp_ms);
                true
            }
            FrameOutcome::Finished { .. } => {
                present(&mut self.renderer, &[]);
                if let Some(text) = self.session.winner_text() {
                    dom::show_tron_winner(&self.document, &text);
                }
                false
            }
        }
    }

    fn render(&mut self, now_ms: f64) {
        let vertices = match self.session.phase() {
            RoundPhase::Active => build_tron_scene(&self.session.state, now_ms, self.cell_px),
            RoundPhase::Exploding { .. } => match self.session.explosion() {
                Some(explosion) => match explosion.last_frame() {
                    Some(frame) => build_explosion_frame(explosion, &frame, self.cell_px),
                    None => Vec::new(),
                },
                None => Vec::new(),
            },
            RoundPhase::Finished { .. } => Vec::new(),
        };
        present(&mut self.renderer, &vertices);
    }

    fn fit_to_viewport(&mut self) {
        let (w, h) = dom::viewport(&self.window);
        let size = canvas_px(w, h);
        self.canvas.set_width(size);
        self.canvas.set_height(size);
        self.renderer.resize(size, size);
        self.cell_px = cell_px(size);
        log::debug!("Tron canvas resized to {} px", size);
    }
}

fn request_frame(app: Rc<RefCell<TronApp>>) {
    let window = app.borrow().window.clone();
    let closure = Closure::once(move |timestamp: f64| {
        let more = app.borrow_mut().on_frame(timestamp);
        if more {
            request_frame(app);
        }
    });
    if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
        log::error!("requestAnimationFrame failed: {:?}", e);
    }
    closure.forget();
}

pub async fn start(
    window: Window,
    document: Document,
    canvas: HtmlCanvasElement,
    settings: TronSettings,
) -> Result<()> {
    let (w, h) = dom::viewport(&window);
    let size = canvas_px(w, h);
    canvas.set_width(size);
    canvas.set_height(size);
    let renderer = create_renderer(&canvas, colors::TRON_BACKGROUND).await?;

    let seed = js_sys::Date::now() as u64;
    let state = TronState::new(seed, settings);

    let app = Rc::new_cyclic(|weak: &Weak<RefCell<TronApp>>| {
        let weak = weak.clone();
        let tick = Closure::<dyn FnMut()>::new(move || {
            let Some(app) = weak.upgrade() else {
                return;
            };
            let ended = app.borrow_mut().on_tick();
            if ended {
                request_frame(app);
            }
        });
        let scheduler = IntervalScheduler::new(window.clone(), &tick);
        RefCell::new(TronApp {
            session: TronSession::new(state, scheduler),
            renderer,
            canvas: canvas.clone(),
            window: window.clone(),
            document,
            cell_px: cell_px(size),
            _tick: tick,
        })
    });
    app.borrow_mut().render(js_sys::Date::now());

    // Keyboard
    {
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let key = event.key();
            let mut a = app.borrow_mut();
            if a.session.state.binds(&key) {
                event.prevent_default();
            }
            a.session.on_key(&key);
        });
        window
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
            .map_err(|e| js_error("keydown listener", e))?;
        closure.forget();
    }

    // Resize keeps the arena square inside the viewport
    {
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: Event| {
            let mut a = app.borrow_mut();
            a.fit_to_viewport();
            a.render(js_sys::Date::now());
        });
        window
            .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
            .map_err(|e| js_error("resize listener", e))?;
        closure.forget();
    }

    log::info!("Tron running");
    Ok(())
}
