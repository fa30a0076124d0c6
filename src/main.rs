//! Canvas Arcade entry point
//!
//! On the web the game is picked from the canvas `data-game` attribute. The
//! native build runs both simulations headless and logs what happened.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }

    log::info!("Canvas Arcade starting...");
    if let Err(e) = canvas_arcade::platform::run().await {
        log::error!("Failed to start: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Canvas Arcade (native) starting...");
    log::info!("Native mode runs headless - serve the wasm build for the playable version");

    let settings = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| canvas_arcade::Settings::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring settings file {}: {}", path, e);
                canvas_arcade::Settings::default()
            }
        },
        None => canvas_arcade::Settings::default(),
    };

    headless::snake(settings.snake);
    headless::tron(settings.tron);
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use canvas_arcade::scheduler::{ManualScheduler, TickScheduler};
    use canvas_arcade::snake::{GameState, SnakeSession, TickOutcome};
    use canvas_arcade::tron::{FrameOutcome, TronSession, TronState, TronTick};
    use canvas_arcade::{Direction, SnakeSettings, TronSettings};

    const SEED: u64 = 0x5eed;
    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Chase the nearest food until the snake dies or time runs out
    pub fn snake(settings: SnakeSettings) {
        let mut session = SnakeSession::new(GameState::new(SEED, settings), ManualScheduler::new());

        let mut elapsed_ms = 0;
        while elapsed_ms < 60_000 {
            let Some(interval) = session.scheduler().interval() else {
                break;
            };
            if session.scheduler_mut().advance(interval) == 0 {
                continue;
            }
            elapsed_ms += interval;

            if let Some(dir) = autopilot(&session.state) {
                session.state.steer(dir);
            }
            if let TickOutcome::GameOver(collision) = session.on_tick() {
                log::info!("Headless snake ended by {:?} after {} ms", collision, elapsed_ms);
                break;
            }
        }
        println!(
            "Snake: score {} length {} interval {} ms",
            session.state.score,
            session.state.len(),
            session.state.interval_ms
        );
    }

    fn autopilot(state: &GameState) -> Option<Direction> {
        let head = state.head();
        let target = state
            .food
            .iter()
            .min_by_key(|f| (**f - head).abs().element_sum())?;
        let delta = *target - head;
        let wanted = if delta.x > 0 {
            Direction::Right
        } else if delta.x < 0 {
            Direction::Left
        } else if delta.y > 0 {
            Direction::Down
        } else {
            Direction::Up
        };
        // Avoid steering straight into the body
        Direction::ALL
            .into_iter()
            .filter(|d| *d != state.dir.opposite())
            .filter(|d| !state.occupies(head + d.delta()))
            .min_by_key(|d| if *d == wanted { 0 } else { 1 })
    }

    /// Both players hold their course until someone hits the wall
    pub fn tron(settings: TronSettings) {
        let interval = f64::from(settings.tick_interval_ms);
        let mut session = TronSession::new(TronState::new(SEED, settings), ManualScheduler::new());

        let mut now_ms = 0.0;
        // Red turns up once so the cycles pass each other
        session.on_key("z");
        while session.scheduler().is_active() {
            now_ms += interval;
            if let TronTick::Eliminated { loser } = session.on_tick(now_ms) {
                log::info!("Headless tron: player {} eliminated at {} ms", loser, now_ms);
            }
        }

        let mut frames = 0;
        loop {
            now_ms += FRAME_MS;
            frames += 1;
            match session.on_frame(now_ms) {
                FrameOutcome::Animating(_) => {}
                FrameOutcome::Finished { .. } | FrameOutcome::Idle => break,
            }
        }

        println!(
            "Tron: {} ({} explosion frames)",
            session.winner_text().unwrap_or_else(|| "no winner".to_owned()),
            frames
        );
    }
}
