//! HUD updates through plain DOM elements

use web_sys::{Document, Window};

use crate::snake::{GamePhase, GameState};

fn set_text(document: &Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

fn toggle_class(document: &Document, id: &str, class: &str, on: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        let _ = el.class_list().toggle_with_force(class, on);
    }
}

/// Score line, pause overlay and the optional game-over banner
pub fn update_snake_hud(document: &Document, state: &GameState) {
    set_text(document, "score", &format!("Score: {}", state.score));

    let paused = state.phase == GamePhase::Paused;
    toggle_class(document, "pauseOverlay", "show", paused);
    if let Some(el) = document.get_element_by_id("pauseOverlay") {
        let _ = el.set_attribute("aria-hidden", if paused { "false" } else { "true" });
    }

    toggle_class(document, "gameOverBanner", "hidden", !state.is_game_over());
}

/// Reveal the end-of-round panel with the winner line
pub fn show_tron_winner(document: &Document, text: &str) {
    set_text(document, "winner", text);
    toggle_class(document, "gameOver", "hidden", false);
}

/// Inner size of the browser window in CSS pixels
pub fn viewport(window: &Window) -> (u32, u32) {
    let dimension = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32
    };
    (dimension(window.inner_width()), dimension(window.inner_height()))
}
