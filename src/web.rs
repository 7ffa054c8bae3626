//! Browser bindings
//!
//! `WebGame` is the JS-facing handle: a `GameEngine` persisted to
//! LocalStorage. The page drives it from `requestAnimationFrame`, forwards
//! classifier labels, and draws the JSON command list on a 2D canvas.

use wasm_bindgen::prelude::*;

use crate::engine::GameEngine;
use crate::persistence::LocalStorage;
use crate::sim::duration_from_millis;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Fruit Catcher (web) ready");
}

fn call_handler(handler: &js_sys::Function, score: i64, level: u32) {
    if let Err(e) = handler.call2(
        &JsValue::NULL,
        &JsValue::from_f64(score as f64),
        &JsValue::from(level),
    ) {
        log::warn!("Game handler threw: {e:?}");
    }
}

#[wasm_bindgen]
pub struct WebGame {
    engine: GameEngine,
}

#[wasm_bindgen]
impl WebGame {
    /// Engine with a random seed
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        Self::with_seed(rand::random())
    }

    /// Engine with a fixed seed, for reproducible rounds
    #[wasm_bindgen(js_name = withSeed)]
    pub fn with_seed(seed: u32) -> WebGame {
        WebGame {
            engine: GameEngine::new(LocalStorage, u64::from(seed)),
        }
    }

    pub fn start(&mut self) {
        self.engine.start();
    }

    pub fn stop(&mut self) {
        self.engine.stop();
    }

    /// One animation frame of simulation; returns the number of catches
    pub fn update(&mut self) -> u32 {
        let report = self.engine.update();
        u32::try_from(report.catches.len()).unwrap_or(u32::MAX)
    }

    #[wasm_bindgen(js_name = receiveLaneInput)]
    pub fn receive_lane_input(&mut self, signal: &str) {
        self.engine.receive_lane_input(signal);
    }

    /// Feed a timestamp delta in milliseconds to the round countdown
    #[wasm_bindgen(js_name = advanceClock)]
    pub fn advance_clock(&mut self, ms: f64) {
        self.engine.advance_clock(duration_from_millis(ms));
    }

    #[wasm_bindgen(js_name = tickSecond)]
    pub fn tick_second(&mut self) {
        self.engine.tick_second();
    }

    #[wasm_bindgen(js_name = setShowSummary)]
    pub fn set_show_summary(&mut self, show: bool) {
        self.engine.set_show_summary(show);
    }

    /// Draw commands for this frame as a JSON array
    #[wasm_bindgen(js_name = renderFrame)]
    pub fn render_frame(&mut self) -> Result<String, JsError> {
        self.engine
            .render_frame_json()
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// `handler(score, level)` after every catch
    #[wasm_bindgen(js_name = onScoreChange)]
    pub fn on_score_change(&mut self, handler: js_sys::Function) {
        self.engine
            .set_score_change_callback(move |score, level| call_handler(&handler, score, level));
    }

    /// `handler(score, level)` once when a round ends
    #[wasm_bindgen(js_name = onGameEnd)]
    pub fn on_game_end(&mut self, handler: js_sys::Function) {
        self.engine
            .set_game_end_callback(move |score, level| call_handler(&handler, score, level));
    }

    /// Leaderboard as a JSON array of `{ score, date }`
    pub fn leaderboard(&self) -> Result<String, JsError> {
        serde_json::to_string(self.engine.leaderboard()).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Messages for storage problems hit since the last call
    #[wasm_bindgen(js_name = takeWarnings)]
    pub fn take_warnings(&mut self) -> Vec<String> {
        self.engine
            .take_warnings()
            .into_iter()
            .map(|w| w.to_string())
            .collect()
    }

    #[wasm_bindgen(getter)]
    pub fn score(&self) -> f64 {
        self.engine.score() as f64
    }

    #[wasm_bindgen(getter, js_name = remainingSecs)]
    pub fn remaining_secs(&self) -> u32 {
        self.engine.remaining_secs()
    }

    #[wasm_bindgen(getter, js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.engine.is_active()
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
