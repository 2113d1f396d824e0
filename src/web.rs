//! Browser bridge
//!
//! Thin `wasm-bindgen` wrapper so a JS render loop can drive the simulation.
//! The page keeps the scene graph, DOM screens and audio; it forwards key
//! events here and reads back the outcome and snapshot each frame.

use wasm_bindgen::prelude::*;

use crate::config::SimulationConfig;
use crate::input::{Action, InputState};
use crate::sim::RunnerSimulation;

#[wasm_bindgen(start)]
pub fn wasm_init() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Track Runner starting...");
}

#[wasm_bindgen]
pub struct WebRunner {
    sim: RunnerSimulation,
    input: InputState,
}

impl WebRunner {
    fn build(config: SimulationConfig, seed: Option<f64>) -> Result<WebRunner, JsValue> {
        let seed = seed.unwrap_or_else(js_sys::Date::now) as u64;
        let sim = RunnerSimulation::with_seed(config, seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Game initialized with seed: {}", seed);
        Ok(WebRunner {
            sim,
            input: InputState::new(),
        })
    }
}

#[wasm_bindgen]
impl WebRunner {
    /// New runner with default tuning. Seeds from the clock when `seed` is absent.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<f64>) -> Result<WebRunner, JsValue> {
        Self::build(SimulationConfig::default(), seed)
    }

    /// New runner with tuning overrides from a JSON string
    pub fn with_config(config_json: &str, seed: Option<f64>) -> Result<WebRunner, JsValue> {
        let config = SimulationConfig::from_json(config_json)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Self::build(config, seed)
    }

    pub fn start(&mut self) {
        self.sim.start();
    }

    pub fn restart(&mut self) {
        self.input.clear();
        self.sim.restart();
    }

    /// Forward `KeyboardEvent.code` on keydown
    pub fn key_down(&mut self, code: &str) {
        self.input.key_down(code);
    }

    /// Forward `KeyboardEvent.code` on keyup
    pub fn key_up(&mut self, code: &str) {
        self.input.key_up(code);
    }

    /// Drop held keys (window blur)
    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    /// True once per release of the restart key
    pub fn restart_requested(&mut self) -> bool {
        self.input.was_triggered(Action::Restart)
    }

    /// Advance one frame. Returns "continue", "game_over" or "won".
    pub fn tick(&mut self, delta_seconds: f32) -> String {
        self.sim.tick(delta_seconds, &self.input).as_str().to_string()
    }

    pub fn score(&self) -> u32 {
        self.sim.score()
    }

    /// Element id of the overlay to show, empty while running
    pub fn screen(&self) -> String {
        self.sim.screen().element_id().unwrap_or_default().to_string()
    }

    /// Music asset that should be playing, empty for silence
    pub fn soundtrack(&self) -> String {
        self.sim.soundtrack().asset().unwrap_or_default().to_string()
    }

    pub fn final_score_text(&self) -> String {
        self.sim.snapshot().final_score_text()
    }

    pub fn snapshot_json(&self) -> String {
        self.sim.snapshot().to_json()
    }

    /// Positions for the scene graph: `[player x,y,z, ball x,y,z, obstacles..., tracks z...]`
    pub fn positions(&self) -> Vec<f32> {
        let state = self.sim.state();
        let mut out = Vec::with_capacity(6 + state.obstacles.len() * 3 + state.tracks.len());
        out.extend_from_slice(&state.player.pos.to_array());
        out.extend_from_slice(&state.ball.pos.to_array());
        for obstacle in &state.obstacles {
            out.extend_from_slice(&obstacle.pos.to_array());
        }
        out.extend(state.tracks.iter().map(|t| t.z));
        out
    }

    /// JSON array of events since the last call
    pub fn drain_events_json(&mut self) -> String {
        serde_json::to_string(&self.sim.drain_events()).unwrap_or_else(|_| "[]".to_string())
    }
}
