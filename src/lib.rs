//! Fruit Catcher - A three-lane timed catching game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, falling items, catches, countdown)
//! - `engine`: Owned game engine driving the simulation and its lifecycle
//! - `renderer`: Draw-command composition for a 2D raster surface
//! - `persistence`: Key-value storage backends (file, memory, LocalStorage)
//! - `highscores`: Top-5 leaderboard
//! - `web`: JS bindings over LocalStorage (wasm32 only)

pub mod engine;
pub mod error;
pub mod highscores;
pub mod input;
pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use engine::GameEngine;
pub use error::{EngineWarning, StorageError};
pub use highscores::{HighScoreEntry, HighScores};
pub use settings::GameSettings;

/// Game configuration constants
pub mod consts {
    /// Number of lanes (0: Left, 1: Center, 2: Right)
    pub const LANES: u8 = 3;

    /// Canvas dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Basket sits at a fixed height; only its lane changes
    pub const BASKET_Y: f32 = 520.0;
    /// Half-height of the catch band around the basket
    pub const CATCH_HALF_BAND: f32 = 60.0;

    /// Items spawn just above the visible area
    pub const SPAWN_Y: f32 = -20.0;

    /// Frames between spawns at the start of a round
    pub const BASE_SPAWN_INTERVAL: u32 = 60;
    /// Spawn interval never drops below this
    pub const MIN_SPAWN_INTERVAL: u32 = 20;

    /// Fall speed (units/frame) at the start of a round
    pub const BASE_ITEM_SPEED: f32 = 5.0;
    /// Extra fall speed per elapsed second
    pub const SPEED_RAMP: f32 = 0.1;

    /// Round length in seconds
    pub const TIME_LIMIT: u32 = 30;
    /// Timer turns red at or below this many seconds
    pub const LOW_TIME_ALERT: u32 = 5;

    /// Storage key for the leaderboard
    pub const HIGH_SCORES_KEY: &str = "fruitCatcherHighScores";
}

/// Horizontal center of a lane for the given canvas width
#[inline]
pub fn lane_center_x(lane: u8, lanes: u8, canvas_width: f32) -> f32 {
    let lane_width = canvas_width / lanes as f32;
    lane as f32 * lane_width + lane_width / 2.0
}

/// Browser entry point: wires logging and panic reporting to the console
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_centers() {
        assert!((lane_center_x(0, 3, 800.0) - 133.333).abs() < 0.01);
        assert!((lane_center_x(1, 3, 800.0) - 400.0).abs() < 0.01);
        assert!((lane_center_x(2, 3, 800.0) - 666.666).abs() < 0.01);
    }
}
