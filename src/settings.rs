//! Game rule settings
//!
//! The rules are fixed: `GameSettings::default()` is the only configuration the
//! shipped game uses. Settings are injected at engine construction so the
//! difficulty formulas always derive from the configured time limit.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Lane;

/// Rule constants for one engine instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    /// Playfield width
    pub canvas_width: f32,
    /// Playfield height (items past this are missed)
    pub canvas_height: f32,
    /// Fixed basket height
    pub basket_y: f32,
    /// Catch band is basket_y ± this
    pub catch_half_band: f32,
    /// Spawn height
    pub spawn_y: f32,

    // === Difficulty ramp ===
    /// Frames between spawns at round start
    pub base_spawn_interval: u32,
    /// Spawn interval floor
    pub min_spawn_interval: u32,
    /// Fall speed at round start
    pub base_item_speed: f32,
    /// Extra fall speed per elapsed second
    pub speed_ramp: f32,

    // === Clock ===
    /// Round length in seconds
    pub time_limit: u32,
    /// HUD timer alert threshold
    pub low_time_alert: u32,

    /// Storage key for the leaderboard
    pub storage_key: String,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            basket_y: BASKET_Y,
            catch_half_band: CATCH_HALF_BAND,
            spawn_y: SPAWN_Y,

            base_spawn_interval: BASE_SPAWN_INTERVAL,
            min_spawn_interval: MIN_SPAWN_INTERVAL,
            base_item_speed: BASE_ITEM_SPEED,
            speed_ramp: SPEED_RAMP,

            time_limit: TIME_LIMIT,
            low_time_alert: LOW_TIME_ALERT,

            storage_key: HIGH_SCORES_KEY.to_string(),
        }
    }
}

impl GameSettings {
    /// Seconds elapsed in the round for a given remaining time
    pub fn elapsed_secs(&self, remaining: u32) -> u32 {
        self.time_limit.saturating_sub(remaining)
    }

    /// Width of one lane
    pub fn lane_width(&self) -> f32 {
        self.canvas_width / LANES as f32
    }

    /// Horizontal center of a lane
    pub fn lane_center_x(&self, lane: Lane) -> f32 {
        crate::lane_center_x(lane.index(), LANES, self.canvas_width)
    }
}
