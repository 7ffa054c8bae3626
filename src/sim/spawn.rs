//! Spawn scheduling and difficulty ramp
//!
//! Both the spawn interval and the fall speed derive from seconds elapsed in
//! the round, computed against the configured time limit.

use rand::Rng;

use super::state::{GameState, ItemKind, Lane};
use crate::settings::GameSettings;

/// Cumulative spawn thresholds on a uniform roll in [0, 1)
const BOMB_THRESHOLD: f32 = 0.35;
const BANANA_THRESHOLD: f32 = 0.60;
const ORANGE_THRESHOLD: f32 = 0.80;

/// Frames between spawns for the given remaining time
pub fn spawn_interval(settings: &GameSettings, remaining_secs: u32) -> u32 {
    settings
        .base_spawn_interval
        .saturating_sub(settings.elapsed_secs(remaining_secs))
        .max(settings.min_spawn_interval)
        .max(1)
}

/// Fall speed (units/frame) for the given remaining time
pub fn item_speed(settings: &GameSettings, remaining_secs: u32) -> f32 {
    settings.base_item_speed + settings.elapsed_secs(remaining_secs) as f32 * settings.speed_ramp
}

/// Whether this frame is a spawn frame
pub fn should_spawn(settings: &GameSettings, frame_count: u64, remaining_secs: u32) -> bool {
    frame_count % spawn_interval(settings, remaining_secs) as u64 == 0
}

/// Map a uniform roll in [0, 1) to an item kind
/// (Bomb 35%, Banana 25%, Orange 20%, Apple 20%)
pub fn kind_for_roll(roll: f32) -> ItemKind {
    if roll < BOMB_THRESHOLD {
        ItemKind::Bomb
    } else if roll < BANANA_THRESHOLD {
        ItemKind::Banana
    } else if roll < ORANGE_THRESHOLD {
        ItemKind::Orange
    } else {
        ItemKind::Apple
    }
}

/// Draw a lane uniformly
pub fn random_lane<R: Rng>(rng: &mut R) -> Lane {
    Lane::ALL[rng.random_range(0..Lane::ALL.len())]
}

/// Draw an item kind with the fixed weights
pub fn random_kind<R: Rng>(rng: &mut R) -> ItemKind {
    kind_for_roll(rng.random::<f32>())
}

/// Spawn one item above the visible area of a random lane
pub fn spawn_item<R: Rng>(state: &mut GameState, settings: &GameSettings, rng: &mut R) -> u32 {
    let lane = random_lane(rng);
    let kind = random_kind(rng);
    let id = state.push_item(lane, settings.spawn_y, kind);
    log::debug!("Spawned {} in lane {} (id {})", kind.as_str(), lane.index(), id);
    id
}
