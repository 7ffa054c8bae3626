//! Per-frame simulation step
//!
//! Advances one frame: spawn, fall, catch, then cull. Items are processed in
//! id order and partitioned into a kept list in a single pass, so each item is
//! resolved exactly once per frame.

use rand::Rng;

use super::collision::is_caught;
use super::spawn::{item_speed, should_spawn, spawn_item};
use super::state::{GameState, Item};
use crate::settings::GameSettings;

/// An item the basket caught this frame
#[derive(Debug, Clone, PartialEq)]
pub struct Catch {
    pub item: Item,
    /// Score after applying this item's delta
    pub score_after: i64,
}

/// What happened during one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Id of the item spawned this frame, if any
    pub spawned: Option<u32>,
    /// Catches in processing order
    pub catches: Vec<Catch>,
    /// Items that fell off the bottom
    pub missed: u32,
}

/// Advance the game state by one frame. No-op while inactive.
pub fn advance_frame<R: Rng>(
    state: &mut GameState,
    settings: &GameSettings,
    rng: &mut R,
) -> FrameReport {
    let mut report = FrameReport::default();
    if !state.active {
        return report;
    }

    state.frame_count += 1;

    // 1. Spawn
    if should_spawn(settings, state.frame_count, state.remaining_secs) {
        report.spawned = Some(spawn_item(state, settings, rng));
    }

    // 2. Fall, catch, cull
    let speed = item_speed(settings, state.remaining_secs);
    let items = std::mem::take(&mut state.items);
    let mut kept = Vec::with_capacity(items.len());

    for mut item in items {
        item.y += speed;

        if is_caught(&item, state.basket, settings) {
            state.score += item.kind.score_delta();
            log::debug!(
                "Caught {} in lane {} -> score {}",
                item.kind.as_str(),
                item.lane.index(),
                state.score
            );
            report.catches.push(Catch {
                item,
                score_after: state.score,
            });
            continue;
        }

        if item.y > settings.canvas_height {
            report.missed += 1;
            continue;
        }

        kept.push(item);
    }

    state.items = kept;
    report
}
