//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-driven motion only
//! - Seeded RNG only
//! - Stable iteration order (by item ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod countdown;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{in_catch_band, is_caught};
pub use countdown::{Countdown, duration_from_millis};
pub use spawn::{item_speed, kind_for_roll, spawn_interval, spawn_item};
pub use state::{GamePhase, GameState, Item, ItemKind, Lane};
pub use tick::{Catch, FrameReport, advance_frame};
