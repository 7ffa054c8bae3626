//! Basket catch detection
//!
//! The basket never moves vertically, so a catch is a lane match plus a
//! symmetric band test around the basket height.

use super::state::{Item, Lane};
use crate::settings::GameSettings;

/// True if `y` lies within the catch band (inclusive at both edges)
#[inline]
pub fn in_catch_band(y: f32, basket_y: f32, half_band: f32) -> bool {
    y >= basket_y - half_band && y <= basket_y + half_band
}

/// True if the basket in `basket` lane catches `item`
pub fn is_caught(item: &Item, basket: Lane, settings: &GameSettings) -> bool {
    item.lane == basket && in_catch_band(item.y, settings.basket_y, settings.catch_half_band)
}
