//! Frame composition: game state in, draw commands out
//!
//! Everything here is a pure function of its inputs.

use glam::Vec2;

use super::commands::{DrawCommand, TextAlign, colors};
use crate::consts::LANES;
use crate::highscores::HighScores;
use crate::settings::GameSettings;
use crate::sim::{GameState, Item, Lane};

/// Background asset name the surface should resolve
pub const BACKGROUND_ASSET: &str = "background";
/// Basket glyph
pub const BASKET_GLYPH: &str = "🧺";

const ITEM_GLYPH_SIZE: f32 = 60.0;
const BASKET_GLYPH_SIZE: f32 = 90.0;
const HUD_HEIGHT: f32 = 40.0;
const HUD_TEXT_SIZE: f32 = 24.0;
const HUD_MARGIN: f32 = 10.0;
const HUD_BASELINE: f32 = 25.0;

/// Blink period (frames) for the restart hint; visible for the first half
const BLINK_PERIOD: u64 = 60;

/// Compose the draw list for the current state
pub fn compose_frame(
    state: &GameState,
    settings: &GameSettings,
    leaderboard: &HighScores,
) -> Vec<DrawCommand> {
    let mut commands = vec![background()];

    if state.show_summary && !state.active {
        commands.extend(summary_overlay(state, settings, leaderboard));
        return commands;
    }

    if !state.active {
        return commands;
    }

    commands.extend(lane_separators(settings));
    commands.extend(state.items.iter().map(|item| item_glyph(item, settings)));
    commands.push(basket_glyph(state.basket, settings));
    commands.extend(hud(state, settings));
    commands
}

fn background() -> DrawCommand {
    DrawCommand::Background {
        asset: BACKGROUND_ASSET.to_string(),
        fallback: colors::SKY_BLUE,
    }
}

/// Vertical lines between lanes
pub fn lane_separators(settings: &GameSettings) -> Vec<DrawCommand> {
    (1..LANES)
        .map(|i| {
            let x = i as f32 * settings.lane_width();
            DrawCommand::Line {
                from: Vec2::new(x, 0.0),
                to: Vec2::new(x, settings.canvas_height),
                width: 1.0,
                color: colors::LANE_LINE,
            }
        })
        .collect()
}

pub fn item_glyph(item: &Item, settings: &GameSettings) -> DrawCommand {
    DrawCommand::glyph(
        item.kind.glyph(),
        Vec2::new(settings.lane_center_x(item.lane), item.y),
        ITEM_GLYPH_SIZE,
    )
}

pub fn basket_glyph(lane: Lane, settings: &GameSettings) -> DrawCommand {
    DrawCommand::glyph(
        BASKET_GLYPH,
        Vec2::new(settings.lane_center_x(lane), settings.basket_y),
        BASKET_GLYPH_SIZE,
    )
}

/// Score (left) and remaining time (right) on a translucent strip
pub fn hud(state: &GameState, settings: &GameSettings) -> Vec<DrawCommand> {
    let time_color = if state.remaining_secs <= settings.low_time_alert {
        colors::RED
    } else {
        colors::WHITE
    };

    vec![
        DrawCommand::FillRect {
            min: Vec2::ZERO,
            size: Vec2::new(settings.canvas_width, HUD_HEIGHT),
            color: colors::HUD_STRIP,
        },
        DrawCommand::text(
            format!("Score: {}", state.score),
            Vec2::new(HUD_MARGIN, HUD_BASELINE),
            HUD_TEXT_SIZE,
            TextAlign::Left,
            colors::WHITE,
        ),
        DrawCommand::text(
            format!("Time: {}", state.remaining_secs),
            Vec2::new(settings.canvas_width - HUD_MARGIN, HUD_BASELINE),
            HUD_TEXT_SIZE,
            TextAlign::Right,
            time_color,
        ),
    ]
}

/// Post-game leaderboard overlay
pub fn summary_overlay(
    state: &GameState,
    settings: &GameSettings,
    leaderboard: &HighScores,
) -> Vec<DrawCommand> {
    let cx = settings.canvas_width / 2.0;
    let mut commands = vec![
        DrawCommand::FillRect {
            min: Vec2::ZERO,
            size: Vec2::new(settings.canvas_width, settings.canvas_height),
            color: colors::OVERLAY,
        },
        DrawCommand::Text {
            text: "🏆 HALL OF FAME 🏆".to_string(),
            pos: Vec2::new(cx, 80.0),
            size: 40.0,
            bold: true,
            align: TextAlign::Center,
            color: colors::GOLD,
        },
        DrawCommand::text(
            format!("Your Score: {}", state.score),
            Vec2::new(cx, 140.0),
            30.0,
            TextAlign::Center,
            colors::WHITE,
        ),
    ];

    let mut y = 200.0;
    for (index, entry) in leaderboard.entries.iter().enumerate() {
        let color = if index == 0 { colors::YELLOW } else { colors::WHITE };
        commands.push(DrawCommand::text(
            format!("{}. {} pts ({})", index + 1, entry.score, entry.date),
            Vec2::new(cx, y),
            24.0,
            TextAlign::Center,
            color,
        ));
        y += 40.0;
    }

    if restart_hint_visible(state.frame_count) {
        commands.push(DrawCommand::text(
            "Press Restart Button to Play Again",
            Vec2::new(cx, 500.0),
            20.0,
            TextAlign::Center,
            colors::HINT_GREEN,
        ));
    }

    commands
}

#[inline]
pub fn restart_hint_visible(frame_count: u64) -> bool {
    frame_count % BLINK_PERIOD < BLINK_PERIOD / 2
}
