//! Draw-command vocabulary for a 2D raster surface

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// RGBA color, each channel in [0, 1]
pub type Color = [f32; 4];

/// Horizontal anchor for text placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// One drawing instruction. Coordinates are canvas units, origin top-left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Full-canvas background image; the surface fills with `fallback` until it loads
    Background { asset: String, fallback: Color },
    /// Filled axis-aligned rectangle
    FillRect { min: Vec2, size: Vec2, color: Color },
    /// Straight line segment
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
    /// Emoji glyph centered on `pos`
    Glyph { glyph: String, pos: Vec2, size: f32 },
    /// Text anchored at `pos` (baseline) with the given alignment
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        bold: bool,
        align: TextAlign,
        color: Color,
    },
}

impl DrawCommand {
    pub fn text(text: impl Into<String>, pos: Vec2, size: f32, align: TextAlign, color: Color) -> Self {
        DrawCommand::Text {
            text: text.into(),
            pos,
            size,
            bold: false,
            align,
            color,
        }
    }

    pub fn glyph(glyph: impl Into<String>, pos: Vec2, size: f32) -> Self {
        DrawCommand::Glyph {
            glyph: glyph.into(),
            pos,
            size,
        }
    }
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const SKY_BLUE: Color = [0.529, 0.808, 0.922, 1.0]; // #87CEEB
    pub const LANE_LINE: Color = [1.0, 1.0, 1.0, 0.5];
    pub const HUD_STRIP: Color = [0.0, 0.0, 0.0, 0.5];
    pub const OVERLAY: Color = [0.0, 0.0, 0.0, 0.8];
    pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const RED: Color = [1.0, 0.0, 0.0, 1.0];
    pub const GOLD: Color = [1.0, 0.843, 0.0, 1.0];
    pub const YELLOW: Color = [1.0, 1.0, 0.0, 1.0];
    pub const HINT_GREEN: Color = [0.0, 1.0, 0.0, 1.0];
}
