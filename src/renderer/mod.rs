//! Rendering module
//!
//! Produces draw commands for an external 2D surface; never touches pixels.

pub mod commands;
pub mod frame;

pub use commands::{Color, DrawCommand, TextAlign, colors};
pub use frame::compose_frame;
