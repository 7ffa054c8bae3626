//! Lane signal parsing
//!
//! Classifier labels arrive as free-form text ("Left_Tilt", "center", ...).
//! Matching is case-insensitive substring containment, checked in the order
//! left, right, center. Anything else carries no lane information.

use crate::sim::Lane;

/// Resolve a textual lane signal, or `None` if it names no lane
pub fn parse_lane_signal(signal: &str) -> Option<Lane> {
    let signal = signal.to_lowercase();
    if signal.contains("left") {
        Some(Lane::Left)
    } else if signal.contains("right") {
        Some(Lane::Right)
    } else if signal.contains("center") {
        Some(Lane::Center)
    } else {
        None
    }
}
