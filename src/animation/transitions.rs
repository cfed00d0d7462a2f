use std::collections::HashMap;

use super::ease_out;
use crate::game::{Point, TouchId, TouchView};

/// On-screen position of a touch marker, trailing its real position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub position: Point,
    /// Frames since the marker appeared (capped)
    pub seen_ticks: u16,
}

/// Ease every marker toward its touch. Call this every tick.
/// Markers for touches that are gone are dropped; new touches appear in place.
pub fn smooth_markers(markers: &mut HashMap<TouchId, Marker>, touches: &[TouchView], factor: f64) {
    markers.retain(|id, _| touches.iter().any(|t| t.id == *id));

    for touch in touches {
        let marker = markers.entry(touch.id).or_insert(Marker {
            position: touch.position,
            seen_ticks: 0,
        });
        marker.position = Point::new(
            ease_out(marker.position.x, touch.position.x, factor),
            ease_out(marker.position.y, touch.position.y, factor),
        );

        // Increment seen ticks for fade-in (cap at 60 to avoid overflow)
        if marker.seen_ticks < 60 {
            marker.seen_ticks = marker.seen_ticks.saturating_add(1);
        }
    }
}

/// Opacity (0.0 - 1.0) for a new marker based on seen_ticks.
/// Used to fade markers in over ~10 ticks.
pub fn fade_in_opacity(seen_ticks: u16) -> f64 {
    if seen_ticks >= 10 {
        1.0
    } else {
        seen_ticks as f64 / 10.0
    }
}
