use super::geometry::Point;
use super::registry::TouchId;
use super::session::Phase;

/// Read-only view of a session for the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub phase: Phase,
    /// Countdown value while it is on screen.
    pub countdown: Option<u32>,
    pub fill: Option<FillView>,
    pub touches: Vec<TouchView>,
}

/// The reveal disc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillView {
    pub id: TouchId,
    /// Center-relative origin of the disc.
    pub origin: Point,
    pub radius: f64,
    pub progress: f64,
    pub color_index: usize,
    /// One-based player number shown in the middle of the disc.
    pub label: u32,
    /// Dim everything behind the disc. Off while restarting.
    pub backdrop: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchView {
    pub id: TouchId,
    /// Absolute position.
    pub position: Point,
    /// Center-relative position.
    pub offset: Point,
    pub color_index: usize,
    pub label: u32,
    pub locked: bool,
}

/// Palette slot for a touch id. `palette_size` of zero maps everything to 0.
pub fn color_index(id: TouchId, palette_size: usize) -> usize {
    if palette_size == 0 {
        return 0;
    }
    id as usize % palette_size
}
