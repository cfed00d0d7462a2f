//! Touch lifecycle, countdown, selection and reveal sequencing.
//!
//! Everything in here is synchronous and free of I/O. The [`SessionController`]
//! records what it needs from the outside world as [`Effect`]s; the app shell
//! executes them and feeds timer ticks and animation completions back in.

pub mod countdown;
pub mod geometry;
pub mod registry;
pub mod reveal;
pub mod selector;
pub mod session;
pub mod snapshot;

use std::time::Duration;

pub use countdown::{CountdownConfig, Epoch};
pub use geometry::{Point, Viewport};
pub use registry::{RawTouch, TouchId};
pub use reveal::{AnimationRequest, RevealConfig, Transition};
pub use selector::UniformPicker;
pub use session::{Phase, SessionController};
pub use snapshot::{FillView, SessionSnapshot, TouchView};

/// Timing for one game round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameConfig {
    pub countdown: CountdownConfig,
    pub reveal: RevealConfig,
}

/// Work the controller hands to its collaborators.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Deliver `CountdownBegin(epoch)` after `initial_delay`, then
    /// `CountdownTick(epoch)` every `interval`.
    StartTicker {
        epoch: Epoch,
        initial_delay: Duration,
        interval: Duration,
    },
    /// Stop delivering countdown ticks.
    StopTicker,
    /// Snap the progress value to `from` and animate it to `to`, reporting
    /// natural completion once.
    Animate(AnimationRequest),
}
