pub mod spinner;
pub mod transitions;

use std::time::{Duration, Instant};

use crate::game::{AnimationRequest, Transition};

/// A progress value moving between two points over a fixed duration.
#[derive(Debug, Clone, Copy)]
struct Tween {
    transition: Transition,
    from: f64,
    to: f64,
    started: Instant,
    duration: Duration,
}

impl Tween {
    fn fraction(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}

/// Drives the reveal progress on screen, one tween at a time.
#[derive(Debug)]
pub struct AnimationState {
    /// Monotonically increasing frame counter
    pub tick_count: u64,
    /// Value currently on screen
    progress: f64,
    active: Option<Tween>,
    /// With animations off every tween finishes on the next tick
    enabled: bool,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            tick_count: 0,
            progress: 0.0,
            active: None,
            enabled: true,
        }
    }
}

impl AnimationState {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Default::default()
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    #[cfg(test)]
    pub fn has_active_animation(&self) -> bool {
        self.active.is_some()
    }

    /// Snap to the request's start value and begin moving to its target.
    /// A tween already running is replaced without reporting completion.
    pub fn play(&mut self, request: AnimationRequest, now: Instant) {
        self.set_value(request.from);
        let duration = if self.enabled {
            request.duration
        } else {
            Duration::ZERO
        };
        self.active = Some(Tween {
            transition: request.transition,
            from: request.from,
            to: request.to,
            started: now,
            duration,
        });
    }

    /// Set the value without animating. Cancels the running tween silently.
    pub fn set_value(&mut self, value: f64) {
        self.active = None;
        self.progress = value;
    }

    /// Advance one frame. Returns the transition that just finished, once.
    pub fn tick(&mut self, now: Instant) -> Option<Transition> {
        self.tick_count = self.tick_count.wrapping_add(1);

        let tween = self.active?;
        let t = tween.fraction(now);
        self.progress = lerp(tween.from, tween.to, ease_in_out(t));
        if t < 1.0 {
            return None;
        }
        self.progress = tween.to;
        self.active = None;
        Some(tween.transition)
    }
}

/// Linear interpolation
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t.clamp(0.0, 1.0)
}

/// Exponential ease-out interpolation (smooth approach)
pub fn ease_out(current: f64, target: f64, factor: f64) -> f64 {
    current + (target - current) * factor
}

/// Cubic ease-in-out over `0.0..=1.0`
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}
