use tracing::{debug, info, trace};

use super::countdown::{Countdown, CountdownStep, Epoch};
use super::geometry::{Point, Viewport};
use super::registry::{RawTouch, TouchPoint, TouchRegistry};
use super::reveal::{RevealAnimator, Transition};
use super::selector::{self, Picker, UniformPicker};
use super::snapshot::{color_index, FillView, SessionSnapshot, TouchView};
use super::{Effect, GameConfig};

/// Where a round currently is. Exactly one holds at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No touches, accepting input.
    Idle,
    /// At least one touch registered, accepting input.
    Accepting,
    /// All touches locked, countdown running.
    CountingDown,
    /// Winner chosen, disc growing.
    Revealing,
    /// Disc covers the screen, waiting for a tap.
    Revealed,
    /// Disc shrinking after a tap.
    Restarting,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Phase::Idle => "Idle",
            Phase::Accepting => "Accepting",
            Phase::CountingDown => "Counting down",
            Phase::Revealing => "Revealing",
            Phase::Revealed => "Revealed",
            Phase::Restarting => "Restarting",
        };
        write!(f, "{s}")
    }
}

/// Flags describing the session, as seen from outside the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionState {
    pub accepting_input: bool,
    pub countdown_value: u32,
    pub countdown_running: bool,
    pub selected: Option<TouchPoint>,
    pub animating: bool,
    pub restarting: bool,
}

impl SessionState {
    pub fn phase(&self, has_touches: bool) -> Phase {
        match (self.selected, self.animating, self.restarting) {
            (_, _, true) => Phase::Restarting,
            (Some(_), true, false) => Phase::Revealing,
            (Some(_), false, false) => Phase::Revealed,
            (None, _, false) if self.countdown_running => Phase::CountingDown,
            (None, _, false) if has_touches => Phase::Accepting,
            (None, _, false) => Phase::Idle,
        }
    }
}

/// Owns the registry and every piece of round state.
///
/// Input handlers mutate state synchronously and queue [`Effect`]s; the caller
/// drains them with [`SessionController::drain_effects`] and reports timer
/// ticks and animation completions back.
pub struct SessionController<P: Picker = UniformPicker> {
    viewport: Viewport,
    registry: TouchRegistry,
    countdown: Countdown,
    animator: RevealAnimator,
    picker: P,
    selected: Option<TouchPoint>,
    restarting: bool,
    effects: Vec<Effect>,
}

impl<P: Picker> SessionController<P> {
    pub fn new(config: GameConfig, viewport: Viewport, picker: P) -> Self {
        Self {
            viewport,
            registry: TouchRegistry::new(),
            countdown: Countdown::new(config.countdown),
            animator: RevealAnimator::new(config.reveal),
            picker,
            selected: None,
            restarting: false,
            effects: Vec::new(),
        }
    }

    // ── Queries ───────────────────────────────────────────────────────

    pub fn accepting_input(&self) -> bool {
        self.selected.is_none() && !self.countdown.is_running()
    }

    pub fn state(&self) -> SessionState {
        SessionState {
            accepting_input: self.accepting_input(),
            countdown_value: self.countdown.value(),
            countdown_running: self.countdown.is_running(),
            selected: self.selected,
            animating: self.animator.is_animating(),
            restarting: self.restarting,
        }
    }

    pub fn phase(&self) -> Phase {
        self.state().phase(!self.registry.is_empty())
    }

    #[cfg(test)]
    pub fn registry(&self) -> &TouchRegistry {
        &self.registry
    }

    #[cfg(test)]
    pub fn selected(&self) -> Option<&TouchPoint> {
        self.selected.as_ref()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Epoch of the current (or last) countdown run.
    #[cfg(test)]
    pub fn countdown_epoch(&self) -> Epoch {
        self.countdown.epoch()
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Take every effect queued since the last call.
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    // ── Touch input ───────────────────────────────────────────────────

    /// A move event carrying every currently active contact.
    pub fn handle_move(&mut self, touches: &[RawTouch]) {
        if !self.accepting_input() {
            trace!(count = touches.len(), "move ignored, not accepting input");
            return;
        }
        for t in touches {
            self.registry.apply_move(t.id, Point::new(t.x, t.y));
            debug!(id = t.id, offset = ?self.viewport.normalize(t.x, t.y), "touch");
        }
    }

    /// Contacts were lifted; `remaining` are still down.
    pub fn handle_release(&mut self, remaining: usize) {
        self.handle_tap();

        if !self.accepting_input() || remaining > 0 {
            return;
        }
        if self.registry.is_empty() {
            debug!("full release with no touches, nothing to count down");
            return;
        }

        self.registry.apply_release_all();
        let Some(epoch) = self.countdown.start() else {
            return;
        };
        info!(touches = self.registry.len(), epoch, "all touches released, countdown armed");
        let cfg = *self.countdown.config();
        self.effects.push(Effect::StartTicker {
            epoch,
            initial_delay: cfg.initial_delay,
            interval: cfg.tick_interval,
        });
    }

    /// Tap anywhere. Starts the restart transition when a winner is shown.
    /// Returns whether a restart began.
    pub fn handle_tap(&mut self) -> bool {
        if self.selected.is_none() {
            return false;
        }
        if self.animator.is_animating() {
            debug!("restart ignored, animation in flight");
            return false;
        }
        let Some(request) = self.animator.begin_restart() else {
            return false;
        };

        self.countdown.reset();
        self.registry.clear();
        self.restarting = true;
        self.effects.push(Effect::StopTicker);
        self.effects.push(Effect::Animate(request));
        info!("restarting");
        true
    }

    // ── Collaborator callbacks ────────────────────────────────────────

    /// The initial delay of countdown run `epoch` has passed.
    pub fn handle_countdown_begin(&mut self, epoch: Epoch) {
        if self.countdown.show(epoch) {
            debug!(value = self.countdown.value(), "countdown visible");
        }
    }

    pub fn handle_countdown_tick(&mut self, epoch: Epoch) {
        match self.countdown.tick(epoch) {
            CountdownStep::Stale => trace!(epoch, "stale countdown tick"),
            CountdownStep::Continue(value) => debug!(value, "countdown"),
            CountdownStep::Complete => {
                self.effects.push(Effect::StopTicker);
                self.select_winner();
            }
        }
    }

    pub fn handle_animation_complete(&mut self, transition: Transition) {
        if !self.animator.complete(transition) {
            debug!(?transition, "completion for a transition not in flight");
            return;
        }
        match transition {
            Transition::Reveal => {
                info!(id = self.selected.map(|t| t.id), "winner revealed");
            }
            Transition::Restart => {
                self.selected = None;
                self.restarting = false;
                info!("back to idle");
            }
        }
    }

    fn select_winner(&mut self) {
        let Some(winner) = selector::select(&self.registry, &mut self.picker) else {
            debug!("countdown finished with no touches");
            return;
        };
        let origin = self
            .viewport
            .normalize(winner.position.x, winner.position.y);
        info!(id = winner.id, out_of = self.registry.len(), "winner selected");
        self.selected = Some(winner);
        if let Some(request) = self.animator.begin_reveal(origin) {
            self.effects.push(Effect::Animate(request));
        }
    }

    // ── Rendering boundary ────────────────────────────────────────────

    /// Build the renderer view. `progress` is the value currently on screen.
    pub fn snapshot(&self, progress: f64, palette_size: usize) -> SessionSnapshot {
        let countdown = self
            .countdown
            .is_visible()
            .then(|| self.countdown.value());

        let fill = self.selected.map(|winner| FillView {
            id: winner.id,
            origin: self.animator.fill_origin(),
            radius: self.viewport.coverage_radius(progress),
            progress,
            color_index: color_index(winner.id, palette_size),
            label: winner.id.saturating_add(1),
            backdrop: !self.restarting,
        });

        let touches = self
            .registry
            .iter()
            .map(|t| TouchView {
                id: t.id,
                position: t.position,
                offset: self.viewport.normalize(t.position.x, t.position.y),
                color_index: color_index(t.id, palette_size),
                label: t.id.saturating_add(1),
                locked: t.locked,
            })
            .collect();

        SessionSnapshot {
            phase: self.phase(),
            countdown,
            fill,
            touches,
        }
    }
}
