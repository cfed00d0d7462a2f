use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::animation::transitions::{smooth_markers, Marker};
use crate::animation::AnimationState;
use crate::config::Config;
use crate::event::{spawn_countdown_ticker, Event};
use crate::game::{
    Effect, SessionController, SessionSnapshot, TouchId, UniformPicker, Viewport,
};
use crate::input::{viewport_for, PointerAdapter, TouchSignal};
use crate::ui::theme::Theme;

/// Fraction of the remaining distance a marker covers per frame
const MARKER_SMOOTHING: f64 = 0.35;

// ── Application State ─────────────────────────────────────────────────

pub struct App {
    pub should_quit: bool,
    pub show_help: bool,
    pub show_status_bar: bool,
    pub theme: Theme,

    // Game
    pub session: SessionController,
    pub pointer: PointerAdapter,

    // Rendering-side animation
    pub animation: AnimationState,
    pub markers: HashMap<TouchId, Marker>,

    // Event sender for timer tasks
    event_tx: mpsc::UnboundedSender<Event>,
    countdown_task: Option<JoinHandle<()>>,
}

impl App {
    pub fn new(config: &Config, viewport: Viewport, event_tx: mpsc::UnboundedSender<Event>) -> Self {
        let picker = UniformPicker::from_seed(config.game.seed);
        Self {
            should_quit: false,
            show_help: false,
            show_status_bar: config.appearance.show_status_bar,
            theme: Theme::from_config(&config.appearance),

            session: SessionController::new(config.game(), viewport, picker),
            pointer: PointerAdapter::new(),

            animation: AnimationState::new(config.appearance.animations),
            markers: HashMap::new(),

            event_tx,
            countdown_task: None,
        }
    }

    /// Dispatch one event, then carry out whatever the session asked for
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => match self.pointer.handle(mouse) {
                Some(TouchSignal::Move(touches)) => self.session.handle_move(&touches),
                Some(TouchSignal::Release { remaining }) => self.session.handle_release(remaining),
                None => {}
            },
            Event::Tick => self.tick(Instant::now()),
            Event::Resize(w, h) => {
                debug!(w, h, "resize");
                self.session.set_viewport(viewport_for(w, h));
            }
            Event::CountdownBegin(epoch) => self.session.handle_countdown_begin(epoch),
            Event::CountdownTick(epoch) => self.session.handle_countdown_tick(epoch),
        }
        self.run_effects();
    }

    /// Advance animations by one frame
    pub fn tick(&mut self, now: Instant) {
        if let Some(done) = self.animation.tick(now) {
            self.session.handle_animation_complete(done);
        }
        let snapshot = self.snapshot();
        smooth_markers(&mut self.markers, &snapshot.touches, MARKER_SMOOTHING);
    }

    /// What the renderer should draw right now
    pub fn snapshot(&self) -> SessionSnapshot {
        self.session
            .snapshot(self.animation.progress(), self.theme.palette_size())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.show_help {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.show_help = false;
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.session.handle_tap();
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            _ => {}
        }
    }

    fn run_effects(&mut self) {
        for effect in self.session.drain_effects() {
            match effect {
                Effect::StartTicker {
                    epoch,
                    initial_delay,
                    interval,
                } => {
                    self.stop_countdown();
                    self.countdown_task = Some(spawn_countdown_ticker(
                        self.event_tx.clone(),
                        epoch,
                        initial_delay,
                        interval,
                    ));
                }
                Effect::StopTicker => self.stop_countdown(),
                Effect::Animate(request) => {
                    info!(
                        transition = ?request.transition,
                        to = request.to,
                        ms = request.duration.as_millis() as u64,
                        "animate"
                    );
                    self.animation.play(request, Instant::now());
                }
            }
        }
    }

    fn stop_countdown(&mut self) {
        if let Some(task) = self.countdown_task.take() {
            task.abort();
        }
    }

    /// Stop any timer still running
    pub fn shutdown(&mut self) {
        self.stop_countdown();
    }
}
