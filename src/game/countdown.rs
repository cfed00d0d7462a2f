use std::time::Duration;

/// Countdown timing, taken from the `[game]` config section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownConfig {
    pub start: u32,
    pub tick_interval: Duration,
    /// Hold between the last lift and the first interval.
    pub initial_delay: Duration,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            start: 3,
            tick_interval: Duration::from_millis(1000),
            initial_delay: Duration::from_millis(800),
        }
    }
}

/// Identifies one run of the countdown. Ticks from an older run are dropped.
pub type Epoch = u64;

/// Result of feeding one tick into the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStep {
    /// The value went down and is now this.
    Continue(u32),
    /// The run finished; value is back at start and the timer is idle.
    Complete,
    /// Tick was not for the current run.
    Stale,
}

/// One-shot repeating countdown.
///
/// `value` stays in `1..=start` while running and equals `start` while idle.
#[derive(Debug, Clone)]
pub struct Countdown {
    config: CountdownConfig,
    value: u32,
    running: bool,
    /// Set once the initial delay has passed.
    visible: bool,
    epoch: Epoch,
}

impl Countdown {
    pub fn new(config: CountdownConfig) -> Self {
        let config = CountdownConfig {
            start: config.start.max(1),
            ..config
        };
        Self {
            value: config.start,
            running: false,
            visible: false,
            epoch: 0,
            config,
        }
    }

    pub fn config(&self) -> &CountdownConfig {
        &self.config
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    #[cfg(test)]
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Whether the value should be on screen.
    pub fn is_visible(&self) -> bool {
        self.running && self.visible
    }

    /// Begin a run. Returns the new epoch, or `None` if a run is already going.
    pub fn start(&mut self) -> Option<Epoch> {
        if self.running {
            return None;
        }
        self.running = true;
        self.visible = false;
        self.epoch = self.epoch.wrapping_add(1);
        Some(self.epoch)
    }

    /// The initial delay of run `epoch` is over.
    pub fn show(&mut self, epoch: Epoch) -> bool {
        if !self.running || epoch != self.epoch {
            return false;
        }
        self.visible = true;
        true
    }

    pub fn tick(&mut self, epoch: Epoch) -> CountdownStep {
        if !self.running || epoch != self.epoch {
            return CountdownStep::Stale;
        }
        if self.value > 1 {
            self.value -= 1;
            return CountdownStep::Continue(self.value);
        }
        self.value = self.config.start;
        self.running = false;
        self.visible = false;
        CountdownStep::Complete
    }

    /// Return to idle and invalidate any ticks still in flight.
    pub fn reset(&mut self) {
        self.value = self.config.start;
        self.running = false;
        self.visible = false;
        self.epoch = self.epoch.wrapping_add(1);
    }
}
