/// Pulsing dot for the "tap to play again" hint
const PULSE_FRAMES: &[&str] = &["●", "●", "●", "○", "○"];

pub fn pulse_frame(tick_count: u64) -> &'static str {
    let idx = (tick_count / 5) as usize % PULSE_FRAMES.len();
    PULSE_FRAMES[idx]
}

/// Braille dots shown while waiting on the countdown hold
const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub fn spinner_frame(tick_count: u64) -> char {
    let idx = (tick_count / 3) as usize % SPINNER_FRAMES.len();
    SPINNER_FRAMES[idx]
}
