//! Keyboard auto-repeat
//!
//! The real X68000 keyboard repeats held keys itself; the host tunes the
//! timing with the 0x6n/0x7n commands. This timer replays the last held key
//! after an initial delay, then at the repeat interval. It is off by default
//! and is a convenience on top of the core protocol, not required for
//! correctness.

/// Default initial delay before the first repeat, milliseconds
pub const DEFAULT_DELAY_MS: u16 = 500;
/// Default interval between repeats, milliseconds
pub const DEFAULT_INTERVAL_MS: u16 = 110;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RepeatState {
    Idle,
    InitialDelay { since_ms: u32 },
    Repeating { since_ms: u32 },
}

/// Timer-driven auto-repeat state machine
///
/// Single-key: arming a new key replaces the old one, matching a keyboard
/// where only the most recent key repeats.
#[derive(Debug, Clone, Copy)]
pub struct RepeatTimer {
    state: RepeatState,
    keycode: u8,
    delay_ms: u16,
    interval_ms: u16,
    enabled: bool,
}

impl Default for RepeatTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl RepeatTimer {
    /// Create a disarmed, disabled timer with default timings
    pub const fn new() -> Self {
        Self {
            state: RepeatState::Idle,
            keycode: 0,
            delay_ms: DEFAULT_DELAY_MS,
            interval_ms: DEFAULT_INTERVAL_MS,
            enabled: false,
        }
    }

    /// Turn repeating on or off; disabling disarms any held key
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.reset();
        }
    }

    /// Set the initial delay (host 0x6n command)
    pub fn set_delay(&mut self, ms: u16) {
        self.delay_ms = ms;
    }

    /// Set the repeat interval (host 0x7n command)
    pub fn set_interval(&mut self, ms: u16) {
        self.interval_ms = ms;
    }

    /// Disarm and return to idle; timing configuration is kept
    pub fn reset(&mut self) {
        self.state = RepeatState::Idle;
        self.keycode = 0;
    }

    /// Arm the timer on a key press
    pub fn key_down(&mut self, keycode: u8, now_ms: u32) {
        if !self.enabled {
            return;
        }
        self.keycode = keycode;
        self.state = RepeatState::InitialDelay { since_ms: now_ms };
    }

    /// Disarm if the released key is the armed one
    pub fn key_up(&mut self, keycode: u8) {
        if self.keycode == keycode {
            self.reset();
        }
    }

    /// Advance the timer; returns the keycode to replay when a repeat fires
    pub fn poll(&mut self, now_ms: u32) -> Option<u8> {
        if !self.enabled {
            return None;
        }
        let (since_ms, threshold) = match self.state {
            RepeatState::Idle => return None,
            RepeatState::InitialDelay { since_ms } => (since_ms, u32::from(self.delay_ms)),
            RepeatState::Repeating { since_ms } => (since_ms, u32::from(self.interval_ms)),
        };
        if now_ms.wrapping_sub(since_ms) >= threshold {
            self.state = RepeatState::Repeating { since_ms: now_ms };
            Some(self.keycode)
        } else {
            None
        }
    }
}
