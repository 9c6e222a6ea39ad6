//! X68000 scancodes and press/release framing
//!
//! The X68000 keyboard protocol identifies a key with the low 7 bits of a
//! byte; bit 7 clear means press, set means release.

/// Shift key scancode
pub const SHIFT: u8 = 0x70;
/// Control key scancode
pub const CTRL: u8 = 0x71;
/// Hiragana key scancode
pub const HIRAGANA: u8 = 0x56;
/// Full-width key scancode
pub const FULL_WIDTH: u8 = 0x60;
/// OPT.1 key scancode
pub const OPT1: u8 = 0x72;
/// OPT.2 key scancode
pub const OPT2: u8 = 0x73;

/// Key transition direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyDir {
    /// Key pressed
    Down,
    /// Key released
    Up,
}

/// A single scancode transition on the keyboard channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanEvent {
    /// X68000 scancode (low 7 bits significant)
    pub code: u8,
    /// Press or release
    pub dir: KeyDir,
}

impl ScanEvent {
    /// Press transition for `code`
    pub const fn down(code: u8) -> Self {
        Self {
            code,
            dir: KeyDir::Down,
        }
    }

    /// Release transition for `code`
    pub const fn up(code: u8) -> Self {
        Self {
            code,
            dir: KeyDir::Up,
        }
    }

    /// Transition for `code` in direction `dir`
    pub const fn new(code: u8, dir: KeyDir) -> Self {
        Self { code, dir }
    }

    /// Encode as a protocol byte: bit 7 clear on press, set on release
    pub const fn to_byte(self) -> u8 {
        match self.dir {
            KeyDir::Down => self.code & 0x7F,
            KeyDir::Up => self.code | 0x80,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_clears_bit7_release_sets_it() {
        assert_eq!(ScanEvent::down(0x1E).to_byte(), 0x1E);
        assert_eq!(ScanEvent::up(0x1E).to_byte(), 0x9E);
        assert_eq!(ScanEvent::down(SHIFT).to_byte(), 0x70);
        assert_eq!(ScanEvent::up(SHIFT).to_byte(), 0xF0);
    }

    #[test]
    fn framing_is_idempotent_on_bit7() {
        // A code that already has bit 7 set still frames correctly.
        assert_eq!(ScanEvent::down(0x9E).to_byte(), 0x1E);
        assert_eq!(ScanEvent::up(0x9E).to_byte(), 0x9E);
    }
}
