//! USB HID boot-protocol input reports
//!
//! The external USB host stack delivers keyboard and mouse input as
//! boot-protocol reports (USB HID Spec 1.11, Appendix B). This module decodes
//! them and diffs consecutive keyboard reports into per-key press/release
//! events, which is the form the rest of the adapter consumes.

use bitflags::bitflags;

bitflags! {
    /// Keyboard modifier keys, one bit per physical key
    ///
    /// Matches byte 0 of the boot-protocol keyboard report.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct KeyModifiers: u8 {
        /// Left Control
        const LEFT_CTRL = 0b0000_0001;
        /// Left Shift
        const LEFT_SHIFT = 0b0000_0010;
        /// Left Alt
        const LEFT_ALT = 0b0000_0100;
        /// Left GUI (Windows/Command key)
        const LEFT_GUI = 0b0000_1000;
        /// Right Control
        const RIGHT_CTRL = 0b0001_0000;
        /// Right Shift
        const RIGHT_SHIFT = 0b0010_0000;
        /// Right Alt
        const RIGHT_ALT = 0b0100_0000;
        /// Right GUI (Windows/Command key)
        const RIGHT_GUI = 0b1000_0000;
    }
}

impl Default for KeyModifiers {
    fn default() -> Self {
        Self::empty()
    }
}

/// HID keyboard report (boot protocol)
///
/// Standard 8-byte format: modifier bitmask, reserved byte, then up to six
/// simultaneously held keycodes.
///
/// # Example
///
/// ```
/// use x68k_usb_adapter::hid::KeyboardReport;
///
/// let data: [u8; 8] = [0x02, 0x00, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00];
/// let report = KeyboardReport::parse(&data).unwrap();
/// // Left Shift held, key 'A' pressed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyboardReport {
    /// Modifier key states
    pub modifiers: KeyModifiers,
    /// Active keycodes, 0x00 = empty slot
    pub keycodes: [u8; 6],
}

impl KeyboardReport {
    /// Parse a report from raw boot-protocol bytes
    ///
    /// Returns `None` for short reports.
    pub fn parse(data: &[u8]) -> Option<Self> {
        if data.len() < 8 {
            return None;
        }
        Some(Self {
            modifiers: KeyModifiers::from_bits_truncate(data[0]),
            keycodes: [data[2], data[3], data[4], data[5], data[6], data[7]],
        })
    }

    /// Keys held in this report but not in `prev` (new presses), slot order
    pub fn pressed_since<'a>(&'a self, prev: &'a Self) -> impl Iterator<Item = u8> + 'a {
        self.keycodes
            .iter()
            .copied()
            .filter(move |&code| code != 0 && !prev.contains(code))
    }

    /// Keys held in `prev` but not in this report (releases), slot order
    pub fn released_since<'a>(&'a self, prev: &'a Self) -> impl Iterator<Item = u8> + 'a {
        prev.keycodes
            .iter()
            .copied()
            .filter(move |&code| code != 0 && !self.contains(code))
    }

    fn contains(&self, keycode: u8) -> bool {
        self.keycodes.contains(&keycode)
    }
}

bitflags! {
    /// Mouse button states
    ///
    /// Buttons 1-3 are defined by the boot protocol; the X68000 protocol
    /// only carries left and right.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MouseButtons: u8 {
        /// Button 1 (left)
        const LEFT = 0b0000_0001;
        /// Button 2 (right)
        const RIGHT = 0b0000_0010;
        /// Button 3 (middle / wheel click)
        const MIDDLE = 0b0000_0100;
    }
}

impl MouseButtons {
    /// Check if the left button is pressed
    pub fn left(&self) -> bool {
        self.contains(Self::LEFT)
    }

    /// Check if the right button is pressed
    pub fn right(&self) -> bool {
        self.contains(Self::RIGHT)
    }
}

impl Default for MouseButtons {
    fn default() -> Self {
        Self::empty()
    }
}

/// HID mouse report (boot protocol)
///
/// Standard 3-byte format: buttons, X displacement, Y displacement. A fourth
/// wheel byte, if present, is ignored — the X68000 mouse has no wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseReport {
    /// Button states
    pub buttons: MouseButtons,
    /// X displacement (relative)
    pub x: i8,
    /// Y displacement (relative)
    pub y: i8,
}

impl MouseReport {
    /// Parse a report from raw boot-protocol bytes
    ///
    /// Returns `None` for short reports.
    pub fn parse(data: &[u8]) -> Option<Self> {
        if data.len() < 3 {
            return None;
        }
        Some(Self {
            buttons: MouseButtons::from_bits_truncate(data[0]),
            x: data[1] as i8,
            y: data[2] as i8,
        })
    }

    /// Check if the mouse moved
    pub fn has_movement(&self) -> bool {
        self.x != 0 || self.y != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keyboard_report() {
        let report = KeyboardReport::parse(&[0x22, 0x00, 0x04, 0x05, 0, 0, 0, 0]).unwrap();
        assert_eq!(
            report.modifiers,
            KeyModifiers::LEFT_SHIFT | KeyModifiers::RIGHT_SHIFT
        );
        assert_eq!(report.keycodes[0], 0x04);
        assert!(KeyboardReport::parse(&[0; 7]).is_none());
    }

    #[test]
    fn diff_reports_presses_and_releases() {
        let prev = KeyboardReport::parse(&[0, 0, 0x04, 0x05, 0, 0, 0, 0]).unwrap();
        let cur = KeyboardReport::parse(&[0, 0, 0x05, 0x06, 0, 0, 0, 0]).unwrap();

        let pressed: heapless::Vec<u8, 6> = cur.pressed_since(&prev).collect();
        let released: heapless::Vec<u8, 6> = cur.released_since(&prev).collect();
        assert_eq!(pressed.as_slice(), &[0x06]);
        assert_eq!(released.as_slice(), &[0x04]);
    }

    #[test]
    fn diff_ignores_empty_slots() {
        let prev = KeyboardReport::default();
        let cur = KeyboardReport::default();
        assert_eq!(cur.pressed_since(&prev).count(), 0);
        assert_eq!(cur.released_since(&prev).count(), 0);
    }

    #[test]
    fn parse_mouse_report() {
        let report = MouseReport::parse(&[0x01, 0x05, 0xFB]).unwrap();
        assert!(report.buttons.left());
        assert!(!report.buttons.right());
        assert_eq!(report.x, 5);
        assert_eq!(report.y, -5);
        assert!(report.has_movement());
    }
}
