//! Mouse motion accumulation and packet framing
//!
//! The X68000 polls its mouse over the keyboard port; between polls the
//! adapter accumulates relative motion with 16-bit headroom. Each poll drains
//! the accumulator into the fixed 3-byte packet:
//!
//! ```text
//! Byte 0: | y_ovn | y_ovp | x_ovn | x_ovp | 0 | 0 | right | left |
//! Byte 1: dx, low 8 bits (signed)
//! Byte 2: dy, low 8 bits (signed)
//! ```
//!
//! Deltas outside the signed 8-bit range are truncated, not clamped; the
//! overflow flags tell the host the value wrapped. Motion is divided by a
//! configurable divider before accumulation to tame high-DPI mice.

use crate::error::{AdapterError, Result};
use crate::hid::MouseButtons;

/// Default motion divider, suited to 300-600 DPI mice
pub const DEFAULT_DIVIDER: i16 = 3;

/// Accumulates mouse state between X68000 polls
#[derive(Debug, Clone, Copy)]
pub struct MouseAccumulator {
    dx: i16,
    dy: i16,
    left: bool,
    right: bool,
    divider: i16,
}

impl Default for MouseAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl MouseAccumulator {
    /// Create an accumulator with the default divider
    pub const fn new() -> Self {
        Self {
            dx: 0,
            dy: 0,
            left: false,
            right: false,
            divider: DEFAULT_DIVIDER,
        }
    }

    /// Set the motion divider; zero is rejected
    pub fn set_divider(&mut self, divider: i16) -> Result<()> {
        if divider == 0 {
            return Err(AdapterError::InvalidDivider);
        }
        self.divider = divider;
        Ok(())
    }

    /// Accumulate one relative motion event
    ///
    /// Division truncates toward zero, so slow motion below the divider is
    /// under-reported. That matches the coarse resolution of the mechanical
    /// mouse this protocol was built for.
    pub fn on_move(&mut self, dx: i8, dy: i8) {
        self.dx = self.dx.wrapping_add(i16::from(dx) / self.divider);
        self.dy = self.dy.wrapping_add(i16::from(dy) / self.divider);
    }

    /// Latch the current button state
    pub fn on_buttons(&mut self, buttons: MouseButtons) {
        self.left = buttons.left();
        self.right = buttons.right();
    }

    /// Frame the accumulated state into an X68000 mouse packet
    ///
    /// Resets dx/dy to zero; button state persists as the current state.
    pub fn take_frame(&mut self) -> [u8; 3] {
        let x_ovp = self.dx > 127;
        let x_ovn = self.dx < -128;
        let y_ovp = self.dy > 127;
        let y_ovn = self.dy < -128;

        let status = (u8::from(y_ovn) << 7)
            | (u8::from(y_ovp) << 6)
            | (u8::from(x_ovn) << 5)
            | (u8::from(x_ovp) << 4)
            | (u8::from(self.right) << 1)
            | u8::from(self.left);

        let packet = [status, self.dx as u8, self.dy as u8];
        self.dx = 0;
        self.dy = 0;
        packet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_divided_motion() {
        let mut acc = MouseAccumulator::new();
        acc.on_move(9, -9);
        acc.on_move(3, -3);
        let packet = acc.take_frame();
        assert_eq!(packet, [0x00, 4, (-4i8) as u8]);
    }

    #[test]
    fn division_truncates_toward_zero() {
        let mut acc = MouseAccumulator::new();
        acc.on_move(2, -2);
        acc.on_move(2, -2);
        // 2/3 truncates to 0 each call, not accumulated as 4/3.
        assert_eq!(acc.take_frame(), [0x00, 0, 0]);
    }

    #[test]
    fn frame_sets_overflow_flags_and_truncates() {
        let mut acc = MouseAccumulator::new();
        acc.set_divider(1).unwrap();
        acc.on_move(100, 0);
        acc.on_move(100, 0);
        acc.on_move(100, -5);
        acc.on_buttons(MouseButtons::LEFT);
        let packet = acc.take_frame();
        // dx=300: x_ovp set, value truncated to 300 mod 256 = 44.
        assert_eq!(packet[0], 0x11);
        assert_eq!(packet[1], 44);
        assert_eq!(packet[2], 0xFB);
    }

    #[test]
    fn negative_overflow_flags() {
        let mut acc = MouseAccumulator::new();
        acc.set_divider(1).unwrap();
        for _ in 0..3 {
            acc.on_move(-100, -100);
        }
        let packet = acc.take_frame();
        assert_eq!(packet[0], 0b1010_0000);
        assert_eq!(packet[1], (-300i16) as u8);
        assert_eq!(packet[2], (-300i16) as u8);
    }

    #[test]
    fn frame_resets_motion_but_keeps_buttons() {
        let mut acc = MouseAccumulator::new();
        acc.set_divider(1).unwrap();
        acc.on_move(10, 10);
        acc.on_buttons(MouseButtons::LEFT | MouseButtons::RIGHT);
        let first = acc.take_frame();
        assert_eq!(first, [0x03, 10, 10]);
        // Second frame with no new motion: zero deltas, buttons still held.
        let second = acc.take_frame();
        assert_eq!(second, [0x03, 0, 0]);
    }

    #[test]
    fn in_range_deltas_leave_flags_clear() {
        let mut acc = MouseAccumulator::new();
        acc.set_divider(1).unwrap();
        acc.on_move(127, -128);
        let packet = acc.take_frame();
        assert_eq!(packet[0] & 0xF0, 0);
    }

    #[test]
    fn zero_divider_rejected() {
        let mut acc = MouseAccumulator::new();
        assert_eq!(acc.set_divider(0), Err(AdapterError::InvalidDivider));
    }
}
