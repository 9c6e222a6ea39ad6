//! The adapter session object
//!
//! [`X68kAdapter`] owns every piece of shared state and exposes the three
//! entry points the board loop calls: keyboard reports and mouse reports from
//! the USB side, and command bytes from the X68000 side. Output leaves
//! through two bounded byte queues, one per serial channel, which the board
//! layer drains into its UARTs.
//!
//! Everything runs on one logical thread: the board loop polls USB (which
//! delivers reports inline), then drains host bytes, then drains the queues.
//! Nothing here blocks.
//!
//! # Example
//!
//! ```
//! use x68k_usb_adapter::adapter::{AdapterConfig, X68kAdapter};
//! use x68k_usb_adapter::hid::KeyboardReport;
//! use x68k_usb_adapter::layout;
//!
//! let config = AdapterConfig::new(layout::uk().unwrap());
//! let mut adapter = X68kAdapter::new(config).unwrap();
//!
//! // The X68000 enables the keyboard during boot.
//! adapter.on_host_byte(0x49, 0);
//!
//! let report = KeyboardReport::parse(&[0, 0, 0x04, 0, 0, 0, 0, 0]).unwrap();
//! adapter.on_keyboard_report(&report, 0);
//! assert_eq!(adapter.kbd_pop(), Some(0x1E)); // 'A' press
//! ```

use crate::command::{CommandDecoder, HostCommand};
use crate::error::Result;
use crate::hid::{KeyboardReport, MouseReport};
use crate::layout::Layout;
use crate::modifier::ModifierTracker;
use crate::mouse::{MouseAccumulator, DEFAULT_DIVIDER};
use crate::repeat::{RepeatTimer, DEFAULT_DELAY_MS, DEFAULT_INTERVAL_MS};
use crate::scancode::{KeyDir, ScanEvent};

/// Keyboard output queue depth, in bytes
const KBD_QUEUE: usize = 32;
/// Mouse output queue depth, in bytes (multiple of the 3-byte packet)
const MOUSE_QUEUE: usize = 15;

/// Adapter configuration
///
/// Builder-style; every field has a working default except the layout.
///
/// # Example
///
/// ```
/// use x68k_usb_adapter::adapter::AdapterConfig;
/// use x68k_usb_adapter::layout;
///
/// let config = AdapterConfig::new(layout::uk().unwrap())
///     .mouse_divider(4)
///     .auto_repeat(true);
/// ```
#[derive(Debug, Clone)]
pub struct AdapterConfig {
    layout: Layout,
    mouse_divider: i16,
    auto_repeat: bool,
    repeat_delay_ms: u16,
    repeat_interval_ms: u16,
}

impl AdapterConfig {
    /// Configuration with the given layout and default settings
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            mouse_divider: DEFAULT_DIVIDER,
            auto_repeat: false,
            repeat_delay_ms: DEFAULT_DELAY_MS,
            repeat_interval_ms: DEFAULT_INTERVAL_MS,
        }
    }

    /// Motion divider for mouse sensitivity; raise it for high-DPI mice
    pub fn mouse_divider(mut self, divider: i16) -> Self {
        self.mouse_divider = divider;
        self
    }

    /// Enable keyboard auto-repeat
    pub fn auto_repeat(mut self, enabled: bool) -> Self {
        self.auto_repeat = enabled;
        self
    }

    /// Initial auto-repeat delay in milliseconds
    pub fn repeat_delay_ms(mut self, ms: u16) -> Self {
        self.repeat_delay_ms = ms;
        self
    }

    /// Auto-repeat interval in milliseconds
    pub fn repeat_interval_ms(mut self, ms: u16) -> Self {
        self.repeat_interval_ms = ms;
        self
    }
}

/// USB HID to X68000 protocol bridge session
pub struct X68kAdapter {
    layout: Layout,
    modifiers: ModifierTracker,
    mouse: MouseAccumulator,
    decoder: CommandDecoder,
    repeat: RepeatTimer,
    keyboard_enabled: bool,
    prev_report: KeyboardReport,
    kbd_out: heapless::Deque<u8, KBD_QUEUE>,
    mouse_out: heapless::Deque<u8, MOUSE_QUEUE>,
}

impl X68kAdapter {
    /// Build an adapter from a configuration
    ///
    /// Keyboard output starts disabled; the X68000 sends the enable command
    /// (0x49) while booting.
    pub fn new(config: AdapterConfig) -> Result<Self> {
        let mut mouse = MouseAccumulator::new();
        mouse.set_divider(config.mouse_divider)?;
        let mut repeat = RepeatTimer::new();
        repeat.set_enabled(config.auto_repeat);
        repeat.set_delay(config.repeat_delay_ms);
        repeat.set_interval(config.repeat_interval_ms);
        Ok(Self {
            layout: config.layout,
            modifiers: ModifierTracker::new(),
            mouse,
            decoder: CommandDecoder::new(),
            repeat,
            keyboard_enabled: false,
            prev_report: KeyboardReport::default(),
            kbd_out: heapless::Deque::new(),
            mouse_out: heapless::Deque::new(),
        })
    }

    /// True while the host allows keyboard output
    pub fn keyboard_enabled(&self) -> bool {
        self.keyboard_enabled
    }

    /// Process one keyboard report from the USB layer
    ///
    /// Modifier edges are handled first, then key releases, then key presses
    /// in slot order. While the keyboard is disabled the resulting bytes are
    /// dropped, never queued for later, but modifier and report tracking
    /// stays current so re-enabling does not desync the shift state.
    pub fn on_keyboard_report(&mut self, report: &KeyboardReport, now_ms: u32) {
        let modifier_events = self.modifiers.update(report.modifiers);
        for event in modifier_events {
            self.emit_kbd(event);
        }

        let prev = self.prev_report;
        for keycode in report.released_since(&prev) {
            self.key_event(keycode, KeyDir::Up);
            self.repeat.key_up(keycode);
        }
        for keycode in report.pressed_since(&prev) {
            self.key_event(keycode, KeyDir::Down);
            if self.keyboard_enabled {
                self.repeat.key_down(keycode, now_ms);
            }
        }
        self.prev_report = *report;
    }

    /// Process one mouse report from the USB layer
    ///
    /// The mouse channel is independent of the keyboard-enable state.
    pub fn on_mouse_report(&mut self, report: &MouseReport) {
        self.mouse.on_buttons(report.buttons);
        if report.has_movement() {
            self.mouse.on_move(report.x, report.y);
        }
    }

    /// Process one command byte from the X68000
    pub fn on_host_byte(&mut self, byte: u8, _now_ms: u32) {
        match self.decoder.decode(byte) {
            Some(HostCommand::MousePoll) => {
                for byte in self.mouse.take_frame() {
                    if self.mouse_out.is_full() {
                        self.mouse_out.pop_front();
                    }
                    let _ = self.mouse_out.push_back(byte);
                }
            }
            Some(HostCommand::SetKeyboardEnable(enable)) => {
                self.keyboard_enabled = enable;
                if !enable {
                    // A key held across the disable must not resume repeating.
                    self.repeat.reset();
                }
            }
            Some(HostCommand::SetRepeatDelay(ms)) => self.repeat.set_delay(ms),
            Some(HostCommand::SetRepeatInterval(ms)) => self.repeat.set_interval(ms),
            Some(HostCommand::ResetTiming) => self.repeat.reset(),
            None => {}
        }
    }

    /// Drive auto-repeat; call once per loop iteration with a millisecond clock
    pub fn poll(&mut self, now_ms: u32) {
        if let Some(keycode) = self.repeat.poll(now_ms) {
            if self.keyboard_enabled {
                // Replay as release then press, the way the hardware repeats.
                self.key_event(keycode, KeyDir::Up);
                self.key_event(keycode, KeyDir::Down);
            }
        }
    }

    /// Pop the next byte for the keyboard serial channel
    pub fn kbd_pop(&mut self) -> Option<u8> {
        self.kbd_out.pop_front()
    }

    /// Pop the next byte for the mouse serial channel
    pub fn mouse_pop(&mut self) -> Option<u8> {
        self.mouse_out.pop_front()
    }

    fn key_event(&mut self, keycode: u8, dir: KeyDir) {
        let shifted = self.modifiers.shifted();
        let alt_layer = self.modifiers.alt_layer();
        let seq = self.layout.remap(keycode, dir, shifted, alt_layer);
        for event in seq {
            self.emit_kbd(event);
        }
    }

    fn emit_kbd(&mut self, event: ScanEvent) {
        if !self.keyboard_enabled {
            return;
        }
        if self.kbd_out.is_full() {
            // Bounded queue on a best-effort protocol: drop the oldest.
            self.kbd_out.pop_front();
        }
        let _ = self.kbd_out.push_back(event.to_byte());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hid::{KeyModifiers, MouseButtons};
    use crate::layout;

    fn adapter() -> X68kAdapter {
        let mut adapter =
            X68kAdapter::new(AdapterConfig::new(layout::uk().unwrap())).unwrap();
        adapter.on_host_byte(0x49, 0);
        adapter
    }

    fn report(modifiers: KeyModifiers, keys: &[u8]) -> KeyboardReport {
        let mut keycodes = [0u8; 6];
        keycodes[..keys.len()].copy_from_slice(keys);
        KeyboardReport { modifiers, keycodes }
    }

    fn drain_kbd(adapter: &mut X68kAdapter) -> heapless::Vec<u8, KBD_QUEUE> {
        let mut bytes = heapless::Vec::new();
        while let Some(byte) = adapter.kbd_pop() {
            let _ = bytes.push(byte);
        }
        bytes
    }

    fn drain_mouse(adapter: &mut X68kAdapter) -> heapless::Vec<u8, MOUSE_QUEUE> {
        let mut bytes = heapless::Vec::new();
        while let Some(byte) = adapter.mouse_pop() {
            let _ = bytes.push(byte);
        }
        bytes
    }

    #[test]
    fn plain_key_cycle() {
        let mut adapter = adapter();
        adapter.on_keyboard_report(&report(KeyModifiers::empty(), &[0x04]), 0);
        adapter.on_keyboard_report(&report(KeyModifiers::empty(), &[]), 10);
        assert_eq!(drain_kbd(&mut adapter).as_slice(), &[0x1E, 0x9E]);
    }

    #[test]
    fn shifted_typing_uses_override_table() {
        let mut adapter = adapter();
        adapter.on_keyboard_report(&report(KeyModifiers::LEFT_SHIFT, &[]), 0);
        adapter.on_keyboard_report(&report(KeyModifiers::LEFT_SHIFT, &[0x24]), 10);
        // Shift press, then the shifted-override scancode for HID '7'.
        assert_eq!(drain_kbd(&mut adapter).as_slice(), &[0x70, 0x07]);
    }

    #[test]
    fn force_unshift_key_end_to_end() {
        let mut adapter = adapter();
        adapter.on_keyboard_report(&report(KeyModifiers::LEFT_SHIFT, &[]), 0);
        adapter.on_keyboard_report(&report(KeyModifiers::LEFT_SHIFT, &[0x23]), 10);
        adapter.on_keyboard_report(&report(KeyModifiers::LEFT_SHIFT, &[]), 20);
        assert_eq!(
            drain_kbd(&mut adapter).as_slice(),
            // Shift down, then [shift up, ^ down, shift down], then ^ up.
            &[0x70, 0xF0, 0x0D, 0x70, 0x8D]
        );
    }

    #[test]
    fn alt_layer_end_to_end() {
        let mut adapter = adapter();
        adapter.on_keyboard_report(&report(KeyModifiers::LEFT_GUI, &[]), 0);
        adapter.on_keyboard_report(&report(KeyModifiers::LEFT_GUI, &[0x3A]), 10);
        adapter.on_keyboard_report(&report(KeyModifiers::LEFT_GUI, &[]), 20);
        // XF1, never the normal F1 scancode, and no GUI scancode at all.
        assert_eq!(drain_kbd(&mut adapter).as_slice(), &[0x55, 0xD5]);
    }

    #[test]
    fn mouse_poll_cycle() {
        let mut adapter = adapter();
        adapter.on_mouse_report(&MouseReport {
            buttons: MouseButtons::LEFT,
            x: 9,
            y: -9,
        });
        adapter.on_host_byte(0x41, 0);
        adapter.on_host_byte(0x40, 0);
        assert_eq!(drain_mouse(&mut adapter).as_slice(), &[0x01, 3, 0xFD]);
        // Accumulator was reset; next poll reports no motion, buttons held.
        adapter.on_host_byte(0x41, 0);
        adapter.on_host_byte(0x40, 0);
        assert_eq!(drain_mouse(&mut adapter).as_slice(), &[0x01, 0, 0]);
    }

    #[test]
    fn keyboard_disable_drops_output_but_tracks_state() {
        let mut adapter = adapter();
        adapter.on_host_byte(0x48, 0);
        assert!(!adapter.keyboard_enabled());
        // Shift pressed while disabled: no bytes out.
        adapter.on_keyboard_report(&report(KeyModifiers::LEFT_SHIFT, &[]), 0);
        assert!(drain_kbd(&mut adapter).is_empty());
        // Re-enable: shift tracking stayed current, so the force-unshift
        // path routes correctly on the very next key.
        adapter.on_host_byte(0x49, 0);
        adapter.on_keyboard_report(&report(KeyModifiers::LEFT_SHIFT, &[0x23]), 10);
        assert_eq!(drain_kbd(&mut adapter).as_slice(), &[0xF0, 0x0D, 0x70]);
    }

    #[test]
    fn disable_and_enable_are_idempotent() {
        let mut adapter = adapter();
        adapter.on_host_byte(0x48, 0);
        adapter.on_host_byte(0x48, 0);
        assert!(!adapter.keyboard_enabled());
        adapter.on_host_byte(0x49, 0);
        adapter.on_host_byte(0x49, 0);
        assert!(adapter.keyboard_enabled());
    }

    #[test]
    fn mouse_accumulates_while_keyboard_disabled() {
        let mut adapter = adapter();
        adapter.on_host_byte(0x48, 0);
        adapter.on_mouse_report(&MouseReport {
            buttons: MouseButtons::empty(),
            x: 30,
            y: 0,
        });
        adapter.on_host_byte(0x41, 0);
        adapter.on_host_byte(0x40, 0);
        assert_eq!(drain_mouse(&mut adapter).as_slice(), &[0x00, 10, 0]);
    }

    #[test]
    fn auto_repeat_replays_held_key() {
        let config = AdapterConfig::new(layout::uk().unwrap())
            .auto_repeat(true)
            .repeat_delay_ms(100)
            .repeat_interval_ms(50);
        let mut adapter = X68kAdapter::new(config).unwrap();
        adapter.on_host_byte(0x49, 0);
        adapter.on_keyboard_report(&report(KeyModifiers::empty(), &[0x04]), 0);
        assert_eq!(drain_kbd(&mut adapter).as_slice(), &[0x1E]);
        adapter.poll(99);
        assert!(drain_kbd(&mut adapter).is_empty());
        adapter.poll(100);
        assert_eq!(drain_kbd(&mut adapter).as_slice(), &[0x9E, 0x1E]);
        adapter.poll(150);
        assert_eq!(drain_kbd(&mut adapter).as_slice(), &[0x9E, 0x1E]);
        // Release stops it.
        adapter.on_keyboard_report(&report(KeyModifiers::empty(), &[]), 160);
        assert_eq!(drain_kbd(&mut adapter).as_slice(), &[0x9E]);
        adapter.poll(1_000);
        assert!(drain_kbd(&mut adapter).is_empty());
    }

    #[test]
    fn host_reset_disarms_repeat() {
        let config = AdapterConfig::new(layout::uk().unwrap())
            .auto_repeat(true)
            .repeat_delay_ms(100);
        let mut adapter = X68kAdapter::new(config).unwrap();
        adapter.on_host_byte(0x49, 0);
        adapter.on_keyboard_report(&report(KeyModifiers::empty(), &[0x04]), 0);
        drain_kbd(&mut adapter);
        adapter.on_host_byte(0xFD, 50);
        adapter.poll(1_000);
        assert!(drain_kbd(&mut adapter).is_empty());
    }

    #[test]
    fn invalid_divider_is_rejected() {
        let config = AdapterConfig::new(layout::uk().unwrap()).mouse_divider(0);
        assert!(X68kAdapter::new(config).is_err());
    }
}
