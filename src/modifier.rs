//! Modifier key tracking
//!
//! HID reports carry modifiers as a bitmask, not as key events. The tracker
//! diffs consecutive masks and emits a scancode transition for each edge:
//!
//! | HID modifier | X68000 key |
//! |---|---|
//! | Left Ctrl    | CTRL |
//! | Left Shift   | SHIFT |
//! | Left Alt     | HIRAGANA |
//! | Left GUI     | (alt-layer toggle, no scancode) |
//! | Right Ctrl   | OPT.2 |
//! | Right Shift  | SHIFT |
//! | Right Alt    | FULL WIDTH |
//! | Right GUI    | unused |
//!
//! Both Shift keys drive the single logical shift state the remapper reads.

use crate::hid::KeyModifiers;
use crate::scancode::{self, ScanEvent};

/// Scancode sequence produced by one modifier-mask change
pub type ModifierSeq = heapless::Vec<ScanEvent, 8>;

/// Tracks modifier edges across HID reports
#[derive(Debug, Clone, Copy, Default)]
pub struct ModifierTracker {
    current: KeyModifiers,
    shifted: bool,
    alt_layer: bool,
}

impl ModifierTracker {
    /// Create a tracker with no modifiers held
    pub const fn new() -> Self {
        Self {
            current: KeyModifiers::empty(),
            shifted: false,
            alt_layer: false,
        }
    }

    /// True while either physical Shift is held
    pub fn shifted(&self) -> bool {
        self.shifted
    }

    /// True while Left GUI is held
    pub fn alt_layer(&self) -> bool {
        self.alt_layer
    }

    /// Apply a new modifier mask, returning scancode events for each edge
    ///
    /// Evaluation order is fixed (left Ctrl, Shift, Alt, GUI, then the right
    /// side) so multi-edge reports are deterministic.
    pub fn update(&mut self, new: KeyModifiers) -> ModifierSeq {
        let mut seq = ModifierSeq::new();
        let prev = self.current;
        self.current = new;

        self.edge(prev, new, KeyModifiers::LEFT_CTRL, &mut seq, |_, down| {
            Some(Self::frame(scancode::CTRL, down))
        });
        self.edge(prev, new, KeyModifiers::LEFT_SHIFT, &mut seq, |m, down| {
            m.shifted = down;
            Some(Self::frame(scancode::SHIFT, down))
        });
        self.edge(prev, new, KeyModifiers::LEFT_ALT, &mut seq, |_, down| {
            Some(Self::frame(scancode::HIRAGANA, down))
        });
        self.edge(prev, new, KeyModifiers::LEFT_GUI, &mut seq, |m, down| {
            m.alt_layer = down;
            None
        });
        self.edge(prev, new, KeyModifiers::RIGHT_CTRL, &mut seq, |_, down| {
            Some(Self::frame(scancode::OPT2, down))
        });
        self.edge(prev, new, KeyModifiers::RIGHT_SHIFT, &mut seq, |m, down| {
            m.shifted = down;
            Some(Self::frame(scancode::SHIFT, down))
        });
        self.edge(prev, new, KeyModifiers::RIGHT_ALT, &mut seq, |_, down| {
            Some(Self::frame(scancode::FULL_WIDTH, down))
        });
        // Right GUI: no X68000 counterpart, ignored.

        seq
    }

    fn edge(
        &mut self,
        prev: KeyModifiers,
        new: KeyModifiers,
        bit: KeyModifiers,
        seq: &mut ModifierSeq,
        on_change: impl FnOnce(&mut Self, bool) -> Option<ScanEvent>,
    ) {
        if prev.contains(bit) != new.contains(bit) {
            if let Some(event) = on_change(self, new.contains(bit)) {
                let _ = seq.push(event);
            }
        }
    }

    const fn frame(code: u8, down: bool) -> ScanEvent {
        if down {
            ScanEvent::down(code)
        } else {
            ScanEvent::up(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_shift_press_emits_one_event_and_sets_state() {
        let mut tracker = ModifierTracker::new();
        let seq = tracker.update(KeyModifiers::LEFT_SHIFT);
        assert_eq!(seq.as_slice(), &[ScanEvent::down(scancode::SHIFT)]);
        assert!(tracker.shifted());
    }

    #[test]
    fn unchanged_mask_emits_nothing() {
        let mut tracker = ModifierTracker::new();
        tracker.update(KeyModifiers::LEFT_SHIFT);
        let seq = tracker.update(KeyModifiers::LEFT_SHIFT);
        assert!(seq.is_empty());
        assert!(tracker.shifted());
    }

    #[test]
    fn either_shift_drives_logical_shift() {
        let mut tracker = ModifierTracker::new();
        let seq = tracker.update(KeyModifiers::RIGHT_SHIFT);
        assert_eq!(seq.as_slice(), &[ScanEvent::down(scancode::SHIFT)]);
        assert!(tracker.shifted());
        let seq = tracker.update(KeyModifiers::empty());
        assert_eq!(seq.as_slice(), &[ScanEvent::up(scancode::SHIFT)]);
        assert!(!tracker.shifted());
    }

    #[test]
    fn gui_toggles_alt_layer_without_scancodes() {
        let mut tracker = ModifierTracker::new();
        let seq = tracker.update(KeyModifiers::LEFT_GUI);
        assert!(seq.is_empty());
        assert!(tracker.alt_layer());
        let seq = tracker.update(KeyModifiers::empty());
        assert!(seq.is_empty());
        assert!(!tracker.alt_layer());
    }

    #[test]
    fn right_gui_is_ignored() {
        let mut tracker = ModifierTracker::new();
        let seq = tracker.update(KeyModifiers::RIGHT_GUI);
        assert!(seq.is_empty());
        assert!(!tracker.alt_layer());
    }

    #[test]
    fn side_specific_mappings() {
        let mut tracker = ModifierTracker::new();
        let seq = tracker.update(KeyModifiers::LEFT_CTRL | KeyModifiers::RIGHT_CTRL);
        assert_eq!(
            seq.as_slice(),
            &[
                ScanEvent::down(scancode::CTRL),
                ScanEvent::down(scancode::OPT2),
            ]
        );
        let mut tracker = ModifierTracker::new();
        let seq = tracker.update(KeyModifiers::LEFT_ALT | KeyModifiers::RIGHT_ALT);
        assert_eq!(
            seq.as_slice(),
            &[
                ScanEvent::down(scancode::HIRAGANA),
                ScanEvent::down(scancode::FULL_WIDTH),
            ]
        );
    }

    #[test]
    fn evaluation_order_is_left_side_first() {
        let mut tracker = ModifierTracker::new();
        let seq = tracker.update(
            KeyModifiers::LEFT_CTRL | KeyModifiers::LEFT_SHIFT | KeyModifiers::RIGHT_ALT,
        );
        assert_eq!(
            seq.as_slice(),
            &[
                ScanEvent::down(scancode::CTRL),
                ScanEvent::down(scancode::SHIFT),
                ScanEvent::down(scancode::FULL_WIDTH),
            ]
        );
    }
}
