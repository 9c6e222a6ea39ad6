//! Scancode remapping
//!
//! Turns one HID key transition into the X68000 scancode sequence to send,
//! given the current shift and alt-layer state. Most keys map to a single
//! scancode; keys whose shift state differs between the two keyboards get a
//! synthetic shift toggle bracketed around the press.
//!
//! The bracketing is press-only on purpose: releases of force-mapped keys
//! emit a single release event. Toggling shift during a keyup retriggers
//! shift edges on every release and leaves the machine with stuck keys.

use crate::layout::Layout;
use crate::scancode::{self, KeyDir, ScanEvent};

/// Scancode sequence produced by one key transition (at most three events)
pub type ScanSeq = heapless::Vec<ScanEvent, 3>;

impl Layout {
    /// Remap one key transition into X68000 scancode events
    ///
    /// `shifted` and `alt_layer` are the tracker's current view of the
    /// physical Shift and Left GUI keys. Keycodes outside the table domain
    /// produce an empty sequence.
    ///
    /// # Example
    ///
    /// ```
    /// use x68k_usb_adapter::layout;
    /// use x68k_usb_adapter::scancode::{KeyDir, ScanEvent};
    ///
    /// let layout = layout::uk().unwrap();
    /// let seq = layout.remap(0x04, KeyDir::Down, false, false);
    /// assert_eq!(seq.as_slice(), &[ScanEvent::down(0x1E)]);
    /// ```
    pub fn remap(&self, keycode: u8, dir: KeyDir, shifted: bool, alt_layer: bool) -> ScanSeq {
        let mut seq = ScanSeq::new();

        if alt_layer {
            // Alt-layer hits stand alone; misses fall through to nothing,
            // never to the normal tables.
            if let Some(code) = self.alt_key(keycode) {
                let _ = seq.push(ScanEvent::new(code, dir));
            }
            return seq;
        }

        let Some(plain) = self.scancode(keycode) else {
            return seq;
        };

        if shifted {
            if let Some(code) = self.force_unshift(keycode) {
                match dir {
                    KeyDir::Down => {
                        let _ = seq.push(ScanEvent::up(scancode::SHIFT));
                        let _ = seq.push(ScanEvent::down(code));
                        let _ = seq.push(ScanEvent::down(scancode::SHIFT));
                    }
                    KeyDir::Up => {
                        let _ = seq.push(ScanEvent::up(code));
                    }
                }
            } else {
                let code = self.shifted_override(keycode).unwrap_or(plain);
                let _ = seq.push(ScanEvent::new(code, dir));
            }
        } else if let Some(code) = self.force_shift(keycode) {
            match dir {
                KeyDir::Down => {
                    let _ = seq.push(ScanEvent::down(scancode::SHIFT));
                    let _ = seq.push(ScanEvent::down(code));
                    let _ = seq.push(ScanEvent::up(scancode::SHIFT));
                }
                KeyDir::Up => {
                    let _ = seq.push(ScanEvent::up(code));
                }
            }
        } else {
            let _ = seq.push(ScanEvent::new(plain, dir));
        }

        seq
    }
}
