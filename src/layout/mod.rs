//! Keyboard layout tables
//!
//! A [`Layout`] bundles everything the remapper consults: the primary
//! HID-keycode to X68000-scancode table, a shifted-override table, the
//! force-shift and force-unshift lists for keys whose shift state differs
//! between the two keyboards, and the alt-layer table active while Left GUI
//! is held.
//!
//! Layouts are runtime values; [`uk()`] builds the UK table set. Adding a
//! layout is a data-only change.
//!
//! # Example
//!
//! ```
//! use x68k_usb_adapter::layout;
//!
//! let layout = layout::uk().unwrap();
//! // HID 0x04 ('A') maps to X68000 scancode 0x1E
//! assert_eq!(layout.scancode(0x04), Some(0x1E));
//! ```

use crate::error::{AdapterError, Result};

mod uk;

pub use uk::uk;

/// Number of HID keycodes covered by the main tables
pub const TABLE_LEN: usize = 0x70;

/// Small keycode-to-scancode map with unique keys
///
/// Pairs are kept sorted by HID keycode and binary-searched. Duplicate keys
/// are rejected at construction; the lists these tables come from assume one
/// mapping per key.
#[derive(Debug, Clone, Default)]
pub struct RemapTable {
    pairs: heapless::Vec<(u8, u8), 16>,
}

impl RemapTable {
    /// Build a table from `(hid keycode, x68k scancode)` pairs
    pub fn new(pairs: &[(u8, u8)]) -> Result<Self> {
        let mut table = Self {
            pairs: heapless::Vec::new(),
        };
        for &pair in pairs {
            table
                .pairs
                .push(pair)
                .map_err(|_| AdapterError::TableOverflow)?;
        }
        table.pairs.sort_unstable_by_key(|&(key, _)| key);
        for window in table.pairs.windows(2) {
            if window[0].0 == window[1].0 {
                return Err(AdapterError::DuplicateKey {
                    keycode: window[0].0,
                });
            }
        }
        Ok(table)
    }

    /// Look up the scancode mapped to `keycode`
    pub fn get(&self, keycode: u8) -> Option<u8> {
        self.pairs
            .binary_search_by_key(&keycode, |&(key, _)| key)
            .ok()
            .map(|idx| self.pairs[idx].1)
    }
}

/// One complete keyboard layout
#[derive(Debug, Clone)]
pub struct Layout {
    /// Primary HID keycode to scancode table, 0x00 = no mapping
    scancodes: [u8; TABLE_LEN],
    /// Shifted overrides, 0x00 = defer to the primary table
    shifted_scancodes: [u8; TABLE_LEN],
    /// Unshifted keys that must be sent under a synthetic shift
    force_shift: RemapTable,
    /// Shifted keys that must be sent with shift lifted
    force_unshift: RemapTable,
    /// Mappings active while the alt-layer (Left GUI) is held
    alt_keys: RemapTable,
}

impl Layout {
    /// Assemble a layout from its five tables
    pub fn new(
        scancodes: [u8; TABLE_LEN],
        shifted_scancodes: [u8; TABLE_LEN],
        force_shift: RemapTable,
        force_unshift: RemapTable,
        alt_keys: RemapTable,
    ) -> Self {
        Self {
            scancodes,
            shifted_scancodes,
            force_shift,
            force_unshift,
            alt_keys,
        }
    }

    /// Primary-table scancode for `keycode`, `None` outside the table domain
    pub fn scancode(&self, keycode: u8) -> Option<u8> {
        self.scancodes.get(keycode as usize).copied()
    }

    /// Shifted-override scancode, `None` if the override slot is empty
    pub(crate) fn shifted_override(&self, keycode: u8) -> Option<u8> {
        match self.shifted_scancodes.get(keycode as usize) {
            Some(&code) if code != 0 => Some(code),
            _ => None,
        }
    }

    pub(crate) fn force_shift(&self, keycode: u8) -> Option<u8> {
        self.force_shift.get(keycode)
    }

    pub(crate) fn force_unshift(&self, keycode: u8) -> Option<u8> {
        self.force_unshift.get(keycode)
    }

    pub(crate) fn alt_key(&self, keycode: u8) -> Option<u8> {
        self.alt_keys.get(keycode)
    }
}
