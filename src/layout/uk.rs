//! UK layout table set
//!
//! Developed against a UK-layout Logitech K270. The X68000 keyboard has many
//! more keys than a 104-key board; the alt-layer table reaches the ones with
//! no direct equivalent (XF1-XF5, SYMBOL, REGISTER, HELP).

use super::{Layout, RemapTable, TABLE_LEN};
use crate::error::Result;

// HID keycode to X68000 scancode, row comments give the keycode high nibble.
#[rustfmt::skip]
const SCANCODES: [u8; TABLE_LEN] = [
    0x00, 0x00, 0x00, 0x00, 0x1E, 0x2E, 0x2C, 0x20, 0x13, 0x21, 0x22, 0x23, 0x18, 0x24, 0x25, 0x26, // 0x
    0x30, 0x2F, 0x19, 0x1A, 0x11, 0x14, 0x1F, 0x15, 0x17, 0x2D, 0x12, 0x2B, 0x16, 0x2A, 0x02, 0x03, // 1x
    0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x1D, 0x01, 0x0F, 0x10, 0x35, 0x0C, 0x00, 0x1C, // 2x
    0x29, 0x0E, 0x34, 0x27, 0x28, 0x5F, 0x31, 0x32, 0x33, 0x5D, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68, // 3x
    0x69, 0x6A, 0x6B, 0x6C, 0x61, 0x62, 0x5A, 0x5B, 0x5C, 0x5E, 0x36, 0x39, 0x37, 0x3A, 0x38, 0x3D, // 4x
    0x3B, 0x3E, 0x3C, 0x3F, 0x40, 0x41, 0x42, 0x46, 0x4E, 0x4B, 0x4C, 0x4D, 0x47, 0x48, 0x49, 0x43, // 5x
    0x44, 0x45, 0x4F, 0x51, 0x0E, 0x72, 0x4A, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // 6x
];

// Overrides used while shift is held; 0x00 defers to SCANCODES. These line
// up UK shifted punctuation with the X68000 key that carries the same symbol.
#[rustfmt::skip]
const SHIFTED_SCANCODES: [u8; TABLE_LEN] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // 0x
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // 1x
    0x00, 0x00, 0x00, 0x00, 0x07, 0x28, 0x09, 0x0A, 0x00, 0x00, 0x00, 0x00, 0x00, 0x34, 0x27, 0x00, // 2x
    0x00, 0x00, 0x0D, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // 3x
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // 4x
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // 5x
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // 6x
];

// Keys pressed unshifted on the UK board whose X68000 symbol needs shift.
const FORCE_SHIFT: &[(u8, u8)] = &[
    (0x34, 0x08), // ' key, emit @ position shifted
    (0x32, 0x04), // # key, emit shift-3
    (0x2E, 0x0C), // = key, emit shift-minus
];

// Keys pressed shifted on the UK board whose X68000 symbol is unshifted.
const FORCE_UNSHIFT: &[(u8, u8)] = &[
    (0x23, 0x0D), // shift-6 (^), emit the ^~ key
    (0x33, 0x28), // shift-; (:), emit the : key
    (0x34, 0x1B), // shift-' (@), emit the @ key
];

// Alt-layer (Left GUI held): numpad / * - reach SYMBOL, REGISTER, HELP;
// F1-F5 reach XF1-XF5.
const ALT_KEYS: &[(u8, u8)] = &[
    (0x54, 0x52), // keypad / -> SYMBOL INPUT
    (0x55, 0x53), // keypad * -> REGISTER
    (0x56, 0x54), // keypad - -> HELP
    (0x3A, 0x55), // F1 -> XF1
    (0x3B, 0x56), // F2 -> XF2
    (0x3C, 0x57), // F3 -> XF3
    (0x3D, 0x58), // F4 -> XF4
    (0x3E, 0x59), // F5 -> XF5
];

/// Build the UK layout
pub fn uk() -> Result<Layout> {
    Ok(Layout::new(
        SCANCODES,
        SHIFTED_SCANCODES,
        RemapTable::new(FORCE_SHIFT)?,
        RemapTable::new(FORCE_UNSHIFT)?,
        RemapTable::new(ALT_KEYS)?,
    ))
}
