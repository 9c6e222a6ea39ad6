#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

//! USB HID to Sharp X68000 keyboard/mouse protocol bridge
//!
//! This crate is the protocol engine of a converter that lets modern USB
//! keyboards and mice drive a Sharp X68000: HID keycodes become X68000
//! scancodes with press/release framing, and accumulated mouse motion becomes
//! the 3-byte packets the X68000 polls for. The USB host controller and the
//! serial transport stay outside; the board layer feeds decoded reports and
//! host command bytes in and drains two byte queues out.
//!
//! # Core Components
//!
//! - [`adapter`] - the session object tying everything together
//! - [`layout`] - keycode-to-scancode tables, runtime selectable
//! - [`modifier`] - modifier-key edge tracking (Shift, Ctrl, alt-layer)
//! - [`mouse`] - relative-motion accumulation and packet framing
//! - [`command`] - host command byte decoding
//! - [`repeat`] - optional keyboard auto-repeat
//! - [`hid`] - USB boot-protocol report types
//! - [`error`] - construction/configuration error types
//!
//! # Quick Start
//!
//! ```
//! use x68k_usb_adapter::{AdapterConfig, X68kAdapter};
//! use x68k_usb_adapter::hid::{KeyboardReport, MouseReport};
//! use x68k_usb_adapter::layout;
//!
//! let mut adapter = X68kAdapter::new(AdapterConfig::new(layout::uk()?))?;
//!
//! // Board loop: poll USB, feed reports in, drain host bytes, then ship
//! // queued output to the two UARTs.
//! # let now_ms = 0u32;
//! # let usb_kbd_report: Option<[u8; 8]> = None;
//! # let host_rx: Option<u8> = None;
//! if let Some(data) = usb_kbd_report {
//!     if let Some(report) = KeyboardReport::parse(&data) {
//!         adapter.on_keyboard_report(&report, now_ms);
//!     }
//! }
//! if let Some(byte) = host_rx {
//!     adapter.on_host_byte(byte, now_ms);
//! }
//! adapter.poll(now_ms);
//! while let Some(_byte) = adapter.kbd_pop() {
//!     // uart_kbd.write(byte) at 2400 baud
//! }
//! while let Some(_byte) = adapter.mouse_pop() {
//!     // uart_mouse.write(byte) at 4800 baud
//! }
//! # Ok::<(), x68k_usb_adapter::AdapterError>(())
//! ```

#[cfg(feature = "defmt")]
use defmt as _;

pub mod adapter;
pub mod command;
pub mod error;
pub mod hid;
pub mod layout;
pub mod modifier;
pub mod mouse;
pub mod remap;
pub mod repeat;
pub mod scancode;

pub use adapter::{AdapterConfig, X68kAdapter};
pub use command::{CommandDecoder, HostCommand};
pub use error::{AdapterError, Result};
pub use layout::Layout;
