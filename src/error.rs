//! Adapter error types

use core::fmt;

/// Adapter operation result type
pub type Result<T> = core::result::Result<T, AdapterError>;

/// Errors raised while building layouts or configuring the adapter
///
/// Runtime input paths never fail: unknown keycodes and unrecognized host
/// command bytes are silent no-ops. Errors only occur at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdapterError {
    /// A remap table was given the same HID keycode twice
    DuplicateKey {
        /// The offending HID keycode
        keycode: u8,
    },
    /// A remap table was given more pairs than it can hold
    TableOverflow,
    /// Mouse motion divider must be nonzero
    InvalidDivider,
}

impl fmt::Display for AdapterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKey { keycode } => {
                write!(f, "duplicate keycode 0x{keycode:02X} in remap table")
            }
            Self::TableOverflow => write!(f, "remap table capacity exceeded"),
            Self::InvalidDivider => write!(f, "mouse divider must be nonzero"),
        }
    }
}
