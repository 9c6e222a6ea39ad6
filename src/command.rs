//! Host command decoding
//!
//! The X68000 sends single-byte commands to its keyboard over the shared
//! receive line. Commands are self-describing by high nibble; the one
//! two-byte pattern is the mouse poll, where an MSCTRL high-to-low edge shows
//! up as 0x41 followed by 0x40.

/// Decoded host command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostCommand {
    /// Emit a mouse packet (MSCTRL toggled high then low)
    MousePoll,
    /// Enable or disable keyboard output
    SetKeyboardEnable(bool),
    /// Auto-repeat initial delay, milliseconds
    SetRepeatDelay(u16),
    /// Auto-repeat interval, milliseconds
    SetRepeatInterval(u16),
    /// Host hello (0xFD) or goodbye (0xFF): reset repeat/timing state
    ResetTiming,
}

/// Decodes the host's command byte stream
///
/// Stateless apart from the previous byte, which exists only to spot the
/// 0x41 to 0x40 mouse-poll edge.
///
/// # Example
///
/// ```
/// use x68k_usb_adapter::command::{CommandDecoder, HostCommand};
///
/// let mut decoder = CommandDecoder::new();
/// assert_eq!(decoder.decode(0x41), None);
/// assert_eq!(decoder.decode(0x40), Some(HostCommand::MousePoll));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandDecoder {
    last_byte: u8,
}

impl CommandDecoder {
    /// Create a decoder
    pub const fn new() -> Self {
        Self { last_byte: 0 }
    }

    /// Feed one byte from the host; unrecognized bytes decode to `None`
    pub fn decode(&mut self, byte: u8) -> Option<HostCommand> {
        let last = self.last_byte;
        self.last_byte = byte;

        let command = match byte & 0xF0 {
            0x40 => match byte {
                0x40 if last == 0x41 => Some(HostCommand::MousePoll),
                0x48 => Some(HostCommand::SetKeyboardEnable(false)),
                0x49 => Some(HostCommand::SetKeyboardEnable(true)),
                _ => None,
            },
            // 0x5n: TV control and display settings, nothing for us to do.
            0x50 => None,
            // 0x6n: repeat delay = 200 + n * 100 ms
            0x60 => {
                let n = u16::from(byte & 0x0F);
                Some(HostCommand::SetRepeatDelay(200 + n * 100))
            }
            // 0x7n: repeat interval = 30 + n^2 * 5 ms
            0x70 => {
                let n = u16::from(byte & 0x0F);
                Some(HostCommand::SetRepeatInterval(30 + n * n * 5))
            }
            // 0x8n: LED status, ignored.
            0x80 => None,
            0xF0 => match byte {
                0xFD | 0xFF => Some(HostCommand::ResetTiming),
                _ => None,
            },
            _ => None,
        };

        #[cfg(feature = "log")]
        if let Some(command) = command {
            log::debug!("host command 0x{byte:02X}: {command:?}");
        }

        command
    }
}
