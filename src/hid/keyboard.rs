//! HID keyboard input report (Report ID 1).
//!
//! Layout (8 bytes):
//! ```text
//! Byte 0: Modifier keys (bitfield)
//!         Bit 0 = Left Ctrl,  Bit 1 = Left Shift,
//!         Bit 2 = Left Alt,   Bit 3 = Left GUI,
//!         Bit 4 = Right Ctrl, Bit 5 = Right Shift,
//!         Bit 6 = Right Alt,  Bit 7 = Right GUI
//! Byte 1: Reserved (0x00)
//! Byte 2-7: Up to 6 simultaneous key codes (HID usage codes)
//! ```
//!
//! The Report ID itself is carried by the characteristic's Report
//! Reference descriptor, not in the payload.

use crate::config::MAX_PRESSED_KEYS;

/// Keyboard report size in bytes.
pub const KEYBOARD_REPORT_SIZE: usize = 8;

/// Boot-compatible keyboard input report.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardReport {
    /// Modifier key bitfield.
    pub modifier: u8,
    /// Reserved byte (always 0x00 per HID spec).
    pub reserved: u8,
    /// Up to 6 simultaneously pressed key codes, zero padded.
    pub keycodes: [u8; MAX_PRESSED_KEYS],
}

impl KeyboardReport {
    /// Create an empty (all-keys-released) report.
    pub const fn empty() -> Self {
        Self {
            modifier: 0,
            reserved: 0,
            keycodes: [0; MAX_PRESSED_KEYS],
        }
    }

    /// Assemble a report from a modifier bitmask and held usages.
    ///
    /// Usages beyond the sixth are not representable and are ignored.
    pub fn new(modifier: u8, keys: &[u8]) -> Self {
        let mut keycodes = [0u8; MAX_PRESSED_KEYS];
        for (slot, &key) in keycodes.iter_mut().zip(keys) {
            *slot = key;
        }
        Self {
            modifier,
            reserved: 0,
            keycodes,
        }
    }

    /// Parse a raw report payload.
    ///
    /// Only an exact 8-byte payload is a keyboard report.
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() != KEYBOARD_REPORT_SIZE {
            return None;
        }
        Some(Self {
            modifier: data[0],
            reserved: data[1],
            keycodes: [data[2], data[3], data[4], data[5], data[6], data[7]],
        })
    }

    /// Serialise into a byte slice for notification.
    /// Returns the number of bytes written (8, or 0 if `buf` is too small).
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < KEYBOARD_REPORT_SIZE {
            return 0;
        }
        buf[0] = self.modifier;
        buf[1] = self.reserved;
        buf[2..8].copy_from_slice(&self.keycodes);
        KEYBOARD_REPORT_SIZE
    }

    /// The report as its wire bytes.
    pub fn to_bytes(&self) -> [u8; KEYBOARD_REPORT_SIZE] {
        let mut buf = [0u8; KEYBOARD_REPORT_SIZE];
        self.serialize(&mut buf);
        buf
    }

    /// Returns `true` if no keys or modifiers are held (release event).
    pub fn is_empty(&self) -> bool {
        self.modifier == 0 && self.keycodes.iter().all(|&k| k == 0)
    }
}
