//! HID mouse input report (Report ID 2 on the mouse service).
//!
//! Layout (4 bytes):
//! ```text
//! Byte 0: Button bitfield
//!         Bit 0 = Left, Bit 1 = Right, Bits 2-7 = padding
//! Byte 1: X displacement (signed, -127..127)
//! Byte 2: Y displacement (signed, -127..127)
//! Byte 3: Scroll wheel  (signed, -127..127)
//! ```

/// Mouse report size in bytes.
pub const MOUSE_REPORT_SIZE: usize = 4;

/// Smallest displacement the report map declares (Logical Minimum).
pub const AXIS_MIN: i8 = -127;

/// Largest displacement the report map declares (Logical Maximum).
pub const AXIS_MAX: i8 = 127;

/// Buttons the mouse report map declares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MouseButton {
    /// Primary button (bit 0).
    Left,
    /// Secondary button (bit 1).
    Right,
}

impl MouseButton {
    /// Bit of the report's button byte for this button.
    pub const fn mask(self) -> u8 {
        match self {
            MouseButton::Left => 0x01,
            MouseButton::Right => 0x02,
        }
    }
}

/// Saturate a caller-supplied delta into the declared axis range.
///
/// Large deltas are clamped, never wrapped: `200` becomes `127` and
/// `-200` becomes `-127` (not `-128`, which the report map excludes).
pub fn clamp_axis(delta: i32) -> i8 {
    delta.clamp(AXIS_MIN as i32, AXIS_MAX as i32) as i8
}

/// Relative-motion mouse report.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MouseReport {
    /// Button bitfield (bit 0 = left, bit 1 = right).
    pub buttons: u8,
    /// Relative X movement (signed).
    pub x: i8,
    /// Relative Y movement (signed).
    pub y: i8,
    /// Scroll wheel delta (signed).
    pub wheel: i8,
}

impl MouseReport {
    /// Create an idle (no movement, no buttons) report.
    pub const fn empty() -> Self {
        Self {
            buttons: 0,
            x: 0,
            y: 0,
            wheel: 0,
        }
    }

    /// Build a report from raw deltas, saturating each axis.
    pub fn new(buttons: u8, dx: i32, dy: i32, wheel: i32) -> Self {
        Self {
            buttons,
            x: clamp_axis(dx),
            y: clamp_axis(dy),
            wheel: clamp_axis(wheel),
        }
    }

    /// Parse from raw report bytes.
    ///
    /// Accepts 3-byte (no wheel) or 4-byte (with wheel) reports.
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 3 {
            return None;
        }
        Some(Self {
            buttons: data[0],
            x: data[1] as i8,
            y: data[2] as i8,
            wheel: if data.len() >= 4 { data[3] as i8 } else { 0 },
        })
    }

    /// Serialise into a byte slice for notification.
    /// Returns the number of bytes written (4, or 0 if `buf` is too small).
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < MOUSE_REPORT_SIZE {
            return 0;
        }
        buf[0] = self.buttons;
        buf[1] = self.x as u8;
        buf[2] = self.y as u8;
        buf[3] = self.wheel as u8;
        MOUSE_REPORT_SIZE
    }

    /// The report as its wire bytes.
    pub fn to_bytes(&self) -> [u8; MOUSE_REPORT_SIZE] {
        let mut buf = [0u8; MOUSE_REPORT_SIZE];
        self.serialize(&mut buf);
        buf
    }

    /// Returns `true` when no buttons are pressed and there is no movement.
    pub fn is_idle(&self) -> bool {
        self.buttons == 0 && self.x == 0 && self.y == 0 && self.wheel == 0
    }
}
