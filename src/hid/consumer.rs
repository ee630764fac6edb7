//! Consumer Control HID support - media keys, volume, browser keys.
//!
//! Consumer Control is a separate HID usage page (0x0C). Here it shares
//! the keyboard's HID service as Report ID 2, carried on its own Report
//! characteristic. Bound function keys are rerouted onto this channel.

/// Consumer control report size (2 bytes for usage ID).
pub const CONSUMER_REPORT_SIZE: usize = 2;

/// Consumer usages the default function-key row sends (Usage Page 0x0C).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum ConsumerUsage {
    ScanPreviousTrack = 0x00B6,
    ScanNextTrack = 0x00B5,
    PlayPause = 0x00CD,
    Mute = 0x00E2,
    VolumeIncrement = 0x00E9,
    VolumeDecrement = 0x00EA,
    AcSearch = 0x0221,
    AcHome = 0x0223,
    AcBack = 0x0224,
    /// Outside the report map's logical range; hosts ignore it. Kept so
    /// F2 stays off the keyboard report.
    Placeholder = 0x029F,
}

impl ConsumerUsage {
    /// Usage ID as carried in the report.
    pub const fn code(self) -> u16 {
        self as u16
    }
}

/// Consumer Control HID report.
///
/// One active usage at a time; `0x0000` means released.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConsumerReport {
    /// Active consumer control usage (little-endian u16 on the wire).
    pub usage: u16,
}

impl ConsumerReport {
    /// The idle (released) report.
    pub const fn empty() -> Self {
        Self { usage: 0 }
    }

    /// Report holding a raw 16-bit usage.
    pub const fn from_usage(usage: u16) -> Self {
        Self { usage }
    }

    pub const fn new(usage: ConsumerUsage) -> Self {
        Self::from_usage(usage.code())
    }

    /// Parse an exact 2-byte payload.
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        match data {
            &[lo, hi] => Some(Self::from_usage(u16::from_le_bytes([lo, hi]))),
            _ => None,
        }
    }

    /// Serialize to report bytes. Returns 0 if `buf` is too small.
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < CONSUMER_REPORT_SIZE {
            return 0;
        }
        buf[..CONSUMER_REPORT_SIZE].copy_from_slice(&self.usage.to_le_bytes());
        CONSUMER_REPORT_SIZE
    }

    pub fn to_bytes(&self) -> [u8; CONSUMER_REPORT_SIZE] {
        self.usage.to_le_bytes()
    }

    /// `true` when nothing is held.
    pub fn is_empty(&self) -> bool {
        self.usage == 0
    }
}
