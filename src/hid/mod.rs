//! HID report types and the static descriptors they conform to.

pub mod consumer;
pub mod descriptor;
pub mod keyboard;
pub mod mouse;
pub mod report_map;

#[cfg(test)]
mod tests;

use crate::transport::Characteristic;

/// Largest report payload we ever notify.
pub const MAX_REPORT_SIZE: usize = keyboard::KEYBOARD_REPORT_SIZE;

/// Any report an engine can emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HidReport {
    Keyboard(keyboard::KeyboardReport),
    Consumer(consumer::ConsumerReport),
    Mouse(mouse::MouseReport),
}

impl HidReport {
    /// Characteristic this report is notified on.
    pub fn characteristic(&self) -> Characteristic {
        match self {
            HidReport::Keyboard(_) => Characteristic::KeyboardInput,
            HidReport::Consumer(_) => Characteristic::ConsumerInput,
            HidReport::Mouse(_) => Characteristic::MouseInput,
        }
    }

    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        match self {
            HidReport::Keyboard(k) => k.serialize(buf),
            HidReport::Consumer(c) => c.serialize(buf),
            HidReport::Mouse(m) => m.serialize(buf),
        }
    }
}

/// Decode a notification payload back into a typed report.
///
/// The payload must have exactly the characteristic's report length.
pub fn classify_report(characteristic: Characteristic, data: &[u8]) -> Option<HidReport> {
    if data.len() != characteristic.report_len() {
        return None;
    }
    match characteristic {
        Characteristic::KeyboardInput => {
            keyboard::KeyboardReport::from_bytes(data).map(HidReport::Keyboard)
        }
        Characteristic::ConsumerInput => {
            consumer::ConsumerReport::from_bytes(data).map(HidReport::Consumer)
        }
        Characteristic::MouseInput => mouse::MouseReport::from_bytes(data).map(HidReport::Mouse),
    }
}
