//! Static HID-over-GATT descriptors.
//!
//! Everything a host reads to learn how to parse our reports: the two
//! Report Maps, the HID Information block and the Report Reference
//! descriptors. These bytes are published read-only and never change at
//! runtime; any deviation breaks host-side report parsing.
//!
//! The keyboard service carries two reports (keyboard = ID 1, consumer
//! control = ID 2). The mouse is an independent HID service whose only
//! report also uses ID 2.

use crate::config::{
    HID_CONTROL_POINT_UUID, HID_INFORMATION_UUID, HID_SERVICE_UUID, REPORT_MAP_UUID, REPORT_UUID,
};
use crate::error::Error;
use crate::hid::report_map::{ReportKind, ReportMap};
use crate::transport::Characteristic;

/// Report Map of the keyboard service: keyboard (ID 1) + consumer control (ID 2).
pub const KEYBOARD_REPORT_MAP: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x06, // Usage (Keyboard)
    0xA1, 0x01, // Collection (Application)
    0x85, 0x01, //   Report ID (1)
    //
    //   - Modifier keys (8 bits) -
    0x05, 0x07, //   Usage Page (Keyboard/Keypad)
    0x19, 0xE0, //   Usage Minimum (Left Control)
    0x29, 0xE7, //   Usage Maximum (Right GUI)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x95, 0x08, //   Report Count (8)
    0x75, 0x01, //   Report Size (1)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    //   - Reserved byte -
    0x95, 0x01, //   Report Count (1)
    0x75, 0x08, //   Report Size (8)
    0x81, 0x01, //   Input (Constant)
    //
    //   - Key codes (6 bytes) -
    0x05, 0x07, //   Usage Page (Keyboard/Keypad)
    0x19, 0x00, //   Usage Minimum (0)
    0x2A, 0xFF, 0x00, // Usage Maximum (255)
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x00, // Logical Maximum (255)
    0x95, 0x06, //   Report Count (6)
    0x75, 0x08, //   Report Size (8)
    0x81, 0x00, //   Input (Data, Array)
    0xC0, // End Collection
    //
    0x05, 0x0C, // Usage Page (Consumer)
    0x09, 0x01, // Usage (Consumer Control)
    0xA1, 0x01, // Collection (Application)
    0x85, 0x02, //   Report ID (2)
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0x9C, 0x02, // Logical Maximum (0x029C)
    0x19, 0x00, //   Usage Minimum (0)
    0x2A, 0x9C, 0x02, // Usage Maximum (0x029C)
    0x95, 0x01, //   Report Count (1)
    0x75, 0x10, //   Report Size (16)
    0x81, 0x00, //   Input (Data, Array, Absolute)
    0xC0, // End Collection
];

/// Report Map of the mouse service: 2 buttons, X/Y/wheel (ID 2).
pub const MOUSE_REPORT_MAP: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x02, // Usage (Mouse)
    0xA1, 0x01, // Collection (Application)
    0x85, 0x02, //   Report ID (2)
    0x09, 0x01, //   Usage (Pointer)
    0xA1, 0x00, //   Collection (Physical)
    //
    //   - Buttons (2 bits + 6 padding) -
    0x05, 0x09, //     Usage Page (Buttons)
    0x19, 0x01, //     Usage Minimum (Button 1)
    0x29, 0x02, //     Usage Maximum (Button 2)
    0x15, 0x00, //     Logical Minimum (0)
    0x25, 0x01, //     Logical Maximum (1)
    0x75, 0x01, //     Report Size (1)
    0x95, 0x02, //     Report Count (2)
    0x81, 0x02, //     Input (Data, Variable, Absolute)
    0x95, 0x06, //     Report Count (6)
    0x81, 0x03, //     Input (Constant, Variable) - padding
    //
    //   - X, Y, wheel -
    0x05, 0x01, //     Usage Page (Generic Desktop)
    0x09, 0x30, //     Usage (X)
    0x09, 0x31, //     Usage (Y)
    0x09, 0x38, //     Usage (Wheel)
    0x15, 0x81, //     Logical Minimum (-127)
    0x25, 0x7F, //     Logical Maximum (127)
    0x75, 0x08, //     Report Size (8)
    0x95, 0x03, //     Report Count (3)
    0x81, 0x06, //     Input (Data, Variable, Relative)
    //
    0xC0, //   End Collection (Physical)
    0xC0, // End Collection (Application)
];

/// HID Information: bcdHID 1.11, country 0, remote wake, not normally connectable.
pub const HID_INFORMATION: [u8; 4] = [0x11, 0x01, 0x00, 0x01];

/// Report Reference value type byte for an input report.
pub const REPORT_TYPE_INPUT: u8 = 0x01;

/// Report Reference of the keyboard input characteristic.
pub const KEYBOARD_REPORT_REFERENCE: [u8; 2] = [0x01, REPORT_TYPE_INPUT];

/// Report Reference of the consumer control input characteristic.
pub const CONSUMER_REPORT_REFERENCE: [u8; 2] = [0x02, REPORT_TYPE_INPUT];

/// Report Reference of the mouse input characteristic.
pub const MOUSE_REPORT_REFERENCE: [u8; 2] = [0x02, REPORT_TYPE_INPUT];

// GATT characteristic property bits (Bluetooth Core Vol 3, Part G, 3.3.1.1)

pub const PROP_READ: u8 = 0x02;
pub const PROP_WRITE_WITHOUT_RESPONSE: u8 = 0x04;
pub const PROP_NOTIFY: u8 = 0x10;

/// One characteristic the transport must publish.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharacteristicSpec {
    /// 16-bit characteristic UUID.
    pub uuid: u16,
    /// GATT property bits (`PROP_*`).
    pub properties: u8,
    /// Static value, for read-only characteristics.
    pub value: Option<&'static [u8]>,
    /// Whether reads require an encrypted link.
    pub encrypted: bool,
    /// Report Reference descriptor value, for report characteristics.
    pub report_reference: Option<[u8; 2]>,
    /// Which engine report is notified here, if any.
    pub report: Option<Characteristic>,
}

/// A HID service laid out as data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ServiceSpec {
    pub uuid: u16,
    pub characteristics: &'static [CharacteristicSpec],
}

impl ServiceSpec {
    /// Characteristic carrying `report`, if this service has one.
    pub fn report_characteristic(&self, report: Characteristic) -> Option<&CharacteristicSpec> {
        self.characteristics
            .iter()
            .find(|c| c.report == Some(report))
    }
}

const fn report_char(reference: [u8; 2], report: Characteristic) -> CharacteristicSpec {
    CharacteristicSpec {
        uuid: REPORT_UUID,
        properties: PROP_READ | PROP_NOTIFY,
        value: None,
        encrypted: true,
        report_reference: Some(reference),
        report: Some(report),
    }
}

const fn report_map_char(map: &'static [u8]) -> CharacteristicSpec {
    CharacteristicSpec {
        uuid: REPORT_MAP_UUID,
        properties: PROP_READ,
        value: Some(map),
        encrypted: true,
        report_reference: None,
        report: None,
    }
}

const HID_INFORMATION_CHAR: CharacteristicSpec = CharacteristicSpec {
    uuid: HID_INFORMATION_UUID,
    properties: PROP_READ,
    value: Some(&HID_INFORMATION),
    encrypted: false,
    report_reference: None,
    report: None,
};

const HID_CONTROL_POINT_CHAR: CharacteristicSpec = CharacteristicSpec {
    uuid: HID_CONTROL_POINT_UUID,
    properties: PROP_WRITE_WITHOUT_RESPONSE,
    value: None,
    encrypted: false,
    report_reference: None,
    report: None,
};

/// Keyboard + consumer control HID service.
pub const KEYBOARD_SERVICE: ServiceSpec = ServiceSpec {
    uuid: HID_SERVICE_UUID,
    characteristics: &[
        report_char(KEYBOARD_REPORT_REFERENCE, Characteristic::KeyboardInput),
        report_char(CONSUMER_REPORT_REFERENCE, Characteristic::ConsumerInput),
        report_map_char(KEYBOARD_REPORT_MAP),
        HID_INFORMATION_CHAR,
        HID_CONTROL_POINT_CHAR,
    ],
};

/// Mouse HID service.
pub const MOUSE_SERVICE: ServiceSpec = ServiceSpec {
    uuid: HID_SERVICE_UUID,
    characteristics: &[
        report_char(MOUSE_REPORT_REFERENCE, Characteristic::MouseInput),
        report_map_char(MOUSE_REPORT_MAP),
        HID_INFORMATION_CHAR,
        HID_CONTROL_POINT_CHAR,
    ],
};

/// Check that every report characteristic of `service` matches its
/// report map: same Report ID, input type, and payload length.
pub fn validate_service(service: &ServiceSpec) -> Result<(), Error> {
    let map = service
        .characteristics
        .iter()
        .find(|c| c.uuid == REPORT_MAP_UUID)
        .and_then(|c| c.value)
        .and_then(ReportMap::parse)
        .ok_or(Error::InvalidDescriptor)?;

    for spec in service.characteristics {
        let (Some(report), Some(reference)) = (spec.report, spec.report_reference) else {
            continue;
        };
        let info = map
            .find(report_kind(report))
            .ok_or(Error::InvalidDescriptor)?;

        if reference[0] != report.report_id()
            || reference[0] != info.report_id
            || reference[1] != REPORT_TYPE_INPUT
            || info.input_len() != report.report_len()
        {
            error!(
                "Report {} disagrees with report map (id {}, {} bytes)",
                report,
                info.report_id,
                info.input_len()
            );
            return Err(Error::InvalidDescriptor);
        }
    }
    Ok(())
}

/// Validate both services. The only failure treated as fatal to bring-up.
pub fn validate_catalog() -> Result<(), Error> {
    validate_service(&KEYBOARD_SERVICE)?;
    validate_service(&MOUSE_SERVICE)
}

fn report_kind(report: Characteristic) -> ReportKind {
    match report {
        Characteristic::KeyboardInput => ReportKind::Keyboard,
        Characteristic::ConsumerInput => ReportKind::Consumer,
        Characteristic::MouseInput => ReportKind::Mouse,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_consistent() {
        assert_eq!(validate_catalog(), Ok(()));
    }

    #[test]
    fn keyboard_map_declares_keyboard_and_consumer() {
        let map = ReportMap::parse(KEYBOARD_REPORT_MAP).unwrap();
        assert_eq!(map.reports().len(), 2);

        let kb = map.find(ReportKind::Keyboard).unwrap();
        assert_eq!(kb.report_id, 1);
        assert_eq!(kb.input_len(), 8);

        let cc = map.find(ReportKind::Consumer).unwrap();
        assert_eq!(cc.report_id, 2);
        assert_eq!(cc.input_len(), 2);

        assert_eq!(map.report_kind_for_id(1), Some(ReportKind::Keyboard));
        assert_eq!(map.report_kind_for_id(2), Some(ReportKind::Consumer));
    }

    #[test]
    fn mouse_map_declares_four_byte_report() {
        let map = ReportMap::parse(MOUSE_REPORT_MAP).unwrap();
        let mouse = map.find(ReportKind::Mouse).unwrap();
        assert_eq!(mouse.report_id, 2);
        assert_eq!(mouse.input_len(), 4);
        assert!(map.find(ReportKind::Keyboard).is_none());
    }

    #[test]
    fn report_maps_are_byte_exact() {
        assert_eq!(KEYBOARD_REPORT_MAP.len(), 74);
        assert_eq!(&KEYBOARD_REPORT_MAP[..8], &[0x05, 0x01, 0x09, 0x06, 0xA1, 0x01, 0x85, 0x01]);
        assert_eq!(&KEYBOARD_REPORT_MAP[71..], &[0x81, 0x00, 0xC0]);
        assert_eq!(MOUSE_REPORT_MAP.len(), 52);
        assert_eq!(&MOUSE_REPORT_MAP[..8], &[0x05, 0x01, 0x09, 0x02, 0xA1, 0x01, 0x85, 0x02]);
        assert_eq!(HID_INFORMATION, [0x11, 0x01, 0x00, 0x01]);
    }

    #[test]
    fn report_references_tag_expected_ids() {
        assert_eq!(KEYBOARD_REPORT_REFERENCE, [0x01, 0x01]);
        assert_eq!(CONSUMER_REPORT_REFERENCE, [0x02, 0x01]);
        assert_eq!(MOUSE_REPORT_REFERENCE, [0x02, 0x01]);
    }

    #[test]
    fn services_expose_report_characteristics() {
        let kb = KEYBOARD_SERVICE
            .report_characteristic(Characteristic::KeyboardInput)
            .unwrap();
        assert_eq!(kb.uuid, REPORT_UUID);
        assert_eq!(kb.properties, PROP_READ | PROP_NOTIFY);
        assert!(kb.encrypted);

        assert!(KEYBOARD_SERVICE
            .report_characteristic(Characteristic::MouseInput)
            .is_none());
        assert!(MOUSE_SERVICE
            .report_characteristic(Characteristic::MouseInput)
            .is_some());
    }

    #[test]
    fn mismatched_reference_is_rejected() {
        static BROKEN: ServiceSpec = ServiceSpec {
            uuid: HID_SERVICE_UUID,
            characteristics: &[
                report_char([0x03, REPORT_TYPE_INPUT], Characteristic::MouseInput),
                report_map_char(MOUSE_REPORT_MAP),
            ],
        };
        assert_eq!(validate_service(&BROKEN), Err(Error::InvalidDescriptor));
    }

    #[test]
    fn missing_report_map_is_rejected() {
        static NO_MAP: ServiceSpec = ServiceSpec {
            uuid: HID_SERVICE_UUID,
            characteristics: &[report_char(MOUSE_REPORT_REFERENCE, Characteristic::MouseInput)],
        };
        assert_eq!(validate_service(&NO_MAP), Err(Error::InvalidDescriptor));
    }
}
