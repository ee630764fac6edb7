//! Unit tests for HID report assembly and serialization.
//!
//! These run on the host and pin down the exact wire bytes each report
//! produces, since the host parses them against the static report maps.

use super::consumer::{ConsumerReport, ConsumerUsage};
use super::keyboard::KeyboardReport;
use super::mouse::{clamp_axis, MouseButton, MouseReport};
use super::{classify_report, HidReport};
use crate::transport::Characteristic;

// ═══════════════════════════════════════════════════════════════════════════
// Keyboard Report Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn keyboard_report_empty() {
    let report = KeyboardReport::empty();
    assert!(report.is_empty());
    assert_eq!(report.modifier, 0);
    assert_eq!(report.keycodes, [0; 6]);
    assert_eq!(report.to_bytes(), [0; 8]);
}

#[test]
fn keyboard_report_from_state() {
    // Left Shift + 'A'
    let report = KeyboardReport::new(0x02, &[0x04]);
    assert_eq!(report.to_bytes(), [0x02, 0x00, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00]);
    assert!(!report.is_empty());
}

#[test]
fn keyboard_report_ignores_keys_past_six() {
    let report = KeyboardReport::new(0x00, &[0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A]);
    assert_eq!(report.keycodes, [0x04, 0x05, 0x06, 0x07, 0x08, 0x09]);
}

#[test]
fn keyboard_report_from_bytes_requires_exact_length() {
    assert!(KeyboardReport::from_bytes(&[0x02, 0x00, 0x04]).is_none());
    assert!(KeyboardReport::from_bytes(&[0u8; 9]).is_none());

    let report = KeyboardReport::from_bytes(&[0x05, 0x00, 0x04, 0x05, 0x06, 0, 0, 0]).unwrap();
    assert_eq!(report.modifier, 0x05);
    assert_eq!(report.keycodes, [0x04, 0x05, 0x06, 0x00, 0x00, 0x00]);
}

#[test]
fn keyboard_report_serialize_buffer_too_small() {
    let report = KeyboardReport::empty();
    let mut small_buf = [0u8; 4];
    assert_eq!(report.serialize(&mut small_buf), 0);
}

// ═══════════════════════════════════════════════════════════════════════════
// Mouse Report Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn mouse_report_empty() {
    let report = MouseReport::empty();
    assert!(report.is_idle());
    assert_eq!(report.to_bytes(), [0; 4]);
}

#[test]
fn mouse_report_signed_axes() {
    let report = MouseReport::new(MouseButton::Left.mask(), 10, -5, -1);
    assert_eq!(report.to_bytes(), [0x01, 0x0A, 0xFB, 0xFF]);
    assert!(!report.is_idle());
}

#[test]
fn mouse_report_saturates_large_deltas() {
    let report = MouseReport::new(0, 200, -200, 1000);
    assert_eq!(report.x, 127);
    assert_eq!(report.y, -127);
    assert_eq!(report.wheel, 127);
    assert_eq!(report.to_bytes(), [0x00, 0x7F, 0x81, 0x7F]);
}

#[test]
fn clamp_axis_boundaries() {
    assert_eq!(clamp_axis(127), 127);
    assert_eq!(clamp_axis(128), 127);
    assert_eq!(clamp_axis(-127), -127);
    assert_eq!(clamp_axis(-128), -127);
    assert_eq!(clamp_axis(i32::MIN), -127);
    assert_eq!(clamp_axis(0), 0);
}

#[test]
fn mouse_button_masks() {
    assert_eq!(MouseButton::Left.mask(), 0x01);
    assert_eq!(MouseButton::Right.mask(), 0x02);
}

#[test]
fn mouse_report_from_short_bytes_fails() {
    assert!(MouseReport::from_bytes(&[0x01, 0x0A]).is_none());
}

// ═══════════════════════════════════════════════════════════════════════════
// Report Classification Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn classify_keyboard_payload() {
    let data = [0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00];
    let report = classify_report(Characteristic::KeyboardInput, &data);
    assert_eq!(report, Some(HidReport::Keyboard(KeyboardReport::new(0, &[0x04]))));
}

#[test]
fn classify_consumer_payload() {
    let report = classify_report(Characteristic::ConsumerInput, &[0xE9, 0x00]);
    assert_eq!(
        report,
        Some(HidReport::Consumer(ConsumerReport::new(ConsumerUsage::VolumeIncrement)))
    );
}

#[test]
fn classify_rejects_wrong_length() {
    assert!(classify_report(Characteristic::MouseInput, &[0x01, 0x10, 0x20]).is_none());
    assert!(classify_report(Characteristic::ConsumerInput, &[0xE9, 0x00, 0x00]).is_none());
    assert!(classify_report(Characteristic::KeyboardInput, &[]).is_none());
}

// ═══════════════════════════════════════════════════════════════════════════
// HidReport Enum Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn hid_report_routes_to_characteristic() {
    let kb = HidReport::Keyboard(KeyboardReport::empty());
    let cc = HidReport::Consumer(ConsumerReport::empty());
    let mouse = HidReport::Mouse(MouseReport::empty());

    assert_eq!(kb.characteristic(), Characteristic::KeyboardInput);
    assert_eq!(cc.characteristic(), Characteristic::ConsumerInput);
    assert_eq!(mouse.characteristic(), Characteristic::MouseInput);
}

#[test]
fn hid_report_serialize_matches_characteristic_length() {
    let mut buf = [0u8; 8];
    for report in [
        HidReport::Keyboard(KeyboardReport::new(0x01, &[0x04])),
        HidReport::Consumer(ConsumerReport::new(ConsumerUsage::Mute)),
        HidReport::Mouse(MouseReport::new(0x02, 10, -10, 0)),
    ] {
        let size = report.serialize(&mut buf);
        assert_eq!(size, report.characteristic().report_len());
    }
}
