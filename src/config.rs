//! Crate-wide constants and compile-time configuration.
//!
//! Report timing, state capacities and the GATT identifiers the
//! transport publishes live here so they can be tuned in one place.

// Report timing

/// Minimum spacing between consecutive mouse movement reports (ms).
/// 10 ms caps the pointer at ~100 reports/s, like a physical mouse.
pub const MOUSE_REPORT_INTERVAL_MS: u32 = 10;

/// How long a synthesized click holds the button down (ms).
/// Must exceed typical host-side debounce windows.
pub const MOUSE_CLICK_DWELL_MS: u32 = 40;

// State capacities

/// Keys a boot-compatible keyboard report can carry at once (6KRO).
pub const MAX_PRESSED_KEYS: usize = 6;

/// Capacity of the function-key → consumer-usage table (power of two).
pub const MAX_FUNCTION_KEY_BINDINGS: usize = 16;

/// Longest peer name we keep for diagnostics.
pub const MAX_PEER_NAME_LEN: usize = 32;

// GATT identifiers (16-bit SIG-assigned UUIDs)

/// Human Interface Device service.
pub const HID_SERVICE_UUID: u16 = 0x1812;

/// HID Information characteristic.
pub const HID_INFORMATION_UUID: u16 = 0x2A4A;

/// Report Map characteristic.
pub const REPORT_MAP_UUID: u16 = 0x2A4B;

/// HID Control Point characteristic.
pub const HID_CONTROL_POINT_UUID: u16 = 0x2A4C;

/// Report characteristic.
pub const REPORT_UUID: u16 = 0x2A4D;

/// Report Reference descriptor.
pub const REPORT_REFERENCE_UUID: u16 = 0x2908;
