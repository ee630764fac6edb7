//! PS/2 Set-1 scan code → USB HID usage translation.
//!
//! Scan codes are 16 bits wide so the `0xE0xx` extended forms (right-hand
//! modifiers, Windows keys, Application key) fit next to the one-byte
//! codes. Every usage is on the Keyboard/Keypad page (0x07).
//!
//! ```text
//! Usage 0xE0..=0xE7 : modifiers, reported as bits of byte 0
//!         bit 0 = Left Ctrl,  bit 1 = Left Shift,
//!         bit 2 = Left Alt,   bit 3 = Left GUI,
//!         bit 4 = Right Ctrl, bit 5 = Right Shift,
//!         bit 6 = Right Alt,  bit 7 = Right GUI
//! Anything else     : a normal key, reported in one of the six key slots
//! ```

/// Usage returned for scan codes we do not know.
pub const USAGE_UNSUPPORTED: u8 = 0x00;

/// First modifier usage (Left Control).
pub const MODIFIER_FIRST: u8 = 0xE0;

/// Last modifier usage (Right GUI).
pub const MODIFIER_LAST: u8 = 0xE7;

/// Every scan code we translate, as `(scan code, usage)`.
pub const SCAN_CODE_TABLE: [(u16, u8); 76] = [
    // Number row
    (0x29, 0x35), // ` ~
    (0x02, 0x1E), // 1 !
    (0x03, 0x1F), // 2 @
    (0x04, 0x20), // 3 #
    (0x05, 0x21), // 4 $
    (0x06, 0x22), // 5 %
    (0x07, 0x23), // 6 ^
    (0x08, 0x24), // 7 &
    (0x09, 0x25), // 8 *
    (0x0A, 0x26), // 9 (
    (0x0B, 0x27), // 0 )
    (0x0C, 0x2D), // - _
    (0x0D, 0x2E), // = +
    (0x0E, 0x2A), // Backspace
    // Top letter row
    (0x0F, 0x2B), // Tab
    (0x10, 0x14), // Q
    (0x11, 0x1A), // W
    (0x12, 0x08), // E
    (0x13, 0x15), // R
    (0x14, 0x17), // T
    (0x15, 0x1C), // Y
    (0x16, 0x18), // U
    (0x17, 0x0C), // I
    (0x18, 0x12), // O
    (0x19, 0x13), // P
    (0x1A, 0x2F), // [ {
    (0x1B, 0x30), // ] }
    (0x2B, 0x31), // \ |
    // Home row
    (0x3A, 0x39), // Caps Lock
    (0x1E, 0x04), // A
    (0x1F, 0x16), // S
    (0x20, 0x07), // D
    (0x21, 0x09), // F
    (0x22, 0x0A), // G
    (0x23, 0x0B), // H
    (0x24, 0x0D), // J
    (0x25, 0x0E), // K
    (0x26, 0x0F), // L
    (0x27, 0x33), // ; :
    (0x28, 0x34), // ' "
    (0x1C, 0x28), // Enter
    // Bottom letter row
    (0x2A, 0xE1), // Left Shift
    (0x56, 0x64), // Non-US \ |
    (0x2C, 0x1D), // Z
    (0x2D, 0x1B), // X
    (0x2E, 0x06), // C
    (0x2F, 0x19), // V
    (0x30, 0x05), // B
    (0x31, 0x11), // N
    (0x32, 0x10), // M
    (0x33, 0x36), // , <
    (0x34, 0x37), // . >
    (0x35, 0x38), // / ?
    (0x73, 0x87), // International1 (Ro)
    (0x36, 0xE5), // Right Shift
    // Space row
    (0x1D, 0xE0),   // Left Ctrl
    (0xE05B, 0xE3), // Left GUI
    (0x38, 0xE2),   // Left Alt
    (0x39, 0x2C),   // Space
    (0xE038, 0xE6), // Right Alt
    (0xE05C, 0xE7), // Right GUI
    (0xE01D, 0xE4), // Right Ctrl
    (0xE05D, 0x65), // Application
    // Escape and function row
    (0x01, 0x29), // Escape
    (0x3B, 0x3A), // F1
    (0x3C, 0x3B), // F2
    (0x3D, 0x3C), // F3
    (0x3E, 0x3D), // F4
    (0x3F, 0x3E), // F5
    (0x40, 0x3F), // F6
    (0x41, 0x40), // F7
    (0x42, 0x41), // F8
    (0x43, 0x42), // F9
    (0x44, 0x43), // F10
    (0x57, 0x44), // F11
    (0x58, 0x45), // F12
];

/// Look up a scan code without emitting a diagnostic.
pub fn lookup(scan_code: u16) -> Option<u8> {
    SCAN_CODE_TABLE
        .iter()
        .find(|&&(code, _)| code == scan_code)
        .map(|&(_, usage)| usage)
}

/// Translate a scan code to its HID usage.
///
/// Total: unknown codes yield [`USAGE_UNSUPPORTED`] and a warning, never
/// an error, so callers can forward raw keyboard input unfiltered.
pub fn usage_of(scan_code: u16) -> u8 {
    match lookup(scan_code) {
        Some(usage) => usage,
        None => {
            warn!("Unsupported scan code: {:#x}", scan_code);
            USAGE_UNSUPPORTED
        }
    }
}

/// Returns `true` for the eight modifier usages (0xE0..=0xE7).
pub const fn is_modifier_key(usage: u8) -> bool {
    usage >= MODIFIER_FIRST && usage <= MODIFIER_LAST
}

/// Bit of the report's modifier byte that represents `usage`.
///
/// Returns 0 (and logs) when `usage` is not a modifier.
pub fn modifier_bit(usage: u8) -> u8 {
    if !is_modifier_key(usage) {
        warn!("Not a modifier key: {:#x}", usage);
        return 0;
    }
    1 << (usage - MODIFIER_FIRST)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_translate() {
        assert_eq!(usage_of(0x1E), 0x04); // A
        assert_eq!(usage_of(0x2C), 0x1D); // Z
        assert_eq!(usage_of(0x39), 0x2C); // Space
    }

    #[test]
    fn extended_codes_translate() {
        assert_eq!(usage_of(0xE05B), 0xE3); // Left GUI
        assert_eq!(usage_of(0xE01D), 0xE4); // Right Ctrl
        assert_eq!(usage_of(0xE038), 0xE6); // Right Alt
        assert_eq!(usage_of(0xE05D), 0x65); // Application
    }

    #[test]
    fn unknown_code_maps_to_sentinel() {
        assert_eq!(usage_of(0x00), USAGE_UNSUPPORTED);
        assert_eq!(usage_of(0xE1FF), USAGE_UNSUPPORTED);
        assert_eq!(usage_of(0xFFFF), USAGE_UNSUPPORTED);
        assert_eq!(lookup(0x7F), None);
    }

    #[test]
    fn table_has_no_duplicate_scan_codes() {
        for (i, &(a, _)) in SCAN_CODE_TABLE.iter().enumerate() {
            for &(b, _) in &SCAN_CODE_TABLE[i + 1..] {
                assert_ne!(a, b, "duplicate scan code {:#x}", a);
            }
        }
    }

    #[test]
    fn table_lookup_is_deterministic() {
        for &(code, usage) in SCAN_CODE_TABLE.iter() {
            assert_eq!(usage_of(code), usage);
            assert_eq!(usage_of(code), usage_of(code));
            assert_ne!(usage, USAGE_UNSUPPORTED);
        }
    }

    #[test]
    fn every_16_bit_code_translates() {
        // Totality: no input panics, unknowns collapse to the sentinel.
        for code in 0..=u16::MAX {
            let usage = usage_of(code);
            assert_eq!(usage == USAGE_UNSUPPORTED, lookup(code).is_none());
        }
    }

    #[test]
    fn modifier_classification() {
        for usage in 0xE0..=0xE7u8 {
            assert!(is_modifier_key(usage));
        }
        assert!(!is_modifier_key(0xDF));
        assert!(!is_modifier_key(0xE8));
        assert!(!is_modifier_key(0x04));
    }

    #[test]
    fn modifier_bits_are_unique_single_bits() {
        let mut seen = 0u8;
        for usage in 0xE0..=0xE7u8 {
            let bit = modifier_bit(usage);
            assert_eq!(bit.count_ones(), 1);
            assert_eq!(seen & bit, 0);
            seen |= bit;
        }
        assert_eq!(seen, 0xFF);
    }

    #[test]
    fn modifier_bit_of_normal_key_is_zero() {
        assert_eq!(modifier_bit(0x04), 0);
        assert_eq!(modifier_bit(0x00), 0);
        assert_eq!(modifier_bit(0xE8), 0);
    }

    #[test]
    fn scan_code_modifiers_land_on_expected_bits() {
        assert_eq!(modifier_bit(usage_of(0x1D)), 0x01); // Left Ctrl
        assert_eq!(modifier_bit(usage_of(0x2A)), 0x02); // Left Shift
        assert_eq!(modifier_bit(usage_of(0x38)), 0x04); // Left Alt
        assert_eq!(modifier_bit(usage_of(0xE05B)), 0x08); // Left GUI
        assert_eq!(modifier_bit(usage_of(0xE01D)), 0x10); // Right Ctrl
        assert_eq!(modifier_bit(usage_of(0x36)), 0x20); // Right Shift
        assert_eq!(modifier_bit(usage_of(0xE038)), 0x40); // Right Alt
        assert_eq!(modifier_bit(usage_of(0xE05C)), 0x80); // Right GUI
    }
}
