//! Function-key binding table.
//!
//! A bound key usage never reaches the keyboard report; its press and
//! release are redirected to the consumer control channel instead.

use crate::config::MAX_FUNCTION_KEY_BINDINGS;
use crate::error::Error;
use crate::hid::consumer::ConsumerUsage;
use crate::scancode::USAGE_UNSUPPORTED;
use heapless::FnvIndexMap;

/// Bindings installed at engine construction (F1..F10). F11 and F12
/// stay ordinary keys.
pub const DEFAULT_BINDINGS: [(u8, ConsumerUsage); 10] = [
    (0x3A, ConsumerUsage::AcHome),            // F1
    (0x3B, ConsumerUsage::Placeholder),       // F2
    (0x3C, ConsumerUsage::AcBack),            // F3
    (0x3D, ConsumerUsage::AcSearch),          // F4
    (0x3E, ConsumerUsage::ScanPreviousTrack), // F5
    (0x3F, ConsumerUsage::PlayPause),         // F6
    (0x40, ConsumerUsage::ScanNextTrack),     // F7
    (0x41, ConsumerUsage::Mute),              // F8
    (0x42, ConsumerUsage::VolumeDecrement),   // F9
    (0x43, ConsumerUsage::VolumeIncrement),   // F10
];

/// Keyboard usage -> consumer usage map with fixed capacity.
#[derive(Clone, Debug)]
pub struct FunctionKeyBindings {
    map: FnvIndexMap<u8, u16, MAX_FUNCTION_KEY_BINDINGS>,
}

impl FunctionKeyBindings {
    /// Empty table.
    pub fn new() -> Self {
        Self {
            map: FnvIndexMap::new(),
        }
    }

    /// Table pre-populated with [`DEFAULT_BINDINGS`].
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        for (usage, consumer) in DEFAULT_BINDINGS {
            // Capacity exceeds the default set.
            let _ = table.map.insert(usage, consumer.code());
        }
        table
    }

    /// Bind `usage` to `consumer`, replacing any existing binding.
    ///
    /// Usage 0 is what an unknown scan code translates to and can never
    /// be bound.
    pub fn bind(&mut self, usage: u8, consumer: u16) -> Result<Option<u16>, Error> {
        if usage == USAGE_UNSUPPORTED {
            warn!("Refusing to bind the unsupported usage");
            return Ok(None);
        }
        self.map.insert(usage, consumer).map_err(|_| {
            warn!("Binding table full, cannot bind {:#x}", usage);
            Error::BindingTableFull
        })
    }

    /// Remove the binding for `usage`, returning the consumer usage it had.
    pub fn unbind(&mut self, usage: u8) -> Option<u16> {
        self.map.remove(&usage)
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn get(&self, usage: u8) -> Option<u16> {
        self.map.get(&usage).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate `(usage, consumer)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u16)> + '_ {
        self.map.iter().map(|(k, v)| (*k, *v))
    }
}

impl Default for FunctionKeyBindings {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_f1_to_f10() {
        let table = FunctionKeyBindings::with_defaults();
        assert_eq!(table.len(), 10);
        assert_eq!(table.get(0x3A), Some(0x0223));
        assert_eq!(table.get(0x43), Some(0x00E9));
        assert_eq!(table.get(0x44), None); // F11
        assert_eq!(table.get(0x45), None); // F12
    }

    #[test]
    fn rebind_replaces_previous() {
        let mut table = FunctionKeyBindings::with_defaults();
        assert_eq!(table.bind(0x3A, 0x00CD), Ok(Some(0x0223)));
        assert_eq!(table.get(0x3A), Some(0x00CD));
        assert_eq!(table.len(), 10);
    }

    #[test]
    fn unbind_and_clear() {
        let mut table = FunctionKeyBindings::with_defaults();
        assert_eq!(table.unbind(0x41), Some(0x00E2));
        assert_eq!(table.unbind(0x41), None);
        table.clear();
        assert!(table.is_empty());
    }

    #[test]
    fn full_table_rejects_new_usage() {
        let mut table = FunctionKeyBindings::new();
        for usage in 0..MAX_FUNCTION_KEY_BINDINGS as u8 {
            assert!(table.bind(0x04 + usage, 0x00E9).is_ok());
        }
        assert_eq!(table.bind(0x60, 0x00E2), Err(Error::BindingTableFull));
        // Existing keys can still be rebound.
        assert_eq!(table.bind(0x04, 0x00E2), Ok(Some(0x00E9)));
    }

    #[test]
    fn unsupported_usage_is_never_bound() {
        let mut table = FunctionKeyBindings::new();
        assert_eq!(table.bind(USAGE_UNSUPPORTED, 0x00E9), Ok(None));
        assert_eq!(table.get(USAGE_UNSUPPORTED), None);
        assert!(table.is_empty());
    }

    #[test]
    fn defaults_use_enum_codes() {
        let table = FunctionKeyBindings::with_defaults();
        for (usage, consumer) in DEFAULT_BINDINGS {
            assert_eq!(table.get(usage), Some(consumer.code()));
        }
    }

    #[test]
    fn iter_yields_insertion_order() {
        let table = FunctionKeyBindings::with_defaults();
        let first = table.iter().next();
        assert_eq!(first, Some((0x3A, 0x0223)));
    }
}
