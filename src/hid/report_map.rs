//! HID Report Map parser.
//!
//! Walks a HID Report Descriptor and recovers, per top-level
//! application collection, what kind of report it describes, its
//! Report ID and the size of its input report. The catalog uses this to
//! cross-check the static report maps against the Report Reference
//! descriptors published next to them.
//!
//! ## HID Report Descriptor Structure
//!
//! A Report Descriptor is a sequence of items. Each item starts with a
//! prefix byte:
//! ```text
//! bits 7-4: tag
//! bits 3-2: type (0 = main, 1 = global, 2 = local)
//! bits 1-0: data size (0, 1, 2 or 4 bytes)
//! ```
//!
//! ## Limitations
//!
//! This handles what our own maps use, not the full HID spec:
//! - Only application collections are tracked; nested ones are flattened
//! - Push/Pop state is not supported
//! - Long items and delimiters are ignored

use heapless::Vec;

/// Top-level collections a single report map may declare.
pub const MAX_APPLICATIONS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportKind {
    Keyboard,
    Mouse,
    Consumer,
}

/// Usage page codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UsagePage {
    /// Generic Desktop (mouse, keyboard, joystick).
    GenericDesktop,
    /// Keyboard/Keypad.
    Keyboard,
    /// LEDs.
    Led,
    /// Button.
    Button,
    /// Consumer Control.
    Consumer,
    /// Unknown/unsupported.
    Unknown(u16),
}

impl From<u16> for UsagePage {
    fn from(code: u16) -> Self {
        match code {
            0x01 => UsagePage::GenericDesktop,
            0x07 => UsagePage::Keyboard,
            0x08 => UsagePage::Led,
            0x09 => UsagePage::Button,
            0x0C => UsagePage::Consumer,
            other => UsagePage::Unknown(other),
        }
    }
}

/// One application collection found in a report map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReportInfo {
    pub kind: ReportKind,
    /// Report ID, or 0 when the map declares none.
    pub report_id: u8,
    /// Total input bits, padding included.
    pub input_bits: u16,
}

impl ReportInfo {
    /// Input report length in bytes (rounded up).
    pub fn input_len(&self) -> usize {
        (self.input_bits as usize).div_ceil(8)
    }
}

/// Parsed report map.
#[derive(Clone, Debug, Default)]
pub struct ReportMap {
    reports: Vec<ReportInfo, MAX_APPLICATIONS>,
}

impl ReportMap {
    /// All application collections, in declaration order.
    pub fn reports(&self) -> &[ReportInfo] {
        &self.reports
    }

    /// First collection of the given kind.
    pub fn find(&self, kind: ReportKind) -> Option<&ReportInfo> {
        self.reports.iter().find(|r| r.kind == kind)
    }

    pub fn has_report_ids(&self) -> bool {
        self.reports.iter().any(|r| r.report_id != 0)
    }

    pub fn report_kind_for_id(&self, report_id: u8) -> Option<ReportKind> {
        self.reports
            .iter()
            .find(|r| r.report_id == report_id)
            .map(|r| r.kind)
    }

    /// Parse a HID Report Descriptor.
    ///
    /// Returns `None` when the map is truncated, unbalanced, or
    /// declares no collection we recognise.
    pub fn parse(data: &[u8]) -> Option<Self> {
        let mut map = ReportMap::default();

        // Parser state.
        let mut usage_page: UsagePage = UsagePage::Unknown(0);
        let mut usage: u16 = 0;
        let mut report_id: u8 = 0;
        let mut report_size: u16 = 0;
        let mut report_count: u16 = 0;
        let mut depth: usize = 0;
        let mut current: Option<ReportInfo> = None;

        let mut i = 0;
        while i < data.len() {
            let prefix = data[i];
            let tag = (prefix >> 4) & 0x0F;
            let item_type = (prefix >> 2) & 0x03;
            let size = match prefix & 0x03 {
                0 => 0,
                1 => 1,
                2 => 2,
                _ => 4,
            };

            if i + 1 + size > data.len() {
                debug!("Report map truncated at offset {}", i);
                return None;
            }

            let value: u32 = match size {
                0 => 0,
                1 => data[i + 1] as u32,
                2 => u16::from_le_bytes([data[i + 1], data[i + 2]]) as u32,
                _ => u32::from_le_bytes([data[i + 1], data[i + 2], data[i + 3], data[i + 4]]),
            };

            match item_type {
                // Main items
                0 => {
                    match tag {
                        // Input
                        0x08 => {
                            if let Some(info) = current.as_mut() {
                                info.input_bits = info
                                    .input_bits
                                    .saturating_add(report_size.saturating_mul(report_count));
                                if info.report_id == 0 {
                                    info.report_id = report_id;
                                }
                            }
                        }
                        // Collection
                        0x0A => {
                            depth += 1;
                            // Application collections at the top level start a report.
                            if depth == 1 && value == 0x01 {
                                current = application_kind(usage_page, usage).map(|kind| {
                                    ReportInfo {
                                        kind,
                                        report_id: 0,
                                        input_bits: 0,
                                    }
                                });
                            }
                        }
                        // End Collection
                        0x0C => {
                            if depth == 0 {
                                debug!("Report map has unbalanced End Collection");
                                return None;
                            }
                            depth -= 1;
                            if depth == 0 {
                                if let Some(info) = current.take() {
                                    if map.reports.push(info).is_err() {
                                        debug!("Report map declares too many collections");
                                        return None;
                                    }
                                }
                                report_id = 0;
                            }
                        }
                        _ => {}
                    }
                    // Local items only apply to the next main item.
                    usage = 0;
                }
                // Global items
                1 => {
                    match tag {
                        // Usage Page
                        0x00 => usage_page = UsagePage::from(value as u16),
                        // Report Size
                        0x07 => report_size = value as u16,
                        // Report ID
                        0x08 => report_id = value as u8,
                        // Report Count
                        0x09 => report_count = value as u16,
                        _ => {}
                    }
                }
                // Local items
                2 => {
                    if tag == 0x00 {
                        usage = value as u16;
                    }
                }
                _ => {}
            }

            i += 1 + size;
        }

        if depth != 0 {
            debug!("Report map ends inside a collection");
            return None;
        }

        if map.reports.is_empty() {
            debug!("Report map: no recognized collections found");
            None
        } else {
            Some(map)
        }
    }
}

fn application_kind(page: UsagePage, usage: u16) -> Option<ReportKind> {
    match (page, usage) {
        (UsagePage::GenericDesktop, 0x06) => Some(ReportKind::Keyboard),
        (UsagePage::GenericDesktop, 0x02) => Some(ReportKind::Mouse),
        (UsagePage::Consumer, 0x01) => Some(ReportKind::Consumer),
        _ => None,
    }
}
