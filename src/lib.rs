//! BLE HID keyboard and mouse emulator core.
//!
//! Turns PS/2 Set-1 scan codes and pointer events into the HID input
//! reports a BLE central expects, and hands them to a platform GATT
//! stack through the [`Transport`] trait. The crate owns report state,
//! report assembly and the static HID descriptors; advertising, pairing
//! and CCCD handling stay with the transport.
//!
//! `no_std` outside of tests. Enable the `defmt` feature for on-target
//! logging and `embassy-time` for a ready-made mouse delay source.

#![cfg_attr(not(test), no_std)]

// Must stay first so the logging macros are visible to every module.
#[macro_use]
mod fmt;

pub mod config;
pub mod emulator;
pub mod engine;
pub mod error;
pub mod hid;
pub mod scancode;
pub mod transport;

pub use emulator::Emulator;
pub use engine::bindings::FunctionKeyBindings;
pub use engine::keyboard::KeyboardEngine;
pub use engine::mouse::MouseEngine;
pub use error::{Error, TransportError};
pub use hid::mouse::MouseButton;
pub use transport::{Characteristic, SubscribedClient, Transport};
