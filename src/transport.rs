//! Seam between the report engines and the platform GATT stack.
//!
//! The engines never touch advertising, service publication, encryption
//! or CCCD bookkeeping. They hand finished report bytes to a
//! [`Transport`] and receive subscription and control-point events back
//! as plain method calls (see [`KeyboardEngine`] and [`MouseEngine`]).
//!
//! [`KeyboardEngine`]: crate::engine::keyboard::KeyboardEngine
//! [`MouseEngine`]: crate::engine::mouse::MouseEngine

use crate::config::MAX_PEER_NAME_LEN;
use crate::error::TransportError;
use crate::hid::consumer::CONSUMER_REPORT_SIZE;
use crate::hid::keyboard::KEYBOARD_REPORT_SIZE;
use crate::hid::mouse::MOUSE_REPORT_SIZE;
use heapless::String;

/// Report characteristics the engines notify on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Characteristic {
    /// Keyboard input report (keyboard service, Report ID 1).
    KeyboardInput,
    /// Consumer control input report (keyboard service, Report ID 2).
    ConsumerInput,
    /// Mouse input report (mouse service, Report ID 2).
    MouseInput,
}

impl Characteristic {
    /// Report ID from the characteristic's Report Reference descriptor.
    pub const fn report_id(self) -> u8 {
        match self {
            Characteristic::KeyboardInput => 1,
            Characteristic::ConsumerInput => 2,
            Characteristic::MouseInput => 2,
        }
    }

    /// Payload length of every notification on this characteristic.
    pub const fn report_len(self) -> usize {
        match self {
            Characteristic::KeyboardInput => KEYBOARD_REPORT_SIZE,
            Characteristic::ConsumerInput => CONSUMER_REPORT_SIZE,
            Characteristic::MouseInput => MOUSE_REPORT_SIZE,
        }
    }
}

/// A central currently subscribed to one of our report characteristics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SubscribedClient {
    /// Peer BLE address, little-endian as on air.
    pub address: [u8; 6],
    /// Peer device name, truncated to fit.
    pub name: String<MAX_PEER_NAME_LEN>,
}

impl SubscribedClient {
    /// Create a client record, truncating `name` to capacity.
    pub fn new(address: [u8; 6], name: &str) -> Self {
        let mut n: String<MAX_PEER_NAME_LEN> = String::new();
        for c in name.chars() {
            if n.push(c).is_err() {
                break;
            }
        }
        Self { address, name: n }
    }
}

/// Platform GATT collaborator.
///
/// `notify` is only called while at least one client is subscribed.
/// Calls are issued one at a time, in the order the state transitions
/// happened, and each is awaited before the next one starts.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Send a value notification on `characteristic`.
    async fn notify(
        &mut self,
        characteristic: Characteristic,
        data: &[u8],
    ) -> Result<(), TransportError>;

    /// Make the service connectable and discoverable.
    async fn start_advertising(&mut self) -> Result<(), TransportError> {
        Ok(())
    }

    /// Stop advertising the service.
    async fn stop_advertising(&mut self) -> Result<(), TransportError> {
        Ok(())
    }
}

impl<T: Transport> Transport for &mut T {
    async fn notify(
        &mut self,
        characteristic: Characteristic,
        data: &[u8],
    ) -> Result<(), TransportError> {
        (**self).notify(characteristic, data).await
    }

    async fn start_advertising(&mut self) -> Result<(), TransportError> {
        (**self).start_advertising().await
    }

    async fn stop_advertising(&mut self) -> Result<(), TransportError> {
        (**self).stop_advertising().await
    }
}
