//! Report engines - per-device state machines that turn input events
//! into HID reports and push them through a [`Transport`].
//!
//! Each engine keeps its state and its transport behind one
//! `embassy_sync` mutex. Every operation holds that lock from state
//! change through the awaited notification (and any pacing delay), so
//! reports leave in the same order the transitions happened and no
//! report ever reflects a half-applied transition. Transport callbacks
//! (subscription changes) go through the same lock.

pub mod bindings;
pub mod keyboard;
pub mod mouse;

use crate::hid::{HidReport, MAX_REPORT_SIZE};
use crate::transport::{Characteristic, SubscribedClient, Transport};
use crate::Error;

/// Emission gate: reports flow only after initialization and while the
/// target characteristic has at least one subscriber.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Gate {
    initialized: bool,
    subscribers: [usize; 3],
}

impl Gate {
    pub(crate) const fn new() -> Self {
        Self {
            initialized: false,
            subscribers: [0; 3],
        }
    }

    fn slot(characteristic: Characteristic) -> usize {
        match characteristic {
            Characteristic::KeyboardInput => 0,
            Characteristic::ConsumerInput => 1,
            Characteristic::MouseInput => 2,
        }
    }

    pub(crate) fn set_initialized(&mut self) {
        self.initialized = true;
    }

    pub(crate) fn set_subscribers(
        &mut self,
        characteristic: Characteristic,
        clients: Option<&[SubscribedClient]>,
    ) {
        let count = clients.map_or(0, |c| c.len());
        self.subscribers[Self::slot(characteristic)] = count;
    }

    pub(crate) fn clear_subscribers(&mut self) {
        self.subscribers = [0; 3];
    }

    pub(crate) fn is_open(&self, characteristic: Characteristic) -> bool {
        self.initialized && self.subscribers[Self::slot(characteristic)] > 0
    }
}

/// Serialize `report` and notify it if the gate is open.
///
/// A closed gate is not an error: the call is accepted and dropped.
pub(crate) async fn emit<T: Transport>(
    transport: &mut T,
    gate: &Gate,
    report: HidReport,
) -> Result<(), Error> {
    let characteristic = report.characteristic();
    if !gate.is_open(characteristic) {
        trace!("Dropping {} report: not ready", characteristic);
        return Ok(());
    }

    let mut buf = [0u8; MAX_REPORT_SIZE];
    let n = report.serialize(&mut buf);
    send(transport, characteristic, &buf[..n]).await
}

/// Notify raw bytes, logging transport failures before surfacing them.
pub(crate) async fn send<T: Transport>(
    transport: &mut T,
    characteristic: Characteristic,
    data: &[u8],
) -> Result<(), Error> {
    transport.notify(characteristic, data).await.map_err(|e| {
        warn!("Notify on {} failed: {}", characteristic, e);
        Error::from(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_starts_closed() {
        let gate = Gate::new();
        assert!(!gate.is_open(Characteristic::KeyboardInput));
        assert!(!gate.is_open(Characteristic::MouseInput));
    }

    #[test]
    fn gate_needs_initialization_and_subscriber() {
        let clients = [SubscribedClient::new([1, 2, 3, 4, 5, 6], "host")];
        let mut gate = Gate::new();

        gate.set_subscribers(Characteristic::KeyboardInput, Some(&clients));
        assert!(!gate.is_open(Characteristic::KeyboardInput));

        gate.set_initialized();
        assert!(gate.is_open(Characteristic::KeyboardInput));
        assert!(!gate.is_open(Characteristic::ConsumerInput));

        gate.set_subscribers(Characteristic::KeyboardInput, None);
        assert!(!gate.is_open(Characteristic::KeyboardInput));
    }

    #[test]
    fn gate_clears_all_subscribers() {
        let clients = [SubscribedClient::new([0; 6], "host")];
        let mut gate = Gate::new();
        gate.set_initialized();
        gate.set_subscribers(Characteristic::MouseInput, Some(&clients));
        gate.set_subscribers(Characteristic::ConsumerInput, Some(&clients));

        gate.clear_subscribers();
        assert!(!gate.is_open(Characteristic::MouseInput));
        assert!(!gate.is_open(Characteristic::ConsumerInput));
    }

    #[test]
    fn empty_client_list_closes_gate() {
        let mut gate = Gate::new();
        gate.set_initialized();
        gate.set_subscribers(Characteristic::MouseInput, Some(&[]));
        assert!(!gate.is_open(Characteristic::MouseInput));
    }
}
