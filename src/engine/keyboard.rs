//! Keyboard report engine.
//!
//! Tracks held modifiers and up to six ordinary keys, rebuilding and
//! notifying the 8-byte boot-layout report on every transition. Keys
//! with a function-key binding bypass that state entirely and drive the
//! consumer control report instead.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;
use heapless::Vec;

use super::bindings::FunctionKeyBindings;
use super::{emit, send, Gate};
use crate::config::MAX_PRESSED_KEYS;
use crate::error::Error;
use crate::hid::consumer::ConsumerReport;
use crate::hid::descriptor::{validate_service, KEYBOARD_SERVICE};
use crate::hid::keyboard::{KeyboardReport, KEYBOARD_REPORT_SIZE};
use crate::hid::HidReport;
use crate::scancode::{self, USAGE_UNSUPPORTED};
use crate::transport::{Characteristic, SubscribedClient, Transport};

struct KeyboardState<T> {
    transport: T,
    gate: Gate,
    /// Bit i set while usage 0xE0 + i is held.
    modifiers: u8,
    /// Held non-modifier usages, oldest first.
    keys: Vec<u8, MAX_PRESSED_KEYS>,
    bindings: FunctionKeyBindings,
    last_report: KeyboardReport,
    consumer: ConsumerReport,
}

impl<T: Transport> KeyboardState<T> {
    async fn send_keyboard(&mut self) -> Result<(), Error> {
        let report = KeyboardReport::new(self.modifiers, &self.keys);
        emit(&mut self.transport, &self.gate, HidReport::Keyboard(report)).await?;
        self.last_report = report;
        Ok(())
    }

    async fn send_consumer(&mut self, report: ConsumerReport) -> Result<(), Error> {
        self.consumer = report;
        emit(&mut self.transport, &self.gate, HidReport::Consumer(report)).await
    }

    /// Send an idle consumer report if the active usage matches.
    async fn release_consumer_if(&mut self, matches: impl Fn(u16) -> bool) -> Result<(), Error> {
        if self.consumer.is_empty() || !matches(self.consumer.usage) {
            return Ok(());
        }
        debug!("Releasing consumer {:#x} after unbind", self.consumer.usage);
        self.send_consumer(ConsumerReport::empty()).await
    }

    fn reset(&mut self) {
        self.modifiers = 0;
        self.keys.clear();
        self.last_report = KeyboardReport::empty();
        self.consumer = ConsumerReport::empty();
    }
}

/// Keyboard plus consumer-control emulator over one [`Transport`].
pub struct KeyboardEngine<M: RawMutex, T: Transport> {
    state: Mutex<M, KeyboardState<T>>,
}

impl<M: RawMutex, T: Transport> KeyboardEngine<M, T> {
    /// Create an engine with no keys held, no subscribers and the
    /// default F1..F10 bindings. Nothing is emitted until
    /// [`initialize`](Self::initialize) succeeds.
    pub fn new(transport: T) -> Self {
        Self {
            state: Mutex::new(KeyboardState {
                transport,
                gate: Gate::new(),
                modifiers: 0,
                keys: Vec::new(),
                bindings: FunctionKeyBindings::with_defaults(),
                last_report: KeyboardReport::empty(),
                consumer: ConsumerReport::empty(),
            }),
        }
    }

    /// Validate the keyboard service layout and open the gate for
    /// subscribed clients.
    pub async fn initialize(&self) -> Result<(), Error> {
        validate_service(&KEYBOARD_SERVICE)?;
        let mut state = self.state.lock().await;
        state.gate.set_initialized();
        info!("Keyboard service ready");
        Ok(())
    }

    /// Start advertising the keyboard service.
    pub async fn enable(&self) -> Result<(), Error> {
        let mut state = self.state.lock().await;
        state.transport.start_advertising().await?;
        debug!("Keyboard advertising");
        Ok(())
    }

    /// Stop advertising, forget all subscribers and release every key.
    pub async fn disable(&self) -> Result<(), Error> {
        let mut state = self.state.lock().await;
        state.gate.clear_subscribers();
        state.reset();
        state.transport.stop_advertising().await?;
        debug!("Keyboard disabled");
        Ok(())
    }

    /// `true` once initialized with a keyboard-report subscriber.
    pub async fn is_ready(&self) -> bool {
        let state = self.state.lock().await;
        state.gate.is_open(Characteristic::KeyboardInput)
    }

    /// Handle a key going down.
    pub async fn press_key(&self, scan_code: u16) -> Result<(), Error> {
        let usage = scancode::usage_of(scan_code);
        if usage == USAGE_UNSUPPORTED {
            return Ok(());
        }
        let mut state = self.state.lock().await;

        if let Some(consumer) = state.bindings.get(usage) {
            if !state.gate.is_open(Characteristic::ConsumerInput) {
                return Ok(());
            }
            trace!("Function key {:#x} -> consumer {:#x}", usage, consumer);
            return state.send_consumer(ConsumerReport::from_usage(consumer)).await;
        }

        if !state.gate.is_open(Characteristic::KeyboardInput) {
            return Ok(());
        }

        if scancode::is_modifier_key(usage) {
            state.modifiers |= scancode::modifier_bit(usage);
        } else if !state.keys.contains(&usage) && state.keys.push(usage).is_err() {
            warn!("Key rollover, dropping {:#x}", usage);
            return Ok(());
        }

        state.send_keyboard().await
    }

    /// Handle a key going up. Releasing a key that is not held re-sends
    /// the current report.
    pub async fn release_key(&self, scan_code: u16) -> Result<(), Error> {
        let usage = scancode::usage_of(scan_code);
        if usage == USAGE_UNSUPPORTED {
            return Ok(());
        }
        let mut state = self.state.lock().await;

        if state.bindings.get(usage).is_some() {
            if !state.gate.is_open(Characteristic::ConsumerInput) {
                return Ok(());
            }
            return state.send_consumer(ConsumerReport::empty()).await;
        }

        if !state.gate.is_open(Characteristic::KeyboardInput) {
            return Ok(());
        }

        if scancode::is_modifier_key(usage) {
            state.modifiers &= !scancode::modifier_bit(usage);
        } else {
            state.keys.retain(|&k| k != usage);
        }

        state.send_keyboard().await
    }

    /// Notify a caller-built keyboard report as-is, bypassing key state.
    ///
    /// Anything other than exactly 8 bytes is logged and dropped.
    pub async fn direct_send_report(&self, report: &[u8]) -> Result<(), Error> {
        if report.len() != KEYBOARD_REPORT_SIZE {
            warn!("Direct report must be 8 bytes, got {}", report.len());
            return Ok(());
        }

        let mut state = self.state.lock().await;
        if !state.gate.is_open(Characteristic::KeyboardInput) {
            return Ok(());
        }
        send(&mut state.transport, Characteristic::KeyboardInput, report).await
    }

    /// Redirect `usage` to consumer usage `consumer`.
    pub async fn bind_function_key(&self, usage: u8, consumer: u16) -> Result<(), Error> {
        let mut state = self.state.lock().await;
        state.bindings.bind(usage, consumer)?;
        debug!("Bound {:#x} -> {:#x}", usage, consumer);
        Ok(())
    }

    /// Return `usage` to the keyboard report.
    ///
    /// If the removed usage is the one currently held on the consumer
    /// channel, an idle consumer report is sent so the host does not see
    /// it stuck.
    pub async fn unbind_function_key(&self, usage: u8) -> Result<Option<u16>, Error> {
        let mut state = self.state.lock().await;
        let removed = state.bindings.unbind(usage);
        if let Some(consumer) = removed {
            state.release_consumer_if(|active| active == consumer).await?;
        }
        Ok(removed)
    }

    /// Drop every binding, releasing any consumer usage still held.
    pub async fn clear_function_key_bindings(&self) -> Result<(), Error> {
        let mut state = self.state.lock().await;
        state.bindings.clear();
        state.release_consumer_if(|_| true).await
    }

    pub async fn function_key_binding(&self, usage: u8) -> Option<u16> {
        let state = self.state.lock().await;
        state.bindings.get(usage)
    }

    /// Subscription change on one of our report characteristics.
    /// `None` or an empty list means nobody is listening.
    pub async fn on_subscribed_clients_changed(
        &self,
        characteristic: Characteristic,
        clients: Option<&[SubscribedClient]>,
    ) {
        if characteristic == Characteristic::MouseInput {
            warn!("Keyboard service has no mouse report");
            return;
        }

        let mut state = self.state.lock().await;
        state.gate.set_subscribers(characteristic, clients);
        info!(
            "{} subscribers: {}",
            characteristic,
            clients.map_or(0, |c| c.len())
        );
    }

    /// HID Control Point write (suspend / exit suspend). Acknowledged
    /// only; the engine has no low-power mode.
    pub async fn on_control_point_write(&self, data: &[u8]) {
        debug!("Keyboard control point: {=[u8]:x}", data);
    }

    /// Last keyboard report successfully notified.
    pub async fn last_keyboard_report(&self) -> KeyboardReport {
        self.state.lock().await.last_report
    }

    /// Current consumer control state.
    pub async fn consumer_report(&self) -> ConsumerReport {
        self.state.lock().await.consumer
    }

    pub async fn modifiers(&self) -> u8 {
        self.state.lock().await.modifiers
    }

    /// Held ordinary keys, oldest first.
    pub async fn pressed_keys(&self) -> Vec<u8, MAX_PRESSED_KEYS> {
        self.state.lock().await.keys.clone()
    }
}
