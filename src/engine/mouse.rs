//! Mouse report engine.
//!
//! Button state persists across movement; every call emits one 4-byte
//! report carrying the current buttons and a saturated displacement.
//! Reports are paced with a [`DelayNs`] so the host sees discrete
//! samples.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;
use embedded_hal_async::delay::DelayNs;

use super::{emit, Gate};
use crate::config::{MOUSE_CLICK_DWELL_MS, MOUSE_REPORT_INTERVAL_MS};
use crate::error::Error;
use crate::hid::descriptor::{validate_service, MOUSE_SERVICE};
use crate::hid::mouse::{MouseButton, MouseReport};
use crate::hid::HidReport;
use crate::transport::{Characteristic, SubscribedClient, Transport};

struct MouseState<T, D> {
    transport: T,
    delay: D,
    gate: Gate,
    buttons: u8,
    last_report: MouseReport,
}

impl<T: Transport, D: DelayNs> MouseState<T, D> {
    fn ready(&self) -> bool {
        self.gate.is_open(Characteristic::MouseInput)
    }

    async fn send(&mut self, dx: i32, dy: i32, wheel: i32) -> Result<(), Error> {
        let report = MouseReport::new(self.buttons, dx, dy, wheel);
        emit(&mut self.transport, &self.gate, HidReport::Mouse(report)).await?;
        self.last_report = report;
        Ok(())
    }

    /// Replace the button mask and emit a zero-displacement report.
    async fn set_buttons(&mut self, buttons: u8) -> Result<(), Error> {
        if !self.ready() {
            return Ok(());
        }
        self.buttons = buttons;
        self.send(0, 0, 0).await
    }
}

/// Two-button wheel mouse emulator over one [`Transport`].
pub struct MouseEngine<M: RawMutex, T: Transport, D: DelayNs> {
    state: Mutex<M, MouseState<T, D>>,
}

impl<M: RawMutex, T: Transport, D: DelayNs> MouseEngine<M, T, D> {
    /// Create an engine with all buttons up. `delay` paces moves and
    /// clicks.
    pub fn new(transport: T, delay: D) -> Self {
        Self {
            state: Mutex::new(MouseState {
                transport,
                delay,
                gate: Gate::new(),
                buttons: 0,
                last_report: MouseReport::empty(),
            }),
        }
    }

    /// Validate the mouse service layout and open the gate for
    /// subscribed clients.
    pub async fn initialize(&self) -> Result<(), Error> {
        validate_service(&MOUSE_SERVICE)?;
        let mut state = self.state.lock().await;
        state.gate.set_initialized();
        info!("Mouse service ready");
        Ok(())
    }

    /// Start advertising the mouse service.
    pub async fn enable(&self) -> Result<(), Error> {
        let mut state = self.state.lock().await;
        state.transport.start_advertising().await?;
        debug!("Mouse advertising");
        Ok(())
    }

    /// Stop advertising, forget all subscribers and release the buttons.
    pub async fn disable(&self) -> Result<(), Error> {
        let mut state = self.state.lock().await;
        state.gate.clear_subscribers();
        state.buttons = 0;
        state.last_report = MouseReport::empty();
        state.transport.stop_advertising().await?;
        debug!("Mouse disabled");
        Ok(())
    }

    /// `true` once initialized with a mouse-report subscriber.
    pub async fn is_ready(&self) -> bool {
        self.state.lock().await.ready()
    }

    /// Hold the primary button (and only the primary button).
    pub async fn press(&self) -> Result<(), Error> {
        let mut state = self.state.lock().await;
        state.set_buttons(MouseButton::Left.mask()).await
    }

    /// Release every button.
    pub async fn release(&self) -> Result<(), Error> {
        let mut state = self.state.lock().await;
        state.set_buttons(0).await
    }

    /// Hold `button` in addition to any already held.
    pub async fn press_button(&self, button: MouseButton) -> Result<(), Error> {
        let mut state = self.state.lock().await;
        let buttons = state.buttons | button.mask();
        state.set_buttons(buttons).await
    }

    /// Release `button`, leaving the others held.
    pub async fn release_button(&self, button: MouseButton) -> Result<(), Error> {
        let mut state = self.state.lock().await;
        let buttons = state.buttons & !button.mask();
        state.set_buttons(buttons).await
    }

    /// Emit one movement sample, then wait out the report interval.
    ///
    /// Deltas outside `-127..=127` saturate.
    pub async fn move_by(&self, dx: i32, dy: i32, wheel: i32) -> Result<(), Error> {
        let mut state = self.state.lock().await;
        let result = if state.ready() {
            state.send(dx, dy, wheel).await
        } else {
            Ok(())
        };
        state.delay.delay_ms(MOUSE_REPORT_INTERVAL_MS).await;
        result
    }

    /// Press and release the primary button with a fixed dwell between.
    ///
    /// The release is always applied, even if the press failed to send.
    pub async fn click(&self) -> Result<(), Error> {
        let mut state = self.state.lock().await;
        let pressed = state.set_buttons(MouseButton::Left.mask()).await;
        state.delay.delay_ms(MOUSE_CLICK_DWELL_MS).await;
        let released = state.set_buttons(0).await;
        pressed.and(released)
    }

    /// Subscription change on the mouse report characteristic.
    pub async fn on_subscribed_clients_changed(
        &self,
        characteristic: Characteristic,
        clients: Option<&[SubscribedClient]>,
    ) {
        if characteristic != Characteristic::MouseInput {
            warn!("Mouse service has no {} report", characteristic);
            return;
        }

        let mut state = self.state.lock().await;
        state.gate.set_subscribers(characteristic, clients);
        info!("Mouse subscribers: {}", clients.map_or(0, |c| c.len()));
    }

    /// HID Control Point write. Acknowledged only.
    pub async fn on_control_point_write(&self, data: &[u8]) {
        debug!("Mouse control point: {=[u8]:x}", data);
    }

    /// Current button mask.
    pub async fn buttons(&self) -> u8 {
        self.state.lock().await.buttons
    }

    /// Last mouse report successfully notified.
    pub async fn last_report(&self) -> MouseReport {
        self.state.lock().await.last_report
    }
}

#[cfg(feature = "embassy-time")]
impl<M: RawMutex, T: Transport> MouseEngine<M, T, embassy_time::Delay> {
    /// Engine paced by the embassy time driver.
    pub fn with_embassy_delay(transport: T) -> Self {
        Self::new(transport, embassy_time::Delay)
    }
}
