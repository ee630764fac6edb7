//! Combined keyboard + mouse device.
//!
//! Owns one engine per HID service and brings both up together. Each
//! engine talks to its own transport so the two services can live on
//! separate GATT servers or share one through `&mut` adapters.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;
use embedded_hal_async::delay::DelayNs;
use heapless::String;

use crate::config::MAX_PEER_NAME_LEN;
use crate::engine::keyboard::KeyboardEngine;
use crate::engine::mouse::MouseEngine;
use crate::error::Error;
use crate::transport::{Characteristic, SubscribedClient, Transport};

pub struct Emulator<M: RawMutex, KT: Transport, MT: Transport, D: DelayNs> {
    keyboard: KeyboardEngine<M, KT>,
    mouse: MouseEngine<M, MT, D>,
    /// Name of the most recent central that subscribed to any report.
    peer_name: Mutex<M, Option<String<MAX_PEER_NAME_LEN>>>,
}

impl<M: RawMutex, KT: Transport, MT: Transport, D: DelayNs> Emulator<M, KT, MT, D> {
    pub fn new(keyboard_transport: KT, mouse_transport: MT, delay: D) -> Self {
        Self {
            keyboard: KeyboardEngine::new(keyboard_transport),
            mouse: MouseEngine::new(mouse_transport, delay),
            peer_name: Mutex::new(None),
        }
    }

    /// Initialize and enable both services.
    ///
    /// Fails without advertising anything if either layout is invalid.
    pub async fn initialize(&self) -> Result<(), Error> {
        self.keyboard.initialize().await?;
        self.mouse.initialize().await?;
        self.keyboard.enable().await?;
        self.mouse.enable().await?;
        info!("Emulator up");
        Ok(())
    }

    /// Disable both services and forget the peer.
    ///
    /// Both engines are disabled even if the first one fails.
    pub async fn shutdown(&self) -> Result<(), Error> {
        let keyboard = self.keyboard.disable().await;
        let mouse = self.mouse.disable().await;
        *self.peer_name.lock().await = None;
        info!("Emulator down");
        keyboard.and(mouse)
    }

    pub fn keyboard(&self) -> &KeyboardEngine<M, KT> {
        &self.keyboard
    }

    pub fn mouse(&self) -> &MouseEngine<M, MT, D> {
        &self.mouse
    }

    /// Route a subscription change to the engine owning `characteristic`.
    pub async fn on_subscribed_clients_changed(
        &self,
        characteristic: Characteristic,
        clients: Option<&[SubscribedClient]>,
    ) {
        if let Some(first) = clients.and_then(|c| c.first()) {
            info!("Connected to {}", first.name.as_str());
            *self.peer_name.lock().await = Some(first.name.clone());
        }

        match characteristic {
            Characteristic::KeyboardInput | Characteristic::ConsumerInput => {
                self.keyboard
                    .on_subscribed_clients_changed(characteristic, clients)
                    .await
            }
            Characteristic::MouseInput => {
                self.mouse
                    .on_subscribed_clients_changed(characteristic, clients)
                    .await
            }
        }
    }

    /// Name of the most recently subscribed central, if any.
    pub async fn peer_name(&self) -> Option<String<MAX_PEER_NAME_LEN>> {
        self.peer_name.lock().await.clone()
    }

    pub async fn press_key(&self, scan_code: u16) -> Result<(), Error> {
        self.keyboard.press_key(scan_code).await
    }

    pub async fn release_key(&self, scan_code: u16) -> Result<(), Error> {
        self.keyboard.release_key(scan_code).await
    }

    pub async fn mouse_press(&self) -> Result<(), Error> {
        self.mouse.press().await
    }

    pub async fn mouse_release(&self) -> Result<(), Error> {
        self.mouse.release().await
    }

    pub async fn mouse_move(&self, dx: i32, dy: i32, wheel: i32) -> Result<(), Error> {
        self.mouse.move_by(dx, dy, wheel).await
    }

    pub async fn mouse_click(&self) -> Result<(), Error> {
        self.mouse.click().await
    }
}
