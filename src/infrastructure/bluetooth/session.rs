//! Sensor Session
//!
//! Session context owned by the application. Connects through a
//! [`Transport`], runs each proximity notification through the sensor
//! interpreter and gesture detector, and pushes LED / brightness writes.

use crate::domain::gestures::{GestureDetector, DEFAULT_SWIPE_TIMEOUT};
use crate::domain::leds::LedBuffer;
use crate::domain::models::{
    ActiveZoneResult, AppEvent, ConnectionStatus, Direction, MessageSeverity, ProximitySample,
    StatusMessage,
};
use crate::domain::sensor::{SensorInterpreter, DEFAULT_ACTIVATION_THRESHOLD, DEFAULT_FAR_CUTOFF};
use crate::domain::settings::Settings;
use crate::infrastructure::bluetooth::protocol::{self, LedEncoder, ProtocolError};
use crate::infrastructure::bluetooth::transport::{Transport, TransportError, TransportEvent};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, trace, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error("session is not connected")]
    NotConnected,
    #[error("session is already connected")]
    AlreadyConnected,
}

/// Connection parameters for a session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub device_name_filter: String,
    pub io_service: Uuid,
    pub led_char: Uuid,
    pub brightness_char: Uuid,
    pub sensor_service: Uuid,
    pub sensor_char: Uuid,
    /// Wait after connecting before touching GATT services
    pub settle_delay: Duration,
    pub initial_brightness: u8,
    pub led_refresh_interval: Duration,
    pub activation_threshold: u8,
    pub far_cutoff: u8,
    pub swipe_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            device_name_filter: "Kano".to_string(),
            io_service: protocol::IO_SERVICE,
            led_char: protocol::LED_CHAR,
            brightness_char: protocol::BRIGHTNESS_CHAR,
            sensor_service: protocol::SENSOR_SERVICE,
            sensor_char: protocol::SENSOR_CHAR,
            settle_delay: Duration::from_millis(500),
            initial_brightness: 255,
            led_refresh_interval: Duration::from_millis(50),
            activation_threshold: DEFAULT_ACTIVATION_THRESHOLD,
            far_cutoff: DEFAULT_FAR_CUTOFF,
            swipe_timeout: DEFAULT_SWIPE_TIMEOUT,
        }
    }
}

impl SessionConfig {
    pub fn from_settings(settings: &Settings) -> Result<Self, ProtocolError> {
        Ok(Self {
            device_name_filter: settings.device_name_filter.clone(),
            io_service: protocol::parse_uuid(&settings.ble_io_service_uuid)?,
            led_char: protocol::parse_uuid(&settings.ble_led_char_uuid)?,
            brightness_char: protocol::parse_uuid(&settings.ble_brightness_char_uuid)?,
            sensor_service: protocol::parse_uuid(&settings.ble_sensor_service_uuid)?,
            sensor_char: protocol::parse_uuid(&settings.ble_sensor_char_uuid)?,
            settle_delay: settings.connect_settle_delay(),
            initial_brightness: settings.initial_brightness,
            led_refresh_interval: settings.led_refresh_interval(),
            activation_threshold: settings.activation_threshold,
            far_cutoff: settings.far_cutoff,
            swipe_timeout: settings.swipe_timeout(),
        })
    }
}

/// Result of processing one proximity notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleOutcome {
    pub raw: ProximitySample,
    pub zones: ActiveZoneResult,
    pub gesture: Option<Direction>,
}

pub struct KanoSession<T: Transport> {
    transport: T,
    config: SessionConfig,
    interpreter: SensorInterpreter,
    detector: GestureDetector,
    leds: LedBuffer,
    leds_dirty: bool,
    connected: bool,
    device_name: Option<String>,
    events: Option<mpsc::UnboundedReceiver<TransportEvent>>,
    event_sender: mpsc::UnboundedSender<AppEvent>,
}

impl<T: Transport> KanoSession<T> {
    pub fn new(
        transport: T,
        config: SessionConfig,
        event_sender: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            transport,
            interpreter: SensorInterpreter::new(config.activation_threshold, config.far_cutoff),
            detector: GestureDetector::new(config.swipe_timeout),
            config,
            leds: LedBuffer::new(),
            leds_dirty: false,
            connected: false,
            device_name: None,
            events: None,
            event_sender,
        }
    }

    /// Build a session from persisted settings. Malformed UUID overrides
    /// are rejected here, before any connection attempt.
    pub fn from_settings(
        transport: T,
        settings: &Settings,
        event_sender: mpsc::UnboundedSender<AppEvent>,
    ) -> Result<Self, SessionError> {
        let config = SessionConfig::from_settings(settings)?;
        Ok(Self::new(transport, config, event_sender))
    }

    /// Find, connect, discover and subscribe. Errors are returned to the
    /// caller and leave the session disconnected.
    pub async fn connect(&mut self) -> Result<(), SessionError> {
        if self.connected {
            return Err(SessionError::AlreadyConnected);
        }

        self.send_status(ConnectionStatus::Connecting);
        match self.establish().await {
            Ok(()) => {
                self.send_status(ConnectionStatus::Connected);
                self.send_log("Connected!", MessageSeverity::Success);
                Ok(())
            }
            Err(e) => {
                error!("Connection failed: {}", e);
                self.connected = false;
                self.events = None;
                if let Err(close_err) = self.transport.disconnect().await {
                    debug!("Cleanup after failed connect: {}", close_err);
                }
                self.send_log(&format!("Connection failed: {}", e), MessageSeverity::Error);
                self.send_status(ConnectionStatus::Error);
                Err(e)
            }
        }
    }

    async fn establish(&mut self) -> Result<(), SessionError> {
        info!(
            "Scanning for device matching {:?}...",
            self.config.device_name_filter
        );
        self.send_log("Scanning for sensor...", MessageSeverity::Info);

        // Step 1: Find and connect
        let name = self
            .transport
            .find_device(&self.config.device_name_filter)
            .await?;
        info!("Connecting to {}...", name);
        self.send_log(&format!("Connecting to {}...", name), MessageSeverity::Info);
        self.transport.connect().await?;

        // Step 2: Let the BLE stack stabilize
        tokio::time::sleep(self.config.settle_delay).await;
        if !self.transport.is_connected() {
            warn!("GATT server dropped the connection during settle delay");
            return Err(TransportError::NotConnected.into());
        }

        // Step 3: Resolve characteristics
        self.transport
            .discover(self.config.io_service, self.config.led_char)
            .await?;
        self.transport
            .discover(self.config.io_service, self.config.brightness_char)
            .await?;
        self.transport
            .discover(self.config.sensor_service, self.config.sensor_char)
            .await?;

        // Step 4: Sensor notifications
        let events = self.transport.subscribe(self.config.sensor_char).await?;
        self.events = Some(events);
        self.connected = true;
        self.device_name = Some(name);

        // Step 5: Hardware brightness
        let brightness = self.config.initial_brightness;
        self.set_brightness(brightness).await;

        info!("Session established");
        Ok(())
    }

    /// Close the link, then reset like a remote disconnect
    pub async fn disconnect(&mut self) {
        if let Err(e) = self.transport.disconnect().await {
            warn!("Transport disconnect failed: {}", e);
        }
        if self.connected {
            self.handle_disconnect();
        }
    }

    /// Session ended: gesture timers are dropped, LED contents are kept
    pub fn handle_disconnect(&mut self) {
        self.connected = false;
        self.events = None;
        self.detector.reset();

        info!("Disconnected from device");
        self.send_log("Disconnected from device", MessageSeverity::Info);
        self.send_status(ConnectionStatus::Disconnected);
    }

    /// Process one sensor notification. Malformed packets, and anything
    /// arriving while disconnected, are dropped.
    pub fn handle_notification(&mut self, bytes: &[u8], now: Instant) -> Option<SampleOutcome> {
        if !self.connected {
            trace!("Ignoring sensor packet while disconnected");
            return None;
        }

        let raw = match protocol::parse_sensor_packet(bytes) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Dropping sensor packet: {}", e);
                return None;
            }
        };

        let zones = self.interpreter.interpret(raw);
        let _ = self.event_sender.send(AppEvent::Sensor {
            raw,
            brightness: zones.brightness,
            max_brightness: zones.max_brightness,
        });

        let gesture = self.detector.on_zone(zones.active_zone, now);
        if let Some(direction) = gesture {
            info!("Swipe detected: {}", direction);
            let _ = self.event_sender.send(AppEvent::Gesture(direction));
        }

        Some(SampleOutcome {
            raw,
            zones,
            gesture,
        })
    }

    /// Write the global brightness. Failures are logged, never returned.
    pub async fn set_brightness(&mut self, level: u8) {
        if !self.connected {
            return;
        }
        let payload = protocol::brightness_payload(level);
        if let Err(e) = self
            .transport
            .write(self.config.brightness_char, &payload)
            .await
        {
            warn!("Brightness write failed: {}", e);
            self.send_log(
                &format!("Brightness write failed: {}", e),
                MessageSeverity::Warning,
            );
        }
    }

    /// Encode and write the LED buffer. A failed write is dropped silently;
    /// the next frame supersedes it.
    pub async fn send_leds(&mut self) {
        if !self.connected {
            return;
        }
        let frame = LedEncoder::encode(&self.leds);
        match self.transport.write(self.config.led_char, &frame).await {
            Ok(()) => self.leds_dirty = false,
            Err(e) => trace!("LED frame dropped: {}", e),
        }
    }

    /// Send the LED buffer only if it changed since the last successful send
    pub async fn update_leds(&mut self) {
        if self.leds_dirty {
            self.send_leds().await;
        }
    }

    /// Consume transport events until the link drops, refreshing LEDs on a
    /// fixed tick. `on_sample` runs after each processed notification and
    /// may repaint the LED buffer.
    pub async fn run<F>(&mut self, mut on_sample: F) -> Result<(), SessionError>
    where
        F: FnMut(&SampleOutcome, &mut LedBuffer),
    {
        let mut events = self.events.take().ok_or(SessionError::NotConnected)?;
        let mut refresh = tokio::time::interval(self.config.led_refresh_interval);
        refresh.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(TransportEvent::Notification(bytes)) => {
                        let now = tokio::time::Instant::now().into_std();
                        if let Some(outcome) = self.handle_notification(&bytes, now) {
                            let before = self.leds;
                            on_sample(&outcome, &mut self.leds);
                            if self.leds != before {
                                self.leds_dirty = true;
                            }
                        }
                    }
                    Some(TransportEvent::Disconnected) | None => {
                        self.disconnect().await;
                        return Ok(());
                    }
                },
                _ = refresh.tick() => self.update_leds().await,
            }
        }
    }

    pub fn leds(&self) -> &LedBuffer {
        &self.leds
    }

    /// Mutable LED access; marks the buffer for the next [`Self::update_leds`]
    pub fn leds_mut(&mut self) -> &mut LedBuffer {
        self.leds_dirty = true;
        &mut self.leds
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn device_name(&self) -> Option<&str> {
        self.device_name.as_deref()
    }

    pub fn detector(&self) -> &GestureDetector {
        &self.detector
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    fn send_status(&self, status: ConnectionStatus) {
        let _ = self.event_sender.send(AppEvent::ConnectionStatus(status));
    }

    fn send_log(&self, message: &str, severity: MessageSeverity) {
        let _ = self.event_sender.send(AppEvent::LogMessage(StatusMessage {
            message: message.to_string(),
            severity,
        }));
    }
}
