//! In-memory transport
//!
//! Stands in for a real BLE stack: exposes the Kano GATT layout, records
//! every write, and lets the caller inject notifications and link loss.

use crate::infrastructure::bluetooth::protocol;
use crate::infrastructure::bluetooth::transport::{Transport, TransportError, TransportEvent};
use tokio::sync::mpsc;
use tracing::{debug, info};
use uuid::Uuid;

/// Service / characteristic pairs the simulated device exposes
const GATT_LAYOUT: &[(Uuid, Uuid)] = &[
    (protocol::IO_SERVICE, protocol::LED_CHAR),
    (protocol::IO_SERVICE, protocol::BRIGHTNESS_CHAR),
    (protocol::SENSOR_SERVICE, protocol::SENSOR_CHAR),
];

pub struct SimulatedTransport {
    device_name: Option<String>,
    connected: bool,
    subscribed: bool,
    fail_writes: bool,
    drop_after_connect: bool,
    missing: Vec<Uuid>,
    writes: Vec<(Uuid, Vec<u8>)>,
    event_tx: mpsc::UnboundedSender<TransportEvent>,
    event_rx: Option<mpsc::UnboundedReceiver<TransportEvent>>,
}

impl SimulatedTransport {
    /// A device advertising under `device_name`
    pub fn new(device_name: impl Into<String>) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            device_name: Some(device_name.into()),
            connected: false,
            subscribed: false,
            fail_writes: false,
            drop_after_connect: false,
            missing: Vec::new(),
            writes: Vec::new(),
            event_tx,
            event_rx: Some(event_rx),
        }
    }

    /// Nothing in range
    pub fn without_device() -> Self {
        let mut transport = Self::new(String::new());
        transport.device_name = None;
        transport
    }

    /// Make every write fail
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Drop the link during the settle delay after connecting
    pub fn set_drop_after_connect(&mut self, drop: bool) {
        self.drop_after_connect = drop;
    }

    /// Hide a characteristic from discovery
    pub fn hide_characteristic(&mut self, characteristic: Uuid) {
        self.missing.push(characteristic);
    }

    /// Handle used to inject notifications or a disconnect
    pub fn notifier(&self) -> mpsc::UnboundedSender<TransportEvent> {
        self.event_tx.clone()
    }

    /// Every successful write, in order
    pub fn writes(&self) -> &[(Uuid, Vec<u8>)] {
        &self.writes
    }

    pub fn writes_to(&self, characteristic: Uuid) -> impl Iterator<Item = &[u8]> {
        self.writes
            .iter()
            .filter(move |(uuid, _)| *uuid == characteristic)
            .map(|(_, data)| data.as_slice())
    }

    fn reset_channel(&mut self) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        self.event_tx = event_tx;
        self.event_rx = Some(event_rx);
    }
}

impl Transport for SimulatedTransport {
    async fn find_device(&mut self, name_filter: &str) -> Result<String, TransportError> {
        match &self.device_name {
            Some(name) if name.contains(name_filter) => {
                debug!("Simulated device found: {}", name);
                Ok(name.clone())
            }
            _ => Err(TransportError::DeviceNotFound(name_filter.to_string())),
        }
    }

    async fn connect(&mut self) -> Result<(), TransportError> {
        if self.device_name.is_none() {
            return Err(TransportError::Backend("no device selected".to_string()));
        }
        // A dropped link shows up as "not connected" once the caller checks
        self.connected = !self.drop_after_connect;
        info!("Simulated GATT connection opened");
        Ok(())
    }

    async fn discover(
        &mut self,
        service: Uuid,
        characteristic: Uuid,
    ) -> Result<(), TransportError> {
        if !self.connected {
            return Err(TransportError::NotConnected);
        }
        if !GATT_LAYOUT.iter().any(|(s, _)| *s == service) {
            return Err(TransportError::ServiceNotFound(service));
        }
        let exposed = GATT_LAYOUT.contains(&(service, characteristic));
        if !exposed || self.missing.contains(&characteristic) {
            return Err(TransportError::CharacteristicNotFound(characteristic));
        }
        Ok(())
    }

    async fn subscribe(
        &mut self,
        characteristic: Uuid,
    ) -> Result<mpsc::UnboundedReceiver<TransportEvent>, TransportError> {
        if !self.connected {
            return Err(TransportError::NotConnected);
        }
        if characteristic != protocol::SENSOR_CHAR {
            return Err(TransportError::CharacteristicNotFound(characteristic));
        }
        let receiver = self
            .event_rx
            .take()
            .ok_or_else(|| TransportError::Backend("already subscribed".to_string()))?;
        self.subscribed = true;
        Ok(receiver)
    }

    async fn write(&mut self, characteristic: Uuid, data: &[u8]) -> Result<(), TransportError> {
        if !self.connected {
            return Err(TransportError::NotConnected);
        }
        if self.fail_writes {
            return Err(TransportError::WriteFailed {
                characteristic,
                reason: "simulated failure".to_string(),
            });
        }
        self.writes.push((characteristic, data.to_vec()));
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<(), TransportError> {
        if self.connected {
            info!("Simulated GATT connection closed");
        }
        self.connected = false;
        if self.subscribed {
            self.subscribed = false;
            self.reset_channel();
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}
