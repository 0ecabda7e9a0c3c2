//! BLE Transport Boundary
//!
//! Everything the session needs from a platform Bluetooth stack. Scanning,
//! GATT discovery and raw reads/writes live behind this trait.

use thiserror::Error;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Inbound traffic from a connected device
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// Value notification from the subscribed characteristic
    Notification(Vec<u8>),
    /// The link dropped
    Disconnected,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("no device matching {0:?} found. Is it turned on?")]
    DeviceNotFound(String),
    #[error("GATT service {0} not found")]
    ServiceNotFound(Uuid),
    #[error("GATT characteristic {0} not found")]
    CharacteristicNotFound(Uuid),
    #[error("device is not connected")]
    NotConnected,
    #[error("write to {characteristic} failed: {reason}")]
    WriteFailed { characteristic: Uuid, reason: String },
    #[error("bluetooth backend error: {0}")]
    Backend(String),
}

#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Look for a device whose name contains `name_filter`, returning its name
    async fn find_device(&mut self, name_filter: &str) -> Result<String, TransportError>;

    /// Open the GATT connection to the device found last
    async fn connect(&mut self) -> Result<(), TransportError>;

    /// Resolve a characteristic inside a primary service
    async fn discover(
        &mut self,
        service: Uuid,
        characteristic: Uuid,
    ) -> Result<(), TransportError>;

    /// Enable notifications; events arrive one at a time on the returned channel
    async fn subscribe(
        &mut self,
        characteristic: Uuid,
    ) -> Result<mpsc::UnboundedReceiver<TransportEvent>, TransportError>;

    async fn write(&mut self, characteristic: Uuid, data: &[u8]) -> Result<(), TransportError>;

    async fn disconnect(&mut self) -> Result<(), TransportError>;

    fn is_connected(&self) -> bool;
}
