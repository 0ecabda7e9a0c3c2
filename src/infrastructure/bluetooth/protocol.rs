//! Kano Sensor Protocol
//!
//! GATT identifiers and wire formats of the proximity sensor peripheral.

use crate::domain::leds::{LedBuffer, LED_COUNT};
use crate::domain::models::{LedColor, ProximitySample, ZONE_COUNT};
use thiserror::Error;
use tracing::trace;
use uuid::Uuid;

/// IO service: LEDs, brightness, keep-alive, battery
pub const IO_SERVICE_UUID: &str = "11a70300-f691-4b93-a6f4-0968f5b648f8";

/// LED frame characteristic (write)
pub const LED_CHAR_UUID: &str = "11a70301-f691-4b93-a6f4-0968f5b648f8";

/// Keep-alive characteristic (not used by the core)
pub const KEEP_ALIVE_CHAR_UUID: &str = "11a70302-f691-4b93-a6f4-0968f5b648f8";

/// Battery characteristic (not used by the core)
pub const BATTERY_CHAR_UUID: &str = "11a70303-f691-4b93-a6f4-0968f5b648f8";

/// Global brightness characteristic (write, single byte)
pub const BRIGHTNESS_CHAR_UUID: &str = "11a70304-f691-4b93-a6f4-0968f5b648f8";

/// Sensor service
pub const SENSOR_SERVICE_UUID: &str = "11a70200-f691-4b93-a6f4-0968f5b648f8";

/// Proximity data characteristic (notify)
pub const SENSOR_CHAR_UUID: &str = "11a70201-f691-4b93-a6f4-0968f5b648f8";

/// Parsed forms of the identifiers above
pub const IO_SERVICE: Uuid = Uuid::from_u128(0x11a70300_f691_4b93_a6f4_0968f5b648f8);
pub const LED_CHAR: Uuid = Uuid::from_u128(0x11a70301_f691_4b93_a6f4_0968f5b648f8);
pub const BRIGHTNESS_CHAR: Uuid = Uuid::from_u128(0x11a70304_f691_4b93_a6f4_0968f5b648f8);
pub const SENSOR_SERVICE: Uuid = Uuid::from_u128(0x11a70200_f691_4b93_a6f4_0968f5b648f8);
pub const SENSOR_CHAR: Uuid = Uuid::from_u128(0x11a70201_f691_4b93_a6f4_0968f5b648f8);

/// Command byte: set all LEDs
pub const CMD_SET_ALL_LEDS: u8 = 0x01;

/// Command byte followed by one RGB565 word per LED
pub const LED_FRAME_LEN: usize = 1 + LED_COUNT * 2;

/// Encoded LED frame as written to [`LED_CHAR_UUID`]
pub type LedFrame = [u8; LED_FRAME_LEN];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("invalid packet size: {actual} (expected {expected})")]
    InvalidPacketSize { expected: usize, actual: usize },
    #[error("invalid UUID {0:?}")]
    InvalidUuid(String),
}

/// Parse a sensor notification
///
/// # Data Packet Structure (4 bytes)
///
/// ```text
/// [0] : North proximity (0 = close, 255 = far)
/// [1] : East
/// [2] : South
/// [3] : West
/// ```
pub fn parse_sensor_packet(bytes: &[u8]) -> Result<ProximitySample, ProtocolError> {
    let sample: ProximitySample = bytes.try_into().map_err(|_| ProtocolError::InvalidPacketSize {
        expected: ZONE_COUNT,
        actual: bytes.len(),
    })?;

    trace!("Raw packet: {:02X?}", sample);
    Ok(sample)
}

/// Brightness write payload
pub fn brightness_payload(level: u8) -> [u8; 1] {
    [level]
}

pub fn parse_uuid(uuid_str: &str) -> Result<Uuid, ProtocolError> {
    Uuid::parse_str(uuid_str).map_err(|_| ProtocolError::InvalidUuid(uuid_str.to_string()))
}

/// Packs [`LedBuffer`] contents into the frame the firmware expects
pub struct LedEncoder;

impl LedEncoder {
    /// 5 bits red, 6 bits green, 5 bits blue
    pub fn rgb565(color: LedColor) -> u16 {
        let r5 = u16::from(color.r >> 3) & 0x1F;
        let g6 = u16::from(color.g >> 2) & 0x3F;
        let b5 = u16::from(color.b >> 3) & 0x1F;
        (r5 << 11) | (g6 << 5) | b5
    }

    /// Frame layout:
    ///
    /// ```text
    /// [0]      : 0x01 (set all LEDs)
    /// [1..19]  : 9 x RGB565, big-endian, in buffer order
    /// ```
    pub fn encode(buffer: &LedBuffer) -> LedFrame {
        let mut frame = [0u8; LED_FRAME_LEN];
        frame[0] = CMD_SET_ALL_LEDS;

        for (chunk, color) in frame[1..].chunks_exact_mut(2).zip(buffer.iter()) {
            chunk.copy_from_slice(&Self::rgb565(*color).to_be_bytes());
        }

        frame
    }
}
