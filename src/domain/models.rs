use std::fmt;

/// Number of proximity sensors on the device
pub const ZONE_COUNT: usize = 4;

/// Raw proximity reading per zone, ordered [North, East, South, West].
/// 0 = closest, 255 = farthest.
pub type ProximitySample = [u8; ZONE_COUNT];

/// Per-zone brightness derived from a [`ProximitySample`]
pub type BrightnessVector = [u8; ZONE_COUNT];

/// One of the four proximity sensor positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    North,
    East,
    South,
    West,
}

impl Zone {
    /// All zones in sensor order
    pub const ALL: [Zone; ZONE_COUNT] = [Zone::North, Zone::East, Zone::South, Zone::West];

    /// Zone for a sensor index (0..4)
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Sensor index of this zone
    pub fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }
}

/// Directional swipe reported by the gesture detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Up => "UP",
            Self::Down => "DOWN",
        };
        f.write_str(label)
    }
}

/// Output of the sensor interpreter for one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActiveZoneResult {
    pub brightness: BrightnessVector,
    pub max_brightness: u8,
    pub active_zone: Option<Zone>,
}

/// 24-bit color of a single LED
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct LedColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl LedColor {
    pub const BLACK: LedColor = LedColor::new(0, 0, 0);
    pub const WHITE: LedColor = LedColor::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Emitted for every valid proximity notification
    Sensor {
        raw: ProximitySample,
        brightness: BrightnessVector,
        max_brightness: u8,
    },
    /// Emitted only when a swipe is detected
    Gesture(Direction),
    ConnectionStatus(ConnectionStatus),
    LogMessage(StatusMessage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Disconnected,
    Connecting,
    Connected,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub message: String,
    pub severity: MessageSeverity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageSeverity {
    Info,
    Success,
    Warning,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_index_round_trip() {
        for zone in Zone::ALL {
            assert_eq!(Zone::from_index(zone.index()), Some(zone));
        }
        assert_eq!(Zone::from_index(4), None);
    }

    #[test]
    fn test_direction_labels() {
        assert_eq!(Direction::Left.to_string(), "LEFT");
        assert_eq!(Direction::Down.to_string(), "DOWN");
    }
}
