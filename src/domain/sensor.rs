//! Proximity Sensor Interpretation
//!
//! Converts raw proximity readings into per-zone brightness and picks the
//! active zone.

use crate::domain::models::{ActiveZoneResult, ProximitySample, Zone};
use tracing::trace;

/// Brightness a zone must strictly exceed to become active
pub const DEFAULT_ACTIVATION_THRESHOLD: u8 = 30;

/// Readings at or above this value are treated as "nothing there"
pub const DEFAULT_FAR_CUTOFF: u8 = 220;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorInterpreter {
    activation_threshold: u8,
    far_cutoff: u8,
}

impl Default for SensorInterpreter {
    fn default() -> Self {
        Self::new(DEFAULT_ACTIVATION_THRESHOLD, DEFAULT_FAR_CUTOFF)
    }
}

impl SensorInterpreter {
    pub fn new(activation_threshold: u8, far_cutoff: u8) -> Self {
        Self {
            activation_threshold,
            far_cutoff,
        }
    }

    /// Interpret one proximity sample.
    ///
    /// The running maximum only moves on a strictly greater brightness, so
    /// when two zones tie the lower index stays active.
    pub fn interpret(&self, sample: ProximitySample) -> ActiveZoneResult {
        let mut result = ActiveZoneResult::default();

        for (i, &raw) in sample.iter().enumerate() {
            let brightness = if raw < self.far_cutoff {
                255u8.saturating_sub(raw)
            } else {
                0
            };
            result.brightness[i] = brightness;

            if brightness > result.max_brightness {
                result.max_brightness = brightness;
                if brightness > self.activation_threshold {
                    result.active_zone = Zone::from_index(i);
                }
            }
        }

        trace!(
            "Sample {:?} -> brightness {:?}, active {:?}",
            sample,
            result.brightness,
            result.active_zone
        );
        result
    }
}
