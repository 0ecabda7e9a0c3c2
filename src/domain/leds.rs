//! LED Buffer
//!
//! Desired colors of the 3x3 LED grid, in physical LED order.
//!
//! ```text
//!       7   0
//!     6   8   1
//!     5       2
//!       4   3
//! ```
//! Each edge zone owns a pair of ring LEDs; index 8 is the center.

use crate::domain::models::{LedColor, Zone};

pub const LED_COUNT: usize = 9;

pub const LED_CENTER: usize = 8;
pub const LEDS_NORTH: [usize; 2] = [7, 0];
pub const LEDS_EAST: [usize; 2] = [1, 2];
pub const LEDS_SOUTH: [usize; 2] = [3, 4];
pub const LEDS_WEST: [usize; 2] = [5, 6];

/// Ring LEDs belonging to a zone
pub fn zone_leds(zone: Zone) -> [usize; 2] {
    match zone {
        Zone::North => LEDS_NORTH,
        Zone::East => LEDS_EAST,
        Zone::South => LEDS_SOUTH,
        Zone::West => LEDS_WEST,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedBuffer {
    leds: [LedColor; LED_COUNT],
}

impl LedBuffer {
    /// All LEDs off
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a single LED. Out-of-range (or negative) indices are ignored.
    pub fn set_led<I: TryInto<usize>>(&mut self, index: I, color: LedColor) {
        if let Some(slot) = index.try_into().ok().and_then(|i| self.leds.get_mut(i)) {
            *slot = color;
        }
    }

    pub fn set_all_leds(&mut self, color: LedColor) {
        // LedColor is Copy: every slot gets its own value
        self.leds = [color; LED_COUNT];
    }

    pub fn clear_leds(&mut self) {
        self.set_all_leds(LedColor::BLACK);
    }

    /// Color at `index`, `None` when out of range
    pub fn get_led(&self, index: usize) -> Option<LedColor> {
        self.leds.get(index).copied()
    }

    /// Paint both ring LEDs of a zone
    pub fn fill_zone(&mut self, zone: Zone, color: LedColor) {
        for index in zone_leds(zone) {
            self.set_led(index, color);
        }
    }

    pub fn as_slice(&self) -> &[LedColor; LED_COUNT] {
        &self.leds
    }

    pub fn iter(&self) -> impl Iterator<Item = &LedColor> {
        self.leds.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: LedColor = LedColor::new(255, 0, 0);
    const BLUE: LedColor = LedColor::new(0, 0, 255);

    #[test]
    fn test_new_buffer_is_off() {
        let buffer = LedBuffer::new();
        assert!(buffer.iter().all(|c| *c == LedColor::BLACK));
        assert_eq!(buffer.as_slice().len(), LED_COUNT);
    }

    #[test]
    fn test_set_led_out_of_range_is_noop() {
        let mut buffer = LedBuffer::new();
        buffer.set_all_leds(RED);
        let before = buffer;

        buffer.set_led(9, BLUE);
        buffer.set_led(-1, BLUE);
        buffer.set_led(usize::MAX, BLUE);

        assert_eq!(buffer, before);
    }

    #[test]
    fn test_set_all_does_not_alias() {
        let mut buffer = LedBuffer::new();
        buffer.set_all_leds(RED);
        buffer.set_led(3, BLUE);

        assert_eq!(buffer.get_led(3), Some(BLUE));
        for i in (0..LED_COUNT).filter(|&i| i != 3) {
            assert_eq!(buffer.get_led(i), Some(RED));
        }
    }

    #[test]
    fn test_clear_and_get() {
        let mut buffer = LedBuffer::new();
        buffer.set_led(LED_CENTER, LedColor::WHITE);
        assert_eq!(buffer.get_led(LED_CENTER), Some(LedColor::WHITE));

        buffer.clear_leds();
        assert_eq!(buffer, LedBuffer::new());
        assert_eq!(buffer.get_led(LED_COUNT), None);
    }

    #[test]
    fn test_fill_zone() {
        let mut buffer = LedBuffer::new();
        buffer.fill_zone(Zone::North, RED);

        assert_eq!(buffer.get_led(7), Some(RED));
        assert_eq!(buffer.get_led(0), Some(RED));
        assert_eq!(buffer.iter().filter(|c| **c == RED).count(), 2);
    }
}
