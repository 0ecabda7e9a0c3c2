//! Swipe Gesture Detection
//!
//! Each axis is armed by one endpoint zone and fires when the opposite
//! endpoint shows up inside the swipe window.

use crate::domain::models::{Direction, Zone};
use std::time::{Duration, Instant};
use tracing::debug;

/// Default maximum gap between the two halves of a swipe
pub const DEFAULT_SWIPE_TIMEOUT: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureAxis {
    /// East / West
    Horizontal,
    /// North / South
    Vertical,
}

impl GestureAxis {
    pub fn of(zone: Zone) -> Self {
        match zone {
            Zone::East | Zone::West => Self::Horizontal,
            Zone::North | Zone::South => Self::Vertical,
        }
    }
}

impl Zone {
    /// Direction of a swipe that ends in this zone
    pub fn swipe_direction(self) -> Direction {
        match self {
            Zone::West => Direction::Left,
            Zone::East => Direction::Right,
            Zone::North => Direction::Up,
            Zone::South => Direction::Down,
        }
    }
}

/// Timing state of one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisState {
    pub last_zone: Option<Zone>,
    pub last_timestamp: Option<Instant>,
}

impl AxisState {
    /// Feed a zone belonging to this axis. Returns the zone the swipe ended
    /// in when the opposite endpoint arrives within `timeout`.
    fn observe(&mut self, zone: Zone, now: Instant, timeout: Duration) -> Option<Zone> {
        if let (Some(last_zone), Some(last_timestamp)) = (self.last_zone, self.last_timestamp) {
            if last_zone != zone && now.saturating_duration_since(last_timestamp) < timeout {
                // Disarm, but keep the timestamp of the arming sample
                self.last_zone = None;
                return Some(zone);
            }
        }

        self.last_zone = Some(zone);
        self.last_timestamp = Some(now);
        None
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone)]
pub struct GestureDetector {
    horizontal: AxisState,
    vertical: AxisState,
    swipe_timeout: Duration,
}

impl Default for GestureDetector {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_TIMEOUT)
    }
}

impl GestureDetector {
    pub fn new(swipe_timeout: Duration) -> Self {
        Self {
            horizontal: AxisState::default(),
            vertical: AxisState::default(),
            swipe_timeout,
        }
    }

    /// Process the active zone of one sample
    pub fn on_zone(&mut self, zone: Option<Zone>, now: Instant) -> Option<Direction> {
        let zone = zone?;
        let axis = GestureAxis::of(zone);
        let timeout = self.swipe_timeout;

        let direction = self
            .axis_mut(axis)
            .observe(zone, now, timeout)
            .map(Zone::swipe_direction);

        if let Some(direction) = direction {
            debug!("Swipe detected on {:?} axis: {}", axis, direction);
        }
        direction
    }

    /// Forget both axes, used when a session ends
    pub fn reset(&mut self) {
        self.horizontal.reset();
        self.vertical.reset();
    }

    pub fn axis(&self, axis: GestureAxis) -> &AxisState {
        match axis {
            GestureAxis::Horizontal => &self.horizontal,
            GestureAxis::Vertical => &self.vertical,
        }
    }

    fn axis_mut(&mut self, axis: GestureAxis) -> &mut AxisState {
        match axis {
            GestureAxis::Horizontal => &mut self.horizontal,
            GestureAxis::Vertical => &mut self.vertical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(base: Instant, millis: u64) -> Instant {
        base + Duration::from_millis(millis)
    }

    #[test]
    fn test_swipe_right() {
        let t0 = Instant::now();
        let mut detector = GestureDetector::default();

        assert_eq!(detector.on_zone(Some(Zone::West), t0), None);
        assert_eq!(
            detector.axis(GestureAxis::Horizontal).last_zone,
            Some(Zone::West)
        );

        assert_eq!(
            detector.on_zone(Some(Zone::East), ms(t0, 500)),
            Some(Direction::Right)
        );
        let state = detector.axis(GestureAxis::Horizontal);
        assert_eq!(state.last_zone, None);
        assert_eq!(state.last_timestamp, Some(t0));
    }

    #[test]
    fn test_swipe_left_up_down() {
        let t0 = Instant::now();
        let mut detector = GestureDetector::default();

        detector.on_zone(Some(Zone::East), t0);
        assert_eq!(
            detector.on_zone(Some(Zone::West), ms(t0, 100)),
            Some(Direction::Left)
        );

        detector.on_zone(Some(Zone::South), ms(t0, 200));
        assert_eq!(
            detector.on_zone(Some(Zone::North), ms(t0, 300)),
            Some(Direction::Up)
        );

        detector.on_zone(Some(Zone::North), ms(t0, 400));
        assert_eq!(
            detector.on_zone(Some(Zone::South), ms(t0, 500)),
            Some(Direction::Down)
        );
    }

    #[test]
    fn test_timeout_rearms() {
        let t0 = Instant::now();
        let mut detector = GestureDetector::default();

        detector.on_zone(Some(Zone::West), t0);
        assert_eq!(detector.on_zone(Some(Zone::East), ms(t0, 1500)), None);

        let state = detector.axis(GestureAxis::Horizontal);
        assert_eq!(state.last_zone, Some(Zone::East));
        assert_eq!(state.last_timestamp, Some(ms(t0, 1500)));
    }

    #[test]
    fn test_window_is_exclusive() {
        let t0 = Instant::now();
        let mut detector = GestureDetector::default();

        detector.on_zone(Some(Zone::West), t0);
        assert_eq!(detector.on_zone(Some(Zone::East), ms(t0, 1000)), None);
    }

    #[test]
    fn test_repeated_zone_refreshes_timestamp() {
        let t0 = Instant::now();
        let mut detector = GestureDetector::default();

        detector.on_zone(Some(Zone::West), t0);
        detector.on_zone(Some(Zone::West), ms(t0, 900));
        assert_eq!(
            detector.axis(GestureAxis::Horizontal).last_timestamp,
            Some(ms(t0, 900))
        );
        assert_eq!(
            detector.on_zone(Some(Zone::East), ms(t0, 1800)),
            Some(Direction::Right)
        );
    }

    #[test]
    fn test_none_zone_is_ignored() {
        let t0 = Instant::now();
        let mut detector = GestureDetector::default();

        detector.on_zone(Some(Zone::West), t0);
        assert_eq!(detector.on_zone(None, ms(t0, 100)), None);
        assert_eq!(
            detector.axis(GestureAxis::Horizontal).last_zone,
            Some(Zone::West)
        );
        assert_eq!(
            detector.on_zone(Some(Zone::East), ms(t0, 200)),
            Some(Direction::Right)
        );
    }

    #[test]
    fn test_axes_are_independent() {
        let t0 = Instant::now();
        let mut detector = GestureDetector::default();

        detector.on_zone(Some(Zone::West), t0);
        let horizontal_before = *detector.axis(GestureAxis::Horizontal);

        assert_eq!(detector.on_zone(Some(Zone::North), ms(t0, 200)), None);
        assert_eq!(*detector.axis(GestureAxis::Horizontal), horizontal_before);

        assert_eq!(
            detector.on_zone(Some(Zone::East), ms(t0, 400)),
            Some(Direction::Right)
        );
        assert_eq!(
            detector.axis(GestureAxis::Vertical).last_zone,
            Some(Zone::North)
        );
    }

    #[test]
    fn test_fired_axis_needs_fresh_pair() {
        let t0 = Instant::now();
        let mut detector = GestureDetector::default();

        detector.on_zone(Some(Zone::West), t0);
        detector.on_zone(Some(Zone::East), ms(t0, 100));
        // Disarmed: a single West sample only re-arms
        assert_eq!(detector.on_zone(Some(Zone::West), ms(t0, 200)), None);
        assert_eq!(
            detector.on_zone(Some(Zone::East), ms(t0, 300)),
            Some(Direction::Right)
        );
    }

    #[test]
    fn test_reset_clears_both_axes() {
        let t0 = Instant::now();
        let mut detector = GestureDetector::default();

        detector.on_zone(Some(Zone::West), t0);
        detector.on_zone(Some(Zone::North), t0);
        detector.reset();

        assert_eq!(*detector.axis(GestureAxis::Horizontal), AxisState::default());
        assert_eq!(*detector.axis(GestureAxis::Vertical), AxisState::default());
        assert_eq!(detector.on_zone(Some(Zone::East), ms(t0, 100)), None);
    }
}
