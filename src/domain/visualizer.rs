//! Force-field visualization: lights each zone's LEDs with the zone's
//! brightness and the center with the strongest reading.

use crate::domain::leds::{LedBuffer, LED_CENTER};
use crate::domain::models::{ActiveZoneResult, LedColor, Zone};

/// Channel mix used for a zone at brightness `level`
pub fn zone_color(zone: Zone, level: u8) -> LedColor {
    match zone {
        Zone::North => LedColor::new(level, 0, 0),
        Zone::East => LedColor::new(0, level, 0),
        Zone::South => LedColor::new(0, 0, level),
        Zone::West => LedColor::new(level, level, 0),
    }
}

pub fn force_field(result: &ActiveZoneResult, leds: &mut LedBuffer) {
    leds.clear_leds();

    for zone in Zone::ALL {
        leds.fill_zone(zone, zone_color(zone, result.brightness[zone.index()]));
    }

    let center = result.max_brightness;
    leds.set_led(LED_CENTER, LedColor::new(center, center, center));
}
