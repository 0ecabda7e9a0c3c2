//! Kano proximity sensor driver
//!
//! Interprets the four proximity sensors, detects directional swipes and
//! encodes frames for the 3x3 LED grid.

pub mod domain;
pub mod infrastructure;
