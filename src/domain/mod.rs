pub mod gestures;
pub mod leds;
pub mod models;
pub mod sensor;
pub mod settings;
pub mod visualizer;
