//! Bluetooth Module
//!
//! Drives the Kano proximity sensor over BLE.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                      KanoSession                         │
//! │  (Session context - public API for the application)      │
//! └─────────────────────┬───────────────────────────────────┘
//!                       │
//!         ┌─────────────┼─────────────┐
//!         │             │             │
//!         ▼             ▼             ▼
//! ┌───────────┐  ┌────────────┐  ┌───────────┐
//! │ Transport │  │  Protocol  │  │  Domain   │
//! │           │  │            │  │           │
//! │ - Scan    │  │ - UUIDs    │  │ - Sensor  │
//! │ - GATT    │  │ - Parsing  │  │ - Gesture │
//! │   access  │  │ - LED frame│  │ - LEDs    │
//! └───────────┘  └────────────┘  └───────────┘
//! ```
//!
//! ## Modules
//!
//! - [`protocol`] - GATT identifiers, sensor packet parsing, LED frame encoding
//! - [`transport`] - Boundary trait over a platform BLE stack
//! - [`simulated`] - In-memory transport
//! - [`session`] - Session context tying the pieces together

pub mod protocol;
pub mod session;
pub mod simulated;
pub mod transport;

// Re-export main session for convenience
pub use session::{KanoSession, SessionConfig, SessionError};
