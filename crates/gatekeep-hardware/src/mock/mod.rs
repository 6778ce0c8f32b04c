//! Mock port implementations for testing and development.
//!
//! This module provides simulated peripherals that can be controlled
//! programmatically without requiring physical hardware.

pub mod gate;
pub mod keypad;
pub mod remote;

// Re-export commonly used types
pub use gate::{MockGate, MockIndicators};
pub use keypad::{MockKeypad, MockKeypadHandle};
pub use remote::MockRemoteLink;
