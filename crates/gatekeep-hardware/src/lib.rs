//! Port abstraction layer for the gated entryway controller.
//!
//! The access controller never touches hardware directly. It drives five
//! narrow ports, each a trait in [`traits`]:
//!
//! - [`KeypadPort`]: at most one scanned symbol per tick
//! - [`RemoteLink`]: whole codes from the remote command line, with a
//!   completion flag the controller clears after reading
//! - [`DisplayPort`]: positioned text writes to a character grid
//! - [`GateActuator`]: open / closed servo commands
//! - [`IndicatorPort`]: incorrect-code and system-blocked LEDs
//!
//! # Design
//!
//! - **Synchronous**: the controller runs on a cooperative fixed tick and
//!   must stay responsive, so ports return immediately instead of awaiting.
//! - **Error-aware**: every operation returns [`Result<T>`][error::Result]
//!   carrying a [`HardwareError`].
//! - **Substitutable**: the [`mock`] module provides in-memory ports for
//!   tests and for the console host.
//!
//! # Example
//!
//! ```
//! use gatekeep_hardware::mock::{MockKeypad, MockRemoteLink};
//! use gatekeep_hardware::traits::{KeypadPort, RemoteLink};
//!
//! let (mut keypad, handle) = MockKeypad::new();
//! handle.press_sequence("1805").unwrap();
//! assert!(keypad.poll_symbol().unwrap().is_some());
//!
//! let mut remote = MockRemoteLink::new();
//! remote.submit("1805");
//! assert!(remote.code_complete());
//! ```
//!
//! [`KeypadPort`]: traits::KeypadPort
//! [`RemoteLink`]: traits::RemoteLink
//! [`DisplayPort`]: traits::DisplayPort
//! [`GateActuator`]: traits::GateActuator
//! [`IndicatorPort`]: traits::IndicatorPort

pub mod error;
pub mod mock;
pub mod traits;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{HardwareError, Result};
pub use traits::{DisplayPort, GateActuator, IndicatorPort, KeypadPort, RemoteLink};
pub use types::{DisplayWrite, IndicatorState};
