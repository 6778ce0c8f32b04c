//! Shared vocabulary of the gatekeep workspace.
//!
//! Symbols, access codes, channels, lock state and gate commands live in
//! [`types`]; timing thresholds, display layout and the verbatim screen
//! and remote texts live in [`constants`].

pub mod constants;
pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{AccessCode, Channel, GateCommand, LockState, Symbol};

/// Crate version, reported by the console host.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
