//! Gatekeep emulator crate providing the entryway access-control core.
//!
//! This crate contains the code store, the per-channel candidate buffers,
//! the verifier, the lockout guard, the gate timer state machine and the
//! [`AccessController`] that ties them to the ports defined in
//! `gatekeep-hardware`. A [`VirtualDisplay`] stands in for the LCD.

pub mod buffer;
pub mod code_store;
pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod events;
pub mod lockout;
pub mod timer;
pub mod verifier;

pub use buffer::{Admission, CandidateBuffer, ChannelSession, Offer};
pub use code_store::CodeStore;
pub use config::ControllerConfig;
pub use controller::{AccessController, ControllerBuilder, Peripherals, tries_left_label};
pub use display::{VirtualDisplay, VirtualDisplayBuilder, truncate_text};
pub use error::{ControllerError, Result};
pub use events::{AccessEvent, AccessEventKind, EventLog};
pub use lockout::{LockoutGuard, OverridePolicy};
pub use timer::{GatePhase, GateTimer, OpenPass, PhaseTransition, TimerStep, TimerThresholds};
pub use verifier::{Verification, Verifier};
