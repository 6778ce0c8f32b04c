//! Port trait definitions.
//!
//! These traits are the contract between the access controller and the
//! entryway peripherals. The controller runs on a single-threaded fixed
//! tick and never waits on a device, so every method is synchronous and
//! must return promptly: a keypad with nothing pressed reports `None`
//! rather than blocking.
//!
//! Mock implementations live in [`crate::mock`]; the virtual LCD lives in
//! the emulator crate.

use gatekeep_core::{GateCommand, Symbol};

use crate::error::Result;

/// Matrix keypad, already scanned and debounced by its driver.
///
/// # Examples
///
/// ```
/// use gatekeep_hardware::mock::MockKeypad;
/// use gatekeep_hardware::traits::KeypadPort;
///
/// let (mut keypad, handle) = MockKeypad::new();
/// handle.press_sequence("18").unwrap();
///
/// assert_eq!(keypad.poll_symbol().unwrap().map(|s| s.as_char()), Some('1'));
/// assert_eq!(keypad.poll_symbol().unwrap().map(|s| s.as_char()), Some('8'));
/// assert_eq!(keypad.poll_symbol().unwrap(), None);
/// ```
pub trait KeypadPort {
    /// Return the symbol pressed since the last poll, if any.
    ///
    /// Called once per tick; yields at most one symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the keypad is disconnected.
    fn poll_symbol(&mut self) -> Result<Option<Symbol>>;
}

/// Remote command line (serial console) carrying whole codes.
///
/// The link accumulates a line on its own and raises a completion flag.
/// The controller reads the line only while the flag is set and clears
/// the flag it read, so each completed line is consumed exactly once.
pub trait RemoteLink {
    /// Returns `true` while a completed line is waiting.
    fn code_complete(&self) -> bool;

    /// Symbols of the most recently completed line.
    fn code_sequence(&self) -> &[Symbol];

    /// Set or clear the completion flag.
    fn set_code_complete(&mut self, complete: bool);

    /// Send a text response back over the link.
    ///
    /// # Errors
    ///
    /// Returns an error if the link cannot be written.
    fn write_response(&mut self, text: &str) -> Result<()>;
}

/// Addressable character display.
pub trait DisplayPort {
    /// Write `text` starting at (`column`, `row`), overwriting cells in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the position is outside the display or the
    /// device cannot be written.
    fn write_at(&mut self, column: usize, row: usize, text: &str) -> Result<()>;
}

/// Two-position gate actuator (servo).
pub trait GateActuator {
    /// Drive the gate to the commanded position.
    ///
    /// # Errors
    ///
    /// Returns an error if the actuator cannot be reached.
    fn command(&mut self, command: GateCommand) -> Result<()>;
}

/// Status LEDs mirroring lockout state.
pub trait IndicatorPort {
    /// Drive the incorrect-code indicator.
    ///
    /// # Errors
    ///
    /// Returns an error if the indicator cannot be written.
    fn set_incorrect_code(&mut self, on: bool) -> Result<()>;

    /// Drive the system-blocked indicator.
    ///
    /// # Errors
    ///
    /// Returns an error if the indicator cannot be written.
    fn set_system_blocked(&mut self, on: bool) -> Result<()>;
}
