use crate::{Result, constants::CODE_LENGTH, error::Error};
use serde::{Deserialize, Serialize};
use std::fmt;
use subtle::ConstantTimeEq;

/// A single entered symbol.
///
/// The keypad alphabet is the digits `0-9`, but symbols are not validated:
/// any character a channel delivers is carried through and compared as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(char);

impl Symbol {
    /// Wrap a character as a symbol.
    #[must_use]
    pub const fn new(c: char) -> Self {
        Symbol(c)
    }

    /// Get the underlying character.
    #[must_use]
    pub const fn as_char(self) -> char {
        self.0
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Symbol(c)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fixed-length access code (exactly [`CODE_LENGTH`] symbols).
///
/// # Security
/// Equality is evaluated in constant time so a comparison does not reveal
/// how many leading symbols matched.
#[derive(Debug, Clone, Copy, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccessCode([Symbol; CODE_LENGTH]);

impl AccessCode {
    /// Build a code from exactly four symbols.
    #[must_use]
    pub const fn from_symbols(symbols: [Symbol; CODE_LENGTH]) -> Self {
        AccessCode(symbols)
    }

    /// Build a code from a slice of symbols.
    ///
    /// # Errors
    /// Returns `Error::InvalidCodeLength` unless the slice holds exactly
    /// [`CODE_LENGTH`] symbols.
    pub fn from_slice(symbols: &[Symbol]) -> Result<Self> {
        let symbols: [Symbol; CODE_LENGTH] =
            symbols.try_into().map_err(|_| Error::InvalidCodeLength {
                expected: CODE_LENGTH,
                actual: symbols.len(),
            })?;
        Ok(AccessCode(symbols))
    }

    /// Get the symbols in entry order.
    #[must_use]
    pub fn symbols(&self) -> &[Symbol; CODE_LENGTH] {
        &self.0
    }

    fn scalars(&self) -> [u32; CODE_LENGTH] {
        self.0.map(|s| u32::from(s.as_char()))
    }
}

/// Constant-time comparison implementation for AccessCode
impl PartialEq for AccessCode {
    fn eq(&self, other: &Self) -> bool {
        self.scalars()[..].ct_eq(&other.scalars()[..]).into()
    }
}

impl std::hash::Hash for AccessCode {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Display for AccessCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for symbol in &self.0 {
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for AccessCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let symbols: Vec<Symbol> = s.chars().map(Symbol::from).collect();
        AccessCode::from_slice(&symbols)
    }
}

impl TryFrom<String> for AccessCode {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<AccessCode> for String {
    fn from(code: AccessCode) -> Self {
        code.to_string()
    }
}

/// Logical input channel a candidate arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Physical matrix keypad at the gate.
    Keypad,
    /// Remote command line (serial console).
    RemoteCommand,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Channel::Keypad => write!(f, "Keypad"),
            Channel::RemoteCommand => write!(f, "RemoteCommand"),
        }
    }
}

/// Lockout state of the entryway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockState {
    #[default]
    Unlocked,
    Blocked,
}

impl LockState {
    /// Returns `true` if the system is blocked.
    #[inline]
    #[must_use]
    pub fn is_blocked(self) -> bool {
        matches!(self, LockState::Blocked)
    }
}

impl fmt::Display for LockState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LockState::Unlocked => write!(f, "Unlocked"),
            LockState::Blocked => write!(f, "Blocked"),
        }
    }
}

/// Command sent to the gate actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateCommand {
    Open,
    Closed,
}

impl fmt::Display for GateCommand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GateCommand::Open => write!(f, "Open"),
            GateCommand::Closed => write!(f, "Closed"),
        }
    }
}
