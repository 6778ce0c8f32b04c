//! Error types for port operations.
//!
//! Every port the controller drives (keypad, remote link, display, gate
//! actuator, indicators) reports failures through [`HardwareError`]. Wrong
//! codes and lockout are never errors; these cover the collaborators only.

/// Result type alias for port operations.
pub type Result<T> = std::result::Result<T, HardwareError>;

/// Errors that can occur while talking to a peripheral.
#[derive(Debug, thiserror::Error)]
pub enum HardwareError {
    /// The port's device or backing channel is gone.
    #[error("Port disconnected: {port}")]
    Disconnected { port: String },

    /// The port cannot take more input until it is drained.
    #[error("Port overrun: {port}")]
    Overrun { port: String },

    /// A write was refused because of its content or position.
    #[error("Invalid data: {message}")]
    InvalidData { message: String },

    /// Failure of the underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HardwareError {
    /// Create a new disconnected error.
    pub fn disconnected(port: impl Into<String>) -> Self {
        Self::Disconnected { port: port.into() }
    }

    /// Create a new overrun error.
    pub fn overrun(port: impl Into<String>) -> Self {
        Self::Overrun { port: port.into() }
    }

    /// Create a new invalid data error.
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    /// Returns `true` if retrying on a later tick may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Overrun { .. })
    }
}

/// Display positions and code lengths rejected by the core surface as
/// invalid data on the port that received them.
impl From<gatekeep_core::Error> for HardwareError {
    fn from(error: gatekeep_core::Error) -> Self {
        Self::invalid_data(error.to_string())
    }
}
