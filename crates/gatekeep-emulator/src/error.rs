//! Error types for the access controller.

use gatekeep_hardware::HardwareError;
use thiserror::Error;

/// Errors surfaced by [`AccessController`](crate::AccessController).
///
/// Wrong codes and lockout are states, not errors. Only port failures and
/// internal inconsistencies end up here.
#[derive(Error, Debug)]
pub enum ControllerError {
    #[error("Port error: {0}")]
    Port(#[from] HardwareError),

    #[error(transparent)]
    Core(#[from] gatekeep_core::Error),
}

/// Result type alias for controller operations.
pub type Result<T> = std::result::Result<T, ControllerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_display() {
        let err: ControllerError = HardwareError::disconnected("keypad").into();
        assert!(err.to_string().starts_with("Port error:"));
        assert!(err.to_string().contains("keypad"));
    }

    #[test]
    fn test_core_error_transparent() {
        let core = gatekeep_core::Error::Config("tick_ms must be positive".to_string());
        let expected = core.to_string();
        let err: ControllerError = core.into();
        assert_eq!(err.to_string(), expected);
    }
}
