//! Common types shared across port implementations.

use serde::{Deserialize, Serialize};

/// A single positioned write issued to a display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayWrite {
    /// Starting column (0-based).
    pub column: usize,

    /// Row (0-based).
    pub row: usize,

    /// Text written from that position.
    pub text: String,
}

impl DisplayWrite {
    /// Create a new display write record.
    pub fn new(column: usize, row: usize, text: impl Into<String>) -> Self {
        Self {
            column,
            row,
            text: text.into(),
        }
    }
}

/// Snapshot of the two status indicators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorState {
    /// Incorrect-code LED.
    pub incorrect_code: bool,

    /// System-blocked LED.
    pub system_blocked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_write_serialization() {
        let write = DisplayWrite::new(11, 1, "8");
        let json = serde_json::to_string(&write).unwrap();
        let back: DisplayWrite = serde_json::from_str(&json).unwrap();
        assert_eq!(write, back);
    }

    #[test]
    fn test_indicator_state_default_off() {
        let state = IndicatorState::default();
        assert!(!state.incorrect_code);
        assert!(!state.system_blocked);
    }
}
