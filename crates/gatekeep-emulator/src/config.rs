//! Controller configuration.
//!
//! Every field has a default matching the entryway firmware, so an empty
//! JSON object (or no file at all) yields the field behaviour:
//!
//! ```
//! use gatekeep_emulator::{ControllerConfig, OverridePolicy};
//!
//! let config: ControllerConfig = serde_json::from_str(r#"{ "tick_ms": 20 }"#).unwrap();
//! assert_eq!(config.tick_ms, 20);
//! assert_eq!(config.max_attempts, 3);
//! assert_eq!(config.override_policy, OverridePolicy::CrossChannel);
//! assert!(config.validate().is_ok());
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use gatekeep_core::constants::{
    CLOSING_DELAY_MS, DEFAULT_ACCESS_CODE, DEFAULT_TICK_MS, EVALUATION_DELAY_MS,
    GATE_OPEN_SECONDS, MAX_INCORRECT_ATTEMPTS, WRONG_DELAY_MS,
};
use gatekeep_core::{AccessCode, Error, Result};

use crate::lockout::OverridePolicy;
use crate::timer::TimerThresholds;

/// Largest countdown that fits the three countdown cells.
const MAX_OPEN_SECONDS: u8 = 99;

/// Tunable parameters of the access controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Fixed tick increment in milliseconds.
    pub tick_ms: u64,

    /// Accumulated time before each evaluation pass.
    pub evaluation_delay_ms: u64,

    /// Seconds on the open countdown.
    pub open_seconds: u8,

    /// Pause on the closing screen.
    pub closing_delay_ms: u64,

    /// Pause on the wrong-code screen.
    pub wrong_delay_ms: u64,

    /// Failures before the system blocks.
    pub max_attempts: u8,

    /// Code loaded at start-up.
    pub initial_code: AccessCode,

    /// Interaction between the keypad and verifier tallies.
    pub override_policy: OverridePolicy,
}

impl ControllerConfig {
    /// Check the configuration for values the controller cannot run with.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.tick_ms == 0 {
            return Err(Error::Config("tick_ms must be greater than zero".to_string()));
        }
        if self.max_attempts == 0 {
            return Err(Error::Config(
                "max_attempts must be greater than zero".to_string(),
            ));
        }
        if self.open_seconds == 0 || self.open_seconds > MAX_OPEN_SECONDS {
            return Err(Error::Config(format!(
                "open_seconds must be between 1 and {MAX_OPEN_SECONDS}, got {}",
                self.open_seconds
            )));
        }
        Ok(())
    }

    /// Tick increment as a [`Duration`].
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Timer thresholds derived from this configuration.
    pub fn thresholds(&self) -> TimerThresholds {
        TimerThresholds {
            evaluation_delay_ms: self.evaluation_delay_ms,
            open_seconds: self.open_seconds,
            closing_delay_ms: self.closing_delay_ms,
            wrong_delay_ms: self.wrong_delay_ms,
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            evaluation_delay_ms: EVALUATION_DELAY_MS,
            open_seconds: GATE_OPEN_SECONDS,
            closing_delay_ms: CLOSING_DELAY_MS,
            wrong_delay_ms: WRONG_DELAY_MS,
            max_attempts: MAX_INCORRECT_ATTEMPTS,
            initial_code: DEFAULT_ACCESS_CODE,
            override_policy: OverridePolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_matches_firmware() {
        let config = ControllerConfig::default();

        assert_eq!(config.tick(), Duration::from_millis(10));
        assert_eq!(config.initial_code.to_string(), "1805");
        assert_eq!(config.thresholds(), TimerThresholds::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config: ControllerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ControllerConfig::default());
    }

    #[test]
    fn test_json_overrides() {
        let json = r#"{
            "initial_code": "4321",
            "override_policy": "strict",
            "open_seconds": 5
        }"#;
        let config: ControllerConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.initial_code.to_string(), "4321");
        assert_eq!(config.override_policy, OverridePolicy::Strict);
        assert_eq!(config.thresholds().open_seconds, 5);
    }

    #[test]
    fn test_json_rejects_bad_code_length() {
        let result: std::result::Result<ControllerConfig, _> =
            serde_json::from_str(r#"{ "initial_code": "12345" }"#);
        assert!(result.is_err());
    }

    #[rstest]
    #[case::zero_tick(ControllerConfig { tick_ms: 0, ..Default::default() }, "tick_ms")]
    #[case::zero_attempts(ControllerConfig { max_attempts: 0, ..Default::default() }, "max_attempts")]
    #[case::zero_countdown(ControllerConfig { open_seconds: 0, ..Default::default() }, "open_seconds")]
    #[case::wide_countdown(ControllerConfig { open_seconds: 100, ..Default::default() }, "open_seconds")]
    fn test_validate_rejects(#[case] config: ControllerConfig, #[case] field: &str) {
        match config.validate() {
            Err(Error::Config(message)) => assert!(message.contains(field), "{message}"),
            other => panic!("Expected Config error, got {other:?}"),
        }
    }
}
