//! Core constants for the gated entryway controller.
//!
//! This module gathers the timing thresholds, lockout limits, display
//! layout and verbatim text used throughout the workspace. The display
//! literals and remote responses are reproduced byte-for-byte from the
//! entryway firmware; operators and remote tooling match on them.
//!
//! # Timing Model
//!
//! All waiting is counted in elapsed tick time, never slept:
//!
//! | Phase | Threshold | Constant |
//! |-------|-----------|----------|
//! | Evaluating / Open | 1 s per evaluation pass | [`EVALUATION_DELAY_MS`] |
//! | Open | 10 passes of countdown | [`GATE_OPEN_SECONDS`] |
//! | Closing | 1 s | [`CLOSING_DELAY_MS`] |
//! | WrongDisplay | 3 s | [`WRONG_DELAY_MS`] |
//!
//! # Usage
//!
//! ```
//! use gatekeep_core::constants::*;
//!
//! assert_eq!(CODE_LENGTH, 4);
//! assert_eq!(HOME_PROMPT.0.len(), DISPLAY_COLUMNS);
//! ```

use crate::types::{AccessCode, Symbol};

// ============================================================================
// Access Code
// ============================================================================

/// Number of symbols in an access code.
pub const CODE_LENGTH: usize = 4;

/// Code loaded at power-on until an administrator replaces it.
pub const DEFAULT_ACCESS_CODE: AccessCode = AccessCode::from_symbols([
    Symbol::new('1'),
    Symbol::new('8'),
    Symbol::new('0'),
    Symbol::new('5'),
]);

// ============================================================================
// Lockout
// ============================================================================

/// Consecutive failures after which the system blocks.
pub const MAX_INCORRECT_ATTEMPTS: u8 = 3;

// ============================================================================
// Timing
// ============================================================================

/// Default fixed tick increment in milliseconds.
pub const DEFAULT_TICK_MS: u64 = 10;

/// Accumulated time before each evaluation pass.
pub const EVALUATION_DELAY_MS: u64 = 1000;

/// Seconds the gate stays open, shown as a countdown.
pub const GATE_OPEN_SECONDS: u8 = 10;

/// Pause on the closing screen before returning to idle.
pub const CLOSING_DELAY_MS: u64 = 1000;

/// Pause on the wrong-code screen before returning to idle.
pub const WRONG_DELAY_MS: u64 = 3000;

// ============================================================================
// Display Layout
// ============================================================================

/// Character columns of the entryway LCD.
pub const DISPLAY_COLUMNS: usize = 16;

/// Character rows of the entryway LCD.
pub const DISPLAY_ROWS: usize = 2;

/// Column where the first entered symbol is echoed (row 1).
pub const CODE_ECHO_COLUMN: usize = 11;

/// Column of the open countdown value (row 1).
pub const COUNTDOWN_COLUMN: usize = 13;

/// Column of the tries-left value (row 1).
pub const TRIES_LEFT_COLUMN: usize = 2;

// ============================================================================
// Display Text (verbatim)
// ============================================================================

/// Idle prompt, rows 0 and 1.
pub const HOME_PROMPT: (&str, &str) = ("Enter Code to   ", "Open Gate:      ");

/// Blocked prompt, rows 0 and 1.
pub const BLOCKED_PROMPT: (&str, &str) = ("     SYSTEM     ", "    BLOCKED     ");

/// Open screen, rows 0 and 1. The countdown is written over row 1.
pub const OPEN_SCREEN: (&str, &str) = ("      OPEN      ", "  CLOSING IN    ");

/// Blank cells cleared before each countdown value.
pub const COUNTDOWN_BLANK: &str = "   ";

/// Closing screen, row 0.
pub const CLOSING_TEXT: &str = "    CLOSING     ";

/// Full blank row.
pub const BLANK_ROW: &str = "                ";

/// Wrong-code screen, row 0.
pub const WRONG_TEXT: &str = "     WRONG      ";

/// Row 1 when exactly one try remains.
pub const TRY_LEFT_TEXT: &str = "    Try Left    ";

/// Row 1 when zero or several tries remain.
pub const TRIES_LEFT_TEXT: &str = "    Tries Left  ";

// ============================================================================
// Remote Responses (verbatim)
// ============================================================================

/// Sent on the remote channel after a matching code.
pub const REMOTE_CODE_CORRECT: &str = "\r\nThe code is correct\r\n\r\n";

/// Sent on the remote channel after a mismatching code.
pub const REMOTE_CODE_INCORRECT: &str = "\r\nThe code is incorrect\r\n\r\n";
