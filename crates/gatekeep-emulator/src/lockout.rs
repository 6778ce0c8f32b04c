//! Three-strike lockout accounting.
//!
//! [`LockoutGuard`] is the single owner of failure counting. It keeps two
//! tallies that the entryway firmware has always kept separately:
//!
//! - the **verifier tally**, bumped by every rejected candidate on any
//!   channel and cleared by any accepted one;
//! - the **keypad tally**, bumped by the wrong-code screen and cleared only
//!   when the gate finishes closing. Tries-left is derived from it.
//!
//! Under [`OverridePolicy::CrossChannel`] (the field behaviour) the keypad
//! tally has the last word: while it is under the limit the system is
//! forced back to unlocked, so remote failures alone never block, and a
//! correct remote code lifts a keypad lockout. [`OverridePolicy::Strict`]
//! blocks when either tally reaches the limit.

use serde::{Deserialize, Serialize};
use tracing::debug;

use gatekeep_core::LockState;
use gatekeep_core::constants::MAX_INCORRECT_ATTEMPTS;

/// How the keypad tally interacts with the verifier tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverridePolicy {
    /// Keypad tally under the limit forces `Unlocked`.
    #[default]
    CrossChannel,
    /// Either tally at the limit blocks; only a correct code unblocks.
    Strict,
}

/// Lockout state shared by the verifier and the gate timer.
///
/// # Examples
///
/// ```
/// use gatekeep_core::LockState;
/// use gatekeep_emulator::LockoutGuard;
///
/// let mut guard = LockoutGuard::new();
/// for _ in 0..3 {
///     guard.record_failure();
///     guard.record_keypad_try();
/// }
/// assert_eq!(guard.state(), LockState::Blocked);
/// assert_eq!(guard.tries_remaining(), 0);
///
/// guard.deactivate();
/// assert_eq!(guard.state(), LockState::Unlocked);
/// assert_eq!(guard.failures(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct LockoutGuard {
    max_attempts: u8,
    policy: OverridePolicy,
    failures: u8,
    keypad_tries: u8,
    state: LockState,
    incorrect_code: bool,
}

impl LockoutGuard {
    /// Create an unlocked guard with the default limit and policy.
    pub fn new() -> Self {
        Self::with_policy(MAX_INCORRECT_ATTEMPTS, OverridePolicy::default())
    }

    /// Create an unlocked guard with a custom limit and policy.
    pub fn with_policy(max_attempts: u8, policy: OverridePolicy) -> Self {
        Self {
            max_attempts,
            policy,
            failures: 0,
            keypad_tries: 0,
            state: LockState::Unlocked,
            incorrect_code: false,
        }
    }

    /// Count a rejected candidate from any channel.
    pub fn record_failure(&mut self) -> LockState {
        self.failures = self.failures.saturating_add(1);
        self.incorrect_code = true;
        debug!("Recorded failure {}/{}", self.failures, self.max_attempts);
        self.reconcile()
    }

    /// Clear the lockout after an accepted candidate.
    ///
    /// Resets the verifier tally and the incorrect-code indicator. The
    /// keypad tally is left for the closing step to clear.
    pub fn deactivate(&mut self) {
        self.state = LockState::Unlocked;
        self.incorrect_code = false;
        self.failures = 0;
    }

    /// Re-derive the lock state from both tallies.
    pub fn reconcile(&mut self) -> LockState {
        if self.failures >= self.max_attempts {
            self.state = LockState::Blocked;
        }
        if self.policy == OverridePolicy::CrossChannel && self.keypad_tries < self.max_attempts {
            self.state = LockState::Unlocked;
        }
        self.state
    }

    /// Count a wrong code shown on the keypad screen.
    ///
    /// Blocks immediately once the keypad tally reaches the limit and
    /// returns the tries left to display.
    pub fn record_keypad_try(&mut self) -> u8 {
        self.keypad_tries = self.keypad_tries.saturating_add(1);
        if self.keypad_tries >= self.max_attempts {
            self.state = LockState::Blocked;
        }
        self.tries_remaining()
    }

    /// Reset the keypad tally once the gate has closed.
    pub fn clear_keypad_tries(&mut self) {
        self.keypad_tries = 0;
    }

    /// Keypad tries left before blocking, never below zero.
    pub fn tries_remaining(&self) -> u8 {
        self.max_attempts.saturating_sub(self.keypad_tries)
    }

    /// Current lock state.
    pub fn state(&self) -> LockState {
        self.state
    }

    /// Returns `true` while blocked.
    pub fn is_blocked(&self) -> bool {
        self.state.is_blocked()
    }

    /// Incorrect-code indicator state.
    pub fn incorrect_code(&self) -> bool {
        self.incorrect_code
    }

    /// Verifier tally.
    pub fn failures(&self) -> u8 {
        self.failures
    }

    /// Keypad tally.
    pub fn keypad_tries(&self) -> u8 {
        self.keypad_tries
    }

    /// Configured failure limit.
    pub fn max_attempts(&self) -> u8 {
        self.max_attempts
    }

    /// Configured override policy.
    pub fn policy(&self) -> OverridePolicy {
        self.policy
    }
}

impl Default for LockoutGuard {
    fn default() -> Self {
        Self::new()
    }
}
