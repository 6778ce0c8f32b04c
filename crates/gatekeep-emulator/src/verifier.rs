//! Candidate verification against the stored code.

use tracing::{info, warn};

use gatekeep_core::constants::{REMOTE_CODE_CORRECT, REMOTE_CODE_INCORRECT};
use gatekeep_core::{AccessCode, Channel};

use crate::code_store::CodeStore;
use crate::lockout::LockoutGuard;

/// Outcome of verifying one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verification {
    /// Channel the candidate came from.
    pub channel: Channel,

    /// Whether it matched the stored code.
    pub matched: bool,
}

impl Verification {
    /// Text to send back on the originating channel.
    ///
    /// Only the remote channel gets a textual answer; the keypad is
    /// answered through the display instead.
    pub fn remote_response(&self) -> Option<&'static str> {
        match self.channel {
            Channel::Keypad => None,
            Channel::RemoteCommand if self.matched => Some(REMOTE_CODE_CORRECT),
            Channel::RemoteCommand => Some(REMOTE_CODE_INCORRECT),
        }
    }
}

/// Exact-match comparison of candidates against a [`CodeStore`].
///
/// # Examples
///
/// ```
/// use gatekeep_core::Channel;
/// use gatekeep_emulator::{CodeStore, LockoutGuard, Verifier};
///
/// let store = CodeStore::default();
/// let mut guard = LockoutGuard::new();
/// let verifier = Verifier::new(&store);
///
/// assert!(verifier.matches(&"1805".parse().unwrap()));
///
/// let verdict = verifier.verify_from(Channel::RemoteCommand, &"9999".parse().unwrap(), &mut guard);
/// assert!(!verdict.matched);
/// assert_eq!(verdict.remote_response(), Some("\r\nThe code is incorrect\r\n\r\n"));
/// assert_eq!(guard.failures(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Verifier<'a> {
    store: &'a CodeStore,
}

impl<'a> Verifier<'a> {
    /// Create a verifier reading from `store`.
    pub fn new(store: &'a CodeStore) -> Self {
        Self { store }
    }

    /// Returns `true` iff every position equals the stored code.
    pub fn matches(&self, candidate: &AccessCode) -> bool {
        self.store.read() == *candidate
    }

    /// Verify a candidate from `channel` and update the lockout.
    ///
    /// A match deactivates the lockout; a mismatch records a failure.
    pub fn verify_from(
        &self,
        channel: Channel,
        candidate: &AccessCode,
        guard: &mut LockoutGuard,
    ) -> Verification {
        let matched = self.matches(candidate);
        if matched {
            guard.deactivate();
            info!("Code accepted on {}", channel);
        } else {
            guard.record_failure();
            warn!("Code rejected on {} ({} failures)", channel, guard.failures());
        }

        Verification { channel, matched }
    }
}
