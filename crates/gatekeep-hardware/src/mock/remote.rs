//! Mock remote command link.
//!
//! Holds one completed line plus its completion flag, and records every
//! response written back so tests can assert on the exact text.

use gatekeep_core::Symbol;

use crate::{Result, traits::RemoteLink};

/// Mock remote link for testing and development.
///
/// # Examples
///
/// ```
/// use gatekeep_hardware::mock::MockRemoteLink;
/// use gatekeep_hardware::traits::RemoteLink;
///
/// let mut link = MockRemoteLink::new();
/// link.submit("9999");
///
/// assert!(link.code_complete());
/// assert_eq!(link.code_sequence().len(), 4);
///
/// link.set_code_complete(false);
/// assert!(!link.code_complete());
/// ```
#[derive(Debug, Default)]
pub struct MockRemoteLink {
    line: Vec<Symbol>,
    complete: bool,
    responses: Vec<String>,
}

impl MockRemoteLink {
    /// Create an idle link with no pending line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a completed line and raise the completion flag.
    pub fn submit(&mut self, line: &str) {
        self.line = line.chars().map(Symbol::new).collect();
        self.complete = true;
    }

    /// Responses written so far, oldest first.
    pub fn responses(&self) -> &[String] {
        &self.responses
    }

    /// Drain and return the recorded responses.
    pub fn take_responses(&mut self) -> Vec<String> {
        std::mem::take(&mut self.responses)
    }
}

impl RemoteLink for MockRemoteLink {
    fn code_complete(&self) -> bool {
        self.complete
    }

    fn code_sequence(&self) -> &[Symbol] {
        &self.line
    }

    fn set_code_complete(&mut self, complete: bool) {
        self.complete = complete;
    }

    fn write_response(&mut self, text: &str) -> Result<()> {
        self.responses.push(text.to_string());
        Ok(())
    }
}
