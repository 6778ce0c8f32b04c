//! Storage for the current access code.

use tracing::info;

use gatekeep_core::AccessCode;
use gatekeep_core::constants::DEFAULT_ACCESS_CODE;

/// Holds the one code the entryway accepts.
///
/// The code lives for the lifetime of the process; replacing it is an
/// administrative action, never reachable from the keypad flow.
#[derive(Debug, Clone)]
pub struct CodeStore {
    code: AccessCode,
}

impl CodeStore {
    /// Create a store holding `code`.
    pub fn new(code: AccessCode) -> Self {
        Self { code }
    }

    /// Current code.
    pub fn read(&self) -> AccessCode {
        self.code
    }

    /// Overwrite the code as a whole.
    pub fn replace(&mut self, code: AccessCode) {
        self.code = code;
        info!("Access code replaced");
    }
}

impl Default for CodeStore {
    fn default() -> Self {
        Self::new(DEFAULT_ACCESS_CODE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_code() {
        let store = CodeStore::default();
        assert_eq!(store.read().to_string(), "1805");
    }

    #[test]
    fn test_replace_overwrites() {
        let mut store = CodeStore::default();
        store.replace("4321".parse().unwrap());
        assert_eq!(store.read().to_string(), "4321");
    }
}
