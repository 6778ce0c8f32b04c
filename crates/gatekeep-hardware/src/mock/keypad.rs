//! Mock keypad implementation for testing and development.
//!
//! This module provides a simulated keypad that can be driven
//! programmatically, one queued key press per poll.

use gatekeep_core::Symbol;
use tokio::sync::mpsc::{self, error::TryRecvError, error::TrySendError};

use crate::{Result, traits::KeypadPort};

/// Queue depth of pending key presses.
const KEY_QUEUE_CAPACITY: usize = 32;

/// Mock keypad device for testing and development.
///
/// Key presses are queued through a [`MockKeypadHandle`] and released one
/// per [`poll_symbol`](KeypadPort::poll_symbol) call, the same pacing a
/// scanned matrix keypad gives the tick loop.
///
/// # Examples
///
/// ```
/// use gatekeep_hardware::mock::MockKeypad;
/// use gatekeep_hardware::traits::KeypadPort;
///
/// let (mut keypad, handle) = MockKeypad::new();
/// handle.press('5'.into()).unwrap();
///
/// assert_eq!(keypad.poll_symbol().unwrap().map(|s| s.as_char()), Some('5'));
/// assert_eq!(keypad.poll_symbol().unwrap(), None);
/// ```
#[derive(Debug)]
pub struct MockKeypad {
    /// Channel receiver for simulated key presses
    input_rx: mpsc::Receiver<Symbol>,

    /// Device name
    name: String,
}

impl MockKeypad {
    /// Create a new mock keypad with the default name.
    ///
    /// Returns a tuple of (MockKeypad, MockKeypadHandle) where the handle
    /// can be used to simulate key presses.
    pub fn new() -> (Self, MockKeypadHandle) {
        Self::with_name("Mock Keypad".to_string())
    }

    /// Create a new mock keypad with a custom name.
    pub fn with_name(name: String) -> (Self, MockKeypadHandle) {
        let (input_tx, input_rx) = mpsc::channel(KEY_QUEUE_CAPACITY);

        let keypad = Self {
            input_rx,
            name: name.clone(),
        };

        let handle = MockKeypadHandle { input_tx, name };

        (keypad, handle)
    }

    /// Get the device name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl KeypadPort for MockKeypad {
    fn poll_symbol(&mut self) -> Result<Option<Symbol>> {
        match self.input_rx.try_recv() {
            Ok(symbol) => Ok(Some(symbol)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(crate::HardwareError::disconnected(
                format!("{}: key channel closed", self.name),
            )),
        }
    }
}

/// Handle for controlling a mock keypad.
///
/// The handle can be cloned and moved to another task, for example a
/// console reader feeding the tick loop.
#[derive(Debug, Clone)]
pub struct MockKeypadHandle {
    /// Channel sender for simulated key presses
    input_tx: mpsc::Sender<Symbol>,

    /// Device name
    name: String,
}

impl MockKeypadHandle {
    /// Queue a single key press.
    ///
    /// # Errors
    ///
    /// Returns an error if the keypad has been dropped or the queue is full.
    pub fn press(&self, symbol: Symbol) -> Result<()> {
        self.input_tx.try_send(symbol).map_err(|e| match e {
            TrySendError::Full(_) => {
                crate::HardwareError::overrun(format!("{}: key queue full", self.name))
            }
            TrySendError::Closed(_) => {
                crate::HardwareError::disconnected(format!("{}: key channel closed", self.name))
            }
        })
    }

    /// Queue one key press per character of `keys`.
    ///
    /// # Errors
    ///
    /// Returns an error if any press cannot be queued.
    pub fn press_sequence(&self, keys: &str) -> Result<()> {
        for c in keys.chars() {
            self.press(Symbol::new(c))?;
        }
        Ok(())
    }

    /// Get the device name.
    pub fn name(&self) -> &str {
        &self.name
    }
}
