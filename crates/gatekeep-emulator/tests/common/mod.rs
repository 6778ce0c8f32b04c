//! Common test utilities for integration tests.
//!
//! [`Harness`] wires an [`AccessController`] to mock ports and keeps the
//! keypad handle alive, then offers tick-level helpers:
//!
//! 1. **Input helpers** (`enter`, `submit_remote`) feed the two channels
//! 2. **Wait helpers** (`tick_until`, `wait_for_phase`) run ticks until a
//!    condition holds, failing loudly if it never does
//! 3. **Screen helpers** (`line`, `countdown_writes`) read back the LCD
//!
//! # Usage
//!
//! ```ignore
//! let mut harness = common::Harness::new();
//! harness.enter("1805");
//! harness.wait_for_phase(GatePhase::Open(10));
//! assert_eq!(harness.line(0), "      OPEN      ");
//! ```

#![allow(dead_code)]

use gatekeep_core::constants::{COUNTDOWN_COLUMN, OPEN_SCREEN};
use gatekeep_emulator::{
    AccessController, ControllerBuilder, ControllerConfig, GatePhase, Peripherals, VirtualDisplay,
};
use gatekeep_hardware::mock::{
    MockGate, MockIndicators, MockKeypad, MockKeypadHandle, MockRemoteLink,
};

/// Controller over the standard mock ports.
pub type Controller =
    AccessController<MockKeypad, MockRemoteLink, VirtualDisplay, MockGate, MockIndicators>;

/// Upper bound on ticks any single wait may take.
pub const MAX_WAIT_TICKS: usize = 5_000;

/// Controller plus the keypad handle feeding it.
pub struct Harness {
    pub controller: Controller,
    pub keys: MockKeypadHandle,
}

impl Harness {
    /// Harness with the default configuration (code "1805", 10 ms ticks).
    pub fn new() -> Self {
        Self::with_config(ControllerConfig::default())
    }

    /// Harness with a custom configuration.
    pub fn with_config(config: ControllerConfig) -> Self {
        let (keypad, keys) = MockKeypad::new();
        let controller = ControllerBuilder::new()
            .with_config(config)
            .build(Peripherals {
                keypad,
                remote: MockRemoteLink::new(),
                display: VirtualDisplay::default(),
                gate: MockGate::new(),
                indicators: MockIndicators::new(),
            })
            .expect("controller should build over mock ports");
        Self { controller, keys }
    }

    /// Queue key presses; each is consumed by one tick.
    pub fn enter(&mut self, keys: &str) {
        self.keys
            .press_sequence(keys)
            .expect("key queue should accept presses");
    }

    /// Run `n` ticks.
    pub fn tick_n(&mut self, n: usize) {
        for _ in 0..n {
            self.controller.tick().expect("tick should succeed");
        }
    }

    /// Tick until `condition` holds and return the ticks it took.
    pub fn tick_until(&mut self, condition: impl Fn(&Controller) -> bool) -> usize {
        for ticks in 1..=MAX_WAIT_TICKS {
            self.controller.tick().expect("tick should succeed");
            if condition(&self.controller) {
                return ticks;
            }
        }
        panic!(
            "condition not reached within {MAX_WAIT_TICKS} ticks (phase {})",
            self.controller.phase()
        );
    }

    /// Tick until the controller reaches `phase`.
    pub fn wait_for_phase(&mut self, phase: GatePhase) -> usize {
        self.tick_until(|c| c.phase() == phase)
    }

    /// Tick until the controller is back in `Idle`.
    pub fn wait_until_idle(&mut self) -> usize {
        self.wait_for_phase(GatePhase::Idle)
    }

    /// Enter a keypad code and tick until its evaluation pass has run.
    pub fn enter_and_evaluate(&mut self, keys: &str) {
        self.enter(keys);
        self.tick_until(|c| !matches!(c.phase(), GatePhase::Idle | GatePhase::Evaluating));
    }

    /// Deliver a remote line, run one tick and return what was written back.
    pub fn submit_remote(&mut self, line: &str) -> Vec<String> {
        self.controller.remote_mut().submit(line);
        self.tick_n(1);
        self.controller.remote_mut().take_responses()
    }

    /// One LCD row.
    pub fn line(&self, row: usize) -> String {
        self.controller
            .display()
            .get_line(row)
            .expect("row should be on the display")
    }

    /// Countdown values written so far, in order.
    ///
    /// Only writes following the open screen count; keypad echo shares
    /// the countdown cells.
    pub fn countdown_writes(&self) -> Vec<u8> {
        let mut values = Vec::new();
        let mut on_open_screen = false;
        for write in self.controller.display().writes() {
            if write.column == 0 && write.row == 1 {
                on_open_screen = write.text == OPEN_SCREEN.1;
            } else if on_open_screen && write.column == COUNTDOWN_COLUMN && write.row == 1 {
                if let Ok(value) = write.text.trim().parse() {
                    values.push(value);
                }
            }
        }
        values
    }
}

/// Row 1 of the wrong-code screen for `remaining` tries.
pub fn tries_left_row(remaining: u8) -> String {
    let mut row: Vec<char> = gatekeep_emulator::tries_left_label(remaining).chars().collect();
    row[2] = char::from(b'0' + remaining);
    row.into_iter().collect()
}
