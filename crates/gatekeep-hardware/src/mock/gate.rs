//! Mock gate actuator and status indicators.

use gatekeep_core::GateCommand;
use tracing::debug;

use crate::{
    Result,
    traits::{GateActuator, IndicatorPort},
    types::IndicatorState,
};

/// Mock gate actuator that records every command it receives.
///
/// # Examples
///
/// ```
/// use gatekeep_core::GateCommand;
/// use gatekeep_hardware::mock::MockGate;
/// use gatekeep_hardware::traits::GateActuator;
///
/// let mut gate = MockGate::new();
/// gate.command(GateCommand::Open).unwrap();
///
/// assert_eq!(gate.position(), GateCommand::Open);
/// assert_eq!(gate.commands(), [GateCommand::Open]);
/// ```
#[derive(Debug)]
pub struct MockGate {
    position: GateCommand,
    commands: Vec<GateCommand>,
}

impl MockGate {
    /// Create a gate resting in the closed position.
    pub fn new() -> Self {
        Self {
            position: GateCommand::Closed,
            commands: Vec::new(),
        }
    }

    /// Last commanded position.
    pub fn position(&self) -> GateCommand {
        self.position
    }

    /// Every command received, oldest first.
    pub fn commands(&self) -> &[GateCommand] {
        &self.commands
    }
}

impl Default for MockGate {
    fn default() -> Self {
        Self::new()
    }
}

impl GateActuator for MockGate {
    fn command(&mut self, command: GateCommand) -> Result<()> {
        debug!("Mock gate commanded {}", command);
        self.position = command;
        self.commands.push(command);
        Ok(())
    }
}

/// Mock indicator pair holding the last driven LED states.
#[derive(Debug, Default)]
pub struct MockIndicators {
    state: IndicatorState,
}

impl MockIndicators {
    /// Create indicators with both LEDs off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current LED states.
    pub fn state(&self) -> IndicatorState {
        self.state
    }
}

impl IndicatorPort for MockIndicators {
    fn set_incorrect_code(&mut self, on: bool) -> Result<()> {
        self.state.incorrect_code = on;
        Ok(())
    }

    fn set_system_blocked(&mut self, on: bool) -> Result<()> {
        self.state.system_blocked = on;
        Ok(())
    }
}
