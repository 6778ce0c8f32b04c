//! The access controller: one cooperative tick drives every component.
//!
//! Each call to [`AccessController::tick`] performs, in order:
//!
//! 1. refresh the indicator LEDs from the lockout state
//! 2. poll the keypad for at most one symbol and echo it
//! 3. advance the gate timer and run any evaluation pass that fell due
//! 4. service a completed remote line
//! 5. follow lock-state changes (event log and idle screen)
//!
//! Nothing blocks and nothing sleeps; elapsed time is the tick count
//! multiplied by the configured tick increment.
//!
//! # Examples
//!
//! ```
//! use gatekeep_emulator::{AccessController, GatePhase, Peripherals, VirtualDisplay};
//! use gatekeep_hardware::mock::{MockGate, MockIndicators, MockKeypad, MockRemoteLink};
//!
//! let (keypad, handle) = MockKeypad::new();
//! let mut controller = AccessController::new(Peripherals {
//!     keypad,
//!     remote: MockRemoteLink::new(),
//!     display: VirtualDisplay::default(),
//!     gate: MockGate::new(),
//!     indicators: MockIndicators::new(),
//! })
//! .unwrap();
//!
//! handle.press_sequence("1805").unwrap();
//! controller.advance_by(1_100).unwrap();
//!
//! assert_eq!(controller.phase(), GatePhase::Open(10));
//! assert_eq!(controller.display().get_line(0).unwrap(), "      OPEN      ");
//! ```

use tracing::{debug, info, warn};

use gatekeep_core::constants::{
    BLANK_ROW, BLOCKED_PROMPT, CLOSING_TEXT, CODE_ECHO_COLUMN, CODE_LENGTH, COUNTDOWN_BLANK,
    COUNTDOWN_COLUMN, HOME_PROMPT, OPEN_SCREEN, TRIES_LEFT_COLUMN, TRIES_LEFT_TEXT, TRY_LEFT_TEXT,
    WRONG_TEXT,
};
use gatekeep_core::{AccessCode, Channel, Error, GateCommand, LockState};
use gatekeep_hardware::{
    DisplayPort, GateActuator, IndicatorPort, IndicatorState, KeypadPort, RemoteLink,
};

use crate::buffer::{Admission, ChannelSession};
use crate::code_store::CodeStore;
use crate::config::ControllerConfig;
use crate::error::Result;
use crate::events::{AccessEventKind, EventLog};
use crate::lockout::LockoutGuard;
use crate::timer::{GatePhase, GateTimer, PhaseTransition, TimerStep};
use crate::verifier::Verifier;

/// The five ports the controller drives.
#[derive(Debug)]
pub struct Peripherals<K, R, D, G, I> {
    pub keypad: K,
    pub remote: R,
    pub display: D,
    pub gate: G,
    pub indicators: I,
}

/// Which idle prompt is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdleScreen {
    Home,
    Blocked,
}

impl IdleScreen {
    fn for_state(state: LockState) -> Self {
        match state {
            LockState::Unlocked => IdleScreen::Home,
            LockState::Blocked => IdleScreen::Blocked,
        }
    }

    fn rows(self) -> (&'static str, &'static str) {
        match self {
            IdleScreen::Home => HOME_PROMPT,
            IdleScreen::Blocked => BLOCKED_PROMPT,
        }
    }
}

/// Row 1 text of the wrong-code screen; singular exactly for one try.
///
/// # Examples
///
/// ```
/// use gatekeep_emulator::tries_left_label;
///
/// assert_eq!(tries_left_label(1), "    Try Left    ");
/// assert_eq!(tries_left_label(2), "    Tries Left  ");
/// assert_eq!(tries_left_label(0), "    Tries Left  ");
/// ```
pub fn tries_left_label(remaining: u8) -> &'static str {
    if remaining == 1 {
        TRY_LEFT_TEXT
    } else {
        TRIES_LEFT_TEXT
    }
}

/// Gated entryway access controller.
///
/// Owns the code store, the lockout guard, the gate timer and one entry
/// session per channel, and drives the ports in `Peripherals`.
#[derive(Debug)]
pub struct AccessController<K, R, D, G, I> {
    config: ControllerConfig,
    ports: Peripherals<K, R, D, G, I>,
    store: CodeStore,
    guard: LockoutGuard,
    timer: GateTimer,
    keypad_session: ChannelSession,
    remote_session: ChannelSession,
    events: EventLog,
    indicators: IndicatorState,
    idle_screen: Option<IdleScreen>,
    last_lock: LockState,
}

impl<K, R, D, G, I> AccessController<K, R, D, G, I>
where
    K: KeypadPort,
    R: RemoteLink,
    D: DisplayPort,
    G: GateActuator,
    I: IndicatorPort,
{
    /// Create a controller with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the start-up writes to the ports fail.
    pub fn new(ports: Peripherals<K, R, D, G, I>) -> Result<Self> {
        ControllerBuilder::new().build(ports)
    }

    /// Run one cooperative tick.
    ///
    /// # Errors
    ///
    /// Returns an error if a port fails. The controller state stays
    /// consistent and the next tick may be attempted.
    pub fn tick(&mut self) -> Result<()> {
        self.sync_indicators()?;
        self.poll_keypad()?;

        match self.timer.advance(self.config.tick_ms) {
            TimerStep::EvaluationDue => self.evaluation_pass()?,
            TimerStep::ReturnedToIdle => self.render_idle(true)?,
            TimerStep::Idle | TimerStep::Waiting => {}
        }

        self.poll_remote()?;
        self.track_lock_state()
    }

    /// Run as many ticks as fit in `duration_ms`.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first tick error.
    pub fn advance_by(&mut self, duration_ms: u64) -> Result<()> {
        for _ in 0..(duration_ms / self.config.tick_ms) {
            self.tick()?;
        }
        Ok(())
    }

    /// Replace the stored access code.
    pub fn replace_code(&mut self, code: AccessCode) {
        self.store.replace(code);
        self.events
            .record(AccessEventKind::CodeReplaced, self.timer.uptime_ms());
    }

    /// Current gate phase.
    pub fn phase(&self) -> GatePhase {
        self.timer.phase()
    }

    /// Current lock state.
    pub fn lock_state(&self) -> LockState {
        self.guard.state()
    }

    /// Lockout accounting.
    pub fn guard(&self) -> &LockoutGuard {
        &self.guard
    }

    /// Recent phase transitions, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &PhaseTransition> {
        self.timer.history().iter()
    }

    /// Recent access events.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Virtual time elapsed since start-up.
    pub fn uptime_ms(&self) -> u64 {
        self.timer.uptime_ms()
    }

    /// Active configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// The display port.
    pub fn display(&self) -> &D {
        &self.ports.display
    }

    /// The gate port.
    pub fn gate(&self) -> &G {
        &self.ports.gate
    }

    /// The indicator port.
    pub fn indicators(&self) -> &I {
        &self.ports.indicators
    }

    /// The remote link.
    pub fn remote(&self) -> &R {
        &self.ports.remote
    }

    /// The remote link, for delivering lines.
    pub fn remote_mut(&mut self) -> &mut R {
        &mut self.ports.remote
    }

    /// Tear down the controller and hand back the ports.
    pub fn into_peripherals(self) -> Peripherals<K, R, D, G, I> {
        self.ports
    }

    fn startup(&mut self) -> Result<()> {
        self.ports.gate.command(GateCommand::Closed)?;
        self.ports.indicators.set_incorrect_code(false)?;
        self.ports.indicators.set_system_blocked(false)?;
        self.render_idle(true)
    }

    fn sync_indicators(&mut self) -> Result<()> {
        let wanted = IndicatorState {
            incorrect_code: self.guard.incorrect_code(),
            system_blocked: self.guard.is_blocked(),
        };
        if wanted.incorrect_code != self.indicators.incorrect_code {
            self.ports.indicators.set_incorrect_code(wanted.incorrect_code)?;
        }
        if wanted.system_blocked != self.indicators.system_blocked {
            self.ports.indicators.set_system_blocked(wanted.system_blocked)?;
        }
        self.indicators = wanted;
        Ok(())
    }

    fn keypad_admission(&self) -> Admission {
        if self.guard.is_blocked() {
            Admission::Blocked
        } else if self.timer.phase().is_busy() {
            Admission::Busy
        } else {
            Admission::Accepting
        }
    }

    fn poll_keypad(&mut self) -> Result<()> {
        let Some(symbol) = self.ports.keypad.poll_symbol()? else {
            return Ok(());
        };

        let admission = self.keypad_admission();
        let offer = self.keypad_session.offer(symbol, admission);
        let Some(position) = offer.position() else {
            debug!(
                "{} symbol dropped in {}",
                self.keypad_session.channel(),
                self.timer.phase()
            );
            return Ok(());
        };

        self.ports
            .display
            .write_at(CODE_ECHO_COLUMN + position, 1, &symbol.to_string())?;
        self.idle_screen = None;

        if self.keypad_session.is_complete() {
            self.timer.start_evaluation()?;
        }
        Ok(())
    }

    fn evaluation_pass(&mut self) -> Result<()> {
        let granted = match self.timer.phase() {
            // Countdown already running: the pass is granted again
            GatePhase::Open(_) => {
                self.guard.reconcile();
                true
            }
            _ => {
                let candidate = self.keypad_session.take_candidate().ok_or_else(|| {
                    Error::InvalidStateTransition {
                        from: self.timer.phase().to_string(),
                        to: "Open".to_string(),
                    }
                })?;
                let verdict = Verifier::new(&self.store).verify_from(
                    Channel::Keypad,
                    &candidate,
                    &mut self.guard,
                );
                self.record_verdict(Channel::Keypad, verdict.matched);
                verdict.matched
            }
        };

        if granted {
            self.open_pass()
        } else {
            self.wrong_pass()
        }
    }

    fn open_pass(&mut self) -> Result<()> {
        let pass = self.timer.open_pass()?;
        let uptime = self.timer.uptime_ms();

        // Re-commanded on every pass; the actuator holds position
        self.ports.gate.command(GateCommand::Open)?;
        if pass.opened {
            self.events.record(AccessEventKind::GateOpened, uptime);
            info!("Gate opened");
        }

        self.ports.display.write_at(0, 0, OPEN_SCREEN.0)?;
        self.ports.display.write_at(0, 1, OPEN_SCREEN.1)?;
        self.ports
            .display
            .write_at(COUNTDOWN_COLUMN, 1, COUNTDOWN_BLANK)?;
        self.ports
            .display
            .write_at(COUNTDOWN_COLUMN, 1, &pass.countdown.to_string())?;

        if pass.closing {
            self.ports.display.write_at(0, 1, BLANK_ROW)?;
            self.ports.display.write_at(0, 0, CLOSING_TEXT)?;
            self.ports.gate.command(GateCommand::Closed)?;
            self.guard.clear_keypad_tries();
            self.events.record(AccessEventKind::GateClosed, uptime);
            info!("Gate closed");
        }
        Ok(())
    }

    fn wrong_pass(&mut self) -> Result<()> {
        self.timer.wrong_pass()?;
        let remaining = self.guard.record_keypad_try();

        self.ports.display.write_at(0, 0, WRONG_TEXT)?;
        self.ports.display.write_at(0, 1, tries_left_label(remaining))?;
        self.ports
            .display
            .write_at(TRIES_LEFT_COLUMN, 1, &remaining.to_string())?;

        if self.guard.is_blocked() {
            // Blocked from this tick on, not the next one
            self.sync_indicators()?;
        }
        Ok(())
    }

    fn poll_remote(&mut self) -> Result<()> {
        if !self.ports.remote.code_complete() {
            return Ok(());
        }
        self.ports.remote.set_code_complete(false);

        let line = self.ports.remote.code_sequence();
        if line.len() != CODE_LENGTH {
            warn!("Ignoring remote line of {} symbols", line.len());
            return Ok(());
        }

        self.remote_session.reset();
        for &symbol in line {
            // The remote line is admitted even while blocked
            self.remote_session.offer(symbol, Admission::Accepting);
        }
        let Some(candidate) = self.remote_session.take_candidate() else {
            return Ok(());
        };

        let verdict = Verifier::new(&self.store).verify_from(
            Channel::RemoteCommand,
            &candidate,
            &mut self.guard,
        );
        self.record_verdict(Channel::RemoteCommand, verdict.matched);
        if let Some(response) = verdict.remote_response() {
            self.ports.remote.write_response(response)?;
        }
        Ok(())
    }

    fn record_verdict(&mut self, channel: Channel, matched: bool) {
        let kind = if matched {
            AccessEventKind::CodeAccepted { channel }
        } else {
            AccessEventKind::CodeRejected { channel }
        };
        self.events.record(kind, self.timer.uptime_ms());
    }

    fn track_lock_state(&mut self) -> Result<()> {
        let state = self.guard.state();
        if state != self.last_lock {
            let kind = match state {
                LockState::Blocked => AccessEventKind::SystemBlocked,
                LockState::Unlocked => AccessEventKind::SystemUnblocked,
            };
            self.events.record(kind, self.timer.uptime_ms());
            info!("System {}", state);
            self.last_lock = state;
        }

        if self.timer.phase() == GatePhase::Idle {
            self.render_idle(false)?;
        }
        Ok(())
    }

    /// Draw the idle prompt for the current lock state.
    ///
    /// Without `force`, redraws only when the prompt on screen belongs to
    /// the other lock state, or when a block lands on a partial keypad
    /// entry.
    fn render_idle(&mut self, force: bool) -> Result<()> {
        let wanted = IdleScreen::for_state(self.guard.state());
        let redraw = force
            || match self.idle_screen {
                Some(shown) => shown != wanted,
                None => wanted == IdleScreen::Blocked,
            };
        if !redraw {
            return Ok(());
        }

        if wanted == IdleScreen::Blocked {
            self.keypad_session.reset();
        }
        let (top, bottom) = wanted.rows();
        self.ports.display.write_at(0, 0, top)?;
        self.ports.display.write_at(0, 1, bottom)?;
        self.idle_screen = Some(wanted);
        Ok(())
    }
}

/// Builder for constructing `AccessController` instances with custom
/// configuration.
#[derive(Debug, Default)]
pub struct ControllerBuilder {
    config: ControllerConfig,
    event_capacity: Option<usize>,
}

impl ControllerBuilder {
    /// Start from the default configuration and event capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `config` instead of the defaults.
    pub fn with_config(mut self, config: ControllerConfig) -> Self {
        self.config = config;
        self
    }

    /// Keep at most `capacity` access events.
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = Some(capacity);
        self
    }

    /// Validate the configuration, bring the ports to their start-up
    /// state and return the controller.
    ///
    /// # Errors
    ///
    /// Returns a configuration error or the first failing port write.
    pub fn build<K, R, D, G, I>(
        self,
        ports: Peripherals<K, R, D, G, I>,
    ) -> Result<AccessController<K, R, D, G, I>>
    where
        K: KeypadPort,
        R: RemoteLink,
        D: DisplayPort,
        G: GateActuator,
        I: IndicatorPort,
    {
        self.config.validate()?;

        let events = match self.event_capacity {
            Some(capacity) => EventLog::with_capacity(capacity),
            None => EventLog::default(),
        };
        let mut controller = AccessController {
            store: CodeStore::new(self.config.initial_code),
            guard: LockoutGuard::with_policy(self.config.max_attempts, self.config.override_policy),
            timer: GateTimer::with_thresholds(self.config.thresholds()),
            keypad_session: ChannelSession::new(Channel::Keypad),
            remote_session: ChannelSession::new(Channel::RemoteCommand),
            events,
            indicators: IndicatorState::default(),
            idle_screen: None,
            last_lock: LockState::Unlocked,
            config: self.config,
            ports,
        };
        controller.startup()?;
        info!("Access controller ready");
        Ok(controller)
    }
}
