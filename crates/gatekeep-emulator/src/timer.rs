//! Gate timer state machine.
//!
//! This module owns the phase of the entry cycle and every timing
//! threshold that drives it. Time is never slept: the controller calls
//! [`GateTimer::advance`] once per tick with the fixed tick increment and
//! the timer reports when a threshold has been crossed.
//!
//! # Phases
//!
//! - `Idle`: accepting keypad input
//! - `Evaluating`: a candidate is complete, waiting for the first pass
//! - `Open(n)`: gate open, `n` seconds left on the countdown
//! - `Closing`: gate closing, short pause before returning to idle
//! - `WrongDisplay`: wrong code shown, longer pause before returning to idle
//!
//! # Valid Transitions
//!
//! - Idle → Evaluating → Open / WrongDisplay
//! - Open → Open (countdown step) → Closing → Idle
//! - WrongDisplay → Idle
//!
//! # Examples
//!
//! ```
//! use gatekeep_emulator::{GatePhase, GateTimer, TimerStep};
//!
//! let mut timer = GateTimer::new();
//! timer.start_evaluation().unwrap();
//!
//! let mut step = TimerStep::Waiting;
//! while step != TimerStep::EvaluationDue {
//!     step = timer.advance(10);
//! }
//!
//! let pass = timer.open_pass().unwrap();
//! assert_eq!(pass.countdown, 10);
//! assert_eq!(timer.phase(), GatePhase::Open(10));
//! ```

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use gatekeep_core::constants::{
    CLOSING_DELAY_MS, EVALUATION_DELAY_MS, GATE_OPEN_SECONDS, WRONG_DELAY_MS,
};
use gatekeep_core::{Error, Result};

/// Maximum number of phase transitions kept in history.
///
/// One successful entry records 13 transitions (evaluating, ten countdown
/// steps, closing, idle), so this holds the last several cycles.
const MAX_HISTORY_SIZE: usize = 100;

/// Phase of the entry cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatePhase {
    /// Waiting for keypad input.
    Idle,

    /// Candidate complete, waiting for the evaluation delay.
    Evaluating,

    /// Gate open with the given seconds left on the countdown.
    Open(u8),

    /// Gate closing.
    Closing,

    /// Wrong code shown with the tries left.
    WrongDisplay,
}

impl fmt::Display for GatePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatePhase::Idle => write!(f, "Idle"),
            GatePhase::Evaluating => write!(f, "Evaluating"),
            GatePhase::Open(countdown) => write!(f, "Open({countdown})"),
            GatePhase::Closing => write!(f, "Closing"),
            GatePhase::WrongDisplay => write!(f, "WrongDisplay"),
        }
    }
}

impl GatePhase {
    /// Check if transition to target phase is valid from this phase.
    ///
    /// # Examples
    ///
    /// ```
    /// use gatekeep_emulator::GatePhase;
    ///
    /// assert!(GatePhase::Idle.can_transition_to(&GatePhase::Evaluating));
    /// assert!(GatePhase::Open(3).can_transition_to(&GatePhase::Open(2)));
    /// assert!(!GatePhase::Open(3).can_transition_to(&GatePhase::Open(4)));
    /// assert!(!GatePhase::Idle.can_transition_to(&GatePhase::Open(10)));
    /// ```
    pub fn can_transition_to(&self, target: &GatePhase) -> bool {
        match (self, target) {
            (GatePhase::Idle, GatePhase::Evaluating)
            | (GatePhase::Evaluating, GatePhase::Open(_) | GatePhase::WrongDisplay)
            | (GatePhase::Open(_), GatePhase::Closing)
            | (GatePhase::Closing | GatePhase::WrongDisplay, GatePhase::Idle) => true,
            // Countdown strictly decreases
            (GatePhase::Open(from), GatePhase::Open(to)) => to < from,
            _ => false,
        }
    }

    /// Returns `true` while an entry cycle is running.
    pub fn is_busy(&self) -> bool {
        !matches!(self, GatePhase::Idle)
    }

    /// Returns `true` while a transient message (closing or wrong) is shown.
    pub fn is_transient_message(&self) -> bool {
        matches!(self, GatePhase::Closing | GatePhase::WrongDisplay)
    }
}

/// A single phase transition stamped with virtual uptime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTransition {
    /// The phase transitioned from.
    pub from: GatePhase,

    /// The phase transitioned to.
    pub to: GatePhase,

    /// Timer uptime when the transition occurred.
    pub uptime_ms: u64,
}

/// What a call to [`GateTimer::advance`] observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStep {
    /// Nothing is running.
    Idle,

    /// Time accumulated towards the current threshold.
    Waiting,

    /// An evaluation pass is due (Evaluating or Open).
    EvaluationDue,

    /// The closing or wrong-code pause elapsed; the timer is back to Idle.
    ReturnedToIdle,
}

/// Result of one successful evaluation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenPass {
    /// Countdown value to show for this pass.
    pub countdown: u8,

    /// `true` on the first pass, when the gate starts opening.
    pub opened: bool,

    /// `true` when this pass ended the open window and moved to Closing.
    pub closing: bool,
}

/// Thresholds the timer works against, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerThresholds {
    /// Accumulated time before each evaluation pass.
    pub evaluation_delay_ms: u64,

    /// Seconds on the open countdown.
    pub open_seconds: u8,

    /// Pause on the closing screen.
    pub closing_delay_ms: u64,

    /// Pause on the wrong-code screen.
    pub wrong_delay_ms: u64,
}

impl Default for TimerThresholds {
    fn default() -> Self {
        Self {
            evaluation_delay_ms: EVALUATION_DELAY_MS,
            open_seconds: GATE_OPEN_SECONDS,
            closing_delay_ms: CLOSING_DELAY_MS,
            wrong_delay_ms: WRONG_DELAY_MS,
        }
    }
}

/// Finite-state timer for the open countdown, closing pause and
/// wrong-code pause.
///
/// # Thread Safety
///
/// Not synchronised. It belongs to the single tick handler.
#[derive(Debug, Clone)]
pub struct GateTimer {
    thresholds: TimerThresholds,
    phase: GatePhase,
    accumulated_ms: u64,
    open_passes: u8,
    uptime_ms: u64,
    history: VecDeque<PhaseTransition>,
}

impl GateTimer {
    /// Create a timer in `Idle` with the default thresholds.
    pub fn new() -> Self {
        Self::with_thresholds(TimerThresholds::default())
    }

    /// Create a timer in `Idle` with custom thresholds.
    pub fn with_thresholds(thresholds: TimerThresholds) -> Self {
        Self {
            thresholds,
            phase: GatePhase::Idle,
            accumulated_ms: 0,
            open_passes: 0,
            uptime_ms: 0,
            history: VecDeque::with_capacity(MAX_HISTORY_SIZE),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> GatePhase {
        self.phase
    }

    /// Time accumulated towards the current threshold.
    pub fn accumulated_ms(&self) -> u64 {
        self.accumulated_ms
    }

    /// Total virtual time advanced since creation.
    pub fn uptime_ms(&self) -> u64 {
        self.uptime_ms
    }

    /// Seconds left while open, `None` otherwise.
    pub fn countdown(&self) -> Option<u8> {
        match self.phase {
            GatePhase::Open(countdown) => Some(countdown),
            _ => None,
        }
    }

    /// Recorded transitions, oldest first.
    pub fn history(&self) -> &VecDeque<PhaseTransition> {
        &self.history
    }

    /// Enter `Evaluating` after a candidate completed.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidStateTransition` unless the timer is idle.
    pub fn start_evaluation(&mut self) -> Result<PhaseTransition> {
        self.open_passes = 0;
        self.transition_to(GatePhase::Evaluating)
    }

    /// Advance virtual time by one tick of `tick_ms`.
    ///
    /// A tick that crosses a threshold resets the accumulator and does not
    /// also add its own increment.
    pub fn advance(&mut self, tick_ms: u64) -> TimerStep {
        self.uptime_ms = self.uptime_ms.saturating_add(tick_ms);

        let due = match self.phase {
            GatePhase::Idle => return TimerStep::Idle,
            GatePhase::Evaluating | GatePhase::Open(_) => {
                self.accumulated_ms >= self.thresholds.evaluation_delay_ms
            }
            GatePhase::Closing => self.accumulated_ms >= self.thresholds.closing_delay_ms,
            GatePhase::WrongDisplay => self.accumulated_ms >= self.thresholds.wrong_delay_ms,
        };

        if !due {
            self.accumulated_ms = self.accumulated_ms.saturating_add(tick_ms);
            return TimerStep::Waiting;
        }

        self.accumulated_ms = 0;
        if self.phase.is_transient_message() {
            // Closing and WrongDisplay always lead back to Idle
            self.force_phase(GatePhase::Idle);
            return TimerStep::ReturnedToIdle;
        }
        TimerStep::EvaluationDue
    }

    /// Record a successful evaluation pass.
    ///
    /// The countdown shown is `open_seconds - passes so far`; the pass
    /// that shows zero moves the timer to `Closing`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidStateTransition` unless the timer is
    /// `Evaluating` or `Open`.
    pub fn open_pass(&mut self) -> Result<OpenPass> {
        let opened = match self.phase {
            GatePhase::Evaluating => true,
            GatePhase::Open(_) => false,
            other => {
                return Err(Error::InvalidStateTransition {
                    from: other.to_string(),
                    to: "Open".to_string(),
                });
            }
        };

        let countdown = self.thresholds.open_seconds.saturating_sub(self.open_passes);
        self.open_passes = self.open_passes.saturating_add(1);

        let closing = self.open_passes > self.thresholds.open_seconds;
        if closing {
            self.open_passes = 0;
            self.transition_to(GatePhase::Closing)?;
        } else {
            self.transition_to(GatePhase::Open(countdown))?;
        }

        Ok(OpenPass {
            countdown,
            opened,
            closing,
        })
    }

    /// Record a failed evaluation pass and show the wrong-code screen.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidStateTransition` unless the timer is `Evaluating`.
    pub fn wrong_pass(&mut self) -> Result<PhaseTransition> {
        self.transition_to(GatePhase::WrongDisplay)
    }

    fn transition_to(&mut self, next: GatePhase) -> Result<PhaseTransition> {
        if !self.phase.can_transition_to(&next) {
            return Err(Error::InvalidStateTransition {
                from: self.phase.to_string(),
                to: next.to_string(),
            });
        }
        Ok(self.force_phase(next))
    }

    fn force_phase(&mut self, next: GatePhase) -> PhaseTransition {
        let transition = PhaseTransition {
            from: self.phase,
            to: next,
            uptime_ms: self.uptime_ms,
        };
        debug!("Gate phase {} -> {}", transition.from, transition.to);

        self.phase = next;
        self.history.push_back(transition.clone());
        if self.history.len() > MAX_HISTORY_SIZE {
            self.history.pop_front();
        }
        transition
    }
}

impl Default for GateTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: u64 = 10;

    fn advance_until_due(timer: &mut GateTimer) -> usize {
        let mut ticks = 0;
        loop {
            ticks += 1;
            if timer.advance(TICK) == TimerStep::EvaluationDue {
                return ticks;
            }
            assert!(ticks < 10_000, "evaluation never became due");
        }
    }

    #[test]
    fn test_new_timer_is_idle() {
        let mut timer = GateTimer::new();
        assert_eq!(timer.phase(), GatePhase::Idle);
        assert_eq!(timer.advance(TICK), TimerStep::Idle);
        assert_eq!(timer.accumulated_ms(), 0);
        assert!(timer.history().is_empty());
    }

    #[test]
    fn test_idle_does_not_accumulate() {
        let mut timer = GateTimer::new();
        for _ in 0..500 {
            timer.advance(TICK);
        }
        assert_eq!(timer.accumulated_ms(), 0);
        assert_eq!(timer.uptime_ms(), 500 * TICK);
    }

    #[test]
    fn test_evaluation_due_after_one_second() {
        let mut timer = GateTimer::new();
        timer.start_evaluation().unwrap();

        // 100 accumulating ticks reach 1000 ms, the next tick runs the pass
        assert_eq!(advance_until_due(&mut timer), 101);
        assert_eq!(timer.accumulated_ms(), 0);
    }

    #[test]
    fn test_countdown_runs_ten_to_zero_then_closing() {
        let mut timer = GateTimer::new();
        timer.start_evaluation().unwrap();

        let mut shown = Vec::new();
        loop {
            advance_until_due(&mut timer);
            let pass = timer.open_pass().unwrap();
            shown.push(pass.countdown);
            if pass.closing {
                break;
            }
        }

        assert_eq!(shown, vec![10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
        assert_eq!(timer.phase(), GatePhase::Closing);
    }

    #[test]
    fn test_first_pass_opens() {
        let mut timer = GateTimer::new();
        timer.start_evaluation().unwrap();
        advance_until_due(&mut timer);

        let first = timer.open_pass().unwrap();
        assert!(first.opened);
        advance_until_due(&mut timer);
        let second = timer.open_pass().unwrap();
        assert!(!second.opened);
        assert_eq!(timer.countdown(), Some(9));
    }

    #[test]
    fn test_closing_returns_to_idle_after_one_second() {
        let mut timer = GateTimer::new();
        timer.start_evaluation().unwrap();
        loop {
            advance_until_due(&mut timer);
            if timer.open_pass().unwrap().closing {
                break;
            }
        }

        let mut ticks = 0;
        while timer.advance(TICK) != TimerStep::ReturnedToIdle {
            ticks += 1;
        }
        assert_eq!(ticks, 100);
        assert_eq!(timer.phase(), GatePhase::Idle);
    }

    #[test]
    fn test_wrong_display_returns_to_idle_after_three_seconds() {
        let mut timer = GateTimer::new();
        timer.start_evaluation().unwrap();
        advance_until_due(&mut timer);
        timer.wrong_pass().unwrap();

        let mut ticks = 0;
        while timer.advance(TICK) != TimerStep::ReturnedToIdle {
            ticks += 1;
        }
        assert_eq!(ticks, 300);
        assert_eq!(timer.phase(), GatePhase::Idle);
    }

    #[test]
    fn test_start_evaluation_requires_idle() {
        let mut timer = GateTimer::new();
        timer.start_evaluation().unwrap();

        let result = timer.start_evaluation();
        assert!(matches!(
            result,
            Err(Error::InvalidStateTransition { .. })
        ));
    }

    #[test]
    fn test_open_pass_rejected_when_idle() {
        let mut timer = GateTimer::new();
        assert!(timer.open_pass().is_err());
        assert!(timer.wrong_pass().is_err());
    }

    #[test]
    fn test_wrong_pass_rejected_while_open() {
        let mut timer = GateTimer::new();
        timer.start_evaluation().unwrap();
        advance_until_due(&mut timer);
        timer.open_pass().unwrap();

        assert!(timer.wrong_pass().is_err());
        assert_eq!(timer.phase(), GatePhase::Open(10));
    }

    #[test]
    fn test_history_records_full_cycle() {
        let mut timer = GateTimer::new();
        timer.start_evaluation().unwrap();
        advance_until_due(&mut timer);
        timer.wrong_pass().unwrap();
        while timer.advance(TICK) != TimerStep::ReturnedToIdle {}

        let phases: Vec<_> = timer.history().iter().map(|t| t.to).collect();
        assert_eq!(
            phases,
            vec![GatePhase::Evaluating, GatePhase::WrongDisplay, GatePhase::Idle]
        );
        let stamps: Vec<_> = timer.history().iter().map(|t| t.uptime_ms).collect();
        assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_history_size_limit() {
        let mut timer = GateTimer::new();
        for _ in 0..20 {
            timer.start_evaluation().unwrap();
            loop {
                advance_until_due(&mut timer);
                if timer.open_pass().unwrap().closing {
                    break;
                }
            }
            while timer.advance(TICK) != TimerStep::ReturnedToIdle {}
        }
        assert_eq!(timer.history().len(), MAX_HISTORY_SIZE);
    }

    #[test]
    fn test_custom_thresholds() {
        let mut timer = GateTimer::with_thresholds(TimerThresholds {
            evaluation_delay_ms: 100,
            open_seconds: 2,
            closing_delay_ms: 50,
            wrong_delay_ms: 50,
        });
        timer.start_evaluation().unwrap();

        assert_eq!(advance_until_due(&mut timer), 11);
        let shown: Vec<u8> = (0..3)
            .map(|i| {
                if i > 0 {
                    advance_until_due(&mut timer);
                }
                timer.open_pass().unwrap().countdown
            })
            .collect();
        assert_eq!(shown, vec![2, 1, 0]);
        assert_eq!(timer.phase(), GatePhase::Closing);
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(GatePhase::Open(7).to_string(), "Open(7)");
        assert_eq!(GatePhase::WrongDisplay.to_string(), "WrongDisplay");
    }

    #[test]
    fn test_phase_serialization() {
        let json = serde_json::to_string(&GatePhase::Open(4)).unwrap();
        let back: GatePhase = serde_json::from_str(&json).unwrap();
        assert_eq!(back, GatePhase::Open(4));
    }
}
