//! Bounded log of access events.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gatekeep_core::Channel;

/// Default number of events retained.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AccessEventKind {
    CodeAccepted { channel: Channel },
    CodeRejected { channel: Channel },
    GateOpened,
    GateClosed,
    SystemBlocked,
    SystemUnblocked,
    CodeReplaced,
}

/// One recorded event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessEvent {
    /// What happened.
    #[serde(flatten)]
    pub kind: AccessEventKind,

    /// Controller uptime when it happened.
    pub uptime_ms: u64,

    /// Wall-clock time when it was recorded.
    pub recorded_at: DateTime<Utc>,
}

/// Ring buffer of the most recent access events.
#[derive(Debug, Clone)]
pub struct EventLog {
    events: VecDeque<AccessEvent>,
    capacity: usize,
}

impl EventLog {
    /// Create an empty log keeping at most `capacity` events.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity.min(DEFAULT_EVENT_CAPACITY)),
            capacity,
        }
    }

    /// Append an event, evicting the oldest when full.
    pub fn record(&mut self, kind: AccessEventKind, uptime_ms: u64) {
        if self.capacity == 0 {
            return;
        }
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(AccessEvent {
            kind,
            uptime_ms,
            recorded_at: Utc::now(),
        });
    }

    /// Events oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &AccessEvent> {
        self.events.iter()
    }

    /// Event kinds oldest first.
    pub fn kinds(&self) -> Vec<AccessEventKind> {
        self.events.iter().map(|e| e.kind).collect()
    }

    /// Number of events held.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if no events are held.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drain every event, oldest first.
    pub fn drain(&mut self) -> Vec<AccessEvent> {
        self.events.drain(..).collect()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_EVENT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_iterate() {
        let mut log = EventLog::default();
        log.record(AccessEventKind::GateOpened, 1010);
        log.record(AccessEventKind::GateClosed, 12120);

        assert_eq!(
            log.kinds(),
            vec![AccessEventKind::GateOpened, AccessEventKind::GateClosed]
        );
        assert_eq!(log.iter().next().unwrap().uptime_ms, 1010);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut log = EventLog::with_capacity(2);
        log.record(AccessEventKind::GateOpened, 1);
        log.record(AccessEventKind::GateClosed, 2);
        log.record(AccessEventKind::SystemBlocked, 3);

        assert_eq!(log.len(), 2);
        assert_eq!(
            log.kinds(),
            vec![AccessEventKind::GateClosed, AccessEventKind::SystemBlocked]
        );
    }

    #[test]
    fn test_zero_capacity_records_nothing() {
        let mut log = EventLog::with_capacity(0);
        log.record(AccessEventKind::GateOpened, 1);
        assert!(log.is_empty());
    }

    #[test]
    fn test_drain_empties_log() {
        let mut log = EventLog::default();
        log.record(AccessEventKind::CodeReplaced, 5);
        assert_eq!(log.drain().len(), 1);
        assert!(log.is_empty());
    }

    #[test]
    fn test_event_serialization() {
        let mut log = EventLog::default();
        log.record(
            AccessEventKind::CodeRejected {
                channel: Channel::RemoteCommand,
            },
            42,
        );
        let event = log.iter().next().unwrap();

        let json = serde_json::to_value(event).unwrap();
        assert_eq!(json["kind"], "code_rejected");
        assert_eq!(json["channel"], "remote_command");
        assert_eq!(json["uptime_ms"], 42);

        let back: AccessEvent = serde_json::from_value(json).unwrap();
        assert_eq!(&back, event);
    }
}
