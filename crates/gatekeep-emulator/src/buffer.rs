//! Per-channel candidate accumulation.
//!
//! Symbols arrive one at a time. A [`CandidateBuffer`] collects them until
//! it holds [`CODE_LENGTH`] symbols, then hands the whole candidate over
//! and starts again from empty. A [`ChannelSession`] pairs a buffer with
//! the completion flag of one input channel.

use gatekeep_core::constants::CODE_LENGTH;
use gatekeep_core::{AccessCode, Channel, Symbol};

/// Whether a channel may take input right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Input is accepted.
    Accepting,
    /// The system is blocked.
    Blocked,
    /// An entry cycle or transient message is in progress.
    Busy,
}

/// Outcome of offering one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    /// Dropped without touching the buffer.
    Ignored,

    /// Stored at `position`; the candidate is not complete yet.
    Accepted { position: usize },

    /// Stored at `position`, completing `candidate`. The buffer is empty again.
    Completed {
        position: usize,
        candidate: AccessCode,
    },
}

impl Offer {
    /// The completed candidate, if this offer completed one.
    pub fn candidate(&self) -> Option<AccessCode> {
        match self {
            Offer::Completed { candidate, .. } => Some(*candidate),
            _ => None,
        }
    }

    /// Position the symbol was stored at, if it was accepted.
    pub fn position(&self) -> Option<usize> {
        match self {
            Offer::Ignored => None,
            Offer::Accepted { position } | Offer::Completed { position, .. } => Some(*position),
        }
    }
}

/// Fixed-size symbol accumulator with a cursor.
///
/// # Examples
///
/// ```
/// use gatekeep_core::Symbol;
/// use gatekeep_emulator::{Admission, CandidateBuffer};
///
/// let mut buffer = CandidateBuffer::new();
/// for c in ['1', '8', '0'] {
///     assert!(buffer.offer(Symbol::new(c), Admission::Accepting).candidate().is_none());
/// }
/// let offer = buffer.offer(Symbol::new('5'), Admission::Accepting);
/// assert_eq!(offer.candidate().unwrap().to_string(), "1805");
/// assert!(buffer.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CandidateBuffer {
    symbols: [Option<Symbol>; CODE_LENGTH],
    index: usize,
}

impl CandidateBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer one symbol.
    ///
    /// Anything but [`Admission::Accepting`] leaves the buffer untouched.
    pub fn offer(&mut self, symbol: Symbol, admission: Admission) -> Offer {
        if admission != Admission::Accepting {
            return Offer::Ignored;
        }

        let position = self.index;
        self.symbols[position] = Some(symbol);
        self.index += 1;

        if self.index < CODE_LENGTH {
            return Offer::Accepted { position };
        }

        let candidate = AccessCode::from_symbols(self.symbols.map(|s| s.unwrap_or(symbol)));
        self.clear();
        Offer::Completed {
            position,
            candidate,
        }
    }

    /// Discard a partial entry.
    pub fn clear(&mut self) {
        self.symbols = [None; CODE_LENGTH];
        self.index = 0;
    }

    /// Number of symbols held.
    pub fn len(&self) -> usize {
        self.index
    }

    /// Returns `true` if no symbol is held.
    pub fn is_empty(&self) -> bool {
        self.index == 0
    }
}

/// Entry state of one input channel: its buffer and completion flag.
#[derive(Debug, Clone)]
pub struct ChannelSession {
    channel: Channel,
    buffer: CandidateBuffer,
    pending: Option<AccessCode>,
}

impl ChannelSession {
    /// Create an empty session for `channel`.
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            buffer: CandidateBuffer::new(),
            pending: None,
        }
    }

    /// Channel this session belongs to.
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Offer a symbol; a completed candidate raises the completion flag.
    pub fn offer(&mut self, symbol: Symbol, admission: Admission) -> Offer {
        let offer = self.buffer.offer(symbol, admission);
        if let Some(candidate) = offer.candidate() {
            self.pending = Some(candidate);
        }
        offer
    }

    /// Completion flag.
    pub fn is_complete(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the completed candidate, clearing the completion flag.
    pub fn take_candidate(&mut self) -> Option<AccessCode> {
        self.pending.take()
    }

    /// Discard partial input and any completed candidate.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.pending = None;
    }

    /// Symbols held in the partial entry.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }
}
