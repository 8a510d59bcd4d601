//! Crossing state machine
//!
//! ```text
//!            A broken, B intact          B broken
//!   ┌──────┐ ──────────────────▶ AFirst ─────────▶ ┌────────┐
//!   │ Idle │                                       │ Locked │
//!   └──────┘ ──────────────────▶ BFirst ─────────▶ └────────┘
//!      ▲     B broken, A intact          A broken       │
//!      └────────────── both intact for restore_stable ──┘
//! ```
//!
//! A partial crossing (`AFirst`/`BFirst`) that is not completed within the
//! sequence timeout falls back to `Idle` without an event.

use beamgate_protocol::Direction;

use super::events::{Outcome, PassEvent};
use crate::beam::{Beam, Channel};
use crate::config::TimingConfig;
use crate::time::elapsed;

/// Detector states
///
/// Each variant carries only the timestamps that are meaningful in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Armed, waiting for a first break
    Idle,
    /// Beam A broke first at `since_ms`
    AFirstBroken { since_ms: u32 },
    /// Beam B broke first at `since_ms`
    BFirstBroken { since_ms: u32 },
    /// Crossing reported; waiting for both beams to clear
    Locked {
        /// Start of the current unbroken both-intact window
        intact_since_ms: Option<u32>,
    },
}

impl State {
    fn partial(&self) -> Option<(Channel, u32)> {
        match *self {
            State::AFirstBroken { since_ms } => Some((Channel::A, since_ms)),
            State::BFirstBroken { since_ms } => Some((Channel::B, since_ms)),
            _ => None,
        }
    }
}

/// Directional crossing detector
#[derive(Debug, Clone)]
pub struct CrossingDetector {
    state: State,
    /// Sequence number of the last emitted event (0 before the first)
    last_seq: u32,
    sequence_timeout_ms: u32,
    restore_stable_ms: u32,
}

impl CrossingDetector {
    /// Create an idle detector
    pub fn new(timing: &TimingConfig) -> Self {
        Self {
            state: State::Idle,
            last_seq: 0,
            sequence_timeout_ms: timing.sequence_timeout_ms,
            restore_stable_ms: timing.restore_stable_ms,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Number of pass events emitted so far
    pub fn events_emitted(&self) -> u32 {
        self.last_seq
    }

    /// Advance using the debounced state of both beams
    pub fn advance(&mut self, a: &Beam, b: &Beam, now_ms: u32) -> Outcome {
        self.advance_raw(a.is_broken(), b.is_broken(), now_ms)
    }

    /// Advance one step
    ///
    /// Emits at most one event per call.
    pub fn advance_raw(&mut self, a_broken: bool, b_broken: bool, now_ms: u32) -> Outcome {
        // Partial crossings expire before anything else is looked at
        if let Some((first, since_ms)) = self.state.partial() {
            if elapsed(now_ms, since_ms) > self.sequence_timeout_ms {
                self.state = State::Idle;
                return Outcome::Abandoned(first);
            }
        }

        match self.state {
            State::Idle => {
                if a_broken && !b_broken {
                    self.state = State::AFirstBroken { since_ms: now_ms };
                    Outcome::Armed(Channel::A)
                } else if b_broken && !a_broken {
                    self.state = State::BFirstBroken { since_ms: now_ms };
                    Outcome::Armed(Channel::B)
                } else {
                    // Both broken in the same step: no direction can be told
                    Outcome::None
                }
            }
            State::AFirstBroken { .. } => {
                if b_broken {
                    self.emit(Direction::AToB, now_ms)
                } else {
                    Outcome::None
                }
            }
            State::BFirstBroken { .. } => {
                if a_broken {
                    self.emit(Direction::BToA, now_ms)
                } else {
                    Outcome::None
                }
            }
            State::Locked { intact_since_ms } => {
                if a_broken || b_broken {
                    self.state = State::Locked {
                        intact_since_ms: None,
                    };
                    return Outcome::None;
                }

                let since = intact_since_ms.unwrap_or(now_ms);
                if elapsed(now_ms, since) >= self.restore_stable_ms {
                    self.state = State::Idle;
                    Outcome::Rearmed
                } else {
                    self.state = State::Locked {
                        intact_since_ms: Some(since),
                    };
                    Outcome::None
                }
            }
        }
    }

    fn emit(&mut self, direction: Direction, now_ms: u32) -> Outcome {
        self.last_seq = self.last_seq.wrapping_add(1);
        self.state = State::Locked {
            intact_since_ms: None,
        };
        Outcome::Pass(PassEvent {
            direction,
            ms: now_ms,
            seq: self.last_seq,
        })
    }
}
