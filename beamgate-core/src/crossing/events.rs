//! Results of advancing the crossing detector

pub use beamgate_protocol::Direction;

use crate::beam::Channel;

/// A completed directional crossing
///
/// Node identity and schema version are added when the event is encoded
/// for the uplink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PassEvent {
    pub direction: Direction,
    /// Clock reading at emission
    pub ms: u32,
    /// Sequence number, starting at 1
    pub seq: u32,
}

/// What happened during one detector step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// No transition
    None,
    /// First beam broke; a crossing is in progress
    Armed(Channel),
    /// Partial crossing timed out without the second beam breaking
    Abandoned(Channel),
    /// Crossing completed
    Pass(PassEvent),
    /// Both beams held intact long enough; ready for the next crossing
    Rearmed,
}

impl Outcome {
    /// The emitted event, if any
    pub fn event(&self) -> Option<PassEvent> {
        match self {
            Outcome::Pass(event) => Some(*event),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_pass_carries_event() {
        let event = PassEvent {
            direction: Direction::AToB,
            ms: 10,
            seq: 1,
        };

        assert_eq!(Outcome::Pass(event).event(), Some(event));
        assert_eq!(Outcome::None.event(), None);
        assert_eq!(Outcome::Armed(Channel::A).event(), None);
        assert_eq!(Outcome::Abandoned(Channel::B).event(), None);
        assert_eq!(Outcome::Rearmed.event(), None);
    }
}
