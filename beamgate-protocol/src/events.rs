//! Values carried by uplink records

/// Direction of a completed crossing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Beam A broke first, then beam B
    AToB,
    /// Beam B broke first, then beam A
    BToA,
}

// Wire tokens
const DIR_A_TO_B: &str = "A2B";
const DIR_B_TO_A: &str = "B2A";

impl Direction {
    /// Wire token for the `dir` field
    pub fn token(self) -> &'static str {
        match self {
            Direction::AToB => DIR_A_TO_B,
            Direction::BToA => DIR_B_TO_A,
        }
    }
}

/// Status messages reported in `status` records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusMessage {
    /// Node finished calibration and is counting
    NodeOnline,
    /// Beam A read as obstructed during calibration
    BeamAObstructed,
    /// Beam B read as obstructed during calibration
    BeamBObstructed,
}

impl StatusMessage {
    /// Wire token for the `msg` field
    pub fn as_str(self) -> &'static str {
        match self {
            StatusMessage::NodeOnline => "node_online",
            StatusMessage::BeamAObstructed => "beam_a_obstructed",
            StatusMessage::BeamBObstructed => "beam_b_obstructed",
        }
    }
}
