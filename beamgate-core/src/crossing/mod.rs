//! Directional crossing detection
//!
//! A finite, deterministic state machine over the two debounced beams.
//! It never terminates and never fails: abandoned partial crossings and
//! ambiguous simultaneous breaks are ordinary transitions.

pub mod events;
pub mod machine;

pub use events::{Outcome, PassEvent};
pub use machine::{CrossingDetector, State};
