//! Inter-task communication channels
//!
//! The monitor task produces records, the uplink task owns the UART and
//! writes them. This channel is the only state the two share.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use beamgate_core::PassEvent;
use beamgate_protocol::StatusMessage;

/// Channel capacity for outbound records
const RECORD_CHANNEL_SIZE: usize = 8;

/// A record waiting to be written to the uplink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outbound {
    Status(StatusMessage),
    Pass(PassEvent),
}

/// Records from the monitor task to the uplink task, in emission order
pub static RECORD_CHANNEL: Channel<CriticalSectionRawMutex, Outbound, RECORD_CHANNEL_SIZE> =
    Channel::new();
