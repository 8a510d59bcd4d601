//! Beamgate uplink protocol
//!
//! Every record is a single JSON object on its own line, written to the
//! node's UART. Downstream collectors split on `\n` and parse each line.
//!
//! # Records
//!
//! ```text
//! {"v":1,"type":"status","msg":"node_online"}
//! {"v":1,"node":"door_01","type":"pass","dir":"A2B","ms":48213,"seq":1}
//! ```
//!
//! The status record is sent once at boot, before any pass record. `seq`
//! starts at 1 and increases by exactly one per pass record for the
//! lifetime of the process.
//!
//! Encoding is allocation-free: records are formatted into a fixed
//! capacity [`Line`].

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod events;
pub mod record;

pub use events::{Direction, StatusMessage};
pub use record::{
    is_valid_node_id, Line, PassRecord, RecordError, StatusRecord, MAX_NODE_ID_LEN,
    MAX_RECORD_LEN, SCHEMA_VERSION,
};
