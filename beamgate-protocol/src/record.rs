//! Record encoding
//!
//! Records are written with `core::fmt::Write` into a [`Line`]. The node
//! identifier is restricted to characters that never need JSON escaping,
//! so the encoder can emit it verbatim.

use core::fmt::Write;

use heapless::String;

use crate::events::{Direction, StatusMessage};

/// Schema version carried in the `v` field
pub const SCHEMA_VERSION: u8 = 1;

/// Maximum node identifier length in bytes
pub const MAX_NODE_ID_LEN: usize = 32;

/// Maximum encoded record length, excluding the trailing newline
///
/// Longest pass record: 32-byte node id and two 10-digit counters.
pub const MAX_RECORD_LEN: usize = 128;

/// One encoded record, without the trailing newline
pub type Line = String<MAX_RECORD_LEN>;

/// Errors that can occur while encoding a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordError {
    /// Encoded record does not fit in a [`Line`]
    BufferTooSmall,
    /// Node identifier is empty, too long, or contains characters
    /// outside `[A-Za-z0-9_.-]`
    InvalidNodeId,
}

impl From<core::fmt::Error> for RecordError {
    fn from(_: core::fmt::Error) -> Self {
        RecordError::BufferTooSmall
    }
}

/// Check whether a node identifier can be emitted without escaping
pub fn is_valid_node_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_NODE_ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.'))
}

/// A directional pass record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassRecord<'a> {
    /// Node identifier
    pub node: &'a str,
    /// Crossing direction
    pub dir: Direction,
    /// Milliseconds since boot at emission
    pub ms: u32,
    /// Sequence number, starting at 1
    pub seq: u32,
}

impl PassRecord<'_> {
    /// Encode this record as a single JSON line
    pub fn encode(&self) -> Result<Line, RecordError> {
        if !is_valid_node_id(self.node) {
            return Err(RecordError::InvalidNodeId);
        }

        let mut line = Line::new();
        write!(
            line,
            "{{\"v\":{},\"node\":\"{}\",\"type\":\"pass\",\"dir\":\"{}\",\"ms\":{},\"seq\":{}}}",
            SCHEMA_VERSION,
            self.node,
            self.dir.token(),
            self.ms,
            self.seq
        )?;
        Ok(line)
    }
}

/// A status record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusRecord {
    pub msg: StatusMessage,
}

impl StatusRecord {
    pub fn new(msg: StatusMessage) -> Self {
        Self { msg }
    }

    /// Encode this record as a single JSON line
    pub fn encode(&self) -> Result<Line, RecordError> {
        let mut line = Line::new();
        write!(
            line,
            "{{\"v\":{},\"type\":\"status\",\"msg\":\"{}\"}}",
            SCHEMA_VERSION,
            self.msg.as_str()
        )?;
        Ok(line)
    }
}
