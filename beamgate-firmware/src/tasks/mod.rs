//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod monitor;
pub mod uplink;

pub use monitor::monitor_task;
pub use uplink::{uplink_task, Uplink};
