//! Record uplink task
//!
//! Encodes outbound records as JSON lines and writes them to the UART.
//! A failed write drops that record; the monitor never sees it. Writes go
//! through the buffered TX half, so draining the line yields to the
//! monitor task.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;

use beamgate_hal::AsyncUartTx;
use beamgate_hal_rp2040::uart::UplinkTx;
use beamgate_protocol::{Line, PassRecord, RecordError, StatusRecord};

use crate::channels::{Outbound, RECORD_CHANNEL};

/// Concrete uplink type (embassy tasks cannot be generic)
pub type Uplink = UplinkTx<BufferedUartTx>;

/// Uplink task - sole owner of the UART
#[embassy_executor::task]
pub async fn uplink_task(node_id: &'static str, mut tx: Uplink) {
    info!("Uplink task started");

    loop {
        let record = RECORD_CHANNEL.receive().await;

        let line = match encode(node_id, &record) {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to encode {}: {:?}", record, e);
                continue;
            }
        };

        if tx.write_line(line.as_str()).await.is_err() {
            warn!("Uplink write failed, dropped {}", record);
        } else {
            trace!("Sent {}", record);
        }
    }
}

fn encode(node_id: &str, record: &Outbound) -> Result<Line, RecordError> {
    match record {
        Outbound::Status(msg) => StatusRecord::new(*msg).encode(),
        Outbound::Pass(event) => PassRecord {
            node: node_id,
            dir: event.direction,
            ms: event.ms,
            seq: event.seq,
        }
        .encode(),
    }
}
