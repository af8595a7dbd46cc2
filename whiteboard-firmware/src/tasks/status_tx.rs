//! Command link transmit task
//!
//! Sends queued status bytes to the host.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use crate::channels::STATUS_QUEUE;

#[embassy_executor::task]
pub async fn status_tx_task(mut tx: BufferedUartTx) {
    info!("Status TX task started");

    loop {
        let byte = STATUS_QUEUE.receive().await;
        match tx.write_all(&[byte]).await {
            Ok(()) => trace!("TX: {=u8:#x}", byte),
            Err(e) => warn!("Failed to send status byte: {:?}", e),
        }
    }
}
