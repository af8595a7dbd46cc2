//! Command link receive task
//!
//! Hands received bytes to the dispatch task one at a time through the
//! single-byte stash. The next byte is held back until the dispatch task
//! has consumed the previous one, so the stash does not overrun; the UART
//! buffer absorbs bursts meanwhile.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use whiteboard_core::EventKind;

use crate::channels::{EVENTS, RX_READY, STASH, WAKE};

/// Buffer size for UART reads
const RX_BUF_SIZE: usize = 32;

#[embassy_executor::task]
pub async fn serial_rx_task(mut rx: BufferedUartRx) {
    info!("Serial RX task started");

    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        let n = match rx.read(&mut buf).await {
            Ok(n) => n,
            Err(e) => {
                warn!("UART read error: {:?}", e);
                continue;
            }
        };

        for &byte in &buf[..n] {
            while EVENTS.is_pending(EventKind::SerialRx) {
                RX_READY.wait().await;
            }

            if STASH.receive(byte, &EVENTS) {
                warn!("Serial overrun ({} total)", STASH.overruns());
            }
            trace!("RX: {=u8:#x}", byte);
            WAKE.signal(());
        }
    }
}
