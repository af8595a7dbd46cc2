//! Encoder edge tasks
//!
//! One task per motor. Each edge only mirrors the new level, marks the
//! axis as pending and wakes the dispatch task; counting happens there.

use defmt::*;

use whiteboard_core::EventKind;
use whiteboard_hal_rp2040::EdgeWatcher;

use crate::channels::{EVENTS, WAKE};

#[embassy_executor::task(pool_size = 2)]
pub async fn encoder_task(mut watcher: EdgeWatcher<'static>, edge: EventKind) {
    info!("Encoder task started ({:?})", edge);

    loop {
        let high = watcher.wait_for_edge().await;
        if EVENTS.set(edge) {
            trace!("{:?} coalesced", edge);
        } else {
            trace!("{:?} -> {}", edge, high);
        }
        WAKE.signal(());
    }
}
