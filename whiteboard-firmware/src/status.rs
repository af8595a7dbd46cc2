//! Status output for the dispatcher
//!
//! The dispatcher writes status bytes synchronously. They are queued here
//! and sent by the UART TX task.

use defmt::Format;
use whiteboard_hal::UartTx;

use crate::channels::STATUS_QUEUE;

/// The status queue had no room for a byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub struct StatusQueueFull;

/// [`UartTx`] that feeds the status queue
pub struct StatusTx;

impl UartTx for StatusTx {
    type Error = StatusQueueFull;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), StatusQueueFull> {
        for &byte in data {
            STATUS_QUEUE.try_send(byte).map_err(|_| StatusQueueFull)?;
        }
        Ok(())
    }
}
