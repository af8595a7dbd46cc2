//! Shared state between tasks
//!
//! The encoder and serial tasks play the role of interrupt handlers: they
//! only set bits in [`EVENTS`], stash the received byte and wake the
//! dispatch task. Everything else happens in the dispatch task.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use whiteboard_core::{ByteStash, EventRegister};
use whiteboard_hal_rp2040::PinLevel;

/// Status bytes queued for the host
const STATUS_QUEUE_SIZE: usize = 8;

/// Pending events for the dispatch task
pub static EVENTS: EventRegister = EventRegister::new();

/// Last byte received on the command link
pub static STASH: ByteStash = ByteStash::new();

/// Encoder levels mirrored by the encoder tasks
pub static LEFT_LEVEL: PinLevel = PinLevel::new();
pub static RIGHT_LEVEL: PinLevel = PinLevel::new();

/// Wakes the dispatch task after an event has been set
pub static WAKE: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Signalled by the dispatch task when the stashed byte has been consumed
pub static RX_READY: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Status bytes from the dispatch task to the UART TX task
pub static STATUS_QUEUE: Channel<CriticalSectionRawMutex, u8, STATUS_QUEUE_SIZE> = Channel::new();
