//! Interrupt-to-main-loop event signalling
//!
//! Interrupt handlers only record that something happened: an encoder edge
//! on either motor, or a received serial byte. The main loop picks the
//! pending events up and does the real work outside interrupt context.

pub mod register;
pub mod stash;

pub use register::{EventKind, EventRegister, EventSet};
pub use stash::ByteStash;
