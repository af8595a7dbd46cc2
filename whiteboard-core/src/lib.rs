//! Board-agnostic core logic for the whiteboard plotter firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Encoder pulse counting
//! - Interrupt-to-main-loop event register and receive stash
//! - The main dispatch loop (parser → motion, motion complete → status)
//! - Motor, pen and motion dispatcher traits
//! - Configuration types and the `whiteboard.toml` parser

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod dispatch;
pub mod encoder;
pub mod event;
pub mod traits;

pub use dispatch::{Dispatcher, Handled, LoopState};
pub use encoder::Encoder;
pub use event::{ByteStash, EventKind, EventRegister, EventSet};
