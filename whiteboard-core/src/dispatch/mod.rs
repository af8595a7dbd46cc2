//! Main dispatch loop
//!
//! Services pending events one at a time, highest priority first: encoder
//! edges advance the matching motor's control loop, serial bytes are fed to
//! the command parser and completed commands go to the motion dispatcher.
//! When a move has finished, the status byte is written back to the host.

pub mod dispatcher;
pub mod state;

pub use dispatcher::{DispatchStats, Dispatcher, Handled};
pub use state::LoopState;
