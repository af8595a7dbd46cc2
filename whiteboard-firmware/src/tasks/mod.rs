//! Embassy async tasks
//!
//! Each task runs independently and communicates via the statics in
//! `channels`.

pub mod dispatch;
pub mod encoder;
pub mod serial_rx;
pub mod status_tx;

pub use dispatch::{dispatch_task, PwmChannel};
pub use encoder::encoder_task;
pub use serial_rx::serial_rx_task;
pub use status_tx::status_tx_task;
