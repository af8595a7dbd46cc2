//! Motor driver implementations
//!
//! - DC gear motors with single-channel encoder feedback on an H-bridge

pub mod dc;

pub use dc::DcMotor;
