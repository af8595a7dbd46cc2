//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in whiteboard-core:
//!
//! - Closed-loop DC motor (encoder feedback, H-bridge PWM)
//! - Two-axis motion dispatcher
//! - Pen lift servo

#![no_std]
#![deny(unsafe_code)]

pub mod motion;
pub mod motor;
pub mod pen;

#[cfg(test)]
mod sim;

pub use motion::Motors;
pub use motor::DcMotor;
pub use pen::PenServo;
