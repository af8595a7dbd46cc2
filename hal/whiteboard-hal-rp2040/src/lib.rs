//! RP2040-specific HAL for the whiteboard plotter firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `whiteboard-hal` traits:
//!
//! - Encoder inputs: an async edge watcher that mirrors the pin level into a
//!   static the encoder can sample from the dispatch task
//! - PWM channels over `embedded_hal::pwm::SetDutyCycle`, plus slice
//!   configuration for the motor bridges and the pen servo
//! - UART configuration conversion

#![no_std]

pub mod gpio;
pub mod pwm;
pub mod uart;

pub use gpio::{EdgeWatcher, PinLevel};
pub use pwm::DutyChannel;
