//! Whiteboard Hardware Abstraction Layer
//!
//! This crate defines the only hardware capabilities the plotter core is
//! allowed to depend on. Chip-specific crates implement them; tests
//! implement them with plain mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  whiteboard-core / whiteboard-drivers    │
//! └──────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌──────────────────────────────────────────┐
//! │  whiteboard-hal (this crate - traits)    │
//! └──────────────────────────────────────────┘
//!                     │
//!                     ▼
//!          ┌───────────────────────┐
//!          │ whiteboard-hal-rp2040 │
//!          └───────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`] - read a pin's current logic level
//! - [`pwm::PwmPin`] - write a PWM duty cycle
//! - [`uart::UartTx`] - serial status output

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod pwm;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::InputPin;
pub use pwm::PwmPin;
pub use uart::{Parity, StopBits, UartConfig, UartTx};
