//! Whiteboard serial command language
//!
//! The host drives the plotter with short ASCII commands, one letter plus
//! a fixed number of signed integers:
//!
//! ```text
//! p 123␠          parameter
//! M 456 -789␠     pen up, move left/right wheels by encoder pulses
//! D 10 20␠        pen down, move
//! S               pen up, stop
//! ```
//!
//! The firmware answers with a single `'1'` whenever a move has finished.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod command;
pub mod parser;
pub mod status;

pub use command::{Command, CommandKind, CommandSpec, COMMAND_TABLE, MAX_ARITY};
pub use parser::Parser;
pub use status::{Status, STATUS_MOTION_COMPLETE};
