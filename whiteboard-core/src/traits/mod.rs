//! Hardware abstraction traits
//!
//! These traits define the interface between the main loop and the motor,
//! pen and dispatcher implementations in `whiteboard-drivers`.

pub mod motion;
pub mod motor;
pub mod pen;

pub use motion::{MotionDispatcher, MoveRequest};
pub use motor::{Axis, Direction, MotorController};
pub use pen::{PenActuator, PenState};
