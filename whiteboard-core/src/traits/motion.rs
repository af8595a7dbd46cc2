//! Motion dispatcher contract
//!
//! The dispatcher is what the main loop talks to. It fans a command out to
//! both motors and the pen, and reports per-axis speed so the loop can tell
//! when a move has finished.

use super::motor::Axis;
use super::pen::PenState;

/// A coordinated two-axis move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MoveRequest {
    /// Left spool delta in encoder pulses
    pub left: i16,
    /// Right spool delta in encoder pulses
    pub right: i16,
    /// Pen position for the duration of the move
    pub pen: PenState,
}

impl MoveRequest {
    /// Move with the pen lifted
    pub const fn travel(left: i16, right: i16) -> Self {
        Self {
            left,
            right,
            pen: PenState::Up,
        }
    }

    /// Move with the pen on the board
    pub const fn draw(left: i16, right: i16) -> Self {
        Self {
            left,
            right,
            pen: PenState::Down,
        }
    }

    /// Delta for one axis
    pub fn delta(&self, axis: Axis) -> i16 {
        match axis {
            Axis::Left => self.left,
            Axis::Right => self.right,
        }
    }
}

/// Two-motor motion dispatcher
pub trait MotionDispatcher {
    /// Set the pen and start both motors on a new move
    ///
    /// Deltas are added to the previous targets, not to the measured
    /// positions.
    fn move_axes(&mut self, request: MoveRequest);

    /// Lift the pen and stop both motors where they are
    ///
    /// The next move is relative to the measured positions.
    fn hold(&mut self);

    /// Advance the control loop of one axis after its encoder moved
    fn check(&mut self, axis: Axis);

    /// Commanded drive level of one axis, signed by direction
    fn speed(&self, axis: Axis) -> i16;

    /// True when both motors have reached their targets
    fn is_stopped(&self) -> bool {
        self.speed(Axis::Left) == 0 && self.speed(Axis::Right) == 0
    }
}
