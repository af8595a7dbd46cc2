//! Status bytes sent back to the host

/// Both axes have stopped after a move
pub const STATUS_MOTION_COMPLETE: u8 = b'1';

/// Messages the firmware emits on the serial link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    /// The last move finished (or stalled); both speeds read zero
    MotionComplete,
}

impl Status {
    /// Parse a status from its wire byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            STATUS_MOTION_COMPLETE => Some(Status::MotionComplete),
            _ => None,
        }
    }

    /// Convert to wire byte
    pub fn to_byte(self) -> u8 {
        match self {
            Status::MotionComplete => STATUS_MOTION_COMPLETE,
        }
    }
}
