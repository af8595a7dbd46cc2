//! Command identities and the build-time command table
//!
//! Each command is selected by a single letter (case-insensitive) and
//! carries a fixed number of signed 16-bit arguments.

use heapless::Vec;

/// Largest arity of any command in [`COMMAND_TABLE`]
pub const MAX_ARITY: usize = 2;

/// Command identity, as selected by the command letter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandKind {
    /// `P <value>`
    SetParam,
    /// `M <left> <right>`: pen up, then move
    Move,
    /// `D <left> <right>`: pen down, then move
    Draw,
    /// `S`: pen up, hold both axes where they are
    Stop,
}

/// One row of the command table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    /// Upper-case command letter
    pub letter: u8,
    /// Command identity
    pub kind: CommandKind,
}

/// Letter to command mapping, fixed at build time
pub const COMMAND_TABLE: [CommandSpec; 4] = [
    CommandSpec {
        letter: b'P',
        kind: CommandKind::SetParam,
    },
    CommandSpec {
        letter: b'M',
        kind: CommandKind::Move,
    },
    CommandSpec {
        letter: b'D',
        kind: CommandKind::Draw,
    },
    CommandSpec {
        letter: b'S',
        kind: CommandKind::Stop,
    },
];

impl CommandKind {
    /// Look up a command letter (either case)
    pub fn from_letter(byte: u8) -> Option<Self> {
        let letter = byte.to_ascii_uppercase();
        COMMAND_TABLE
            .iter()
            .find(|spec| spec.letter == letter)
            .map(|spec| spec.kind)
    }

    /// Upper-case letter for this command
    pub fn letter(self) -> u8 {
        match self {
            CommandKind::SetParam => b'P',
            CommandKind::Move => b'M',
            CommandKind::Draw => b'D',
            CommandKind::Stop => b'S',
        }
    }

    /// Number of integer arguments this command requires
    pub const fn arity(self) -> usize {
        match self {
            CommandKind::SetParam => 1,
            CommandKind::Move | CommandKind::Draw => 2,
            CommandKind::Stop => 0,
        }
    }

    /// Build the typed command from exactly `arity()` arguments
    ///
    /// Returns `None` if `args` has the wrong length.
    pub fn with_args(self, args: &[i16]) -> Option<Command> {
        if args.len() != self.arity() {
            return None;
        }
        let command = match self {
            CommandKind::SetParam => Command::SetParam { value: args[0] },
            CommandKind::Move => Command::Move {
                left: args[0],
                right: args[1],
            },
            CommandKind::Draw => Command::Draw {
                left: args[0],
                right: args[1],
            },
            CommandKind::Stop => Command::Stop,
        };
        Some(command)
    }
}

/// A fully parsed command
///
/// Every variant carries exactly its own arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Parameter command
    SetParam { value: i16 },
    /// Travel move with the pen lifted (deltas in encoder pulses)
    Move { left: i16, right: i16 },
    /// Drawing move with the pen lowered (deltas in encoder pulses)
    Draw { left: i16, right: i16 },
    /// Lift the pen and stop both axes
    Stop,
}

impl Command {
    /// The command's identity
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::SetParam { .. } => CommandKind::SetParam,
            Command::Move { .. } => CommandKind::Move,
            Command::Draw { .. } => CommandKind::Draw,
            Command::Stop => CommandKind::Stop,
        }
    }

    /// Arguments in wire order
    pub fn args(&self) -> Vec<i16, MAX_ARITY> {
        let mut args = Vec::new();
        match *self {
            Command::SetParam { value } => {
                let _ = args.push(value);
            }
            Command::Move { left, right } | Command::Draw { left, right } => {
                let _ = args.push(left);
                let _ = args.push(right);
            }
            Command::Stop => {}
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_are_case_insensitive() {
        assert_eq!(CommandKind::from_letter(b'p'), Some(CommandKind::SetParam));
        assert_eq!(CommandKind::from_letter(b'P'), Some(CommandKind::SetParam));
        assert_eq!(CommandKind::from_letter(b'm'), Some(CommandKind::Move));
        assert_eq!(CommandKind::from_letter(b'D'), Some(CommandKind::Draw));
        assert_eq!(CommandKind::from_letter(b's'), Some(CommandKind::Stop));
    }

    #[test]
    fn test_unknown_letters() {
        assert_eq!(CommandKind::from_letter(b'x'), None);
        assert_eq!(CommandKind::from_letter(b'1'), None);
        assert_eq!(CommandKind::from_letter(b' '), None);
        assert_eq!(CommandKind::from_letter(0x00), None);
    }

    #[test]
    fn test_table_matches_letter() {
        for spec in COMMAND_TABLE {
            assert_eq!(spec.kind.letter(), spec.letter);
            assert!(spec.kind.arity() <= MAX_ARITY);
        }
    }

    #[test]
    fn test_with_args_checks_arity() {
        assert_eq!(
            CommandKind::Move.with_args(&[456, -789]),
            Some(Command::Move {
                left: 456,
                right: -789
            })
        );
        assert_eq!(CommandKind::Move.with_args(&[1]), None);
        assert_eq!(CommandKind::Stop.with_args(&[]), Some(Command::Stop));
        assert_eq!(CommandKind::SetParam.with_args(&[]), None);
    }

    #[test]
    fn test_args_in_wire_order() {
        let draw = Command::Draw {
            left: -3,
            right: 7,
        };
        assert_eq!(draw.kind(), CommandKind::Draw);
        assert_eq!(draw.args().as_slice(), &[-3, 7]);
        assert!(Command::Stop.args().is_empty());
    }
}
