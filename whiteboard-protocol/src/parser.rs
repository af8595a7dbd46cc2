//! Byte-at-a-time command parser
//!
//! Grammar: `LETTER (SEP INT)*` where the letter fixes how many integers
//! follow, `INT := ['-'] DIGIT+` and `SEP` is one or more whitespace bytes.
//!
//! A token is only committed on the byte *after* its last digit, so a
//! command completes on the separator that follows its final argument, even
//! at end of line:
//!
//! ```text
//! byte:     M  ␠  4  5  6  ␠  -  7  8  9  ␠
//! handle:   f  f  f  f  f  f  f  f  f  f  T
//! ```
//!
//! Zero-argument commands complete on the letter itself.
//!
//! Bytes that cannot start a command are dropped while waiting for a
//! letter, which resynchronizes the stream after line noise. A recognized
//! letter in the middle of a command abandons the partial command and starts
//! the new one. Control bytes other than whitespace (NUL, etc.) are dropped
//! in every state.
//!
//! Arguments accumulate with wrapping `i16` arithmetic; out-of-range values
//! wrap and are not reported.

use crate::command::{Command, CommandKind, MAX_ARITY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Discarding bytes until a command letter arrives
    AwaitingLetter,
    /// Collecting the arguments of `Parser::kind`
    Arguments,
}

/// Command-language state machine
#[derive(Debug, Clone)]
pub struct Parser {
    state: ParseState,
    /// Letter of the command in progress (or last completed)
    kind: Option<CommandKind>,
    /// Committed arguments
    args: [i16; MAX_ARITY],
    /// Index of the argument currently being filled
    index: usize,
    /// Partial numeric token
    value: i16,
    negative: bool,
    seen_digit: bool,
    /// Last completed command
    completed: Option<Command>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Create a parser waiting for a command letter
    pub const fn new() -> Self {
        Self {
            state: ParseState::AwaitingLetter,
            kind: None,
            args: [0; MAX_ARITY],
            index: 0,
            value: 0,
            negative: false,
            seen_digit: false,
            completed: None,
        }
    }

    /// Drop any partial command and wait for a letter
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Feed one byte
    ///
    /// Returns `true` exactly when this byte completed a command; the result
    /// is then available from [`Parser::command`] until the next letter
    /// starts a new command.
    pub fn handle(&mut self, byte: u8) -> bool {
        if is_noise(byte) {
            return false;
        }

        if let Some(kind) = CommandKind::from_letter(byte) {
            return self.begin(kind);
        }

        match self.state {
            ParseState::AwaitingLetter => false,
            ParseState::Arguments => match byte {
                b'0'..=b'9' => {
                    let digit = (byte - b'0') as i16;
                    self.value = self.value.wrapping_mul(10).wrapping_add(digit);
                    self.seen_digit = true;
                    false
                }
                b'-' if !self.seen_digit => {
                    self.negative = true;
                    false
                }
                _ => self.end_token(),
            },
        }
    }

    /// Feed one byte, returning the command it completed (if any)
    pub fn feed(&mut self, byte: u8) -> Option<Command> {
        if self.handle(byte) {
            self.completed
        } else {
            None
        }
    }

    /// Feed several bytes, returning the first command completed
    ///
    /// Bytes after the completing byte are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Option<Command> {
        bytes.iter().find_map(|&byte| self.feed(byte))
    }

    /// Last completed command
    ///
    /// Cleared as soon as the next command letter is received.
    pub fn command(&self) -> Option<Command> {
        self.completed
    }

    /// Identity of the command in progress, or of the last one completed
    ///
    /// Set as soon as the letter is seen.
    pub fn command_kind(&self) -> Option<CommandKind> {
        self.kind
    }

    /// Check if the parser is between commands
    pub fn is_idle(&self) -> bool {
        self.state == ParseState::AwaitingLetter
    }

    /// Index of the argument currently being filled
    pub fn arg_index(&self) -> usize {
        self.index
    }

    fn begin(&mut self, kind: CommandKind) -> bool {
        self.kind = Some(kind);
        self.completed = None;
        self.index = 0;
        self.clear_token();

        if kind.arity() == 0 {
            return self.complete(kind);
        }

        self.state = ParseState::Arguments;
        false
    }

    /// Commit the current token if it holds a digit
    fn end_token(&mut self) -> bool {
        if !self.seen_digit {
            // Repeated separators, or a sign with no digits
            self.negative = false;
            return false;
        }

        let value = if self.negative {
            self.value.wrapping_neg()
        } else {
            self.value
        };
        self.args[self.index] = value;
        self.index += 1;
        self.clear_token();

        match self.kind {
            Some(kind) if self.index >= kind.arity() => self.complete(kind),
            Some(_) => false,
            None => {
                self.state = ParseState::AwaitingLetter;
                false
            }
        }
    }

    fn complete(&mut self, kind: CommandKind) -> bool {
        self.state = ParseState::AwaitingLetter;
        self.completed = kind.with_args(&self.args[..kind.arity()]);
        self.completed.is_some()
    }

    fn clear_token(&mut self) {
        self.value = 0;
        self.negative = false;
        self.seen_digit = false;
    }
}

/// Control bytes other than whitespace
fn is_noise(byte: u8) -> bool {
    byte.is_ascii_control() && !matches!(byte, b'\t' | b'\n' | b'\r')
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::format;
    use std::vec::Vec;

    /// Feed every byte, asserting only the last one completes
    fn feed_line(parser: &mut Parser, line: &[u8]) -> Command {
        let (last, head) = line.split_last().unwrap();
        for &byte in head {
            assert!(!parser.handle(byte), "byte {:?} completed early", byte as char);
        }
        assert!(parser.handle(*last), "final byte did not complete");
        parser.command().unwrap()
    }

    #[test]
    fn test_param_command() {
        let mut parser = Parser::new();

        assert!(!parser.handle(b'p'));
        assert_eq!(parser.command_kind(), Some(CommandKind::SetParam));
        assert!(!parser.handle(b' '));
        assert!(!parser.handle(b'1'));
        assert!(!parser.handle(b'2'));
        assert!(!parser.handle(b'3'));
        assert!(parser.handle(b' '));
        assert_eq!(parser.command(), Some(Command::SetParam { value: 123 }));
    }

    #[test]
    fn test_move_command_after_param() {
        let mut parser = Parser::new();
        feed_line(&mut parser, b"p 123 ");

        // The trailing NUL of a C string is line noise, not a terminator
        for &byte in b"M 456 -789\0" {
            assert!(!parser.handle(byte));
        }
        assert!(parser.handle(b' '));
        assert_eq!(parser.command_kind(), Some(CommandKind::Move));
        assert_eq!(
            parser.command(),
            Some(Command::Move {
                left: 456,
                right: -789
            })
        );
    }

    #[test]
    fn test_completion_needs_trailing_separator() {
        let mut parser = Parser::new();
        for &byte in b"D 10 20" {
            assert!(!parser.handle(byte));
        }
        assert_eq!(parser.command(), None);
        assert!(!parser.is_idle());

        assert_eq!(
            parser.feed(b'\n'),
            Some(Command::Draw {
                left: 10,
                right: 20
            })
        );
        assert!(parser.is_idle());
    }

    #[test]
    fn test_repeated_separators_collapse() {
        let mut parser = Parser::new();
        let cmd = feed_line(&mut parser, b"m   1 \t\r\n  2\r");
        assert_eq!(cmd, Command::Move { left: 1, right: 2 });
    }

    #[test]
    fn test_resync_after_garbage() {
        let mut parser = Parser::new();
        for &byte in b"\xff\x00#!123 -9 zz?" {
            assert!(!parser.handle(byte));
        }
        assert!(parser.is_idle());

        let cmd = feed_line(&mut parser, b"M 5 6 ");
        assert_eq!(cmd, Command::Move { left: 5, right: 6 });
    }

    #[test]
    fn test_letter_mid_command_restarts() {
        let mut parser = Parser::new();
        for &byte in b"M 12 3" {
            assert!(!parser.handle(byte));
        }

        // 'p' abandons the move, including the partial "3"
        let cmd = feed_line(&mut parser, b"p 7 ");
        assert_eq!(cmd, Command::SetParam { value: 7 });
    }

    #[test]
    fn test_zero_arity_completes_on_letter() {
        let mut parser = Parser::new();
        assert!(parser.handle(b's'));
        assert_eq!(parser.command(), Some(Command::Stop));
        assert!(parser.is_idle());

        // And aborts anything in progress
        for &byte in b"D 1 " {
            assert!(!parser.handle(byte));
        }
        assert_eq!(parser.feed(b'S'), Some(Command::Stop));
        assert_eq!(parser.arg_index(), 0);
    }

    #[test]
    fn test_new_letter_clears_result() {
        let mut parser = Parser::new();
        feed_line(&mut parser, b"p 1 ");
        assert!(parser.command().is_some());

        assert!(!parser.handle(b'm'));
        assert_eq!(parser.command(), None);
        assert_eq!(parser.command_kind(), Some(CommandKind::Move));
    }

    #[test]
    fn test_punctuation_terminates_token() {
        let mut parser = Parser::new();
        let cmd = feed_line(&mut parser, b"M 4,5;");
        assert_eq!(cmd, Command::Move { left: 4, right: 5 });
    }

    #[test]
    fn test_minus_after_digits_terminates() {
        let mut parser = Parser::new();
        // The '-' ends "3" and is consumed, so "4" stays positive
        let cmd = feed_line(&mut parser, b"M 3-4 ");
        assert_eq!(cmd, Command::Move { left: 3, right: 4 });
    }

    #[test]
    fn test_dangling_sign_is_dropped() {
        let mut parser = Parser::new();
        let cmd = feed_line(&mut parser, b"P - 8 ");
        assert_eq!(cmd, Command::SetParam { value: 8 });
    }

    #[test]
    fn test_extremes_and_wrapping() {
        let mut parser = Parser::new();
        let cmd = feed_line(&mut parser, b"M 32767 -32768 ");
        assert_eq!(
            cmd,
            Command::Move {
                left: i16::MAX,
                right: i16::MIN
            }
        );

        // 32768 does not fit and wraps
        let cmd = feed_line(&mut parser, b"P 32768 ");
        assert_eq!(cmd, Command::SetParam { value: i16::MIN });
    }

    #[test]
    fn test_feed_bytes_stops_at_completion() {
        let mut parser = Parser::new();
        let input = b"p 9 m 1";
        assert_eq!(
            parser.feed_bytes(input),
            Some(Command::SetParam { value: 9 })
        );
        // "m 1" was not consumed
        assert!(parser.is_idle());
    }

    #[test]
    fn test_reset() {
        let mut parser = Parser::new();
        for &byte in b"M 1 2" {
            parser.handle(byte);
        }
        parser.reset();
        assert!(parser.is_idle());
        assert_eq!(parser.command_kind(), None);
        assert!(!parser.handle(b' '));
    }

    fn is_letter(byte: u8) -> bool {
        CommandKind::from_letter(byte).is_some()
    }

    proptest! {
        #[test]
        fn prop_move_roundtrip(left in any::<i16>(), right in any::<i16>(), upper in any::<bool>()) {
            let letter = if upper { 'M' } else { 'm' };
            let line = format!("{} {} {} ", letter, left, right);
            let mut parser = Parser::new();
            let cmd = feed_line(&mut parser, line.as_bytes());
            prop_assert_eq!(cmd, Command::Move { left, right });
        }

        #[test]
        fn prop_garbage_prefix_resyncs(
            garbage in proptest::collection::vec(any::<u8>().prop_filter("not a letter", |b| !is_letter(*b)), 0..32),
            value in any::<i16>(),
        ) {
            let mut parser = Parser::new();
            for &byte in &garbage {
                prop_assert!(!parser.handle(byte));
            }
            let line = format!("P {} ", value);
            let cmd = feed_line(&mut parser, line.as_bytes());
            prop_assert_eq!(cmd, Command::SetParam { value });
        }

        #[test]
        fn prop_only_last_byte_completes(left in any::<i16>(), right in any::<i16>()) {
            let line = format!("D {} {}\n", left, right);
            let mut parser = Parser::new();
            let completions: Vec<bool> = line.bytes().map(|b| parser.handle(b)).collect();
            let (last, head) = completions.split_last().unwrap();
            prop_assert!(*last);
            prop_assert!(head.iter().all(|done| !done));
        }
    }
}
