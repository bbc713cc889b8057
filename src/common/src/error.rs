//! Shell error types for turbanOS.

use core::fmt;

/// Errors produced while turning an input line into a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CommandError<'a> {
    /// The line does not name any built-in command.
    Unknown(&'a str),
}

impl fmt::Display for CommandError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Unknown(text) => write!(
                f,
                "Unknown command: '{}'. Type 'help' for a list of commands.",
                text
            ),
        }
    }
}
