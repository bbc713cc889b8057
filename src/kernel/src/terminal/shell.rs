//! Command-line shell with input handling.
//!
//! Reads bytes from the keyboard ring, edits a single line and hands it to
//! the command table on enter.

use super::{commands, Machine};
use crate::keyboard::Consumer;
use turban_hal::{Console, Cpu, InterruptController, PortIo};

/// Line buffer size, including room for a terminator.
pub const LINE_CAPACITY: usize = 100;

/// Longest line that can be typed.
const MAX_LINE_LENGTH: usize = LINE_CAPACITY - 1;

const BACKSPACE: u8 = 0x08;

/// Terminal shell with single-line editing.
pub struct Terminal {
    /// Current input, printable ASCII only.
    line: [u8; LINE_CAPACITY],
    /// Number of bytes in `line`.
    len: usize,
}

impl Terminal {
    /// Create a new terminal with an empty line.
    pub const fn new() -> Self {
        Self {
            line: [0; LINE_CAPACITY],
            len: 0,
        }
    }

    /// The line typed so far.
    pub fn input(&self) -> &str {
        // only bytes 32..=126 are ever stored
        core::str::from_utf8(&self.line[..self.len]).unwrap_or("")
    }

    /// Display the shell prompt.
    pub fn prompt<D: Console>(console: &mut D, prompt: &str) {
        console.write_str(prompt);
    }

    /// Applies one input byte to the line, echoing it.
    ///
    /// Returns `true` when the byte completes the line.
    pub fn handle_byte<D: Console>(&mut self, byte: u8, console: &mut D) -> bool {
        match byte {
            b'\n' => {
                console.write_str("\n");
                return true;
            }
            BACKSPACE => {
                if self.len > 0 {
                    self.len -= 1;
                    console.write_str("\x08");
                }
            }
            0x20..=0x7e => {
                if self.len < MAX_LINE_LENGTH {
                    self.line[self.len] = byte;
                    self.len += 1;
                    let mut utf8 = [0; 4];
                    console.write_str(char::from(byte).encode_utf8(&mut utf8));
                }
            }
            _ => {}
        }
        false
    }

    /// Forgets the current line.
    pub fn reset_line(&mut self) {
        self.len = 0;
    }

    /// Handles one byte and, on enter, runs the line and prompts again.
    pub fn step<D, P, I, C>(&mut self, byte: u8, machine: &mut Machine<D, P, I, C>)
    where
        D: Console,
        P: PortIo,
        I: InterruptController,
        C: Cpu,
    {
        if self.handle_byte(byte, &mut machine.display) {
            commands::dispatch(self.input(), machine);
            self.reset_line();
            Self::prompt(&mut machine.display, machine.config.prompt);
        }
    }

    /// The shell's steady state: prompt, read, edit, dispatch, forever.
    pub fn run<D, P, I, C>(&mut self, input: &mut Consumer<'_>, machine: &mut Machine<D, P, I, C>) -> !
    where
        D: Console,
        P: PortIo,
        I: InterruptController,
        C: Cpu,
    {
        Self::prompt(&mut machine.display, machine.config.prompt);
        loop {
            let byte = input.read_char(&mut machine.cpu);
            self.step(byte, machine);
        }
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}
