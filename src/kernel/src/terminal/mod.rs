//! Terminal subsystem for turbanOS.
//!
//! Provides the interactive console on top of the display and keyboard.
//!
//! # Architecture
//!
//! - `shell`: line editing and the read-dispatch loop
//! - `commands`: the built-in command table

pub mod commands;
pub mod shell;

pub use commands::Command;
pub use shell::Terminal;

use crate::config::KernelConfig;
use core::fmt;
use turban_hal::Console;

/// Everything a command may touch.
///
/// The keyboard ring is not part of it: only the shell loop reads it.
pub struct Machine<D, P, I, C> {
    /// Text output surface.
    pub display: D,
    /// Port gateway for the clock and reset hardware.
    pub ports: P,
    /// Interrupt flag control.
    pub interrupts: I,
    /// Processor control.
    pub cpu: C,
    /// Kernel settings.
    pub config: KernelConfig,
}

/// Adapts a [`Console`] to `core::fmt::Write` for formatted output.
pub(crate) struct ConsoleWriter<'a, D>(pub(crate) &'a mut D);

impl<D: Console> fmt::Write for ConsoleWriter<'_, D> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.write_str(s);
        Ok(())
    }
}
