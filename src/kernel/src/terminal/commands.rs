//! Built-in shell commands.
//!
//! Command names are matched exactly and case-sensitively against the whole
//! line. There are no arguments.

use super::{ConsoleWriter, Machine};
use crate::display::{HEIGHT, WIDTH};
use crate::reset::ResetSequencer;
use crate::rtc::Rtc;
use core::fmt::Write;
use log::debug;
use turban_common::CommandError;
use turban_hal::{Console, Cpu, InterruptController, PortIo};

/// Shell command types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// List the commands.
    Help,
    /// Clear the screen.
    Clear,
    /// Show system information.
    Fetch,
    /// Show the current time.
    Time,
    /// Show the current date.
    Date,
    /// Restart the machine.
    Reboot,
    /// An empty line; does nothing.
    Empty,
}

impl Command {
    /// Parses a complete input line.
    pub fn parse(line: &str) -> Result<Command, CommandError<'_>> {
        match line {
            "help" => Ok(Command::Help),
            "clear" => Ok(Command::Clear),
            "fetch" => Ok(Command::Fetch),
            "time" => Ok(Command::Time),
            "date" => Ok(Command::Date),
            "reboot" => Ok(Command::Reboot),
            "" => Ok(Command::Empty),
            other => Err(CommandError::Unknown(other)),
        }
    }

    /// Runs the command against the machine.
    ///
    /// [`Command::Reboot`] does not return.
    pub fn execute<D, P, I, C>(self, machine: &mut Machine<D, P, I, C>)
    where
        D: Console,
        P: PortIo,
        I: InterruptController,
        C: Cpu,
    {
        match self {
            Command::Help => cmd_help(&mut machine.display),
            Command::Clear => machine.display.clear(),
            Command::Fetch => cmd_fetch(&mut machine.display),
            Command::Time => {
                let reading = Rtc::new(&mut machine.ports, &mut machine.interrupts).read();
                let zone = machine.config.timezone;
                let _ = writeln!(
                    ConsoleWriter(&mut machine.display),
                    "Current time: {} {}",
                    reading.with_hour_offset(zone.offset_hours).time(),
                    zone.label
                );
            }
            Command::Date => {
                let reading = Rtc::new(&mut machine.ports, &mut machine.interrupts).read();
                let _ = writeln!(
                    ConsoleWriter(&mut machine.display),
                    "Current date: {}",
                    reading.date()
                );
            }
            Command::Reboot => ResetSequencer::new(machine.config.reset).run(
                &mut machine.ports,
                &mut machine.cpu,
                &mut machine.display,
            ),
            Command::Empty => {}
        }
    }
}

/// Parses `line` and runs it, reporting unknown commands on the console.
pub fn dispatch<D, P, I, C>(line: &str, machine: &mut Machine<D, P, I, C>)
where
    D: Console,
    P: PortIo,
    I: InterruptController,
    C: Cpu,
{
    match Command::parse(line) {
        Ok(command) => {
            debug!("shell: {:?}", command);
            command.execute(machine);
        }
        Err(err) => {
            debug!("shell: rejected {:?}", line);
            let _ = writeln!(ConsoleWriter(&mut machine.display), "{}", err);
        }
    }
}

/// Display help information.
fn cmd_help<D: Console>(console: &mut D) {
    console.write_str("Available commands:\n");
    console.write_str("  help   - show this help\n");
    console.write_str("  clear  - clear the screen\n");
    console.write_str("  fetch  - system information\n");
    console.write_str("  time   - show current time\n");
    console.write_str("  date   - show current date\n");
    console.write_str("  reboot - reboot the system\n");
}

/// Release shown by `fetch`: major and minor only.
const RELEASE: &str = concat!(
    env!("CARGO_PKG_VERSION_MAJOR"),
    ".",
    env!("CARGO_PKG_VERSION_MINOR")
);

/// Show system information.
fn cmd_fetch<D: Console>(console: &mut D) {
    let mut out = ConsoleWriter(console);
    let _ = writeln!(out, "turbanOS v{} - development OS", RELEASE);
    let _ = writeln!(out, "author (github.com/mark-net)");
    let _ = writeln!(out, "VGA: {}x{} text mode", WIDTH, HEIGHT);
    let _ = writeln!(out, "memory: 1Mb+ (kernel placed above 1MB by bootloader 0.9)");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{test_machine, IrqEvent};

    #[test]
    fn parse_is_exact_and_case_sensitive() {
        assert_eq!(Command::parse("help"), Ok(Command::Help));
        assert_eq!(Command::parse("reboot"), Ok(Command::Reboot));
        assert_eq!(Command::parse(""), Ok(Command::Empty));
        assert_eq!(Command::parse("HELP"), Err(CommandError::Unknown("HELP")));
        assert_eq!(Command::parse("help "), Err(CommandError::Unknown("help ")));
        assert_eq!(Command::parse(" time"), Err(CommandError::Unknown(" time")));
    }

    #[test]
    fn help_lists_six_commands() {
        let mut machine = test_machine();
        dispatch("help", &mut machine);
        let output = machine.display.output();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "Available commands:");
        for (line, name) in lines[1..]
            .iter()
            .zip(["help", "clear", "fetch", "time", "date", "reboot"])
        {
            assert!(line.trim_start().starts_with(name), "{}", line);
        }
    }

    #[test]
    fn empty_line_prints_nothing() {
        let mut machine = test_machine();
        dispatch("", &mut machine);
        assert_eq!(machine.display.output(), "");
    }

    #[test]
    fn unknown_command_is_echoed() {
        let mut machine = test_machine();
        dispatch("bogus", &mut machine);
        assert_eq!(
            machine.display.output(),
            "Unknown command: 'bogus'. Type 'help' for a list of commands.\n"
        );
    }

    #[test]
    fn clear_clears_the_console() {
        let mut machine = test_machine();
        dispatch("clear", &mut machine);
        assert_eq!(machine.display.clears(), 1);
    }

    #[test]
    fn fetch_prints_title_author_display_and_memory() {
        let mut machine = test_machine();
        dispatch("fetch", &mut machine);
        let lines: Vec<&str> = machine.display.output().lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "turbanOS v0.3 - development OS");
        assert_eq!(lines[1], "author (github.com/mark-net)");
        assert_eq!(lines[2], "VGA: 80x25 text mode");
        assert!(lines[3].starts_with("memory: 1Mb+"));
    }

    #[test]
    fn time_applies_timezone_offset() {
        let mut machine = test_machine();
        machine.ports.set_clock(0x21, 0x07, 0x59, 0x31, 0x12, 0x25);
        dispatch("time", &mut machine);
        assert_eq!(machine.display.output(), "Current time: 00:07:59 MSK\n");
        assert_eq!(
            machine.interrupts.events(),
            &[IrqEvent::Disable, IrqEvent::Enable]
        );
    }

    #[test]
    fn time_pads_single_digit_hour() {
        let mut machine = test_machine();
        machine.ports.set_clock(0x05, 0x00, 0x00, 0x01, 0x01, 0x00);
        dispatch("time", &mut machine);
        assert_eq!(machine.display.output(), "Current time: 08:00:00 MSK\n");
    }

    #[test]
    fn date_is_day_month_year() {
        let mut machine = test_machine();
        machine.ports.set_clock(0x23, 0x00, 0x00, 0x18, 0x10, 0x26);
        dispatch("date", &mut machine);
        assert_eq!(machine.display.output(), "Current date: 18.10.2026\n");
    }
}
