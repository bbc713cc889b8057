//! Fail-safe machine reset.
//!
//! The sequence escalates through increasingly blunt ways of restarting the
//! machine and ends, if all of them fail, in a masked halt loop:
//!
//! ```text
//! PrimaryAttempt --controller ready--> pulse reset ----------+
//!       |                                                     |
//!       +--controller busy--> FallbackPorts --> ForcedFault --+--> Halted
//! ```
//!
//! There is no way out of [`ResetState::Halted`].

use crate::config::ResetTiming;
use log::{info, warn};
use turban_common::ControllerStatus;
use turban_hal::{Console, Cpu, PortIo};

/// 8042 keyboard controller status (read) and command (write) port.
const CONTROLLER_PORT: u16 = 0x64;
/// Controller command: pulse the CPU reset line.
const PULSE_RESET: u8 = 0xFE;

/// Alternate reset ports tried when the keyboard controller never gets ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FallbackWrite {
    Word(u16, u16),
    Byte(u16, u8),
}

const FALLBACK_WRITES: [FallbackWrite; 3] = [
    FallbackWrite::Word(0x604, 0x2000),
    FallbackWrite::Word(0xB004, 0x2000),
    // reset control register: full reset, CPU reset
    FallbackWrite::Byte(0xCF9, 0x0E),
];

/// Where the reset sequence currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetState {
    /// Announce, then wait for the keyboard controller and pulse reset.
    PrimaryAttempt,
    /// The controller stayed busy; try the alternate reset ports.
    FallbackPorts,
    /// Invalidate the IDT and raise an interrupt.
    ForcedFault,
    /// Nothing worked.
    Halted,
}

/// Drives the machine through the reset escalation.
pub struct ResetSequencer {
    state: ResetState,
    timing: ResetTiming,
}

impl ResetSequencer {
    /// A sequencer about to make its primary attempt.
    pub fn new(timing: ResetTiming) -> Self {
        ResetSequencer {
            state: ResetState::PrimaryAttempt,
            timing,
        }
    }

    /// Current state.
    pub fn state(&self) -> ResetState {
        self.state
    }

    /// Performs the work of the current state and moves to the next one.
    pub fn step<P, C, D>(&mut self, ports: &mut P, cpu: &mut C, console: &mut D) -> ResetState
    where
        P: PortIo,
        C: Cpu,
        D: Console,
    {
        self.state = match self.state {
            ResetState::PrimaryAttempt => self.primary_attempt(ports, cpu, console),
            ResetState::FallbackPorts => {
                for write in FALLBACK_WRITES {
                    match write {
                        FallbackWrite::Word(port, value) => ports.write_port_u16(port, value),
                        FallbackWrite::Byte(port, value) => ports.write_port(port, value),
                    }
                    cpu.spin(self.timing.fallback_delay);
                }
                ResetState::ForcedFault
            }
            ResetState::ForcedFault => {
                console.write_str("Forcing triple fault...\n");
                info!("reset: forcing triple fault");
                cpu.force_triple_fault();
                ResetState::Halted
            }
            ResetState::Halted => ResetState::Halted,
        };
        self.state
    }

    /// Runs the sequence to the end. Only returns by restarting the machine.
    pub fn run<P, C, D>(mut self, ports: &mut P, cpu: &mut C, console: &mut D) -> !
    where
        P: PortIo,
        C: Cpu,
        D: Console,
    {
        while self.state != ResetState::Halted {
            self.step(ports, cpu, console);
        }
        console.write_str("Reboot failed! System error.\n");
        warn!("reset: every strategy failed, halting");
        cpu.halt()
    }

    fn primary_attempt<P, C, D>(&self, ports: &mut P, cpu: &mut C, console: &mut D) -> ResetState
    where
        P: PortIo,
        C: Cpu,
        D: Console,
    {
        console.write_str("Rebooting system...\n");
        cpu.spin(self.timing.announce_delay);

        if self.wait_for_controller(ports, cpu) {
            info!("reset: pulsing reset line through keyboard controller");
            ports.write_port(CONTROLLER_PORT, PULSE_RESET);
            cpu.spin(self.timing.pulse_delay);
            ResetState::Halted
        } else {
            warn!(
                "reset: keyboard controller busy after {} polls",
                self.timing.controller_poll_attempts
            );
            console.write_str("Keyboard controller not responding. Trying alternative methods...\n");
            ResetState::FallbackPorts
        }
    }

    /// Polls until the controller's input buffer is empty or the budget runs out.
    fn wait_for_controller<P: PortIo, C: Cpu>(&self, ports: &mut P, cpu: &mut C) -> bool {
        for _ in 0..self.timing.controller_poll_attempts {
            let status = ControllerStatus::from_bits_retain(ports.read_port(CONTROLLER_PORT));
            if !status.contains(ControllerStatus::INPUT_FULL) {
                return true;
            }
            cpu.spin(self.timing.controller_poll_delay);
        }
        false
    }
}
