//! CMOS real-time clock reader.
//!
//! Registers are selected through the index port and read from the data
//! port. Values are packed BCD. Reading waits for the update-in-progress bit
//! of status register A to clear; that wait has no time-out, so a clock stuck
//! mid-update hangs the caller.

use log::debug;
use turban_common::{ClockReading, RtcStatusA};
use turban_hal::{InterruptController, PortIo};

/// CMOS register index port.
const CMOS_ADDRESS: u16 = 0x70;
/// CMOS data port.
const CMOS_DATA: u16 = 0x71;

/// CMOS register indices.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Register {
    Seconds = 0x00,
    Minutes = 0x02,
    Hours = 0x04,
    Day = 0x07,
    Month = 0x08,
    Year = 0x09,
    StatusA = 0x0A,
}

/// Reads the clock registers through the port gateway.
pub struct Rtc<'a, P, I> {
    ports: &'a mut P,
    interrupts: &'a mut I,
}

impl<'a, P: PortIo, I: InterruptController> Rtc<'a, P, I> {
    /// Borrows the ports and the interrupt flag for one reading.
    pub fn new(ports: &'a mut P, interrupts: &'a mut I) -> Self {
        Rtc { ports, interrupts }
    }

    /// Takes a fresh reading of all date and time fields.
    ///
    /// Interrupts are masked from the update wait until the last register is
    /// read, and unconditionally re-enabled afterwards.
    pub fn read(&mut self) -> ClockReading {
        self.interrupts.disable();
        self.wait_for_update();
        let hour = self.register(Register::Hours);
        let minute = self.register(Register::Minutes);
        let second = self.register(Register::Seconds);
        let day = self.register(Register::Day);
        let month = self.register(Register::Month);
        let year = self.register(Register::Year);
        self.interrupts.enable();

        debug!(
            "rtc raw: {:02x}:{:02x}:{:02x} {:02x}.{:02x}.{:02x}",
            hour, minute, second, day, month, year
        );
        ClockReading::from_bcd(hour, minute, second, day, month, year)
    }

    fn wait_for_update(&mut self) {
        while RtcStatusA::from_bits_retain(self.register(Register::StatusA))
            .contains(RtcStatusA::UPDATE_IN_PROGRESS)
        {
            core::hint::spin_loop();
        }
    }

    fn register(&mut self, register: Register) -> u8 {
        self.ports.write_port(CMOS_ADDRESS, register as u8);
        self.ports.read_port(CMOS_DATA)
    }
}
