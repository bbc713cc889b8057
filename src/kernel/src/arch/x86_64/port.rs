//! Raw port I/O gateway.

use turban_hal::PortIo;
use x86_64::instructions::port::Port;

/// Direct `in`/`out` access to the x86 I/O port space.
///
/// Zero-sized; every component that needs ports owns its own copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct X86Ports;

impl PortIo for X86Ports {
    fn read_port(&mut self, port: u16) -> u8 {
        // SAFETY: the kernel runs at ring 0 with full I/O privilege. Callers
        // only name ports of devices this kernel drives.
        unsafe { Port::<u8>::new(port).read() }
    }

    fn write_port(&mut self, port: u16, value: u8) {
        // SAFETY: see `read_port`.
        unsafe { Port::<u8>::new(port).write(value) }
    }

    fn write_port_u16(&mut self, port: u16, value: u16) {
        // SAFETY: see `read_port`.
        unsafe { Port::<u16>::new(port).write(value) }
    }
}
