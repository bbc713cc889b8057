//! turbanOS Hardware Abstraction Layer (HAL) traits.
//!
//! This crate defines the gateway through which the kernel touches privileged,
//! hardware-observable state. Every side effect of the console (port I/O, the
//! text-mode memory window, interrupt masking, halting) goes through one of
//! these traits, so the logic above them can run against in-memory doubles.
//!
//! None of the operations can fail: hardware I/O at this level has no error
//! channel, and a wrong port number is a caller bug rather than a runtime error.

#![no_std]

/// Single-byte (and the occasional 16-bit) access to numbered I/O ports.
pub trait PortIo {
    /// Reads one byte from `port`.
    fn read_port(&mut self, port: u16) -> u8;
    /// Writes one byte to `port`.
    fn write_port(&mut self, port: u16, value: u8);
    /// Writes a 16-bit word to `port`.
    fn write_port_u16(&mut self, port: u16, value: u16);
}

/// Byte access to a fixed-size memory region anchored at a physical address.
pub trait MemoryWindow {
    /// Reads the byte at `offset`.
    fn read(&self, offset: usize) -> u8;
    /// Writes `value` at `offset`.
    fn write(&mut self, offset: usize, value: u8);
    /// Size of the window in bytes.
    fn len(&self) -> usize;
}

/// Trait for controlling interrupts.
pub trait InterruptController {
    /// Globally enables interrupts.
    fn enable(&mut self);
    /// Globally disables interrupts.
    fn disable(&mut self);
    /// Signals the end of an interrupt to the controller.
    fn end_of_interrupt(&mut self, irq: u8);
}

/// Processor control used by the blocking and terminal paths.
pub trait Cpu {
    /// Suspends until the next interrupt of any kind arrives.
    fn wait_for_interrupt(&mut self);

    /// Coarse busy-wait delay.
    ///
    /// The duration of one iteration is not calibrated against any clock.
    fn spin(&mut self, iterations: u32) {
        for _ in 0..iterations {
            core::hint::spin_loop();
        }
    }

    /// Invalidates the interrupt descriptor table and raises an interrupt.
    ///
    /// On real hardware this does not return. An implementation
    /// that survives it returns normally.
    fn force_triple_fault(&mut self);

    /// Masks interrupts and halts forever.
    fn halt(&mut self) -> !;
}

/// Trait for a text-based console output.
pub trait Console {
    /// Writes a string to the console.
    fn write_str(&mut self, s: &str);
    /// Clears the console screen.
    fn clear(&mut self);
}
