//! x86_64 architecture support.
//!
//! Port I/O, the VGA text window, the 8259 PICs, the IDT and the COM1
//! serial port.

pub mod interrupts;
pub mod pic;
pub mod port;
pub mod serial;
pub mod vga;

pub use pic::Pic8259;
pub use port::X86Ports;
pub use vga::{Color, VgaWindow};

use turban_hal::Cpu;
use x86_64::instructions::{interrupts as cpu_interrupts, tables};
use x86_64::structures::DescriptorTablePointer;
use x86_64::VirtAddr;

/// Halts the CPU until the next interrupt.
///
/// Used in idle loops to reduce power consumption.
#[inline]
pub fn hlt() {
    x86_64::instructions::hlt();
}

/// Masks interrupts and halts the CPU in an infinite loop.
///
/// Used after unrecoverable errors (panics, failed reset).
pub fn halt_loop() -> ! {
    cpu_interrupts::disable();
    loop {
        hlt();
    }
}

/// The boot processor.
#[derive(Debug, Clone, Copy, Default)]
pub struct X86Cpu;

impl Cpu for X86Cpu {
    fn wait_for_interrupt(&mut self) {
        hlt();
    }

    fn force_triple_fault(&mut self) {
        cpu_interrupts::disable();
        let invalid = DescriptorTablePointer {
            limit: 0,
            base: VirtAddr::new(0),
        };
        // SAFETY: loads an empty IDT on purpose. The interrupt raised next
        // cannot be delivered, its double fault cannot be delivered either, and
        // the processor resets. Nothing after this point relies on the IDT.
        unsafe {
            tables::lidt(&invalid);
            core::arch::asm!("int 0x00", options(nomem));
        }
    }

    fn halt(&mut self) -> ! {
        halt_loop()
    }
}
