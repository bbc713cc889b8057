//! Support for the primary and secondary 8259 Programmable Interrupt Controllers (PICs).

use pic8259::ChainedPics;
use spin::Mutex;
use turban_hal::InterruptController;
use x86_64::instructions::interrupts;

/// The offset of the first PIC (master).
///
/// IRQs 0..7 are mapped to interrupts 32..39.
pub const PIC_1_OFFSET: u8 = 32;

/// The offset of the second PIC (slave).
///
/// IRQs 8..15 are mapped to interrupts 40..47.
pub const PIC_2_OFFSET: u8 = PIC_1_OFFSET + 8;

/// The global instance of the chained PICs.
pub static PICS: Mutex<ChainedPics> =
    Mutex::new(unsafe { ChainedPics::new(PIC_1_OFFSET, PIC_2_OFFSET) });

/// Possible IRQ indices.
#[derive(Debug, Clone, Copy)]
#[repr(u8)]
pub enum InterruptIndex {
    /// Timer interrupt.
    Timer = PIC_1_OFFSET,
    /// Keyboard interrupt.
    Keyboard,
}

impl InterruptIndex {
    /// IRQ line number on the primary PIC.
    pub fn irq(self) -> u8 {
        self as u8 - PIC_1_OFFSET
    }

    /// Returns the internal usize value.
    pub fn as_usize(self) -> usize {
        usize::from(self as u8)
    }
}

/// Remaps and unmasks the PICs.
pub fn init() {
    // SAFETY: the offsets place hardware IRQs above the CPU exception vectors,
    // and handlers for every unmasked line are installed in the IDT first.
    unsafe {
        PICS.lock().initialize();
    }
}

/// The interrupt flag of the boot processor plus the chained PICs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pic8259;

impl InterruptController for Pic8259 {
    fn enable(&mut self) {
        interrupts::enable();
    }

    fn disable(&mut self) {
        interrupts::disable();
    }

    fn end_of_interrupt(&mut self, irq: u8) {
        // SAFETY: called once at the end of the handler for exactly this IRQ.
        unsafe {
            PICS.lock().notify_end_of_interrupt(PIC_1_OFFSET + irq);
        }
    }
}
