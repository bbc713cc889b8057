//! VGA text mode binding for x86_64.
//!
//! Maps the text buffer at 0xB8000 into a [`MemoryWindow`] and keeps the
//! global [`Display`] behind the `print!`/`println!` macros.

use super::port::X86Ports;
use crate::display::{Display, BUFFER_SIZE};
use core::fmt::{self, Write};
use core::ptr;
use spin::Mutex;
use turban_hal::{Console, MemoryWindow};

pub use crate::display::Color;

/// VGA text buffer memory-mapped I/O address.
const VGA_BUFFER_ADDR: usize = 0xB8000;

/// The VGA text buffer.
pub struct VgaWindow {
    /// Base of the buffer.
    ///
    /// SAFETY: This pointer is valid for the lifetime of the kernel.
    /// The VGA buffer at 0xB8000 is identity-mapped by the bootloader.
    base: *mut u8,
}

// SAFETY: VgaWindow only accesses the VGA buffer through volatile operations.
// The buffer is memory-mapped hardware that exists for the kernel's lifetime.
// Access is synchronized through the DISPLAY spinlock.
unsafe impl Send for VgaWindow {}

impl VgaWindow {
    fn new() -> Self {
        VgaWindow {
            base: VGA_BUFFER_ADDR as *mut u8,
        }
    }
}

impl MemoryWindow for VgaWindow {
    fn read(&self, offset: usize) -> u8 {
        assert!(offset < BUFFER_SIZE, "offset outside the VGA window");
        // SAFETY: offset is inside the 4000-byte buffer checked above. Volatile
        // because the buffer is memory-mapped I/O.
        unsafe { ptr::read_volatile(self.base.add(offset)) }
    }

    fn write(&mut self, offset: usize, value: u8) {
        assert!(offset < BUFFER_SIZE, "offset outside the VGA window");
        // SAFETY: as in `read`.
        unsafe { ptr::write_volatile(self.base.add(offset), value) }
    }

    fn len(&self) -> usize {
        BUFFER_SIZE
    }
}

/// The display as wired on a PC.
pub type VgaDisplay = Display<VgaWindow, X86Ports>;

/// Global display instance.
///
/// Hardware IRQ handlers never print; only the foreground and the exception
/// handlers lock it.
pub static DISPLAY: spin::Once<Mutex<VgaDisplay>> = spin::Once::new();

/// Initializes the global display.
///
/// Idempotent - safe to call multiple times.
pub fn init() {
    get_display();
}

/// Returns the global display, initializing if necessary.
fn get_display() -> &'static Mutex<VgaDisplay> {
    DISPLAY.call_once(|| Mutex::new(Display::new(VgaWindow::new(), X86Ports)))
}

/// Handle onto the global display, usable wherever a [`Console`] is wanted.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalConsole;

impl Console for GlobalConsole {
    fn write_str(&mut self, s: &str) {
        Console::write_str(&mut *get_display().lock(), s);
    }

    fn clear(&mut self) {
        get_display().lock().clear();
    }
}

/// Prints to the VGA buffer without a newline.
#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => {
        $crate::arch::x86_64::vga::_print(format_args!($($arg)*))
    };
}

/// Prints to the VGA buffer with a newline.
#[macro_export]
macro_rules! println {
    () => ($crate::print!("\n"));
    ($($arg:tt)*) => ($crate::print!("{}\n", format_args!($($arg)*)))
}

/// Internal print function used by macros.
#[doc(hidden)]
pub fn _print(args: fmt::Arguments) {
    let _ = get_display().lock().write_fmt(args);
}

/// Sets the VGA output color.
pub fn set_color(foreground: Color, background: Color) {
    get_display().lock().set_color(foreground, background);
}

/// Restores the default light-gray-on-black color.
pub fn reset_color() {
    get_display().lock().reset_color();
}

/// Clears the VGA screen.
pub fn clear_screen() {
    get_display().lock().clear();
}
