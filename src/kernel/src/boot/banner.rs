//! Boot banner and branding.

use crate::arch::x86_64::vga::{self, Color};
use crate::println;

/// Print the turbanOS boot banner.
pub fn print_banner() {
    vga::set_color(Color::Cyan, Color::Black);
    println!("  _             _                 ___  ____  ");
    println!(" | |_ _   _ _ _| |__   __ _ _ __ / _ \\/ ___| ");
    println!(" | __| | | | '__| '_ \\ / _` | '_ \\ | | \\___ \\ ");
    println!(" | |_| |_| | |  | |_) | (_| | | | | |_| |___) |");
    println!("  \\__|\\__,_|_|  |_.__/ \\__,_|_| |_|\\___/|____/ ");
    println!();
    vga::reset_color();
    println!("Booting turbanOS...");
    println!("Type 'help' for a list of commands.");
    println!();
}
