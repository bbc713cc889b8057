//! Boot logging with colored status indicators.
//!
//! Each boot step gets a Linux-style `[ OK ]` line on the display and the
//! same text in the serial log.

pub mod banner;

use crate::arch::x86_64::vga::{self, Color};
use crate::{print, println};

/// Boot status indicators.
#[derive(Debug, Clone, Copy)]
pub enum Status {
    /// Success - `[ OK ]` in green
    Ok,
    /// Failure - `[FAIL]` in red
    Fail,
    /// Informational - `[INFO]` in cyan
    Info,
}

/// Log a boot stage with status.
///
/// Format: `[ OK ] Message text`
pub fn log(status: Status, message: &str) {
    match status {
        Status::Fail => log::error!("boot: {}", message),
        Status::Ok | Status::Info => log::info!("boot: {}", message),
    }
    print_status(status);
    println!(" {}", message);
}

/// Log an indented detail line under the previous stage.
pub fn log_detail(message: &str) {
    println!("       {}", message);
}

fn print_status(status: Status) {
    let (text, color) = match status {
        Status::Ok => ("[ OK ]", Color::LightGreen),
        Status::Fail => ("[FAIL]", Color::LightRed),
        Status::Info => ("[INFO]", Color::LightCyan),
    };
    vga::set_color(color, Color::Black);
    print!("{}", text);
    vga::reset_color();
}
