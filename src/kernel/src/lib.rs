//! turbanOS kernel
//!
//! The interactive console of a small x86_64 kernel: a text-mode display,
//! an interrupt-driven keyboard, the CMOS clock, a line shell and a reset
//! sequencer.
//!
//! # Architecture
//!
//! The kernel is structured into the following modules:
//! - `display`, `keyboard`, `rtc`, `reset`, `terminal`: the console itself,
//!   written against the `turban-hal` traits so it runs on the host in tests
//! - `arch`: the x86_64 bindings of those traits (VGA, ports, PIC, IDT, serial)
//! - `boot`, `logger`: boot-time output, bare metal only
//!
//! # Safety
//!
//! This is a `#![no_std]` kernel. All unsafe code is documented with safety
//! invariants explaining why the usage is correct.

#![cfg_attr(not(test), no_std)]
#![cfg_attr(
    all(target_arch = "x86_64", target_os = "none"),
    feature(abi_x86_interrupt)
)]
#![warn(missing_docs)]

pub mod arch;
pub mod config;
pub mod display;
pub mod keyboard;
pub mod reset;
pub mod rtc;
pub mod selftest;
pub mod terminal;

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
pub mod boot;
#[cfg(all(target_arch = "x86_64", target_os = "none"))]
pub mod logger;

#[cfg(test)]
pub(crate) mod testutil;

/// Initializes core kernel subsystems.
///
/// Brings up the serial port, the logger and the display, in that order, so
/// everything after this call can log.
#[cfg(all(target_arch = "x86_64", target_os = "none"))]
pub fn init() {
    arch::x86_64::serial::init();
    if logger::init().is_err() {
        serial_println!("logger already installed");
    }
    arch::x86_64::vga::init();
}
