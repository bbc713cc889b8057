//! Architecture-specific implementations.
//!
//! Binds the hardware traits to real x86_64 hardware. Only compiled for the
//! bare-metal target; host builds test the portable logic against doubles.

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
pub mod x86_64;
