//! Hardware-independent types shared by the turbanOS kernel.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

pub mod clock;
pub mod error;
pub mod flags;

pub use clock::{bcd_to_binary, ClockReading};
pub use error::CommandError;
pub use flags::{ControllerStatus, Modifiers, RtcStatusA};
