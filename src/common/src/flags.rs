//! Bit-level views of keyboard and clock hardware state.

use bitflags::bitflags;

bitflags! {
    /// Keyboard modifier keys tracked by the scancode decoder.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Either shift key is held.
        const SHIFT     = 1 << 0;
        /// Caps lock is latched on.
        const CAPS_LOCK = 1 << 1;
    }
}

impl Modifiers {
    /// True when exactly one of shift and caps lock is active.
    pub const fn upper_case(self) -> bool {
        self.contains(Self::SHIFT) ^ self.contains(Self::CAPS_LOCK)
    }
}

bitflags! {
    /// Status register of the 8042 keyboard controller (port 0x64).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct ControllerStatus: u8 {
        /// A byte is waiting to be read from the data port.
        const OUTPUT_FULL = 1 << 0;
        /// The controller has not consumed the last write yet.
        const INPUT_FULL  = 1 << 1;
        /// Set once the controller passed its self test.
        const SYSTEM      = 1 << 2;
        /// Last write went to the command port rather than the data port.
        const COMMAND     = 1 << 3;
        const _ = !0;
    }
}

bitflags! {
    /// RTC status register A.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct RtcStatusA: u8 {
        /// Clock registers are mid-update and must not be read.
        const UPDATE_IN_PROGRESS = 1 << 7;
        const _ = !0;
    }
}
