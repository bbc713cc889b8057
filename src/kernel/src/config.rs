//! Compile-time kernel configuration.
//!
//! Everything here is fixed at build time; there is no persisted state.

/// Iteration counts for the coarse busy-wait delays of the reset sequence.
///
/// These are spin counts, not durations. How long they take depends entirely
/// on the processor and emulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetTiming {
    /// Pause after announcing the reboot.
    pub announce_delay: u32,
    /// How many times the keyboard controller status is polled.
    pub controller_poll_attempts: u32,
    /// Pause between two status polls.
    pub controller_poll_delay: u32,
    /// Pause after sending the pulse-reset command.
    pub pulse_delay: u32,
    /// Pause after each alternate reset port write.
    pub fallback_delay: u32,
}

impl ResetTiming {
    /// Timings matching a typical QEMU guest.
    pub const DEFAULT: Self = Self {
        announce_delay: 500_000,
        controller_poll_attempts: 1000,
        controller_poll_delay: 1000,
        pulse_delay: 1_000_000,
        fallback_delay: 100_000,
    };
}

/// Fixed offset applied to the hardware clock before display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeZone {
    /// Hours added to the RTC hour, modulo 24.
    pub offset_hours: u8,
    /// Label printed after the time.
    pub label: &'static str,
}

/// Kernel-wide settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelConfig {
    /// Text printed before every input line.
    pub prompt: &'static str,
    /// Clock display offset.
    pub timezone: TimeZone,
    /// Spin count between the boot banner and the first prompt.
    pub boot_delay: u32,
    /// Reset sequence delays and retry budget.
    pub reset: ResetTiming,
}

impl KernelConfig {
    /// The configuration the kernel boots with.
    pub const DEFAULT: Self = Self {
        prompt: "> ",
        timezone: TimeZone {
            offset_hours: 3,
            label: "MSK",
        },
        boot_delay: 500_000,
        reset: ResetTiming::DEFAULT,
    };

    /// Maximum level passed to the logger.
    pub const fn log_level() -> log::LevelFilter {
        if cfg!(feature = "verbose") {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Info
        }
    }
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
