//! Real-time clock values and their console formatting.

use core::fmt;

/// Converts a packed-BCD byte (one decimal digit per nibble) to binary.
///
/// No range check is made; hardware-supplied values are trusted.
pub const fn bcd_to_binary(bcd: u8) -> u8 {
    (bcd >> 4) * 10 + (bcd & 0x0F)
}

/// One reading of the hardware clock, already converted from BCD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockReading {
    /// Hour of the day, 0-23.
    pub hour: u8,
    /// Minute, 0-59.
    pub minute: u8,
    /// Second, 0-59.
    pub second: u8,
    /// Day of the month.
    pub day: u8,
    /// Month, 1-12.
    pub month: u8,
    /// Two-digit year within the century.
    pub year: u8,
}

impl ClockReading {
    /// Builds a reading from the raw BCD register values.
    pub const fn from_bcd(hour: u8, minute: u8, second: u8, day: u8, month: u8, year: u8) -> Self {
        Self {
            hour: bcd_to_binary(hour),
            minute: bcd_to_binary(minute),
            second: bcd_to_binary(second),
            day: bcd_to_binary(day),
            month: bcd_to_binary(month),
            year: bcd_to_binary(year),
        }
    }

    /// Shifts the hour by `offset` hours, wrapping at 24.
    ///
    /// Only the hour moves; the date is left as read.
    pub const fn with_hour_offset(self, offset: u8) -> Self {
        Self {
            hour: ((self.hour as u16 + offset as u16) % 24) as u8,
            ..self
        }
    }

    /// `HH:MM:SS` view of the reading.
    pub const fn time(&self) -> TimeOfDay {
        TimeOfDay(*self)
    }

    /// `DD.MM.20YY` view of the reading.
    pub const fn date(&self) -> CalendarDate {
        CalendarDate(*self)
    }
}

/// Formats the time fields of a [`ClockReading`] as `HH:MM:SS`.
#[derive(Debug, Clone, Copy)]
pub struct TimeOfDay(ClockReading);

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.0.hour, self.0.minute, self.0.second)
    }
}

/// Formats the date fields of a [`ClockReading`] as `DD.MM.20YY`.
#[derive(Debug, Clone, Copy)]
pub struct CalendarDate(ClockReading);

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}.{:02}.20{:02}", self.0.day, self.0.month, self.0.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bcd_conversion() {
        assert_eq!(bcd_to_binary(0x59), 59);
        assert_eq!(bcd_to_binary(0x00), 0);
        assert_eq!(bcd_to_binary(0x23), 23);
        assert_eq!(bcd_to_binary(0x15), 15);
    }

    #[test]
    fn hour_offset_wraps_at_midnight() {
        let reading = ClockReading::from_bcd(0x21, 0x05, 0x09, 0x01, 0x01, 0x24);
        let shifted = reading.with_hour_offset(3);
        assert_eq!(shifted.hour, 0);
        assert_eq!(shifted.time().to_string(), "00:05:09");
        // date does not roll over
        assert_eq!(shifted.date().to_string(), "01.01.2024");
    }

    #[test]
    fn hour_offset_without_wrap() {
        let reading = ClockReading::from_bcd(0x05, 0x30, 0x00, 0x18, 0x10, 0x26);
        assert_eq!(reading.with_hour_offset(3).time().to_string(), "08:30:00");
    }

    #[test]
    fn date_is_zero_padded() {
        let reading = ClockReading::from_bcd(0, 0, 0, 0x07, 0x03, 0x05);
        assert_eq!(reading.date().to_string(), "07.03.2005");
    }
}
