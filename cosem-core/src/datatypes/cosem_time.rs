//! COSEM Time type (4-byte wire form)

use crate::error::{CosemError, CosemResult};
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

const NOT_SPECIFIED: u8 = 0xff;

/// A COSEM Time: hour, minute, second, hundredths of a second
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CosemTime {
    hour: u8,
    minute: u8,
    second: u8,
    hundredths: u8,
}

impl CosemTime {
    pub const LENGTH: usize = 4;

    /// Constructs a COSEM Time with unspecified hundredths
    ///
    /// Each field accepts the 0xff wildcard meaning "not specified".
    pub fn new(hour: u8, minute: u8, second: u8) -> CosemResult<Self> {
        Self::new_with_hundredths(hour, minute, second, NOT_SPECIFIED)
    }

    /// Constructs a COSEM Time
    pub fn new_with_hundredths(
        hour: u8,
        minute: u8,
        second: u8,
        hundredths: u8,
    ) -> CosemResult<Self> {
        Self::verify(hour, "hour", 23)?;
        Self::verify(minute, "minute", 59)?;
        Self::verify(second, "second", 59)?;
        Self::verify(hundredths, "hundredths", 99)?;
        Ok(Self {
            hour,
            minute,
            second,
            hundredths,
        })
    }

    /// Build from a wall-clock time
    pub fn from_naive(time: NaiveTime) -> Self {
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
            second: time.second().min(59) as u8,
            hundredths: ((time.nanosecond() / 10_000_000).min(99)) as u8,
        }
    }

    /// Encode to the 4-byte wire form
    pub fn to_bytes(&self) -> [u8; Self::LENGTH] {
        [self.hour, self.minute, self.second, self.hundredths]
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> u8 {
        self.second
    }

    pub fn hundredths(&self) -> u8 {
        self.hundredths
    }

    fn verify(value: u8, name: &str, upper_bound: u8) -> CosemResult<()> {
        if value > upper_bound && value != NOT_SPECIFIED {
            Err(CosemError::OutOfRange(format!(
                "{name} is out of range [0, {upper_bound}]: {value}"
            )))
        } else {
            Ok(())
        }
    }
}

impl fmt::Display for CosemTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_validates_fields() {
        let time = CosemTime::new(14, 30, 45).unwrap();
        assert_eq!(time.to_bytes(), [0x0E, 0x1E, 0x2D, 0xFF]);
        assert!(CosemTime::new(24, 0, 0).is_err());
        assert!(CosemTime::new(0, 60, 0).is_err());
        assert!(CosemTime::new_with_hundredths(0, 0, 0, 100).is_err());
    }

    #[test]
    fn wildcard_fields_pass() {
        let time = CosemTime::new(0xff, 0xff, 0xff).unwrap();
        assert_eq!(time.to_bytes(), [0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn from_naive_converts_subseconds() {
        let naive = NaiveTime::from_hms_milli_opt(2, 0, 0, 250).unwrap();
        let time = CosemTime::from_naive(naive);
        assert_eq!(time.hundredths(), 25);
    }
}
