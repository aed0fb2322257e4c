//! COSEM Date type (5-byte wire form)

use crate::error::{CosemError, CosemResult};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wildcard meaning the field is not specified
pub const NOT_SPECIFIED: u8 = 0xff;
/// Wildcard day-of-month: last day of the month
pub const LAST_DAY_OF_MONTH: u8 = 0xfe;
/// Wildcard day-of-month: second to last day of the month
pub const SECOND_LAST_DAY_OF_MONTH: u8 = 0xfd;
/// Wildcard month: daylight savings end
pub const DAYLIGHT_SAVINGS_END: u8 = 0xfd;
/// Wildcard month: daylight savings begin
pub const DAYLIGHT_SAVINGS_BEGIN: u8 = 0xfe;

/// A COSEM Date: year, month, day of month and day of week
///
/// Encodes to 5 bytes: 2-byte big-endian year, month, day of month,
/// day of week (1 = Monday .. 7 = Sunday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CosemDate {
    year: u16,
    month: u8,
    day_of_month: u8,
    day_of_week: u8,
}

impl CosemDate {
    pub const LENGTH: usize = 5;

    /// Constructs a COSEM Date, deriving the day of week when the date is
    /// concrete (no wildcards)
    ///
    /// # Arguments
    ///
    /// * `year` - The year from 0 to 0xffff
    /// * `month` - The month from 1 to 12, or a wildcard value
    /// * `day_of_month` - The day from 1 to 31, or a wildcard value
    pub fn new(year: u16, month: u8, day_of_month: u8) -> CosemResult<Self> {
        let day_of_week = derive_day_of_week(year, month, day_of_month);
        Self::new_with_day_of_week(year, month, day_of_month, day_of_week)
    }

    /// Constructs a COSEM Date with an explicit day of week
    pub fn new_with_day_of_week(
        year: u16,
        month: u8,
        day_of_month: u8,
        day_of_week: u8,
    ) -> CosemResult<Self> {
        Self::verify_month(month)?;
        Self::verify_day_of_month(day_of_month)?;
        Self::verify_day_of_week(day_of_week)?;
        Ok(Self {
            year,
            month,
            day_of_month,
            day_of_week,
        })
    }

    /// Build from a calendar date
    pub fn from_naive(date: NaiveDate) -> Self {
        Self {
            year: date.year().clamp(0, 0xffff) as u16,
            month: date.month() as u8,
            day_of_month: date.day() as u8,
            day_of_week: date.weekday().number_from_monday() as u8,
        }
    }

    /// Encode to the 5-byte wire form
    pub fn to_bytes(&self) -> [u8; Self::LENGTH] {
        let year = self.year.to_be_bytes();
        [year[0], year[1], self.month, self.day_of_month, self.day_of_week]
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day_of_month(&self) -> u8 {
        self.day_of_month
    }

    pub fn day_of_week(&self) -> u8 {
        self.day_of_week
    }

    fn verify_month(month: u8) -> CosemResult<()> {
        let is_wildcard = month == DAYLIGHT_SAVINGS_END
            || month == DAYLIGHT_SAVINGS_BEGIN
            || month == NOT_SPECIFIED;
        if (month < 1 || month > 12) && !is_wildcard {
            Err(CosemError::OutOfRange(format!(
                "month is out of range [1, 12]: {month}"
            )))
        } else {
            Ok(())
        }
    }

    fn verify_day_of_month(day_of_month: u8) -> CosemResult<()> {
        let is_wildcard = day_of_month == SECOND_LAST_DAY_OF_MONTH
            || day_of_month == LAST_DAY_OF_MONTH
            || day_of_month == NOT_SPECIFIED;
        if (day_of_month < 1 || day_of_month > 31) && !is_wildcard {
            Err(CosemError::OutOfRange(format!(
                "day of month is out of range [1, 31]: {day_of_month}"
            )))
        } else {
            Ok(())
        }
    }

    fn verify_day_of_week(day_of_week: u8) -> CosemResult<()> {
        if (day_of_week < 1 || day_of_week > 7) && day_of_week != NOT_SPECIFIED {
            Err(CosemError::OutOfRange(format!(
                "day of week is out of range [1, 7]: {day_of_week}"
            )))
        } else {
            Ok(())
        }
    }
}

fn derive_day_of_week(year: u16, month: u8, day_of_month: u8) -> u8 {
    if !(1..=12).contains(&month) || !(1..=31).contains(&day_of_month) {
        return NOT_SPECIFIED;
    }
    NaiveDate::from_ymd_opt(year as i32, month as u32, day_of_month as u32)
        .map(|d| d.weekday().number_from_monday() as u8)
        .unwrap_or(NOT_SPECIFIED)
}

impl fmt::Display for CosemDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day_of_month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_of_week_is_derived() {
        // 2024-01-15 was a Monday
        let date = CosemDate::new(2024, 1, 15).unwrap();
        assert_eq!(date.day_of_week(), 1);
        assert_eq!(date.to_bytes(), [0x07, 0xE8, 0x01, 0x0F, 0x01]);
    }

    #[test]
    fn sunday_maps_to_seven() {
        // 2024-01-14 was a Sunday
        let date = CosemDate::new(2024, 1, 14).unwrap();
        assert_eq!(date.day_of_week(), 7);
    }

    #[test]
    fn wildcards_are_accepted() {
        let date = CosemDate::new(2024, NOT_SPECIFIED, LAST_DAY_OF_MONTH).unwrap();
        assert_eq!(date.day_of_week(), NOT_SPECIFIED);
    }

    #[test]
    fn out_of_range_fields_are_rejected() {
        assert!(CosemDate::new(2024, 13, 1).is_err());
        assert!(CosemDate::new(2024, 1, 32).is_err());
        assert!(CosemDate::new_with_day_of_week(2024, 1, 15, 8).is_err());
    }
}
