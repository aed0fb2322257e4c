//! COSEM DateTime type (12-byte wire form)

use crate::datatypes::cosem_date::CosemDate;
use crate::datatypes::cosem_time::CosemTime;
use crate::error::{CosemError, CosemResult};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Clock status flags for COSEM DateTime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockStatus {
    InvalidValue = 0x01,
    DoubtfulValue = 0x02,
    DifferentClockBase = 0x04,
    InvalidClockStatus = 0x08,
    DaylightSavingActive = 0x80,
}

impl ClockStatus {
    /// Combine clock status flags into a status byte
    pub fn to_byte(statuses: &[ClockStatus]) -> u8 {
        statuses.iter().fold(0u8, |byte, s| byte | *s as u8)
    }

    /// Split a status byte into flags
    pub fn from_byte(byte: u8) -> Vec<ClockStatus> {
        [
            ClockStatus::InvalidValue,
            ClockStatus::DoubtfulValue,
            ClockStatus::DifferentClockBase,
            ClockStatus::InvalidClockStatus,
            ClockStatus::DaylightSavingActive,
        ]
        .into_iter()
        .filter(|s| byte & *s as u8 != 0)
        .collect()
    }
}

/// A COSEM DateTime: date, time, deviation from UTC and clock status
///
/// Encodes to 12 bytes: the 5-byte date, the 4-byte time, a 2-byte signed
/// deviation in minutes (`FFFF` when not specified) and a 1-byte clock
/// status (`FF` when not specified).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CosemDateTime {
    date: CosemDate,
    time: CosemTime,
    deviation: Option<i16>,
    clock_status: Option<u8>,
}

impl CosemDateTime {
    pub const LENGTH: usize = 12;

    /// Constructs a COSEM DateTime with unspecified deviation and status
    pub fn new(date: CosemDate, time: CosemTime) -> Self {
        Self {
            date,
            time,
            deviation: None,
            clock_status: None,
        }
    }

    /// Set the deviation from UTC in minutes
    ///
    /// # Errors
    ///
    /// Returns a range error if the deviation is outside `[-720, 720]`.
    pub fn with_deviation(mut self, deviation: i16) -> CosemResult<Self> {
        if !(-720..=720).contains(&deviation) {
            return Err(CosemError::OutOfRange(format!(
                "deviation is out of range [-720, 720]: {deviation}"
            )));
        }
        self.deviation = Some(deviation);
        Ok(self)
    }

    /// Set the clock status flags
    pub fn with_clock_status(mut self, statuses: &[ClockStatus]) -> Self {
        self.clock_status = Some(ClockStatus::to_byte(statuses));
        self
    }

    /// Build from a calendar date-time, leaving deviation and status unspecified
    pub fn from_naive(date_time: NaiveDateTime) -> Self {
        Self {
            date: CosemDate::from_naive(date_time.date()),
            time: CosemTime::from_naive(date_time.time()),
            deviation: None,
            clock_status: None,
        }
    }

    /// Encode to the 12-byte wire form
    pub fn to_bytes(&self) -> [u8; Self::LENGTH] {
        let mut bytes = [0u8; Self::LENGTH];
        bytes[0..5].copy_from_slice(&self.date.to_bytes());
        bytes[5..9].copy_from_slice(&self.time.to_bytes());
        let deviation = match self.deviation {
            Some(d) => d.to_be_bytes(),
            None => [0xff, 0xff],
        };
        bytes[9..11].copy_from_slice(&deviation);
        bytes[11] = self.clock_status.unwrap_or(0xff);
        bytes
    }

    pub fn date(&self) -> &CosemDate {
        &self.date
    }

    pub fn time(&self) -> &CosemTime {
        &self.time
    }

    pub fn deviation(&self) -> Option<i16> {
        self.deviation
    }

    pub fn clock_status(&self) -> Option<Vec<ClockStatus>> {
        self.clock_status.map(ClockStatus::from_byte)
    }
}

impl fmt::Display for CosemDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn unspecified_deviation_and_status_use_sentinels() {
        let date = CosemDate::new(2024, 1, 15).unwrap();
        let time = CosemTime::new_with_hundredths(14, 30, 45, 0).unwrap();
        let dt = CosemDateTime::new(date, time);
        assert_eq!(
            dt.to_bytes(),
            [0x07, 0xE8, 0x01, 0x0F, 0x01, 0x0E, 0x1E, 0x2D, 0x00, 0xFF, 0xFF, 0xFF]
        );
    }

    #[test]
    fn deviation_is_encoded_big_endian_twos_complement() {
        let date = CosemDate::new(2024, 1, 15).unwrap();
        let time = CosemTime::new_with_hundredths(0, 0, 0, 0).unwrap();
        let dt = CosemDateTime::new(date, time).with_deviation(-60).unwrap();
        let bytes = dt.to_bytes();
        assert_eq!(&bytes[9..11], &[0xFF, 0xC4]);
    }

    #[test]
    fn deviation_out_of_range_is_rejected() {
        let date = CosemDate::new(2024, 1, 15).unwrap();
        let time = CosemTime::new(0, 0, 0).unwrap();
        assert!(CosemDateTime::new(date, time).with_deviation(721).is_err());
    }

    #[test]
    fn clock_status_flags_combine() {
        let byte = ClockStatus::to_byte(&[
            ClockStatus::InvalidValue,
            ClockStatus::DaylightSavingActive,
        ]);
        assert_eq!(byte, 0x81);
        assert_eq!(ClockStatus::from_byte(byte).len(), 2);
    }

    #[test]
    fn from_naive_fills_date_and_time() {
        let naive = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(14, 30, 45).unwrap());
        let dt = CosemDateTime::from_naive(naive);
        assert_eq!(dt.date().day_of_week(), 1);
        assert_eq!(dt.time().hour(), 14);
        assert_eq!(dt.deviation(), None);
    }
}
