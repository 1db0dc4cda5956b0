//! Wall-clock time and time range types.
//!
//! Shift times in this system are plain `HH:MM` strings with no date. A
//! [`TimeRange`] whose end is not after its start crosses midnight.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Number of minutes in a day.
pub const MINUTES_PER_DAY: u32 = 1440;

/// A validated 24-hour wall-clock time with minute precision.
///
/// Serializes as the `HH:MM` string it was parsed from.
///
/// # Example
///
/// ```
/// use shift_engine::models::ClockTime;
///
/// let time: ClockTime = "22:30".parse().unwrap();
/// assert_eq!(time.minutes(), 1350);
/// assert_eq!(time.to_string(), "22:30");
/// assert!("24:00".parse::<ClockTime>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    /// Builds a clock time from an hour and minute, rejecting out-of-range parts.
    pub fn from_hm(hour: u32, minute: u32) -> EngineResult<Self> {
        if hour > 23 {
            return Err(EngineError::InvalidTime {
                value: format!("{:02}:{:02}", hour, minute),
                message: "hour must be between 00 and 23".to_string(),
            });
        }
        if minute > 59 {
            return Err(EngineError::InvalidTime {
                value: format!("{:02}:{:02}", hour, minute),
                message: "minute must be between 00 and 59".to_string(),
            });
        }
        Ok(Self((hour * 60 + minute) as u16))
    }

    /// Minutes since midnight (0..=1439).
    pub fn minutes(self) -> u32 {
        u32::from(self.0)
    }

    /// The hour component.
    pub fn hour(self) -> u32 {
        self.minutes() / 60
    }

    /// The minute component.
    pub fn minute(self) -> u32 {
        self.minutes() % 60
    }
}

impl FromStr for ClockTime {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |message: &str| EngineError::InvalidTime {
            value: s.to_string(),
            message: message.to_string(),
        };

        let bytes = s.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(invalid("expected HH:MM"));
        }
        let digits = [bytes[0], bytes[1], bytes[3], bytes[4]];
        if !digits.iter().all(u8::is_ascii_digit) {
            return Err(invalid("expected HH:MM"));
        }

        let hour = u32::from(bytes[0] - b'0') * 10 + u32::from(bytes[1] - b'0');
        let minute = u32::from(bytes[3] - b'0') * 10 + u32::from(bytes[4] - b'0');
        Self::from_hm(hour, minute).map_err(|_| {
            if hour > 23 {
                invalid("hour must be between 00 and 23")
            } else {
                invalid("minute must be between 00 and 59")
            }
        })
    }
}

impl TryFrom<String> for ClockTime {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// A start/end pair of wall-clock times.
///
/// When `end <= start` the range is read as crossing midnight into the next
/// day. Ranges never span more than one midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    /// The start time.
    pub start: ClockTime,
    /// The end time.
    pub end: ClockTime,
}

impl TimeRange {
    /// Creates a range from two clock times.
    pub fn new(start: ClockTime, end: ClockTime) -> Self {
        Self { start, end }
    }

    /// Parses both bounds from `HH:MM` strings.
    ///
    /// # Example
    ///
    /// ```
    /// use shift_engine::models::TimeRange;
    ///
    /// let night = TimeRange::parse("22:30", "06:30").unwrap();
    /// assert!(night.crosses_midnight());
    /// assert!(TimeRange::parse("22:30", "6:30").is_err());
    /// ```
    pub fn parse(start: &str, end: &str) -> EngineResult<Self> {
        Ok(Self::new(start.parse()?, end.parse()?))
    }

    /// Returns true if the range ends on the following day.
    pub fn crosses_midnight(&self) -> bool {
        self.end <= self.start
    }

    /// Start and end as minutes since the start of the shift's own day.
    ///
    /// The end is pushed forward by one day when the range crosses midnight,
    /// so `end_minute` lies in `1..=2879` and is never below `start_minute`.
    pub fn span_minutes(&self) -> (u32, u32) {
        let start = self.start.minutes();
        let mut end = self.end.minutes();
        if end <= start {
            end += MINUTES_PER_DAY;
        }
        (start, end)
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_times() {
        assert_eq!("00:00".parse::<ClockTime>().unwrap().minutes(), 0);
        assert_eq!("06:30".parse::<ClockTime>().unwrap().minutes(), 390);
        assert_eq!("23:59".parse::<ClockTime>().unwrap().minutes(), 1439);
    }

    #[test]
    fn test_parse_rejects_out_of_range_hour() {
        let err = "24:00".parse::<ClockTime>().unwrap_err();
        assert!(err.to_string().contains("hour must be between 00 and 23"));
    }

    #[test]
    fn test_parse_rejects_out_of_range_minute() {
        let err = "12:60".parse::<ClockTime>().unwrap_err();
        assert!(err.to_string().contains("minute must be between 00 and 59"));
    }

    #[test]
    fn test_parse_rejects_malformed_strings() {
        for input in ["", "9:00", "09:0", "0900", "09-00", "ab:cd", "09:00:00", " 9:00"] {
            assert!(
                input.parse::<ClockTime>().is_err(),
                "expected '{}' to be rejected",
                input
            );
        }
    }

    #[test]
    fn test_display_pads_components() {
        let time = ClockTime::from_hm(7, 5).unwrap();
        assert_eq!(time.to_string(), "07:05");
    }

    #[test]
    fn test_clock_time_serde_uses_string_form() {
        let time: ClockTime = serde_json::from_str("\"22:30\"").unwrap();
        assert_eq!(time.minutes(), 1350);
        assert_eq!(serde_json::to_string(&time).unwrap(), "\"22:30\"");
        assert!(serde_json::from_str::<ClockTime>("\"25:00\"").is_err());
    }

    #[test]
    fn test_span_minutes_same_day() {
        let range = TimeRange::parse("09:00", "17:00").unwrap();
        assert!(!range.crosses_midnight());
        assert_eq!(range.span_minutes(), (540, 1020));
    }

    #[test]
    fn test_span_minutes_crossing_midnight() {
        let range = TimeRange::parse("22:30", "06:30").unwrap();
        assert!(range.crosses_midnight());
        assert_eq!(range.span_minutes(), (1350, 1830));
    }

    #[test]
    fn test_equal_bounds_span_a_full_day() {
        let range = TimeRange::parse("08:00", "08:00").unwrap();
        assert_eq!(range.span_minutes(), (480, 1920));
    }
}
