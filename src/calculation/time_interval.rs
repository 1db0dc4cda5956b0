//! Time-interval arithmetic.
//!
//! Converts `HH:MM` ranges into worked hours and night-premium hours. All
//! shifts either stay inside one day or cross exactly one midnight.
//!
//! The night-premium window is 22:30 to 06:30. It is measured as the overlap of
//! the shift with three disjoint minute ranges on a two-day axis:
//! `[0, 390]` (today's early morning), `[1350, 1440]` (tonight) and
//! `[1440, 1830]` (tomorrow's early morning).

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::EngineResult;
use crate::models::{MINUTES_PER_DAY, TimeRange};

/// Night-premium ranges in minutes on a two-day axis, ordered and disjoint.
pub const NIGHT_PREMIUM_WINDOWS: [(u32, u32); 3] = [(0, 390), (1350, 1440), (1440, 1830)];

/// Length of the overlap of `[a, b]` and `[c, d]`, or zero if they are disjoint.
///
/// # Example
///
/// ```
/// use shift_engine::calculation::overlap_minutes;
///
/// assert_eq!(overlap_minutes((240, 480), (0, 390)), 150);
/// assert_eq!(overlap_minutes((480, 720), (0, 390)), 0);
/// assert_eq!(overlap_minutes((0, 60), (60, 120)), 0);
/// ```
pub fn overlap_minutes(a: (u32, u32), b: (u32, u32)) -> u32 {
    let start = a.0.max(b.0);
    let end = a.1.min(b.1);
    end.saturating_sub(start)
}

/// Converts minutes to hours rounded to one decimal place.
pub(crate) fn minutes_to_hours(minutes: u32) -> Decimal {
    (Decimal::from(minutes) / Decimal::from(60))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the elapsed hours of a range, rounded to one decimal.
///
/// A range whose end is at or before its start crosses midnight, so 24 hours
/// are added before subtracting.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use shift_engine::calculation::duration_hours;
/// use shift_engine::models::TimeRange;
///
/// let day = TimeRange::parse("09:00", "17:30").unwrap();
/// assert_eq!(duration_hours(&day), Decimal::new(85, 1));
///
/// let night = TimeRange::parse("22:00", "06:00").unwrap();
/// assert_eq!(duration_hours(&night), Decimal::new(80, 1));
/// ```
pub fn duration_hours(range: &TimeRange) -> Decimal {
    let (start, end) = range.span_minutes();
    minutes_to_hours(end - start)
}

/// Returns the hours of a range that fall inside the night-premium window,
/// rounded to one decimal.
///
/// Unlike [`duration_hours`], identical start and end times are read as a
/// zero-length interval, which earns no premium.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use shift_engine::calculation::night_premium_hours;
/// use shift_engine::models::TimeRange;
///
/// let full_night = TimeRange::parse("22:30", "06:30").unwrap();
/// assert_eq!(night_premium_hours(&full_night), Decimal::new(80, 1));
///
/// let early = TimeRange::parse("04:00", "08:00").unwrap();
/// assert_eq!(night_premium_hours(&early), Decimal::new(25, 1));
///
/// let daytime = TimeRange::parse("08:00", "12:00").unwrap();
/// assert_eq!(night_premium_hours(&daytime), Decimal::ZERO);
/// ```
pub fn night_premium_hours(range: &TimeRange) -> Decimal {
    let start = range.start.minutes();
    let mut end = range.end.minutes();
    if end < start {
        end += MINUTES_PER_DAY;
    }

    let minutes: u32 = NIGHT_PREMIUM_WINDOWS
        .iter()
        .map(|window| overlap_minutes((start, end), *window))
        .sum();
    minutes_to_hours(minutes)
}

/// Returns true if two ranges on the same calendar day share a positive-length
/// stretch of time. Ranges that only touch at an endpoint do not overlap.
///
/// # Example
///
/// ```
/// use shift_engine::calculation::ranges_overlap;
/// use shift_engine::models::TimeRange;
///
/// let night = TimeRange::parse("22:00", "06:00").unwrap();
/// let late = TimeRange::parse("23:00", "23:30").unwrap();
/// let evening = TimeRange::parse("14:00", "22:00").unwrap();
/// assert!(ranges_overlap(&night, &late));
/// assert!(!ranges_overlap(&night, &evening));
/// ```
pub fn ranges_overlap(a: &TimeRange, b: &TimeRange) -> bool {
    overlap_minutes(a.span_minutes(), b.span_minutes()) > 0
}

/// Parses two `HH:MM` strings and returns the duration in hours.
///
/// Fails fast on malformed input; nothing is clamped.
pub fn parse_duration_hours(start: &str, end: &str) -> EngineResult<Decimal> {
    Ok(duration_hours(&TimeRange::parse(start, end)?))
}

/// Parses two `HH:MM` strings and returns the night-premium hours.
///
/// Fails fast on malformed input; nothing is clamped.
pub fn parse_night_premium_hours(start: &str, end: &str) -> EngineResult<Decimal> {
    Ok(night_premium_hours(&TimeRange::parse(start, end)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn range(start: &str, end: &str) -> TimeRange {
        TimeRange::parse(start, end).unwrap()
    }

    #[test]
    fn test_duration_same_day() {
        assert_eq!(duration_hours(&range("09:00", "18:00")), dec("9.0"));
        assert_eq!(duration_hours(&range("07:15", "11:35")), dec("4.3"));
    }

    #[test]
    fn test_duration_rounds_half_away_from_zero() {
        // 9 minutes = 0.15 hours
        assert_eq!(duration_hours(&range("10:00", "10:09")), dec("0.2"));
        // 3 minutes = 0.05 hours
        assert_eq!(duration_hours(&range("10:00", "10:03")), dec("0.1"));
    }

    #[test]
    fn test_duration_crossing_midnight() {
        assert_eq!(duration_hours(&range("22:30", "06:30")), dec("8.0"));
        assert_eq!(duration_hours(&range("23:00", "00:00")), dec("1.0"));
    }

    #[test]
    fn test_duration_equal_bounds_is_full_day() {
        assert_eq!(duration_hours(&range("08:00", "08:00")), dec("24.0"));
    }

    #[test]
    fn test_night_premium_fully_inside_window() {
        assert_eq!(night_premium_hours(&range("22:30", "06:30")), dec("8.0"));
    }

    #[test]
    fn test_night_premium_daytime_is_zero() {
        assert_eq!(night_premium_hours(&range("08:00", "12:00")), dec("0.0"));
    }

    #[test]
    fn test_night_premium_partial_morning_overlap() {
        assert_eq!(night_premium_hours(&range("04:00", "08:00")), dec("2.5"));
    }

    #[test]
    fn test_night_premium_partial_evening_overlap() {
        // 22:30-23:00 inside the window
        assert_eq!(night_premium_hours(&range("18:00", "23:00")), dec("0.5"));
    }

    #[test]
    fn test_night_premium_shift_ending_inside_window() {
        // 22:30-04:00 = 5.5h premium out of 6h worked
        assert_eq!(night_premium_hours(&range("22:00", "04:00")), dec("5.5"));
        assert_eq!(duration_hours(&range("22:00", "04:00")), dec("6.0"));
    }

    #[test]
    fn test_night_premium_long_overnight_beyond_window() {
        // 20:00-09:00: 22:30-06:30 = 8h premium
        assert_eq!(night_premium_hours(&range("20:00", "09:00")), dec("8.0"));
    }

    #[test]
    fn test_night_premium_starting_after_midnight() {
        assert_eq!(night_premium_hours(&range("00:00", "06:30")), dec("6.5"));
        assert_eq!(night_premium_hours(&range("01:00", "03:00")), dec("2.0"));
    }

    #[test]
    fn test_night_premium_zero_length() {
        assert_eq!(night_premium_hours(&range("23:00", "23:00")), dec("0.0"));
    }

    #[test]
    fn test_overlap_touching_endpoints_do_not_overlap() {
        assert!(!ranges_overlap(&range("09:00", "13:00"), &range("13:00", "18:00")));
        assert!(ranges_overlap(&range("09:00", "13:01"), &range("13:00", "18:00")));
    }

    #[test]
    fn test_overlap_contained_range() {
        assert!(ranges_overlap(&range("09:00", "18:00"), &range("12:00", "13:00")));
    }

    #[test]
    fn test_parse_helpers_fail_fast() {
        let err = parse_duration_hours("9:00", "17:00").unwrap_err();
        assert!(matches!(err, EngineError::InvalidTime { .. }));

        let err = parse_night_premium_hours("22:00", "24:30").unwrap_err();
        assert!(matches!(err, EngineError::InvalidTime { .. }));

        assert_eq!(parse_duration_hours("09:00", "17:00").unwrap(), dec("8.0"));
        assert_eq!(parse_night_premium_hours("04:00", "08:00").unwrap(), dec("2.5"));
    }

    fn clock() -> impl Strategy<Value = u32> {
        0u32..MINUTES_PER_DAY
    }

    fn to_range(start: u32, end: u32) -> TimeRange {
        TimeRange::new(
            crate::models::ClockTime::from_hm(start / 60, start % 60).unwrap(),
            crate::models::ClockTime::from_hm(end / 60, end % 60).unwrap(),
        )
    }

    proptest! {
        #[test]
        fn prop_same_day_duration(start in clock(), end in clock()) {
            prop_assume!(end > start);
            prop_assert_eq!(
                duration_hours(&to_range(start, end)),
                minutes_to_hours(end - start)
            );
        }

        #[test]
        fn prop_midnight_crossing_duration(start in clock(), end in clock()) {
            prop_assume!(end < start);
            prop_assert_eq!(
                duration_hours(&to_range(start, end)),
                minutes_to_hours(end + MINUTES_PER_DAY - start)
            );
        }

        #[test]
        fn prop_premium_never_exceeds_duration(start in clock(), end in clock()) {
            let range = to_range(start, end);
            prop_assert!(night_premium_hours(&range) <= duration_hours(&range));
        }

        #[test]
        fn prop_overlap_is_symmetric(a in clock(), b in clock(), c in clock(), d in clock()) {
            let first = to_range(a, b);
            let second = to_range(c, d);
            prop_assert_eq!(ranges_overlap(&first, &second), ranges_overlap(&second, &first));
        }
    }
}
