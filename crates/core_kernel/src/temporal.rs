//! Calendar arithmetic for recurrence schedules
//!
//! Recurring entries advance by whole calendar months. Month arithmetic on
//! dates such as January 31st is not closed (February 31st does not exist),
//! so every helper in this module clamps the day component to the last valid
//! day of the target month rather than overflowing into the next month.

use chrono::{Datelike, Months, NaiveDate};
use thiserror::Error;

/// Errors related to calendar operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid day of month: {0} (expected 1-31)")]
    InvalidDayOfMonth(u32),

    #[error("Date out of range: {0}")]
    OutOfRange(String),
}

/// Returns the last valid day of the given month (28-31)
pub fn last_day_of_month(year: i32, month: u32) -> u32 {
    // The day before the first of the next month
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28)
}

/// Builds a date from year/month and a requested day-of-month, clamping the
/// day to the last valid day of that month
///
/// A schedule configured for day 31 lands on February 28th (29th in leap
/// years), not March 3rd.
pub fn clamp_day_of_month(year: i32, month: u32, day: u32) -> Result<NaiveDate, TemporalError> {
    if day == 0 || day > 31 {
        return Err(TemporalError::InvalidDayOfMonth(day));
    }
    let clamped = day.min(last_day_of_month(year, month));
    NaiveDate::from_ymd_opt(year, month, clamped)
        .ok_or_else(|| TemporalError::OutOfRange(format!("{:04}-{:02}-{:02}", year, month, clamped)))
}

/// Adds whole calendar months to a date, clamping the day component
pub fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate, TemporalError> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| TemporalError::OutOfRange(format!("{} + {} months", date, months)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(last_day_of_month(2024, 1), 31);
        assert_eq!(last_day_of_month(2024, 2), 29); // leap year
        assert_eq!(last_day_of_month(2025, 2), 28);
        assert_eq!(last_day_of_month(2024, 4), 30);
        assert_eq!(last_day_of_month(2024, 12), 31);
    }

    #[test]
    fn test_clamp_day_of_month() {
        assert_eq!(clamp_day_of_month(2024, 2, 31).unwrap(), d(2024, 2, 29));
        assert_eq!(clamp_day_of_month(2025, 2, 31).unwrap(), d(2025, 2, 28));
        assert_eq!(clamp_day_of_month(2024, 6, 15).unwrap(), d(2024, 6, 15));
    }

    #[test]
    fn test_clamp_rejects_invalid_day() {
        assert!(matches!(
            clamp_day_of_month(2024, 2, 0),
            Err(TemporalError::InvalidDayOfMonth(0))
        ));
        assert!(matches!(
            clamp_day_of_month(2024, 2, 32),
            Err(TemporalError::InvalidDayOfMonth(32))
        ));
    }

    #[test]
    fn test_add_months_clamps() {
        assert_eq!(add_months(d(2024, 1, 31), 1).unwrap(), d(2024, 2, 29));
        assert_eq!(add_months(d(2024, 1, 31), 3).unwrap(), d(2024, 4, 30));
        assert_eq!(add_months(d(2024, 11, 30), 12).unwrap(), d(2025, 11, 30));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn add_months_never_overflows_into_next_month(
            year in 2000i32..2100i32,
            month in 1u32..=12u32,
            day in 1u32..=28u32,
            months in 0u32..48u32
        ) {
            let date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
            let advanced = add_months(date, months).unwrap();

            let expected_month = (month - 1 + months) % 12 + 1;
            prop_assert_eq!(advanced.month(), expected_month);
        }

        #[test]
        fn clamped_day_is_valid_and_maximal(
            year in 2000i32..2100i32,
            month in 1u32..=12u32,
            day in 1u32..=31u32
        ) {
            let date = clamp_day_of_month(year, month, day).unwrap();
            prop_assert_eq!(date.month(), month);
            prop_assert!(date.day() <= day);
            if date.day() < day {
                prop_assert_eq!(date.day(), last_day_of_month(year, month));
            }
        }
    }
}
