//! Comprehensive unit tests for the Temporal module
//!
//! Tests cover month-length queries, day clamping, and month arithmetic
//! across year boundaries and leap years.

use chrono::NaiveDate;
use core_kernel::{add_months, clamp_day_of_month, last_day_of_month, TemporalError};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

mod month_lengths {
    use super::*;

    #[test]
    fn test_thirty_one_day_months() {
        for month in [1, 3, 5, 7, 8, 10, 12] {
            assert_eq!(last_day_of_month(2025, month), 31);
        }
    }

    #[test]
    fn test_thirty_day_months() {
        for month in [4, 6, 9, 11] {
            assert_eq!(last_day_of_month(2025, month), 30);
        }
    }

    #[test]
    fn test_february_leap_rules() {
        assert_eq!(last_day_of_month(2024, 2), 29);
        assert_eq!(last_day_of_month(2025, 2), 28);
        assert_eq!(last_day_of_month(2000, 2), 29); // divisible by 400
        assert_eq!(last_day_of_month(2100, 2), 28); // divisible by 100 only
    }
}

mod clamping {
    use super::*;

    #[test]
    fn test_day_within_month_is_unchanged() {
        assert_eq!(clamp_day_of_month(2026, 6, 15).unwrap(), d(2026, 6, 15));
    }

    #[test]
    fn test_day_beyond_month_clamps_to_last_day() {
        assert_eq!(clamp_day_of_month(2026, 2, 31).unwrap(), d(2026, 2, 28));
        assert_eq!(clamp_day_of_month(2024, 2, 30).unwrap(), d(2024, 2, 29));
        assert_eq!(clamp_day_of_month(2026, 4, 31).unwrap(), d(2026, 4, 30));
    }

    #[test]
    fn test_invalid_days_are_rejected() {
        assert!(matches!(
            clamp_day_of_month(2026, 1, 0),
            Err(TemporalError::InvalidDayOfMonth(0))
        ));
        assert!(matches!(
            clamp_day_of_month(2026, 1, 32),
            Err(TemporalError::InvalidDayOfMonth(32))
        ));
    }
}

mod month_arithmetic {
    use super::*;

    #[test]
    fn test_add_months_simple() {
        assert_eq!(add_months(d(2026, 1, 15), 1).unwrap(), d(2026, 2, 15));
        assert_eq!(add_months(d(2026, 1, 15), 3).unwrap(), d(2026, 4, 15));
    }

    #[test]
    fn test_add_months_crosses_year_boundary() {
        assert_eq!(add_months(d(2026, 11, 15), 2).unwrap(), d(2027, 1, 15));
        assert_eq!(add_months(d(2026, 12, 31), 12).unwrap(), d(2027, 12, 31));
    }

    #[test]
    fn test_add_months_clamps_short_target_month() {
        assert_eq!(add_months(d(2026, 1, 31), 1).unwrap(), d(2026, 2, 28));
        assert_eq!(add_months(d(2024, 1, 31), 1).unwrap(), d(2024, 2, 29));
        assert_eq!(add_months(d(2026, 3, 31), 1).unwrap(), d(2026, 4, 30));
    }
}
