//! Recurrence frequencies and next-date computation

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use core_kernel::{add_months, clamp_day_of_month, TemporalError};

/// How often a template fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
}

impl Frequency {
    /// Number of calendar months between occurrences
    pub fn months(&self) -> u32 {
        match self {
            Frequency::Monthly => 1,
            Frequency::Quarterly => 3,
            Frequency::SemiAnnual => 6,
            Frequency::Annual => 12,
        }
    }

    /// Returns the frequency's storage name
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Monthly => "monthly",
            Frequency::Quarterly => "quarterly",
            Frequency::SemiAnnual => "semi_annual",
            Frequency::Annual => "annual",
        }
    }

    /// Parses a storage name back into a frequency
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "monthly" => Some(Frequency::Monthly),
            "quarterly" => Some(Frequency::Quarterly),
            "semi_annual" => Some(Frequency::SemiAnnual),
            "annual" => Some(Frequency::Annual),
            _ => None,
        }
    }
}

/// Computes the occurrence after `current`, anchored to `day_of_month`
///
/// The schedule's configured day is reapplied on every step so a template
/// anchored to day 31 returns to the 31st after passing through a short
/// month: Jan 31 -> Feb 29 -> Mar 31.
pub fn next_occurrence(
    current: NaiveDate,
    frequency: Frequency,
    day_of_month: u32,
) -> Result<NaiveDate, TemporalError> {
    let advanced = add_months(current, frequency.months())?;
    clamp_day_of_month(advanced.year(), advanced.month(), day_of_month)
}

/// Computes the first occurrence after `from` that lies strictly in the
/// future of `today`
///
/// Missed occurrences are stepped over rather than returned one by one, so a
/// template created or reactivated late schedules its next fire correctly
/// instead of queueing up backdated periods.
pub fn compute_next_date(
    from: NaiveDate,
    frequency: Frequency,
    day_of_month: u32,
    today: NaiveDate,
) -> Result<NaiveDate, TemporalError> {
    let mut next = next_occurrence(from, frequency, day_of_month)?;
    while next <= today {
        next = next_occurrence(next, frequency, day_of_month)?;
    }
    Ok(next)
}

/// The dedup key for one occurrence: the `YYYY-MM` period it belongs to
///
/// Two fires of the same template in the same period must not both post.
pub fn period_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn next_occurrence_day_never_exceeds_anchor(
            year in 2000i32..2090i32,
            month in 1u32..=12u32,
            day in 1u32..=31u32,
            freq_idx in 0usize..4usize
        ) {
            let frequency = [
                Frequency::Monthly,
                Frequency::Quarterly,
                Frequency::SemiAnnual,
                Frequency::Annual,
            ][freq_idx];

            let start = clamp_day_of_month(year, month, day).unwrap();
            let next = next_occurrence(start, frequency, day).unwrap();

            prop_assert!(next > start);
            prop_assert!(next.day() <= day);
        }

        #[test]
        fn period_keys_are_strictly_increasing(
            year in 2000i32..2090i32,
            month in 1u32..=12u32,
            day in 1u32..=31u32
        ) {
            let start = clamp_day_of_month(year, month, day).unwrap();
            let next = next_occurrence(start, Frequency::Monthly, day).unwrap();

            prop_assert!(period_key(next) > period_key(start));
        }
    }
}
