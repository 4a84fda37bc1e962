//! Actual/Actual ISDA day count convention.

use super::DayCount;
use crate::types::Date;

/// Actual/Actual ISDA day count convention.
///
/// The period is split into the portions that fall in leap and non-leap
/// years.
///
/// $$\text{Year Fraction} = \frac{\text{Days in non-leap year}}{365} + \frac{\text{Days in leap year}}{366}$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActActIsda;

impl DayCount for ActActIsda {
    fn name(&self) -> &'static str {
        "ACT/ACT ISDA"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        if start >= end {
            return 0.0;
        }

        let mut total = 0.0;
        let mut current = start;

        while current.year() < end.year() {
            // First day of the following year, one day past Dec 31
            let next_year = current
                .add_days(i64::from(current.days_in_year() - current.day_of_year() + 1));
            let days = current.days_between(&next_year);
            total += days as f64 / f64::from(current.days_in_year());
            current = next_year;
        }

        if current < end {
            let days = current.days_between(&end);
            total += days as f64 / f64::from(current.days_in_year());
        }

        total
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }

    fn denominator_days(&self, start: Date, _end: Date) -> i64 {
        i64::from(start.days_in_year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_actact_isda_single_year() {
        let dc = ActActIsda;
        let start = Date::from_ymd(2025, 1, 1).unwrap();
        let end = Date::from_ymd(2026, 1, 1).unwrap();
        assert_relative_eq!(dc.year_fraction(start, end), 1.0);
    }

    #[test]
    fn test_actact_isda_spanning_leap_year() {
        let dc = ActActIsda;
        let start = Date::from_ymd(2023, 11, 1).unwrap();
        let end = Date::from_ymd(2024, 3, 1).unwrap();

        // 61 days in 2023 (Nov 1 - Dec 31 inclusive), 60 days in 2024
        let expected = 61.0 / 365.0 + 60.0 / 366.0;
        assert_relative_eq!(dc.year_fraction(start, end), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_actact_isda_reversed_is_zero() {
        let dc = ActActIsda;
        let start = Date::from_ymd(2025, 6, 1).unwrap();
        let end = Date::from_ymd(2025, 1, 1).unwrap();
        assert_eq!(dc.year_fraction(start, end), 0.0);
    }
}
