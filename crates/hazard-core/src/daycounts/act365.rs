//! Actual/365 Fixed day count convention.

use super::DayCount;
use crate::types::Date;

/// Actual/365 Fixed day count convention.
///
/// The year basis is always 365 days regardless of leap years.
///
/// $$\text{Year Fraction} = \frac{\text{Actual Days}}{365}$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act365Fixed;

impl DayCount for Act365Fixed {
    fn name(&self) -> &'static str {
        "ACT/365F"
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }

    fn denominator_days(&self, _start: Date, _end: Date) -> i64 {
        365
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_act365_leap_year() {
        let dc = Act365Fixed;
        let start = Date::from_ymd(2024, 1, 1).unwrap();
        let end = Date::from_ymd(2025, 1, 1).unwrap();

        assert_eq!(dc.day_count(start, end), 366);
        assert_relative_eq!(dc.year_fraction(start, end), 366.0 / 365.0);
    }
}
