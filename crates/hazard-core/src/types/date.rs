//! Date type for financial calculations.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

use super::tenor::{Tenor, TenorUnit};
use crate::error::{HazardError, HazardResult};

/// Day of month on which standard CDS contracts roll.
const CDS_ROLL_DAY: u32 = 20;

/// A calendar date for financial calculations.
///
/// This is a newtype wrapper around `chrono::NaiveDate` providing
/// month/tenor arithmetic and the CDS roll-date rules.
///
/// # Example
///
/// ```rust
/// use hazard_core::types::Date;
///
/// let date = Date::from_ymd(2025, 6, 15).unwrap();
/// let future = date.add_months(6).unwrap();
/// assert_eq!(future.year(), 2025);
/// assert_eq!(future.month(), 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `HazardError::InvalidDate` if the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> HazardResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| HazardError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    ///
    /// # Errors
    ///
    /// Returns `HazardError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> HazardResult<Self> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|_| HazardError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the day of the year (1-366).
    #[must_use]
    pub fn day_of_year(&self) -> u32 {
        self.0.ordinal()
    }

    /// Checks if the year is a leap year.
    #[must_use]
    pub fn is_leap_year(&self) -> bool {
        self.0.leap_year()
    }

    /// Returns the number of days in the date's month.
    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    /// Returns the number of days in the date's year.
    #[must_use]
    pub fn days_in_year(&self) -> u32 {
        if self.is_leap_year() {
            366
        } else {
            365
        }
    }

    /// Adds a number of days to the date.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Adds a number of months to the date.
    ///
    /// If the resulting day would be invalid (e.g., Jan 31 + 1 month),
    /// it rolls back to the last valid day of the month.
    ///
    /// # Errors
    ///
    /// Returns `HazardError::InvalidDate` if the result is out of range.
    pub fn add_months(&self, months: i32) -> HazardResult<Self> {
        let total_months = self.year() * 12 + self.month() as i32 - 1 + months;
        let new_year = total_months.div_euclid(12);
        let new_month = (total_months.rem_euclid(12) + 1) as u32;

        let new_day = self.day().min(days_in_month(new_year, new_month));

        Self::from_ymd(new_year, new_month, new_day)
    }

    /// Adds a number of years to the date.
    ///
    /// # Errors
    ///
    /// Returns `HazardError::InvalidDate` if the result is invalid.
    pub fn add_years(&self, years: i32) -> HazardResult<Self> {
        self.add_months(years * 12)
    }

    /// Adds a tenor (days, weeks, months or years) to the date.
    ///
    /// # Errors
    ///
    /// Returns `HazardError::InvalidDate` if the result is out of range.
    pub fn add_tenor(&self, tenor: Tenor) -> HazardResult<Self> {
        match tenor.unit {
            TenorUnit::Day => Ok(self.add_days(i64::from(tenor.count))),
            TenorUnit::Week => Ok(self.add_days(7 * i64::from(tenor.count))),
            TenorUnit::Month => self.add_months(tenor.count),
            TenorUnit::Year => self.add_years(tenor.count),
        }
    }

    /// Returns the next standard CDS roll date strictly after this date.
    ///
    /// CDS roll dates are the 20th of March, June, September and December.
    /// A date falling on a roll date moves to the following one.
    #[must_use]
    pub fn next_cds_date(&self) -> Self {
        let (year, month) = (self.year(), self.month());

        let (roll_year, roll_month) = if month % 3 == 0 && self.day() < CDS_ROLL_DAY {
            (year, month)
        } else {
            let next_quarter_month = (month - 1) / 3 * 3 + 3;
            let candidate = if month % 3 == 0 {
                next_quarter_month + 3
            } else {
                next_quarter_month
            };
            if candidate > 12 {
                (year + 1, candidate - 12)
            } else {
                (year, candidate)
            }
        };

        Date(
            NaiveDate::from_ymd_opt(roll_year, roll_month, CDS_ROLL_DAY)
                .unwrap_or(self.0),
        )
    }

    /// Calculates the number of calendar days between two dates.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Returns the underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }

    /// Returns the end of month for the current date.
    #[must_use]
    pub fn end_of_month(&self) -> Self {
        self.add_days(i64::from(self.days_in_month() - self.day()))
    }

    /// Checks if the date is the end of month.
    #[must_use]
    pub fn is_end_of_month(&self) -> bool {
        self.day() == self.days_in_month()
    }

    /// Returns the day of week.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Checks if the date is a weekend (Saturday or Sunday).
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl Add<i64> for Date {
    type Output = Self;

    /// Adds days to a date.
    fn add(self, days: i64) -> Self::Output {
        self.add_days(days)
    }
}

impl Sub<i64> for Date {
    type Output = Self;

    /// Subtracts days from a date.
    fn sub(self, days: i64) -> Self::Output {
        self.add_days(-days)
    }
}

impl Sub<Date> for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    fn sub(self, other: Date) -> Self::Output {
        other.days_between(&self)
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
