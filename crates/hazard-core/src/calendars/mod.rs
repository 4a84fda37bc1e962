//! Business day calendars and conventions.
//!
//! This module provides:
//! - A weekend-only calendar and a null calendar
//! - Business day adjustment conventions
//! - Date rolling by business days

mod conventions;

pub use conventions::{adjust, BusinessDayConvention};

use serde::{Deserialize, Serialize};

use crate::types::Date;

/// Trait for business day calendars.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &'static str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns true if the date is a holiday.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Adjusts a date according to the given business day convention.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Date {
        conventions::adjust(date, convention, self)
    }

    /// Advances a date by a number of business days.
    fn add_business_days(&self, date: Date, days: i32) -> Date {
        let mut result = date;
        let mut remaining = days.abs();
        let direction: i64 = if days >= 0 { 1 } else { -1 };

        while remaining > 0 {
            result = result.add_days(direction);
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }

        result
    }
}

/// A weekend-only calendar (no holidays).
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &'static str {
        "Weekend Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }
}

/// A calendar where every day is a business day.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCalendar;

impl Calendar for NullCalendar {
    fn name(&self) -> &'static str {
        "None"
    }

    fn is_business_day(&self, _date: Date) -> bool {
        true
    }
}

/// Selector for the built-in calendars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CalendarType {
    /// Saturdays and Sundays are holidays.
    #[default]
    Weekend,
    /// No holidays.
    None,
}

impl CalendarType {
    /// Creates a boxed calendar implementation.
    #[must_use]
    pub fn to_calendar(&self) -> Box<dyn Calendar> {
        match self {
            CalendarType::Weekend => Box::new(WeekendCalendar),
            CalendarType::None => Box::new(NullCalendar),
        }
    }

    /// Adjusts a date on this calendar.
    #[must_use]
    pub fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Date {
        match self {
            CalendarType::Weekend => WeekendCalendar.adjust(date, convention),
            CalendarType::None => date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekend_calendar() {
        let cal = WeekendCalendar;

        let monday = Date::from_ymd(2025, 1, 6).unwrap();
        assert!(cal.is_business_day(monday));

        let saturday = Date::from_ymd(2025, 1, 4).unwrap();
        assert!(!cal.is_business_day(saturday));
        assert!(cal.is_holiday(saturday));
    }

    #[test]
    fn test_add_business_days() {
        let cal = WeekendCalendar;

        // Friday + 1 business day = Monday
        let friday = Date::from_ymd(2025, 1, 3).unwrap();
        assert_eq!(
            cal.add_business_days(friday, 1),
            Date::from_ymd(2025, 1, 6).unwrap()
        );

        // Monday - 1 business day = Friday
        let monday = Date::from_ymd(2025, 1, 6).unwrap();
        assert_eq!(cal.add_business_days(monday, -1), friday);
    }

    #[test]
    fn test_null_calendar() {
        let saturday = Date::from_ymd(2025, 1, 4).unwrap();
        assert!(NullCalendar.is_business_day(saturday));
        assert_eq!(
            CalendarType::None.adjust(saturday, BusinessDayConvention::Following),
            saturday
        );
    }

    #[test]
    fn test_calendar_type_adjust() {
        // 2009-03-20 is a Friday, 2009-03-21 a Saturday
        let friday = Date::from_ymd(2009, 3, 20).unwrap();
        let saturday = Date::from_ymd(2009, 3, 21).unwrap();
        let conv = BusinessDayConvention::Following;

        assert_eq!(CalendarType::Weekend.adjust(friday, conv), friday);
        assert_eq!(
            CalendarType::Weekend.adjust(saturday, conv),
            Date::from_ymd(2009, 3, 23).unwrap()
        );
        assert_eq!(CalendarType::Weekend.to_calendar().name(), "Weekend Only");
    }
}
