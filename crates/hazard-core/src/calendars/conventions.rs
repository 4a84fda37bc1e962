//! Business day adjustment conventions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::Calendar;
use crate::error::HazardError;
use crate::types::Date;

/// Business day adjustment conventions.
///
/// These conventions specify how to adjust a date that falls
/// on a non-business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BusinessDayConvention {
    /// No adjustment - use the date as-is even if not a business day.
    Unadjusted,

    /// Move to the following business day.
    #[default]
    Following,

    /// Move to the following business day, unless it crosses a month boundary,
    /// in which case move to the preceding business day.
    ModifiedFollowing,

    /// Move to the preceding business day.
    Preceding,

    /// Move to the preceding business day, unless it crosses a month boundary,
    /// in which case move to the following business day.
    ModifiedPreceding,
}

impl std::fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BusinessDayConvention::Unadjusted => "Unadjusted",
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::ModifiedPreceding => "Modified Preceding",
        };
        write!(f, "{name}")
    }
}

impl FromStr for BusinessDayConvention {
    type Err = HazardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace(['_', ' '], "").as_str() {
            "UNADJUSTED" | "NONE" => Ok(Self::Unadjusted),
            "FOLLOWING" | "F" => Ok(Self::Following),
            "MODIFIEDFOLLOWING" | "MF" => Ok(Self::ModifiedFollowing),
            "PRECEDING" | "P" => Ok(Self::Preceding),
            "MODIFIEDPRECEDING" | "MP" => Ok(Self::ModifiedPreceding),
            _ => Err(HazardError::invalid_configuration(format!(
                "unknown business day convention: '{s}'"
            ))),
        }
    }
}

/// Adjusts a date according to the given business day convention.
pub fn adjust<C: Calendar + ?Sized>(
    date: Date,
    convention: BusinessDayConvention,
    calendar: &C,
) -> Date {
    if calendar.is_business_day(date) {
        return date;
    }

    match convention {
        BusinessDayConvention::Unadjusted => date,

        BusinessDayConvention::Following => following(date, calendar),

        BusinessDayConvention::ModifiedFollowing => {
            let adjusted = following(date, calendar);
            if adjusted.month() == date.month() {
                adjusted
            } else {
                preceding(date, calendar)
            }
        }

        BusinessDayConvention::Preceding => preceding(date, calendar),

        BusinessDayConvention::ModifiedPreceding => {
            let adjusted = preceding(date, calendar);
            if adjusted.month() == date.month() {
                adjusted
            } else {
                following(date, calendar)
            }
        }
    }
}

/// Returns the next business day on or after the given date.
fn following<C: Calendar + ?Sized>(mut date: Date, calendar: &C) -> Date {
    while !calendar.is_business_day(date) {
        date = date.add_days(1);
    }
    date
}

/// Returns the previous business day on or before the given date.
fn preceding<C: Calendar + ?Sized>(mut date: Date, calendar: &C) -> Date {
    while !calendar.is_business_day(date) {
        date = date.add_days(-1);
    }
    date
}
