//! Day count conventions.
//!
//! Day count conventions determine how elapsed time between two dates is
//! converted into a year fraction. CDS premium legs accrue on ACT/360;
//! swap fixed legs and bonds commonly use 30/360 or ACT/365F.
//!
//! # Usage
//!
//! ```rust
//! use hazard_core::daycounts::{DayCount, Act360};
//! use hazard_core::types::Date;
//!
//! let dc = Act360;
//! let start = Date::from_ymd(2025, 1, 1).unwrap();
//! let end = Date::from_ymd(2025, 4, 1).unwrap();
//!
//! let yf = dc.year_frac(start, end);
//! assert_eq!(yf.numerator_days, 90);
//! assert_eq!(yf.denominator_days, 360);
//! ```

mod act360;
mod act365;
mod actact;
mod thirty360;

pub use act360::Act360;
pub use act365::Act365Fixed;
pub use actact::ActActIsda;
pub use thirty360::{Thirty360E, Thirty360US};

use serde::{Deserialize, Serialize};

use crate::error::HazardError;
use crate::types::Date;

/// Year fraction together with the raw day counts that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearFraction {
    /// Elapsed time in years.
    pub fraction: f64,
    /// Days counted under the convention.
    pub numerator_days: i64,
    /// Year basis in days.
    pub denominator_days: i64,
}

/// Trait for day count conventions.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait DayCount: Send + Sync {
    /// Returns the name of the day count convention.
    fn name(&self) -> &'static str;

    /// Calculates the day count between two dates under the convention.
    fn day_count(&self, start: Date, end: Date) -> i64;

    /// Returns the year basis in days used for the period.
    fn denominator_days(&self, start: Date, end: Date) -> i64;

    /// Calculates the year fraction between two dates.
    ///
    /// Negative if `end < start`.
    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.day_count(start, end) as f64 / self.denominator_days(start, end) as f64
    }

    /// Year fraction plus the numerator and denominator day counts.
    fn year_frac(&self, start: Date, end: Date) -> YearFraction {
        YearFraction {
            fraction: self.year_fraction(start, end),
            numerator_days: self.day_count(start, end),
            denominator_days: self.denominator_days(start, end),
        }
    }
}

/// Enumeration of the supported day count conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DayCountConvention {
    /// Actual/360 - CDS premium legs, money market instruments
    #[default]
    Act360,

    /// Actual/365 Fixed
    Act365Fixed,

    /// Actual/Actual ISDA - year-based split
    ActActIsda,

    /// 30/360 US (Bond Basis)
    Thirty360US,

    /// 30E/360 (Eurobond Basis)
    Thirty360E,
}

impl DayCountConvention {
    /// Creates a boxed day count implementation.
    #[must_use]
    pub fn to_day_count(&self) -> Box<dyn DayCount> {
        match self {
            DayCountConvention::Act360 => Box::new(Act360),
            DayCountConvention::Act365Fixed => Box::new(Act365Fixed),
            DayCountConvention::ActActIsda => Box::new(ActActIsda),
            DayCountConvention::Thirty360US => Box::new(Thirty360US),
            DayCountConvention::Thirty360E => Box::new(Thirty360E),
        }
    }

    /// Returns the market name of the convention.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Act360 => "ACT/360",
            DayCountConvention::Act365Fixed => "ACT/365F",
            DayCountConvention::ActActIsda => "ACT/ACT ISDA",
            DayCountConvention::Thirty360US => "30/360 US",
            DayCountConvention::Thirty360E => "30E/360",
        }
    }

    /// Returns all available day count conventions.
    #[must_use]
    pub fn all() -> &'static [DayCountConvention] {
        &[
            DayCountConvention::Act360,
            DayCountConvention::Act365Fixed,
            DayCountConvention::ActActIsda,
            DayCountConvention::Thirty360US,
            DayCountConvention::Thirty360E,
        ]
    }

    /// Year fraction between two dates under this convention.
    #[must_use]
    pub fn year_frac(&self, start: Date, end: Date) -> YearFraction {
        self.to_day_count().year_frac(start, end)
    }
}

impl std::fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DayCountConvention {
    type Err = HazardError;

    /// Parses a day count convention, accepting common aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();

        match normalized.as_str() {
            "ACT/360" | "ACTUAL/360" | "ACT360" => Ok(DayCountConvention::Act360),
            "ACT/365" | "ACT/365F" | "ACT/365 FIXED" | "ACTUAL/365" | "ACT365FIXED" => {
                Ok(DayCountConvention::Act365Fixed)
            }
            "ACT/ACT" | "ACT/ACT ISDA" | "ACTUAL/ACTUAL" | "ACTACTISDA" => {
                Ok(DayCountConvention::ActActIsda)
            }
            "30/360" | "30/360 US" | "30U/360" | "BOND" | "THIRTY360US" => {
                Ok(DayCountConvention::Thirty360US)
            }
            "30E/360" | "EUROBOND" | "THIRTY360E" => Ok(DayCountConvention::Thirty360E),
            _ => Err(HazardError::invalid_configuration(format!(
                "unknown day count convention: '{s}'"
            ))),
        }
    }
}
