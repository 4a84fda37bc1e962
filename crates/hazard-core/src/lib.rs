//! # Hazard Core
//!
//! Core types and market conventions for the Hazard credit analytics library.
//!
//! This crate provides the foundational building blocks used throughout Hazard:
//!
//! - **Types**: `Date`, `Tenor`, `Frequency`, option type enums
//! - **Day Count Conventions**: Year fraction calculations (ACT/360, ACT/365F, 30/360, ...)
//! - **Business Day Calendars**: Weekend and null calendars with date adjustment rules
//! - **Schedules**: Backward/forward generation of adjusted coupon dates
//!
//! ## Example
//!
//! ```rust
//! use hazard_core::prelude::*;
//!
//! let step_in = Date::from_ymd(2008, 12, 22).unwrap();
//! let maturity = step_in.add_tenor(Tenor::parse("5Y").unwrap()).unwrap().next_cds_date();
//! assert_eq!(maturity, Date::from_ymd(2014, 3, 20).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::similar_names)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod schedule;
pub mod types;

/// Number of days per year used to convert date differences into model time.
pub const DAYS_IN_YEAR: f64 = 365.0;

/// One basis point as a decimal.
pub const ONE_BP: f64 = 0.0001;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{BusinessDayConvention, Calendar, CalendarType};
    pub use crate::daycounts::{DayCount, DayCountConvention, YearFraction};
    pub use crate::error::{HazardError, HazardResult};
    pub use crate::schedule::{DateGenerationRule, Schedule, ScheduleConfig};
    pub use crate::types::{Date, ExerciseStyle, Frequency, OptionType, Tenor, TenorUnit};
    pub use crate::{DAYS_IN_YEAR, ONE_BP};
}

// Re-export commonly used types at crate root
pub use error::{HazardError, HazardResult};
pub use types::{Date, Frequency, Tenor};
