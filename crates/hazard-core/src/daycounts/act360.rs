//! Actual/360 day count convention.
//!
//! The standard accrual basis for CDS premium legs and money market deposits.

use super::DayCount;
use crate::types::Date;

/// Actual/360 day count convention.
///
/// $$\text{Year Fraction} = \frac{\text{Actual Days}}{360}$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act360;

impl DayCount for Act360 {
    fn name(&self) -> &'static str {
        "ACT/360"
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }

    fn denominator_days(&self, _start: Date, _end: Date) -> i64 {
        360
    }
}
