//! Payment frequency.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::tenor::Tenor;

/// Payment frequency for coupon legs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Frequency {
    /// Annual payments (1 per year)
    Annual,
    /// Semi-annual payments (2 per year)
    SemiAnnual,
    /// Quarterly payments (4 per year) - standard for CDS premium legs
    #[default]
    Quarterly,
    /// Monthly payments (12 per year)
    Monthly,
    /// Zero coupon (no periodic payments)
    Zero,
}

impl Frequency {
    /// Returns the number of periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::Quarterly => 4,
            Frequency::Monthly => 12,
            Frequency::Zero => 0,
        }
    }

    /// Returns the number of months per period.
    #[must_use]
    pub fn months_per_period(&self) -> u32 {
        match self {
            Frequency::Annual => 12,
            Frequency::SemiAnnual => 6,
            Frequency::Quarterly => 3,
            Frequency::Monthly => 1,
            Frequency::Zero => 0,
        }
    }

    /// Returns the period length as a tenor, or `None` for zero coupon.
    #[must_use]
    pub fn period(&self) -> Option<Tenor> {
        if self.is_zero() {
            None
        } else {
            Some(Tenor::months(self.months_per_period() as i32))
        }
    }

    /// Returns true if this is a zero coupon (no periodic payments).
    #[must_use]
    pub fn is_zero(&self) -> bool {
        matches!(self, Frequency::Zero)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Annual => "Annual",
            Frequency::SemiAnnual => "Semi-Annual",
            Frequency::Quarterly => "Quarterly",
            Frequency::Monthly => "Monthly",
            Frequency::Zero => "Zero Coupon",
        };
        write!(f, "{name}")
    }
}
