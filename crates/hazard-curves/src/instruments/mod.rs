//! Calibration instruments for the Ibor curve.
//!
//! - [`IborDeposit`]: money market deposits for the short end
//! - [`IborFra`]: forward rate agreements
//! - [`IborSwap`]: fixed-for-floating swaps; the fixed leg is a
//!   [`SwapFixedLeg`] and the floating leg is valued on the same curve
//!
//! Each instrument implements [`CurveInstrument`], which gives the
//! bootstrapper a node date and a present value to drive to zero.

mod deposit;
mod fixed_leg;
mod fra;
mod swap;

pub use deposit::IborDeposit;
pub use fixed_leg::{FixedLegTerms, SwapFixedLeg};
pub use fra::IborFra;
pub use swap::{IborSwap, SwapType};

use hazard_core::calendars::{BusinessDayConvention, CalendarType};
use hazard_core::types::{Date, Tenor};

use crate::discount_curve::DiscountCurve;
use crate::error::CurveResult;

/// An instrument that can be used to calibrate a discount curve.
pub trait CurveInstrument: Send + Sync {
    /// The date at which the bootstrapper places this instrument's node.
    fn maturity_date(&self) -> Date;

    /// Present value at `value_date` on the given curve.
    ///
    /// Zero when the curve reprices the instrument's quote.
    fn value(&self, value_date: Date, curve: &DiscountCurve) -> f64;

    /// Short description used in error messages and logs.
    fn description(&self) -> String;
}

/// Adds a tenor string to a start date and rolls the result to a business day.
pub(crate) fn maturity_from_tenor(start: Date, tenor: &str) -> CurveResult<Date> {
    let unadjusted = start.add_tenor(Tenor::parse(tenor)?)?;
    Ok(CalendarType::Weekend.adjust(unadjusted, BusinessDayConvention::ModifiedFollowing))
}
