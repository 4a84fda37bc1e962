//! Premium leg schedule of a CDS.
//!
//! Dates are stepped from the maturity date (backward) or the step-in date
//! (forward) in whole coupon periods, then holiday adjusted. The first
//! adjusted date is the previous coupon date and is never paid; accrual
//! periods end the day before the next period starts, except the last,
//! which ends on the maturity date itself.

use serde::{Deserialize, Serialize};

use hazard_core::calendars::{BusinessDayConvention, CalendarType};
use hazard_core::daycounts::DayCountConvention;
use hazard_core::schedule::DateGenerationRule;
use hazard_core::types::{Date, Frequency};

use crate::error::{CreditError, CreditResult};

/// Conventions that drive premium leg schedule generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CdsConventions {
    /// Premium payment frequency.
    pub frequency: Frequency,
    /// Accrual day count.
    pub day_count: DayCountConvention,
    /// Holiday calendar.
    pub calendar: CalendarType,
    /// Business day adjustment of coupon dates.
    pub business_day: BusinessDayConvention,
    /// Schedule generation direction.
    pub generation_rule: DateGenerationRule,
}

impl Default for CdsConventions {
    /// Standard contract: quarterly, ACT/360, weekends, following, backward.
    fn default() -> Self {
        Self {
            frequency: Frequency::Quarterly,
            day_count: DayCountConvention::Act360,
            calendar: CalendarType::Weekend,
            business_day: BusinessDayConvention::Following,
            generation_rule: DateGenerationRule::Backward,
        }
    }
}

/// Index-aligned premium leg cash flows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CdsSchedule {
    payment_dates: Vec<Date>,
    accrual_start_dates: Vec<Date>,
    accrual_end_dates: Vec<Date>,
    accrual_factors: Vec<f64>,
    flows: Vec<f64>,
}

impl CdsSchedule {
    /// Generates the premium leg between `step_in_date` and `maturity_date`.
    ///
    /// When no coupon period separates the two dates the schedule is empty.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::InvalidConfiguration` for a zero frequency or a
    /// generation rule other than backward or forward.
    pub fn generate(
        step_in_date: Date,
        maturity_date: Date,
        running_coupon: f64,
        notional: f64,
        conventions: &CdsConventions,
    ) -> CreditResult<Self> {
        let months = conventions.frequency.months_per_period() as i32;
        if months == 0 {
            return Err(CreditError::invalid_configuration(format!(
                "CDS premium leg needs a periodic frequency, got {}",
                conventions.frequency
            )));
        }

        let unadjusted = match conventions.generation_rule {
            DateGenerationRule::Backward => {
                let mut dates = vec![maturity_date];
                let mut next = maturity_date;
                while next > step_in_date {
                    next = next.add_months(-months)?;
                    dates.push(next);
                }
                dates.reverse();
                dates
            }
            DateGenerationRule::Forward => {
                let mut dates = Vec::new();
                let mut next = step_in_date;
                while next < maturity_date {
                    dates.push(next);
                    next = next.add_months(months)?;
                }
                dates.push(maturity_date);
                dates
            }
            rule => {
                return Err(CreditError::invalid_configuration(format!(
                    "Unsupported date generation rule for CDS: {rule}"
                )));
            }
        };

        if unadjusted.len() < 2 {
            log::warn!(
                "empty CDS schedule: step-in {step_in_date} leaves no coupon period before {maturity_date}"
            );
            return Ok(Self::default());
        }

        let calendar = conventions.calendar;
        let adjusted: Vec<Date> = unadjusted
            .iter()
            .map(|&d| calendar.adjust(d, conventions.business_day))
            .collect();

        let payment_dates = adjusted[1..].to_vec();
        let accrual_start_dates = adjusted[..adjusted.len() - 1].to_vec();
        let mut accrual_end_dates: Vec<Date> =
            accrual_start_dates[1..].iter().map(|d| d.add_days(-1)).collect();
        accrual_end_dates.push(maturity_date);

        // Inclusive of the end date, so the 20th to the 22nd is three days
        let accrual_factors: Vec<f64> = accrual_start_dates
            .iter()
            .zip(&accrual_end_dates)
            .map(|(&start, &end)| conventions.day_count.year_frac(start, end.add_days(1)).fraction)
            .collect();

        let flows = accrual_factors
            .iter()
            .map(|af| af * running_coupon * notional)
            .collect();

        Ok(Self {
            payment_dates,
            accrual_start_dates,
            accrual_end_dates,
            accrual_factors,
            flows,
        })
    }

    /// Returns a copy with flows recomputed for a new coupon.
    #[must_use]
    pub(crate) fn with_coupon(&self, running_coupon: f64, notional: f64) -> Self {
        Self {
            flows: self
                .accrual_factors
                .iter()
                .map(|af| af * running_coupon * notional)
                .collect(),
            ..self.clone()
        }
    }

    /// Adjusted premium payment dates.
    #[must_use]
    pub fn payment_dates(&self) -> &[Date] {
        &self.payment_dates
    }

    /// Start of each accrual period; the first is the previous coupon date.
    #[must_use]
    pub fn accrual_start_dates(&self) -> &[Date] {
        &self.accrual_start_dates
    }

    /// Last accrued day of each period.
    #[must_use]
    pub fn accrual_end_dates(&self) -> &[Date] {
        &self.accrual_end_dates
    }

    /// Year fraction of each accrual period.
    #[must_use]
    pub fn accrual_factors(&self) -> &[f64] {
        &self.accrual_factors
    }

    /// Premium amount paid at each payment date.
    #[must_use]
    pub fn flows(&self) -> &[f64] {
        &self.flows
    }

    /// Previous coupon date, if the schedule has any periods.
    #[must_use]
    pub fn previous_coupon_date(&self) -> Option<Date> {
        self.accrual_start_dates.first().copied()
    }

    /// Number of premium periods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.payment_dates.len()
    }

    /// Returns true if the schedule has no periods.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.payment_dates.is_empty()
    }
}
