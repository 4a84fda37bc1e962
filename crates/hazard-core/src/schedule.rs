//! Schedule generation for coupon legs.
//!
//! Dates are generated backward from the end date or forward from the start
//! date, then adjusted for business days on the configured calendar.
//!
//! # Example
//!
//! ```rust
//! use hazard_core::prelude::*;
//! use hazard_core::schedule::ScheduleConfig;
//!
//! let config = ScheduleConfig::new(
//!     Date::from_ymd(2020, 1, 15).unwrap(),
//!     Date::from_ymd(2025, 1, 15).unwrap(),
//!     Frequency::SemiAnnual,
//! );
//!
//! let schedule = Schedule::generate(config).unwrap();
//! assert_eq!(schedule.num_periods(), 10);
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::calendars::{BusinessDayConvention, CalendarType};
use crate::error::{HazardError, HazardResult};
use crate::types::{Date, Frequency};

/// Direction in which schedule dates are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DateGenerationRule {
    /// Step back from the end date; any stub falls at the front.
    #[default]
    Backward,
    /// Step forward from the start date; any stub falls at the back.
    Forward,
    /// Only the start and end dates.
    Zero,
}

impl std::fmt::Display for DateGenerationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DateGenerationRule::Backward => "Backward",
            DateGenerationRule::Forward => "Forward",
            DateGenerationRule::Zero => "Zero",
        };
        write!(f, "{name}")
    }
}

impl FromStr for DateGenerationRule {
    type Err = HazardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BACKWARD" => Ok(Self::Backward),
            "FORWARD" => Ok(Self::Forward),
            "ZERO" => Ok(Self::Zero),
            _ => Err(HazardError::invalid_configuration(format!(
                "unknown date generation rule: '{s}'"
            ))),
        }
    }
}

/// Configuration for schedule generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// First date of the schedule.
    pub start_date: Date,
    /// Last date of the schedule.
    pub end_date: Date,
    /// Payment frequency.
    pub frequency: Frequency,
    /// Calendar for business day adjustments.
    pub calendar: CalendarType,
    /// Business day adjustment convention.
    pub business_day_convention: BusinessDayConvention,
    /// Generation direction.
    pub generation_rule: DateGenerationRule,
    /// Roll generated dates to month end when the anchor date is a month end.
    pub end_of_month: bool,
}

impl ScheduleConfig {
    /// Creates a new schedule configuration with defaults.
    ///
    /// Defaults: weekend calendar, following, backward generation, no
    /// end-of-month rolling.
    #[must_use]
    pub fn new(start_date: Date, end_date: Date, frequency: Frequency) -> Self {
        Self {
            start_date,
            end_date,
            frequency,
            calendar: CalendarType::Weekend,
            business_day_convention: BusinessDayConvention::Following,
            generation_rule: DateGenerationRule::Backward,
            end_of_month: false,
        }
    }

    /// Sets the calendar for business day adjustments.
    #[must_use]
    pub fn with_calendar(mut self, calendar: CalendarType) -> Self {
        self.calendar = calendar;
        self
    }

    /// Sets the business day convention.
    #[must_use]
    pub fn with_business_day_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.business_day_convention = convention;
        self
    }

    /// Sets the date generation rule.
    #[must_use]
    pub fn with_generation_rule(mut self, rule: DateGenerationRule) -> Self {
        self.generation_rule = rule;
        self
    }

    /// Sets the end-of-month rule.
    #[must_use]
    pub fn with_end_of_month(mut self, eom: bool) -> Self {
        self.end_of_month = eom;
        self
    }
}

/// A date schedule for coupon payments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    unadjusted_dates: Vec<Date>,
    adjusted_dates: Vec<Date>,
}

impl Schedule {
    /// Generates a schedule from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `HazardError::InvalidArgument` if the end date is not after
    /// the start date.
    pub fn generate(config: ScheduleConfig) -> HazardResult<Self> {
        if config.end_date <= config.start_date {
            return Err(HazardError::invalid_argument(format!(
                "schedule end date {} must be after start date {}",
                config.end_date, config.start_date
            )));
        }

        let unadjusted = match (config.generation_rule, config.frequency.period()) {
            (DateGenerationRule::Zero, _) | (_, None) => {
                vec![config.start_date, config.end_date]
            }
            (DateGenerationRule::Backward, Some(period)) => {
                Self::generate_backward(&config, period.count)?
            }
            (DateGenerationRule::Forward, Some(period)) => {
                Self::generate_forward(&config, period.count)?
            }
        };

        let adjusted = unadjusted
            .iter()
            .map(|&date| {
                config
                    .calendar
                    .adjust(date, config.business_day_convention)
            })
            .collect::<Vec<_>>();

        log::debug!(
            "generated {} schedule dates from {} to {} ({})",
            adjusted.len(),
            config.start_date,
            config.end_date,
            config.generation_rule
        );

        Ok(Self {
            unadjusted_dates: unadjusted,
            adjusted_dates: adjusted,
        })
    }

    /// Generates dates backward from the end date.
    fn generate_backward(config: &ScheduleConfig, months_per_period: i32) -> HazardResult<Vec<Date>> {
        let roll_eom = config.end_of_month && config.end_date.is_end_of_month();
        let mut dates = vec![config.end_date];

        let mut n = 1;
        loop {
            let mut current = config.end_date.add_months(-n * months_per_period)?;
            if roll_eom {
                current = current.end_of_month();
            }
            if current <= config.start_date {
                break;
            }
            dates.push(current);
            n += 1;
        }

        dates.push(config.start_date);
        dates.reverse();
        Ok(dates)
    }

    /// Generates dates forward from the start date.
    fn generate_forward(config: &ScheduleConfig, months_per_period: i32) -> HazardResult<Vec<Date>> {
        let roll_eom = config.end_of_month && config.start_date.is_end_of_month();
        let mut dates = vec![config.start_date];

        let mut n = 1;
        loop {
            let mut current = config.start_date.add_months(n * months_per_period)?;
            if roll_eom {
                current = current.end_of_month();
            }
            if current >= config.end_date {
                break;
            }
            dates.push(current);
            n += 1;
        }

        dates.push(config.end_date);
        Ok(dates)
    }

    /// Returns the unadjusted schedule dates.
    #[must_use]
    pub fn unadjusted_dates(&self) -> &[Date] {
        &self.unadjusted_dates
    }

    /// Returns the adjusted schedule dates.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.adjusted_dates
    }

    /// Returns an iterator over the adjusted (start, end) periods.
    pub fn periods(&self) -> impl Iterator<Item = (Date, Date)> + '_ {
        self.adjusted_dates.windows(2).map(|w| (w[0], w[1]))
    }

    /// Returns the number of periods in the schedule.
    #[must_use]
    pub fn num_periods(&self) -> usize {
        self.adjusted_dates.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_schedule_generation_semiannual() {
        let config = ScheduleConfig::new(d(2020, 1, 15), d(2025, 1, 15), Frequency::SemiAnnual);
        let schedule = Schedule::generate(config).unwrap();

        // 5 years, semi-annual = 10 periods + 1 for start = 11 dates
        assert_eq!(schedule.dates().len(), 11);
        assert_eq!(schedule.num_periods(), 10);
    }

    #[test]
    fn test_backward_front_stub() {
        let config = ScheduleConfig::new(d(2020, 3, 1), d(2021, 1, 15), Frequency::Quarterly)
            .with_calendar(CalendarType::None);
        let schedule = Schedule::generate(config).unwrap();

        assert_eq!(
            schedule.dates(),
            &[
                d(2020, 3, 1),
                d(2020, 4, 15),
                d(2020, 7, 15),
                d(2020, 10, 15),
                d(2021, 1, 15)
            ]
        );
    }

    #[test]
    fn test_forward_back_stub() {
        let config = ScheduleConfig::new(d(2020, 3, 1), d(2021, 1, 15), Frequency::Quarterly)
            .with_calendar(CalendarType::None)
            .with_generation_rule(DateGenerationRule::Forward);
        let schedule = Schedule::generate(config).unwrap();

        assert_eq!(
            schedule.dates(),
            &[
                d(2020, 3, 1),
                d(2020, 6, 1),
                d(2020, 9, 1),
                d(2020, 12, 1),
                d(2021, 1, 15)
            ]
        );
    }

    #[test]
    fn test_zero_rule_and_zero_frequency() {
        let config = ScheduleConfig::new(d(2020, 1, 15), d(2025, 1, 15), Frequency::Quarterly)
            .with_generation_rule(DateGenerationRule::Zero);
        assert_eq!(Schedule::generate(config).unwrap().num_periods(), 1);

        let config = ScheduleConfig::new(d(2020, 1, 15), d(2025, 1, 15), Frequency::Zero);
        assert_eq!(Schedule::generate(config).unwrap().dates().len(), 2);
    }

    #[test]
    fn test_end_of_month_rolling() {
        let config = ScheduleConfig::new(d(2024, 8, 31), d(2025, 2, 28), Frequency::Quarterly)
            .with_calendar(CalendarType::None)
            .with_end_of_month(true);
        let schedule = Schedule::generate(config).unwrap();

        assert_eq!(
            schedule.unadjusted_dates(),
            &[d(2024, 8, 31), d(2024, 11, 30), d(2025, 2, 28)]
        );
    }

    #[test]
    fn test_adjustment_applied() {
        // 2025-03-15 is a Saturday
        let config = ScheduleConfig::new(d(2024, 9, 15), d(2025, 3, 15), Frequency::SemiAnnual)
            .with_business_day_convention(BusinessDayConvention::Following);
        let schedule = Schedule::generate(config).unwrap();

        assert_eq!(schedule.unadjusted_dates()[1], d(2025, 3, 15));
        assert_eq!(schedule.dates()[1], d(2025, 3, 17));
    }

    #[test]
    fn test_invalid_range() {
        let config = ScheduleConfig::new(d(2025, 1, 15), d(2025, 1, 15), Frequency::Annual);
        assert!(matches!(
            Schedule::generate(config),
            Err(HazardError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_rule_from_str() {
        assert_eq!(
            "backward".parse::<DateGenerationRule>().unwrap(),
            DateGenerationRule::Backward
        );
        assert!(matches!(
            "sideways".parse::<DateGenerationRule>(),
            Err(HazardError::InvalidConfiguration { .. })
        ));
    }
}
