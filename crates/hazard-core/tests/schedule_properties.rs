//! Property tests for dates and schedule generation.

use hazard_core::prelude::*;
use proptest::prelude::*;

fn arb_date() -> impl Strategy<Value = Date> {
    (2000i32..2040, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| Date::from_ymd(y, m, d).unwrap())
}

fn arb_frequency() -> impl Strategy<Value = Frequency> {
    prop_oneof![
        Just(Frequency::Annual),
        Just(Frequency::SemiAnnual),
        Just(Frequency::Quarterly),
        Just(Frequency::Monthly),
    ]
}

proptest! {
    #[test]
    fn next_cds_date_is_a_roll_date_within_a_quarter(date in arb_date()) {
        let next = date.next_cds_date();
        prop_assert!(next > date);
        prop_assert_eq!(next.day(), 20);
        prop_assert_eq!(next.month() % 3, 0);
        prop_assert!(date.days_between(&next) <= 92);
    }

    #[test]
    fn unadjusted_schedule_is_strictly_increasing(
        start in arb_date(),
        months in 1i32..120,
        frequency in arb_frequency(),
        forward in any::<bool>(),
    ) {
        let end = start.add_months(months).unwrap();
        let rule = if forward { DateGenerationRule::Forward } else { DateGenerationRule::Backward };
        let config = ScheduleConfig::new(start, end, frequency).with_generation_rule(rule);
        let schedule = Schedule::generate(config).unwrap();

        let dates = schedule.unadjusted_dates();
        prop_assert_eq!(dates.first().copied(), Some(start));
        prop_assert_eq!(dates.last().copied(), Some(end));
        prop_assert!(dates.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(schedule.dates().len(), dates.len());
    }

    #[test]
    fn adjusted_dates_are_business_days(
        start in arb_date(),
        months in 1i32..60,
    ) {
        let end = start.add_months(months).unwrap();
        let config = ScheduleConfig::new(start, end, Frequency::Quarterly)
            .with_business_day_convention(BusinessDayConvention::ModifiedFollowing);
        let schedule = Schedule::generate(config).unwrap();

        for date in schedule.dates() {
            prop_assert!(!date.is_weekend());
        }
    }

    #[test]
    fn act360_year_fraction_is_linear_in_days(start in arb_date(), days in 0i64..4000) {
        let end = start + days;
        let yf = DayCountConvention::Act360.year_frac(start, end);
        prop_assert_eq!(yf.numerator_days, days);
        prop_assert!((yf.fraction - days as f64 / 360.0).abs() < 1e-12);
    }
}

#[test]
fn standard_cds_maturity_from_tenor() {
    let step_in = Date::from_ymd(2008, 12, 22).unwrap();
    let maturity = step_in
        .add_tenor(Tenor::parse("5Y").unwrap())
        .unwrap()
        .next_cds_date();
    assert_eq!(maturity, Date::from_ymd(2014, 3, 20).unwrap());
}
