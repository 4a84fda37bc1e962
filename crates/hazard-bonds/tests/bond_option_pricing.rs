//! End-to-end bond option valuation against a Hull-White lattice.

use approx::assert_relative_eq;
use proptest::prelude::*;
use rust_decimal_macros::dec;

use hazard_bonds::prelude::*;
use hazard_core::prelude::*;
use hazard_curves::{DiscountCurve, TermStructure};

fn d(y: i32, m: u32, day: u32) -> Date {
    Date::from_ymd(y, m, day).unwrap()
}

fn coupon_bond() -> Bond {
    Bond::new(
        d(2020, 6, 1),
        d(2028, 6, 1),
        dec!(0.05),
        Frequency::SemiAnnual,
        DayCountConvention::Thirty360US,
    )
    .unwrap()
}

fn zero_bond() -> Bond {
    Bond::new(
        d(2020, 6, 1),
        d(2028, 6, 1),
        dec!(0),
        Frequency::Zero,
        DayCountConvention::Act365Fixed,
    )
    .unwrap()
}

fn upward_curve(value_date: Date) -> DiscountCurve {
    let times = vec![0.25, 1.0, 2.0, 5.0, 10.0];
    let rates: [f64; 5] = [0.020, 0.025, 0.030, 0.035, 0.040];
    let dfs = times.iter().zip(rates).map(|(t, r)| (-r * t).exp()).collect();
    DiscountCurve::new(value_date, times, dfs).unwrap()
}

#[test]
fn test_zero_coupon_schedule_has_no_coupons() {
    let value_date = d(2021, 3, 1);
    let option = BondOption::new(zero_bond(), d(2024, 6, 1), 80.0, OptionType::EuropeanCall).unwrap();
    let (times, amounts) = option.coupon_schedule(value_date);

    assert!(amounts.iter().all(|a| *a == 0.0));
    let maturity_time = value_date.days_between(&d(2028, 6, 1)) as f64 / DAYS_IN_YEAR;
    assert_eq!(*times.last().unwrap(), maturity_time);
}

#[test]
fn test_zero_coupon_parity() {
    let value_date = d(2021, 3, 1);
    let curve = upward_curve(value_date);
    let model = HullWhiteTree::new(0.05, 0.01, 400).unwrap();
    let expiry = d(2024, 6, 1);
    let strike = 85.0;

    let call = BondOption::new(zero_bond(), expiry, strike, OptionType::EuropeanCall).unwrap();
    let put = BondOption::new(zero_bond(), expiry, strike, OptionType::EuropeanPut).unwrap();
    let c = call.value(value_date, &curve, &model).unwrap();
    let p = put.value(value_date, &curve, &model).unwrap();

    // Expiry snaps to the nearest lattice step, so parity holds to within
    // a half step of discounting on the strike
    let forward = 100.0 * curve.df_at(d(2028, 6, 1)) - strike * curve.df_at(expiry);
    assert_relative_eq!(c - p, forward, epsilon = 0.05);
}

#[test]
fn test_bridge_matches_direct_model_call() {
    let value_date = d(2021, 3, 1);
    let curve = upward_curve(value_date);
    let model = HullWhiteTree::new(0.05, 0.012, 200).unwrap();
    let option = BondOption::new(coupon_bond(), d(2023, 6, 1), 101.0, OptionType::AmericanPut).unwrap();

    let via_option = option.value(value_date, &curve, &model).unwrap();

    let (times, amounts) = option.coupon_schedule(value_date);
    let t_exp = value_date.days_between(&d(2023, 6, 1)) as f64 / DAYS_IN_YEAR;
    let t_mat = value_date.days_between(&d(2028, 6, 1)) as f64 / DAYS_IN_YEAR;
    let tree = model.build_tree(t_mat, curve.times(), curve.values()).unwrap();
    let direct = model
        .bond_option(&tree, t_exp, 101.0, 100.0, &times, &amounts, ExerciseStyle::American)
        .unwrap();

    assert_eq!(via_option, direct.put);
}

#[test]
fn test_american_at_least_european() {
    let value_date = d(2021, 3, 1);
    let curve = upward_curve(value_date);
    let model = HullWhiteTree::new(0.03, 0.01, 200).unwrap();
    let expiry = d(2025, 6, 1);

    for strike in [95.0, 100.0, 105.0] {
        let value = |option_type| {
            BondOption::new(coupon_bond(), expiry, strike, option_type)
                .unwrap()
                .value(value_date, &curve, &model)
                .unwrap()
        };
        assert!(value(OptionType::AmericanCall) >= value(OptionType::EuropeanCall) - 1e-10);
        assert!(value(OptionType::AmericanPut) >= value(OptionType::EuropeanPut) - 1e-10);
    }
}

#[test]
fn test_strike_monotonicity() {
    let value_date = d(2021, 3, 1);
    let curve = upward_curve(value_date);
    let model = HullWhiteTree::new(0.05, 0.01, 200).unwrap();
    let expiry = d(2024, 6, 1);

    let value = |strike, option_type| {
        BondOption::new(coupon_bond(), expiry, strike, option_type)
            .unwrap()
            .value(value_date, &curve, &model)
            .unwrap()
    };

    let calls: Vec<f64> = [95.0, 100.0, 105.0]
        .iter()
        .map(|k| value(*k, OptionType::EuropeanCall))
        .collect();
    let puts: Vec<f64> = [95.0, 100.0, 105.0]
        .iter()
        .map(|k| value(*k, OptionType::EuropeanPut))
        .collect();

    assert!(calls.windows(2).all(|w| w[0] >= w[1]));
    assert!(puts.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_digital_types_rejected() {
    let value_date = d(2021, 3, 1);
    let curve = upward_curve(value_date);
    let model = HullWhiteTree::default();

    for option_type in [OptionType::DigitalCall, OptionType::DigitalPut] {
        let option = BondOption::new(coupon_bond(), d(2024, 6, 1), 100.0, option_type).unwrap();
        assert!(matches!(
            option.value(value_date, &curve, &model),
            Err(BondError::InvalidArgument { .. })
        ));
    }
}

#[test]
fn test_expired_option_rejected() {
    let value_date = d(2024, 7, 1);
    let curve = upward_curve(value_date);
    let model = HullWhiteTree::default();
    let option = BondOption::new(coupon_bond(), d(2024, 6, 1), 100.0, OptionType::EuropeanCall).unwrap();

    assert!(option.value(value_date, &curve, &model).is_err());
}

proptest! {
    #[test]
    fn prop_coupon_schedule_ordered(offset in 0i64..2900) {
        let value_date = d(2020, 6, 1).add_days(offset);
        let option = BondOption::new(coupon_bond(), d(2028, 6, 1), 100.0, OptionType::AmericanCall).unwrap();
        let (times, amounts) = option.coupon_schedule(value_date);

        prop_assert_eq!(times.len(), amounts.len());
        prop_assert!(times.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(times.iter().filter(|t| **t < 0.0).count() <= 1);
        prop_assert!(amounts.iter().all(|a| (*a - 0.025).abs() < 1e-15));
    }
}
