//! End-to-end CDS valuation against bootstrapped and flat curves.

use approx::{assert_abs_diff_eq, assert_relative_eq};

use hazard_core::prelude::*;
use hazard_credit::prelude::*;
use hazard_curves::prelude::*;

fn d(y: i32, m: u32, day: u32) -> Date {
    Date::from_ymd(y, m, day).unwrap()
}

fn ibor_curve(value_date: Date) -> IborCurve {
    let deposits = ["1M", "3M", "6M"]
        .iter()
        .zip([0.0102, 0.0115, 0.0130])
        .map(|(tenor, rate)| {
            IborDeposit::from_tenor(value_date, tenor, rate, DayCountConvention::Act360).unwrap()
        })
        .collect();
    let swaps = ["2Y", "3Y", "5Y", "7Y", "10Y"]
        .iter()
        .zip([0.0180, 0.0220, 0.0275, 0.0310, 0.0340])
        .map(|(tenor, rate)| {
            IborSwap::from_tenor(
                value_date,
                tenor,
                SwapType::Pay,
                rate,
                Frequency::SemiAnnual,
                DayCountConvention::Thirty360US,
            )
            .unwrap()
        })
        .collect();
    IborCurve::build(value_date, deposits, vec![], swaps).unwrap()
}

fn issuer_curve(value_date: Date) -> IssuerCurve {
    let quotes = [(1, 0.0080), (3, 0.0110), (5, 0.0135), (7, 0.0150), (10, 0.0160)]
        .iter()
        .map(|&(years, spread)| Cds::standard(value_date, Tenor::years(years), spread, true).unwrap())
        .collect();
    IssuerCurve::build(
        value_date,
        quotes,
        0.40,
        ibor_curve(value_date),
        CdsPricingConfig::default(),
    )
    .unwrap()
}

#[test]
fn short_first_period_schedule() {
    let cds = Cds::standard(d(2008, 12, 22), d(2009, 3, 20), 0.0100, true).unwrap();
    let schedule = cds.schedule();

    assert_eq!(schedule.payment_dates(), &[d(2009, 3, 20)]);
    assert_eq!(schedule.accrual_start_dates(), &[d(2008, 12, 22)]);
    assert_eq!(schedule.accrual_end_dates(), &[d(2009, 3, 20)]);
    assert_eq!(schedule.len(), schedule.accrual_factors().len());
}

#[test]
fn calibration_contracts_reprice() {
    let vd = d(2009, 5, 1);
    let curve = issuer_curve(vd);
    let config = CdsPricingConfig::default();

    // The 1Y contract's last payment is rolled to Monday 2010-06-21, a day
    // past its node, so it reprices to within a sliver of the next hazard
    for cds in curve.cds_contracts() {
        let value = cds.value(vd, &curve, 0.40, &config);
        assert_abs_diff_eq!(value.clean_pv / cds.notional(), 0.0, epsilon = 1e-7);
        let spread = cds.par_spread(vd, &curve, 0.40, &config).unwrap();
        assert_abs_diff_eq!(spread, cds.running_coupon(), epsilon = 2e-7);
    }

    let last = &curve.cds_contracts()[4];
    assert_abs_diff_eq!(last.value(vd, &curve, 0.40, &config).clean_pv, 0.0, epsilon = 1e-6);
}

#[test]
fn par_spread_round_trip() {
    let vd = d(2009, 5, 1);
    let curve = issuer_curve(vd);
    let config = CdsPricingConfig::default();

    for years in [2, 4, 6, 8] {
        let cds = Cds::standard(vd, Tenor::years(years), 0.0500, true).unwrap();
        let spread = cds.par_spread(vd, &curve, 0.40, &config).unwrap();
        let at_par = cds.with_running_coupon(spread);
        let value = at_par.value(vd, &curve, 0.40, &config);
        assert_abs_diff_eq!(value.clean_pv, 0.0, epsilon = 1e-6);
    }
}

#[test]
fn dirty_and_clean_differ_by_accrued_premium() {
    let vd = d(2009, 5, 1);
    let curve = issuer_curve(vd);
    let config = CdsPricingConfig::default();
    let cds = Cds::standard(vd, Tenor::years(5), 0.0100, true).unwrap();

    let value = cds.value(vd, &curve, 0.40, &config);
    let rpv01 = cds.risky_pv01(vd, &curve, config.rpv01_method);
    let premium = cds.premium_leg_pv(vd, &curve, config.rpv01_method);

    assert_relative_eq!(rpv01.full - rpv01.clean, 42.0 / 360.0, epsilon = 1e-12);
    assert_relative_eq!(value.clean_pv - value.dirty_pv, 0.01 * 1_000_000.0 * 42.0 / 360.0, epsilon = 1e-6);
    assert_relative_eq!(premium, rpv01.full * 0.01 * 1_000_000.0, epsilon = 1e-9);
}

#[test]
fn sensitivities_rebuild_without_touching_inputs() {
    let vd = d(2009, 5, 1);
    let curve = issuer_curve(vd);
    let snapshot = curve.clone();
    let config = CdsPricingConfig::default();

    let long = Cds::standard(vd, Tenor::years(5), 0.0100, true).unwrap();
    let short = Cds::standard(vd, Tenor::years(5), 0.0100, false).unwrap();

    let credit_long = long.credit_dv01(vd, &curve, 0.40, &config).unwrap();
    let credit_short = short.credit_dv01(vd, &curve, 0.40, &config).unwrap();
    let interest_long = long.interest_dv01(vd, &curve, 0.40, &config).unwrap();
    let interest_short = short.interest_dv01(vd, &curve, 0.40, &config).unwrap();

    // Wider spreads make protection more valuable
    assert!(credit_long > 0.0);
    assert_relative_eq!(credit_short, -credit_long, max_relative = 1e-10);
    // The 100bp buyer is in the money against a 135bp curve, and higher
    // rates shrink the annuity that value is paid over
    assert!(interest_long < 0.0);
    assert!(interest_short > 0.0);
    assert_relative_eq!(interest_short, -interest_long, max_relative = 1e-10);
    assert!(interest_long.abs() < credit_long);
    assert_eq!(curve, snapshot);
}

#[test]
fn cash_settlement_forwards_value() {
    let vd = d(2009, 5, 1);
    let curve = issuer_curve(vd);
    let config = CdsPricingConfig::default();
    let cds = Cds::standard(vd, Tenor::years(5), 0.0100, true).unwrap();

    let settle = d(2009, 5, 6);
    let value = cds.value(vd, &curve, 0.40, &config);
    let cash = cds.cash_settlement_amount(vd, settle, &curve, 0.40, &config);
    assert_relative_eq!(cash.dirty_pv, value.dirty_pv / curve.df_at(settle), epsilon = 1e-9);
    assert!(cash.dirty_pv > value.dirty_pv);
}

#[test]
fn clean_price_ignores_direction() {
    let vd = d(2009, 5, 1);
    let curve = issuer_curve(vd);
    let config = CdsPricingConfig::default();
    let long = Cds::standard(vd, Tenor::years(5), 0.0100, true).unwrap();
    let short = Cds::standard(vd, Tenor::years(5), 0.0100, false).unwrap();

    let price = long.clean_price(vd, &curve, 0.40, &config);
    assert_eq!(price, short.clean_price(vd, &curve, 0.40, &config));
    // Coupon below par spread: protection buyer's clean value is positive
    assert!(price < 100.0);
    let clean = long.value(vd, &curve, 0.40, &config).clean_pv;
    assert_relative_eq!(price, (1_000_000.0 - clean) / 1_000_000.0 * 100.0, epsilon = 1e-9);
}

#[test]
fn accrued_sign_per_call_site() {
    let vd = d(2009, 5, 1);
    let long = Cds::standard(vd, Tenor::years(5), 0.0100, true).unwrap();
    let short = Cds::standard(vd, Tenor::years(5), 0.0100, false).unwrap();

    // accrued_interest flips with direction
    assert!(long.accrued_interest() < 0.0);
    assert_eq!(short.accrued_interest(), -long.accrued_interest());
    // accrued_days does not
    assert_eq!(long.accrued_days(), short.accrued_days());

    // value_fast_approx adds the signed accrued once, in every evaluation
    for cds in [&long, &short] {
        let approx = cds.value_fast_approx(vd, 0.02, 0.012, 0.4, 0.4);
        assert_relative_eq!(approx.full_pv - approx.clean_pv, cds.accrued_interest(), epsilon = 1e-9);
    }
}

#[test]
fn zero_length_contract_is_worthless() {
    let vd = d(2009, 3, 20);
    let curve = issuer_curve(d(2009, 3, 20));
    let config = CdsPricingConfig::default();
    let cds = Cds::standard(vd, vd, 0.0100, true).unwrap();

    assert!(cds.schedule().is_empty());
    assert_eq!(cds.accrued_days(), 0);
    let value = cds.value(vd, &curve, 0.40, &config);
    assert_eq!(value.dirty_pv, 0.0);
    assert_eq!(value.clean_pv, 0.0);
    assert!(matches!(
        cds.par_spread(vd, &curve, 0.40, &config),
        Err(CreditError::NumericalFailure { .. })
    ));
}

#[test]
fn fast_approx_matches_integrators_on_flat_curves() {
    let vd = d(2009, 3, 20);
    let (r, spread, recovery): (f64, f64, f64) = (0.03, 0.0120, 0.40);
    let h = spread / (1.0 - recovery);

    let ibor = IborCurve::from_discount_curve(DiscountCurve::flat(vd, r).unwrap());
    let curve =
        IssuerCurve::from_nodes(vd, vec![0.0, 10.0], vec![1.0, (-h * 10.0).exp()], recovery, ibor)
            .unwrap();
    let config = CdsPricingConfig::default();
    let cds = Cds::standard(vd, Tenor::years(5), 0.0100, true).unwrap();

    let approx = cds.value_fast_approx(vd, r, spread, recovery, recovery);
    let protection = cds.protection_leg_pv(vd, &curve, recovery, &config);
    let rpv01 = cds.risky_pv01(vd, &curve, config.rpv01_method);

    let t_mat = (cds.maturity_date() - vd) as f64 / 365.0;
    let w = r + h;
    let z = 1.0 - (-w * t_mat).exp();
    assert_relative_eq!(protection, h * (1.0 - recovery) * z / w * 1_000_000.0, max_relative = 1e-6);
    assert_relative_eq!(rpv01.clean, z / w * 365.0 / 360.0, max_relative = 1e-2);

    // Discrete coupons against a continuous annuity: agree to 10bp of notional
    let integrated = protection - 0.01 * rpv01.clean * 1_000_000.0;
    assert_abs_diff_eq!(approx.clean_pv, integrated, epsilon = 1_000.0);
}

#[test]
fn fast_approx_credit01_converges_to_slope() {
    let vd = d(2009, 5, 1);
    let cds = Cds::standard(vd, Tenor::years(5), 0.0100, true).unwrap();
    let eps = 1e-7;

    let up = cds.value_fast_approx(vd, 0.03, 0.015 + eps, 0.4, 0.4).full_pv;
    let down = cds.value_fast_approx(vd, 0.03, 0.015 - eps, 0.4, 0.4).full_pv;
    let slope = (up - down) / (2.0 * eps);

    let approx = cds.value_fast_approx(vd, 0.03, 0.015, 0.4, 0.4);
    assert_relative_eq!(approx.credit01, slope * ONE_BP, max_relative = 1e-2);

    let up = cds.value_fast_approx(vd, 0.03 + eps, 0.015, 0.4, 0.4).full_pv;
    let down = cds.value_fast_approx(vd, 0.03 - eps, 0.015, 0.4, 0.4).full_pv;
    let slope = (up - down) / (2.0 * eps);
    assert_relative_eq!(approx.ir01, slope * ONE_BP, max_relative = 1e-2);
}

#[test]
fn linear_and_flat_hazard_methods_agree() {
    let vd = d(2009, 5, 1);
    let curve = issuer_curve(vd);
    let cds = Cds::standard(vd, Tenor::years(5), 0.0100, true).unwrap();

    let flat = cds.value(vd, &curve, 0.40, &CdsPricingConfig::default());
    let linear = cds.value(
        vd,
        &curve,
        0.40,
        &CdsPricingConfig::default().with_method(IntegrationMethod::Linear),
    );
    assert_relative_eq!(flat.dirty_pv, linear.dirty_pv, max_relative = 1e-3);
}
