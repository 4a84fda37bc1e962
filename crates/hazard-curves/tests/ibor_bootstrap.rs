//! Bootstrap repricing and bump behaviour of the Ibor curve.

use approx::assert_abs_diff_eq;
use proptest::prelude::*;

use hazard_core::prelude::*;
use hazard_curves::instruments::CurveInstrument;
use hazard_curves::prelude::*;

fn value_date() -> Date {
    Date::from_ymd(2008, 12, 22).unwrap()
}

fn market(vd: Date, shift: f64) -> IborCurve {
    let deposits = ["1M", "3M", "6M"]
        .iter()
        .zip([0.0190, 0.0210, 0.0225])
        .map(|(tenor, rate)| {
            IborDeposit::from_tenor(vd, tenor, rate + shift, DayCountConvention::Act360).unwrap()
        })
        .collect();

    let fra_start = vd.add_months(6).unwrap();
    let fra_end = vd.add_months(9).unwrap();
    let fras = vec![IborFra::new(fra_start, fra_end, 0.0240 + shift, DayCountConvention::Act360).unwrap()];

    let swaps = ["2Y", "3Y", "5Y", "7Y", "10Y"]
        .iter()
        .zip([0.0260, 0.0290, 0.0330, 0.0355, 0.0380])
        .map(|(tenor, rate)| {
            IborSwap::from_tenor(
                vd,
                tenor,
                SwapType::Pay,
                rate + shift,
                Frequency::SemiAnnual,
                DayCountConvention::Thirty360US,
            )
            .unwrap()
        })
        .collect();

    IborCurve::build(vd, deposits, fras, swaps).unwrap()
}

#[test]
fn curve_reprices_every_instrument() {
    let vd = value_date();
    let curve = market(vd, 0.0);
    let dc = curve.discount_curve();

    for deposit in curve.deposits() {
        assert_abs_diff_eq!(deposit.value(vd, dc), 0.0, epsilon = 1e-9);
    }
    for fra in curve.fras() {
        assert_abs_diff_eq!(fra.value(vd, dc), 0.0, epsilon = 1e-9);
    }
    for swap in curve.swaps() {
        // Fixed leg notional is 1,000,000
        assert_abs_diff_eq!(swap.value(vd, dc), 0.0, epsilon = 1e-3);
    }
}

#[test]
fn curve_has_one_node_per_instrument() {
    let curve = market(value_date(), 0.0);
    // 3 deposits + 1 FRA + 5 swaps + the anchor node
    assert_eq!(curve.times().len(), 10);
    assert_eq!(curve.values()[0], 1.0);
    assert!(curve.values().windows(2).all(|w| w[1] < w[0]));
}

#[test]
fn fra_forward_matches_quote() {
    let curve = market(value_date(), 0.0);
    let fra = &curve.fras()[0];
    assert_abs_diff_eq!(fra.forward_rate(curve.discount_curve()), fra.fra_rate(), epsilon = 1e-9);
}

#[test]
fn bumped_curve_matches_shifted_market() {
    let vd = value_date();
    let base = market(vd, 0.0);
    let bumped = base.bumped(ONE_BP).unwrap();
    let shifted = market(vd, ONE_BP);

    for t in [0.25, 1.0, 4.0, 9.5] {
        assert_abs_diff_eq!(bumped.df(t), shifted.df(t), epsilon = 1e-8);
        assert!(bumped.df(t) < base.df(t));
    }
}

proptest! {
    #[test]
    fn flat_deposit_curve_discounts_monotonically(rate in 0.001f64..0.10) {
        let vd = value_date();
        let deposits = ["1M", "3M", "6M", "12M"]
            .iter()
            .map(|tenor| IborDeposit::from_tenor(vd, tenor, rate, DayCountConvention::Act360).unwrap())
            .collect();
        let curve = IborCurve::build(vd, deposits, vec![], vec![]).unwrap();

        let mut previous = 1.0;
        for step in 1..=24 {
            let df = curve.df(f64::from(step) * 0.05);
            prop_assert!(df < previous);
            previous = df;
        }
    }
}
