//! Golden end-to-end scenarios. Each one exercises the public `solve` entry point the way
//! a caller outside the crate would.

use num::bigint::BigInt;
use num::rational::{BigRational, Ratio};
use pretty_assertions::assert_eq;

use vanderbei_simplex::{solve, LPResult, PivotRule, Regime, ReportedScalar};

fn ratios(values: &[i64]) -> Vec<Ratio<i64>> {
    values.iter().map(|&v| Ratio::from_integer(v)).collect()
}

fn rational(numer: i64, denom: i64) -> ReportedScalar {
    ReportedScalar::Rational(BigRational::new(BigInt::from(numer), BigInt::from(denom)))
}

#[test]
fn example_one_bounded_optimum() {
    let c = ratios(&[5, 4, 3]);
    let a = ratios(&[2, 3, 1, 4, 1, 2, 3, 4, 2]);
    let b = ratios(&[5, 11, 8]);

    let (result, dict) = solve(&c, &a, &b, 3, 3, Regime::Rational, 0.0, PivotRule::Bland);
    assert_eq!(result, LPResult::Optimal);
    let dict = dict.unwrap();
    assert_eq!(dict.value(), rational(13, 1));
    assert_eq!(
        dict.basic_solution(),
        vec![rational(2, 1), rational(0, 1), rational(1, 1)]
    );
}

#[test]
fn two_variable_lp() {
    let c = ratios(&[5, 2]);
    let a = ratios(&[3, 1, 2, 5]);
    let b = ratios(&[7, 5]);

    let (result, dict) = solve(&c, &a, &b, 2, 2, Regime::Rational, 0.0, PivotRule::Bland);
    assert_eq!(result, LPResult::Optimal);
    let dict = dict.unwrap();
    assert_eq!(dict.value(), rational(152, 13));

    let (int_result, int_dict) = solve(&c, &a, &b, 2, 2, Regime::Integer, 0.0, PivotRule::Bland);
    assert_eq!(int_result, LPResult::Optimal);
    let int_dict = int_dict.unwrap();
    assert_eq!(int_dict.value(), rational(152, 13));
    assert!(int_dict.format().contains("13*"));
}

#[test]
fn format_pads_every_name_and_shares_one_value_width() {
    // 9 original variables plus a tenth (the slack) forces a name-width mismatch
    // (`x9` vs `x10`), and a three-digit right-hand side against single-digit
    // coefficients forces a value-width mismatch between the constant column and
    // the coefficient columns. All c_j are already non-positive, so Bland's rule
    // makes zero pivots and `format()` renders the untouched initial dictionary,
    // making the exact output fully predictable by hand.
    let c = ratios(&[-1, -2, -3, -4, -5, -6, -7, -8, -9]);
    let a = ratios(&[1, 1, 1, 1, 1, 1, 1, 1, 1]);
    let b = ratios(&[100]);

    let (result, dict) = solve(&c, &a, &b, 1, 9, Regime::Rational, 0.0, PivotRule::Bland);
    assert_eq!(result, LPResult::Optimal);
    let dict = dict.unwrap();

    let expected = concat!(
        "  z =   0",
        " -   1* x1", " -   2* x2", " -   3* x3", " -   4* x4", " -   5* x5",
        " -   6* x6", " -   7* x7", " -   8* x8", " -   9* x9",
        "\n",
        "x10 = 100",
        " -   1* x1", " -   1* x2", " -   1* x3", " -   1* x4", " -   1* x5",
        " -   1* x6", " -   1* x7", " -   1* x8", " -   1* x9",
    );
    assert_eq!(dict.format(), expected);
}

#[test]
fn infeasible_lp() {
    let c = ratios(&[1, 3]);
    let a = ratios(&[-1, -1, -1, 1, 1, 2]);
    let b = ratios(&[-3, -1, 2]);

    let (result, dict) = solve(&c, &a, &b, 3, 2, Regime::Rational, 0.0, PivotRule::Bland);
    assert_eq!(result, LPResult::Infeasible);
    assert!(dict.is_none());
}

#[test]
fn unbounded_lp() {
    let c = ratios(&[1, 3]);
    let a = ratios(&[-1, -1, -1, 1, -1, 2]);
    let b = ratios(&[-3, -1, 2]);

    let (result, dict) = solve(&c, &a, &b, 3, 2, Regime::Rational, 0.0, PivotRule::Bland);
    assert_eq!(result, LPResult::Unbounded);
    assert!(dict.is_none());
}

#[test]
fn negative_b_two_phase() {
    let c = ratios(&[1, -1, 1]);
    let a = ratios(&[2, -3, 1, 2, -1, 2, -1, 1, -2]);
    let b = ratios(&[-5, 4, -1]);

    let (result, dict) = solve(&c, &a, &b, 3, 3, Regime::Rational, 0.0, PivotRule::Bland);
    assert_eq!(result, LPResult::Optimal);
    let dict = dict.unwrap();
    assert_eq!(dict.value(), rational(3, 5));
}

#[test]
fn trivially_unbounded_under_all_rules() {
    let c = ratios(&[1]);
    let a = ratios(&[-13]);
    let b = ratios(&[2]);

    for rule in [
        PivotRule::Bland,
        PivotRule::LargestCoefficient,
        PivotRule::LargestIncrease,
    ] {
        let (result, dict) = solve(&c, &a, &b, 1, 1, Regime::Rational, 0.0, rule);
        assert_eq!(result, LPResult::Unbounded);
        assert!(dict.is_none());
    }
}

#[test]
fn example_one_agrees_across_regimes() {
    let c = ratios(&[5, 4, 3]);
    let a = ratios(&[2, 3, 1, 4, 1, 2, 3, 4, 2]);
    let b = ratios(&[5, 11, 8]);

    for regime in [Regime::Rational, Regime::Integer] {
        let (result, dict) = solve(&c, &a, &b, 3, 3, regime, 0.0, PivotRule::Bland);
        assert_eq!(result, LPResult::Optimal);
        assert_eq!(dict.unwrap().value(), rational(13, 1));
    }

    let (result, dict) = solve(&c, &a, &b, 3, 3, Regime::Float, 1e-9, PivotRule::Bland);
    assert_eq!(result, LPResult::Optimal);
    match dict.unwrap().value() {
        ReportedScalar::Float(v) => assert!((v - 13.0).abs() < 1e-7),
        other => panic!("expected a float value, got {other:?}"),
    }
}
