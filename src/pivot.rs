//! Pivot rules: pure functions of a dictionary that propose the next `(entering, leaving)`
//! pair, or signal optimal / unbounded. Grounded on the teacher's `Tableau::ratio_test` and
//! `lex_min_ratio.rs` for the ratio-test shape, generalized from lexicographic tie-breaking
//! across many columns down to the single-candidate min-ratio this dictionary needs.
//!
//! Ratio comparisons never divide: two ratios `n1/d1` and `n2/d2` (both `d`s positive, by
//! construction the absolute value of a negative pivot-column entry) are compared by
//! cross-multiplying `n1*d2` against `n2*d1`, the same way the teacher's `ratio_test`
//! compares `A[rowa,colb]*A[rowb,cola]` against `A[rowb,colb]*A[rowa,cola]` with no
//! intermediate division. This keeps the comparison exact for the Rational and Integer
//! regimes, where rounding through `f64` could pick the wrong leaving row.

use crate::dictionary::Dictionary;
use crate::scalar::{eps_correct, Scalar};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PivotRule {
    Bland,
    LargestCoefficient,
    LargestIncrease,
}

/// Sentinel entering index used by [`largest_increase`] to signal "unbounded" without a
/// leaving variable, per the Open Question resolution recorded in the design ledger.
pub const UNBOUNDED_ENTERING: usize = usize::MAX;

impl PivotRule {
    pub fn select(self, d: &Dictionary, eps: f64) -> (Option<usize>, Option<usize>) {
        match self {
            PivotRule::Bland => bland(d, eps),
            PivotRule::LargestCoefficient => largest_coefficient(d, eps),
            PivotRule::LargestIncrease => largest_increase(d, eps),
        }
    }
}

/// Leftmost column with a strictly positive (eps-corrected) objective coefficient.
pub fn bland(d: &Dictionary, eps: f64) -> (Option<usize>, Option<usize>) {
    for j in 0..d.n_len() {
        if eps_correct(d.objective_coeff(j), eps).is_positive() {
            let (leaving, _) = min_ratio(d, j, eps);
            return (Some(j), leaving);
        }
    }
    (None, None)
}

/// Column with the greatest strictly positive (eps-corrected) objective coefficient; on
/// ties, the last such column wins (the written rule, not the source's first-wins `<`).
pub fn largest_coefficient(d: &Dictionary, eps: f64) -> (Option<usize>, Option<usize>) {
    let mut best: Option<(usize, Scalar)> = None;
    for j in 0..d.n_len() {
        let corrected = eps_correct(d.objective_coeff(j), eps);
        if !corrected.is_positive() {
            continue;
        }
        let take = match &best {
            None => true,
            Some((_, best_val)) => corrected >= *best_val,
        };
        if take {
            best = Some((j, corrected));
        }
    }
    match best {
        None => (None, None),
        Some((j, _)) => {
            let (leaving, _) = min_ratio(d, j, eps);
            (Some(j), leaving)
        }
    }
}

/// Column maximising the true objective-value increase `coeff * ratio`, compared exactly
/// via cross-multiplication of the `coeff*numerator` / `denominator` fractions returned by
/// [`min_ratio`]. A column with a positive coefficient but no bounding row signals
/// immediate unbounded.
pub fn largest_increase(d: &Dictionary, eps: f64) -> (Option<usize>, Option<usize>) {
    let mut best: Option<(usize, Option<usize>, Scalar, Scalar)> = None;

    for j in 0..d.n_len() {
        let coeff = eps_correct(d.objective_coeff(j), eps);
        if !coeff.is_positive() {
            continue;
        }
        let (leaving, ratio) = min_ratio(d, j, eps);
        if leaving.is_none() {
            return (Some(UNBOUNDED_ENTERING), None);
        }
        let (numer, denom) = ratio.expect("a leaving row always carries a ratio");
        let increase_numer = coeff.mul(&numer);

        let take = match &best {
            None => true,
            Some((_, _, best_numer, best_denom)) => {
                // increase_numer/denom > best_numer/best_denom, both denominators positive.
                increase_numer.mul(best_denom) > best_numer.mul(&denom)
            }
        };
        if take {
            best = Some((j, leaving, increase_numer, denom));
        }
    }

    match best {
        None => (None, None),
        Some((j, leaving, _, _)) => (Some(j), leaving),
    }
}

/// For entering column `k`, finds the row that first goes to zero as `x_k` increases:
/// the row `i` minimising `C[i,0] / -C[i,k]` among rows with `C[i,k] < 0`. Ties go to the
/// first row. Returns the winning ratio as an exact `(numerator, denominator)` pair
/// (denominator always positive) rather than a computed quotient, so callers can keep
/// comparing without ever dividing.
pub fn min_ratio(d: &Dictionary, k: usize, eps: f64) -> (Option<usize>, Option<(Scalar, Scalar)>) {
    let mut leaving = None;
    let mut best: Option<(Scalar, Scalar)> = None;

    for i in 0..d.m_len() {
        let a = eps_correct(d.constraint_coeff(i, k), eps);
        if !a.is_negative() {
            continue;
        }
        let bi = eps_correct(d.row_constant(i), eps);
        let denom = a.abs();

        let take = match &best {
            None => true,
            Some((best_numer, best_denom)) => {
                // bi/denom < best_numer/best_denom, both denominators positive.
                bi.mul(best_denom) < best_numer.mul(&denom)
            }
        };
        if take {
            leaving = Some(i);
            best = Some((bi, denom));
        }
    }

    (leaving, best)
}
