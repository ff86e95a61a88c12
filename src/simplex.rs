//! The two-phase driver: builds the initial dictionary, constructs and solves the
//! auxiliary problem when the origin is infeasible, stitches the objective back, and runs
//! the simplex inner loop with automatic fallback to Bland's rule for anti-cycling.
//!
//! Ported from `original_source/lpsolve.py`'s `lp_solve_two_phase` / `phase_one` /
//! `phase_two` / `simplex`, which is the clearest surviving revision of the two-phase
//! algorithm in the retrieved original; the teacher's own Lemke driver pivots on a
//! covering vector instead and has no two-phase counterpart to adapt directly.

use log::{debug, info, trace};

use crate::dictionary::Dictionary;
use crate::error::DictionaryError;
use crate::pivot::{PivotRule, UNBOUNDED_ENTERING};
use crate::scalar::{Regime, Scalar};

/// A solve invocation's terminal outcome. There are no other recoverable errors at this
/// boundary: malformed input is a `DictionaryError` raised (and panicked on) before a
/// `Dictionary` even exists; everything past that point is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LPResult {
    Optimal,
    Infeasible,
    Unbounded,
}

const ANTI_CYCLING_THRESHOLD: u32 = 10;

/// Runs the simplex method on an already-feasible dictionary until optimal or unbounded.
/// Falls back permanently to Bland's rule after 10 consecutive degenerate pivots.
fn simplex(d: &mut Dictionary, eps: f64, rule: PivotRule) -> LPResult {
    if d.has_negative_constant(eps) {
        return LPResult::Infeasible;
    }

    let mut degenerate_count: u32 = 0;
    let mut active_rule = rule;

    loop {
        let (k, l) = active_rule.select(d, eps);
        trace!("pivot candidate: entering={k:?} leaving={l:?} rule={active_rule:?}");

        let k = match k {
            None => {
                info!("dictionary optimal, value={}", d.value());
                return LPResult::Optimal;
            }
            Some(k) if k == UNBOUNDED_ENTERING => {
                info!("dictionary unbounded");
                return LPResult::Unbounded;
            }
            Some(k) => k,
        };
        let l = match l {
            None => {
                info!("dictionary unbounded");
                return LPResult::Unbounded;
            }
            Some(l) => l,
        };

        debug!("pivoting entering={k} leaving={l}");
        d.pivot(k, l);

        if d.is_degenerate(eps) {
            degenerate_count += 1;
            if degenerate_count > ANTI_CYCLING_THRESHOLD && active_rule != PivotRule::Bland {
                debug!("switching to Bland's rule after {degenerate_count} degenerate pivots");
                active_rule = PivotRule::Bland;
            }
        } else {
            degenerate_count = 0;
        }
    }
}

/// Implements the two-phase algorithm over already-converted `Scalar`s: constructs the
/// initial (or auxiliary) dictionary, runs phase one when needed, rewrites the objective,
/// and runs phase two. Returns the terminal result and, for `Optimal`, the final
/// dictionary.
fn solve_scalars(
    c: &[Scalar],
    a: &[Scalar],
    b: &[Scalar],
    m: usize,
    n: usize,
    regime: Regime,
    eps: f64,
    rule: PivotRule,
) -> (LPResult, Option<Dictionary>) {
    let needs_phase_one = b.iter().any(|bi| bi.is_negative());

    if !needs_phase_one {
        let mut d = Dictionary::try_new(c, a, m, n, b, regime)
            .unwrap_or_else(|e| panic!("{e}"));
        let result = simplex(&mut d, eps, rule);
        return match result {
            LPResult::Optimal => (LPResult::Optimal, Some(d)),
            other => (other, None),
        };
    }

    info!("origin infeasible, running phase one");
    let mut aux = Dictionary::try_new_auxiliary(a, m, n, b, regime)
        .unwrap_or_else(|e| panic!("{e}"));

    let entering = aux.n_len() - 1; // x0 is the last nonbasic column
    let leaving = aux.lowest_constant_row();
    aux.pivot(entering, leaving);

    let aux_result = simplex(&mut aux, eps, rule);
    if aux_result != LPResult::Optimal {
        info!("auxiliary problem not optimal ({aux_result:?}); original LP infeasible");
        return (LPResult::Infeasible, None);
    }

    if aux.objective_value_is_negative(eps) {
        info!("auxiliary optimum negative; original LP infeasible");
        return (LPResult::Infeasible, None);
    }

    let x0 = aux.aux_variable_index();
    if let Some(pos) = aux.position_in_basis(x0) {
        debug!("x0 still basic at optimum; pivoting it out");
        if let Some(entering) = aux.first_nonzero_column_in_row(pos) {
            aux.pivot(entering, pos);
        }
    }

    let x0_col = aux
        .position_in_nonbasic(x0)
        .expect("x0 must be nonbasic once phase one completes");
    aux.remove_nonbasic_column(x0_col);

    aux.rewrite_objective_for_phase_two(c);

    debug!("phase two starting from stitched dictionary");
    let result = simplex(&mut aux, eps, rule);
    match result {
        LPResult::Optimal => (LPResult::Optimal, Some(aux)),
        other => (other, None),
    }
}

/// The core entry point: `c` is length `n`, `a` is row-major `m` by `n`, `b` is length
/// `m`, all expressed as exact rationals regardless of target regime (see the "Input
/// representation" boundary rule). Converts each entry to `regime`'s `Scalar` variant and
/// runs the two-phase algorithm. Panics (per §7's error-handling design) if a coefficient
/// can't be represented in the requested regime — a non-integral input for `Integer`, or
/// a non-finite input for `Float`.
pub fn solve(
    c: &[num::rational::Ratio<i64>],
    a: &[num::rational::Ratio<i64>],
    b: &[num::rational::Ratio<i64>],
    m: usize,
    n: usize,
    regime: Regime,
    eps: f64,
    rule: PivotRule,
) -> (LPResult, Option<Dictionary>) {
    let convert = |values: &[num::rational::Ratio<i64>]| -> Vec<Scalar> {
        values
            .iter()
            .map(|&v| Scalar::from_ratio(v, regime).unwrap_or_else(|e: DictionaryError| panic!("{e}")))
            .collect()
    };
    let c = convert(c);
    let a = convert(a);
    let b = convert(b);
    solve_scalars(&c, &a, &b, m, n, regime, eps, rule)
}

/// An ergonomic builder over the positional [`solve`] entry point, completing the
/// teacher's own `// TODO: convert this to a builder pattern?` left on
/// `LCP::add_covering_vector`.
#[derive(Debug, Clone, Copy)]
pub struct SolveOptions {
    regime: Regime,
    eps: f64,
    rule: PivotRule,
}

impl SolveOptions {
    pub fn new(regime: Regime) -> SolveOptions {
        SolveOptions {
            regime,
            eps: 0.0,
            rule: PivotRule::Bland,
        }
    }

    pub fn default_for(regime: Regime) -> SolveOptions {
        SolveOptions::new(regime)
    }

    pub fn eps(mut self, eps: f64) -> SolveOptions {
        self.eps = eps;
        self
    }

    pub fn rule(mut self, rule: PivotRule) -> SolveOptions {
        self.rule = rule;
        self
    }

    /// Runs [`solve`] with this option set's `regime`, `eps`, and `rule`.
    pub fn solve(
        self,
        c: &[num::rational::Ratio<i64>],
        a: &[num::rational::Ratio<i64>],
        b: &[num::rational::Ratio<i64>],
        m: usize,
        n: usize,
    ) -> (LPResult, Option<Dictionary>) {
        solve(c, a, b, m, n, self.regime, self.eps, self.rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num::bigint::BigInt;
    use num::rational::{BigRational, Ratio};

    fn ratios(values: &[i64]) -> Vec<Ratio<i64>> {
        values.iter().map(|&v| Ratio::from_integer(v)).collect()
    }

    #[test]
    fn bounded_optimum_example_one() {
        let c = ratios(&[5, 4, 3]);
        let a = ratios(&[2, 3, 1, 4, 1, 2, 3, 4, 2]);
        let b = ratios(&[5, 11, 8]);
        let (result, dict) = solve(&c, &a, &b, 3, 3, Regime::Rational, 0.0, PivotRule::Bland);
        assert_eq!(result, LPResult::Optimal);
        let dict = dict.unwrap();
        assert_eq!(
            dict.value(),
            crate::scalar::ReportedScalar::Rational(BigRational::from_integer(BigInt::from(13)))
        );
    }

    #[test]
    fn trivially_unbounded() {
        let c = ratios(&[1]);
        let a = ratios(&[-13]);
        let b = ratios(&[2]);
        for rule in [
            PivotRule::Bland,
            PivotRule::LargestCoefficient,
            PivotRule::LargestIncrease,
        ] {
            let (result, _) = solve(&c, &a, &b, 1, 1, Regime::Rational, 0.0, rule);
            assert_eq!(result, LPResult::Unbounded);
        }
    }

    #[test]
    fn infeasible_example() {
        let c = ratios(&[1, 3]);
        let a = ratios(&[-1, -1, -1, 1, 1, 2]);
        let b = ratios(&[-3, -1, 2]);
        let (result, _) = solve(&c, &a, &b, 3, 2, Regime::Rational, 0.0, PivotRule::Bland);
        assert_eq!(result, LPResult::Infeasible);
    }
}
