//! The dictionary: an (m+1)x(n+1) matrix of [`Scalar`]s plus the basic/nonbasic index
//! arrays, in the style of Vanderbei. Construction, both pivot bodies (the ordinary
//! division-based one and the Bareiss integer-preserving one), and the reporting methods
//! all live here, the way the teacher's `Tableau` bundled its matrix, its pivot, and its
//! `solution()` in one `src/lemke/tableau.rs`.

use std::fmt;

use num::bigint::BigInt;
use num::rational::BigRational;
use num::traits::{One, Zero};

use crate::error::DictionaryError;
use crate::scalar::{eps_correct, Regime, ReportedScalar, Scalar};

#[derive(Debug, Clone)]
pub struct Dictionary {
    /// Row-major, `nrows` x `ncols`. Row 0 is the objective; column 0 is the constant column.
    c: Vec<Scalar>,
    nrows: usize,
    ncols: usize,
    /// `B[i]` is the variable index basic in row `i+1`.
    b: Vec<usize>,
    /// `N[k]` is the variable index nonbasic in column `k+1`.
    n: Vec<usize>,
    names: Vec<String>,
    regime: Regime,
    /// Common denominator of every entry of `c`, meaningful only in the Integer regime.
    lastpivot: BigInt,
    /// Number of original (non-slack, non-auxiliary) decision variables.
    n_original: usize,
}

impl Dictionary {
    fn idx(&self, i: usize, j: usize) -> usize {
        i * self.ncols + j
    }

    fn get(&self, i: usize, j: usize) -> &Scalar {
        let idx = self.idx(i, j);
        &self.c[idx]
    }

    fn set(&mut self, i: usize, j: usize, value: Scalar) {
        let idx = self.idx(i, j);
        self.c[idx] = value;
    }

    /// Builds the initial dictionary for `max c.x s.t. Ax <= b, x >= 0`.
    ///
    /// `a` is row-major, `m` rows by `n` columns. Entries are already converted to the
    /// target regime by the caller (see `Scalar::from_ratio` and the "Input
    /// representation" boundary rules); this constructor only checks shapes.
    pub fn try_new(
        c: &[Scalar],
        a: &[Scalar],
        m: usize,
        n: usize,
        b: &[Scalar],
        regime: Regime,
    ) -> Result<Dictionary, DictionaryError> {
        if a.len() != m * n || b.len() != m || c.len() != n {
            return Err(DictionaryError::ShapeMismatch {
                a_rows: m,
                a_cols: n,
                b_len: b.len(),
                c_len: c.len(),
            });
        }

        let nrows = m + 1;
        let ncols = n + 1;
        let mut mat = vec![Scalar::zero_for(regime); nrows * ncols];

        for (j, cj) in c.iter().enumerate() {
            mat[j + 1] = cj.clone();
        }
        for i in 0..m {
            mat[(i + 1) * ncols] = b[i].clone();
            for j in 0..n {
                mat[(i + 1) * ncols + (j + 1)] = a[i * n + j].neg();
            }
        }

        let mut names = vec![String::from("z")];
        for j in 1..=n {
            names.push(format!("x{j}"));
        }
        for i in 1..=m {
            names.push(format!("x{}", n + i));
        }

        Ok(Dictionary {
            c: mat,
            nrows,
            ncols,
            b: (1..=m).map(|i| n + i).collect(),
            n: (1..=n).collect(),
            names,
            regime,
            lastpivot: BigInt::one(),
            n_original: n,
        })
    }

    /// Builds the auxiliary dictionary `max -x0 s.t. Ax - x0.1 <= b, x,x0 >= 0` used when
    /// the origin is infeasible (some `b_i < 0`).
    pub fn try_new_auxiliary(
        a: &[Scalar],
        m: usize,
        n: usize,
        b: &[Scalar],
        regime: Regime,
    ) -> Result<Dictionary, DictionaryError> {
        if a.len() != m * n || b.len() != m {
            return Err(DictionaryError::ShapeMismatch {
                a_rows: m,
                a_cols: n,
                b_len: b.len(),
                c_len: n,
            });
        }

        let ncols = n + 2;
        let nrows = m + 1;
        let mut mat = vec![Scalar::zero_for(regime); nrows * ncols];

        mat[n + 1] = Scalar::one_for(regime).neg();
        for i in 0..m {
            mat[(i + 1) * ncols] = b[i].clone();
            for j in 0..n {
                mat[(i + 1) * ncols + (j + 1)] = a[i * n + j].neg();
            }
            mat[(i + 1) * ncols + (n + 1)] = Scalar::one_for(regime);
        }

        let mut names = vec![String::from("z")];
        for j in 1..=n {
            names.push(format!("x{j}"));
        }
        names.push(String::from("x0"));
        for i in 1..=m {
            names.push(format!("x{}", n + i));
        }

        let mut nonbasic: Vec<usize> = (1..=n).collect();
        nonbasic.push(n + 1);

        Ok(Dictionary {
            c: mat,
            nrows,
            ncols,
            b: (1..=m).map(|i| n + 1 + i).collect(),
            n: nonbasic,
            names,
            regime,
            lastpivot: BigInt::one(),
            n_original: n,
        })
    }

    pub(crate) fn m_len(&self) -> usize {
        self.nrows - 1
    }

    pub(crate) fn n_len(&self) -> usize {
        self.ncols - 1
    }

    pub(crate) fn objective_coeff(&self, j: usize) -> &Scalar {
        self.get(0, j + 1)
    }

    pub(crate) fn objective_constant(&self) -> &Scalar {
        self.get(0, 0)
    }

    pub(crate) fn constraint_coeff(&self, i: usize, j: usize) -> &Scalar {
        self.get(i + 1, j + 1)
    }

    pub(crate) fn row_constant(&self, i: usize) -> &Scalar {
        self.get(i + 1, 0)
    }

    pub(crate) fn position_in_basis(&self, var: usize) -> Option<usize> {
        self.b.iter().position(|&v| v == var)
    }

    pub(crate) fn position_in_nonbasic(&self, var: usize) -> Option<usize> {
        self.n.iter().position(|&v| v == var)
    }

    pub(crate) fn aux_variable_index(&self) -> usize {
        self.n_original + 1
    }

    pub(crate) fn has_negative_constant(&self, eps: f64) -> bool {
        (0..self.m_len()).any(|i| eps_correct(self.row_constant(i), eps).is_negative())
    }

    pub(crate) fn is_degenerate(&self, eps: f64) -> bool {
        (0..self.m_len()).any(|i| eps_correct(self.row_constant(i), eps).is_zero())
    }

    pub(crate) fn objective_value_is_negative(&self, eps: f64) -> bool {
        eps_correct(self.objective_constant(), eps).is_negative()
    }

    /// Row (0-based among the m constraint rows) with the most negative constant; first
    /// occurrence wins on ties.
    pub(crate) fn lowest_constant_row(&self) -> usize {
        let mut best = 0;
        for i in 1..self.m_len() {
            if *self.row_constant(i) < *self.row_constant(best) {
                best = i;
            }
        }
        best
    }

    /// First nonbasic column with a nonzero coefficient in the given row; used to pick an
    /// arbitrary entering variable when pivoting a degenerate x0 out of the basis.
    pub(crate) fn first_nonzero_column_in_row(&self, row: usize) -> Option<usize> {
        (0..self.n_len()).find(|&j| !self.constraint_coeff(row, j).is_zero())
    }

    /// Drops nonbasic column `pos` (and its `N` entry) entirely, shrinking the dictionary
    /// by one column. Used to remove x0's column once it has left the basis.
    pub(crate) fn remove_nonbasic_column(&mut self, pos: usize) {
        let col = pos + 1;
        let new_ncols = self.ncols - 1;
        let mut new_c = Vec::with_capacity(self.nrows * new_ncols);
        for i in 0..self.nrows {
            for j in 0..self.ncols {
                if j == col {
                    continue;
                }
                new_c.push(self.get(i, j).clone());
            }
        }
        self.c = new_c;
        self.ncols = new_ncols;
        self.n.remove(pos);
    }

    /// Rewrites the objective row in terms of the current nonbasic variables, given the
    /// original LP's objective coefficients `c` (indexed 0..n_original). Every basic
    /// original variable's row is substituted in column-by-column, per the dictionary
    /// invariant rather than any accumulator pattern tied to a particular column order.
    pub(crate) fn rewrite_objective_for_phase_two(&mut self, c: &[Scalar]) {
        let mut new_row = vec![Scalar::zero_for(self.regime); self.ncols];
        for (idx, cv) in c.iter().enumerate() {
            if cv.is_zero() {
                continue;
            }
            let var = idx + 1;
            if let Some(p) = self.position_in_basis(var) {
                for j in 0..self.ncols {
                    new_row[j] = new_row[j].add(&cv.mul(self.get(p + 1, j)));
                }
            } else if let Some(q) = self.position_in_nonbasic(var) {
                new_row[q + 1] = new_row[q + 1].add(cv);
            }
        }
        for (j, value) in new_row.into_iter().enumerate() {
            self.set(0, j, value);
        }
    }

    pub fn pivot(&mut self, k: usize, l: usize) {
        match self.regime {
            Regime::Rational | Regime::Float => self.real_pivot(k, l),
            Regime::Integer => self.integer_pivot(k, l),
        }
    }

    fn real_pivot(&mut self, k: usize, l: usize) {
        let row = l + 1;
        let col = k + 1;
        let a = self.get(row, col).clone();
        let neg_a = a.neg();

        std::mem::swap(&mut self.n[k], &mut self.b[l]);

        let mut new_pivot_row: Vec<Scalar> = (0..self.ncols)
            .map(|j| self.get(row, j).div_real(&neg_a))
            .collect();
        new_pivot_row[col] = Scalar::one_for(self.regime).div_real(&a);

        for (j, value) in new_pivot_row.iter().enumerate() {
            self.set(row, j, value.clone());
        }

        for i in 0..self.nrows {
            if i == row {
                continue;
            }
            let c_val = self.get(i, col).clone();
            for j in 0..self.ncols {
                let updated = self.get(i, j).add(&c_val.mul(&new_pivot_row[j]));
                self.set(i, j, updated);
            }
            let correction = c_val.mul(&new_pivot_row[col]);
            self.set(i, col, correction);
        }
    }

    fn integer_pivot(&mut self, k: usize, l: usize) {
        let row = l + 1;
        let col = k + 1;
        let a = self.get(row, col).clone();
        let p = self.lastpivot.clone();
        let neg_a = a.neg();

        std::mem::swap(&mut self.n[k], &mut self.b[l]);

        let orig_pivot_row: Vec<Scalar> = (0..self.ncols).map(|j| self.get(row, j).clone()).collect();

        for i in 0..self.nrows {
            if i == row {
                continue;
            }
            for j in 0..self.ncols {
                let updated = self.get(i, j).mul(&neg_a);
                self.set(i, j, updated);
            }
        }

        let neg_p = Scalar::Integer(-p.clone());
        self.set(row, col, neg_p.clone());
        let mut pivot_row_for_update = orig_pivot_row;
        pivot_row_for_update[col] = neg_p;

        for i in 0..self.nrows {
            if i == row {
                continue;
            }
            let c_val = self.get(i, col).clone();
            let q = c_val.div_floor_checked(&neg_a);
            self.set(i, col, Scalar::zero_for(self.regime));
            for j in 0..self.ncols {
                let updated = self.get(i, j).add(&q.mul(&pivot_row_for_update[j]));
                self.set(i, j, updated);
            }
        }

        let p_scalar = Scalar::Integer(p);
        for i in 0..self.nrows {
            if i == row {
                continue;
            }
            for j in 0..self.ncols {
                let updated = self.get(i, j).div_floor_checked(&p_scalar);
                self.set(i, j, updated);
            }
        }

        if let Scalar::Integer(v) = &neg_a {
            self.lastpivot = v.clone();
        }
    }

    pub fn value(&self) -> ReportedScalar {
        match (self.regime, self.get(0, 0)) {
            (Regime::Integer, Scalar::Integer(v)) => {
                ReportedScalar::Rational(BigRational::new(v.clone(), self.lastpivot.clone()))
            }
            _ => self.get(0, 0).to_reported(),
        }
    }

    pub fn basic_solution(&self) -> Vec<ReportedScalar> {
        let zero = match self.regime {
            Regime::Float => ReportedScalar::Float(0.0),
            _ => ReportedScalar::Rational(BigRational::zero()),
        };
        let mut x = vec![zero; self.n_original];
        for pos in 0..self.m_len() {
            let var = self.b[pos];
            if var >= 1 && var <= self.n_original {
                let reported = match (self.regime, self.get(pos + 1, 0)) {
                    (Regime::Integer, Scalar::Integer(v)) => {
                        ReportedScalar::Rational(BigRational::new(v.clone(), self.lastpivot.clone()))
                    }
                    _ => self.get(pos + 1, 0).to_reported(),
                };
                x[var - 1] = reported;
            }
        }
        x
    }

    fn name_for(&self, var: usize) -> String {
        self.names
            .get(var)
            .cloned()
            .unwrap_or_else(|| format!("x{var}"))
    }

    pub fn format(&self) -> String {
        let mut max_name_width = 1; // "z"
        for &v in self.b.iter().chain(self.n.iter()) {
            max_name_width = max_name_width.max(self.name_for(v).len());
        }

        let mut value_width = 0;
        for i in 0..self.nrows {
            value_width = value_width.max(self.get(i, 0).to_string().len());
            for j in 1..self.ncols {
                value_width = value_width.max(self.get(i, j).abs().to_string().len());
            }
        }

        let lastpivot_prefix = if self.regime == Regime::Integer && !self.lastpivot.is_one() {
            Some(format!("{}*", self.lastpivot))
        } else {
            None
        };

        let mut lines = Vec::with_capacity(self.nrows);
        for i in 0..self.nrows {
            let lhs_name = if i == 0 {
                "z".to_string()
            } else {
                self.name_for(self.b[i - 1])
            };
            let mut line = String::new();
            if let Some(prefix) = &lastpivot_prefix {
                line.push_str(prefix);
            }
            line.push_str(&format!("{lhs_name:>max_name_width$}"));
            line.push_str(" = ");
            line.push_str(&format!("{:>value_width$}", self.get(i, 0).to_string()));
            for (k, &nb) in self.n.iter().enumerate() {
                let col = k + 1;
                let cell = self.get(i, col);
                let sign = if cell.is_negative() { '-' } else { '+' };
                let mag = cell.abs().to_string();
                let name = self.name_for(nb);
                line.push_str(&format!(" {sign} {mag:>value_width$}*{name:>max_name_width$}"));
            }
            lines.push(line);
        }
        lines.join("\n")
    }
}

impl fmt::Display for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num::rational::BigRational;

    fn ratio_scalars(values: &[i64]) -> Vec<Scalar> {
        values
            .iter()
            .map(|&v| Scalar::Rational(BigRational::from_integer(BigInt::from(v))))
            .collect()
    }

    #[test]
    fn construction_matches_negated_coefficients() {
        let c = ratio_scalars(&[5, 4, 3]);
        let a = ratio_scalars(&[2, 3, 1, 4, 1, 2, 3, 4, 2]);
        let b = ratio_scalars(&[5, 11, 8]);
        let d = Dictionary::try_new(&c, &a, 3, 3, &b, Regime::Rational).unwrap();
        assert_eq!(*d.constraint_coeff(0, 0), Scalar::Rational(BigRational::from_integer(BigInt::from(-2))));
        assert_eq!(*d.row_constant(0), Scalar::Rational(BigRational::from_integer(BigInt::from(5))));
    }

    #[test]
    fn shape_mismatch_is_reported() {
        let c = ratio_scalars(&[1, 2]);
        let a = ratio_scalars(&[1, 2, 3]);
        let b = ratio_scalars(&[1]);
        let err = Dictionary::try_new(&c, &a, 1, 2, &b, Regime::Rational).unwrap_err();
        assert!(matches!(err, DictionaryError::ShapeMismatch { .. }));
    }

    #[test]
    fn integer_pivot_preserves_divisibility() {
        let c = vec![
            Scalar::Integer(BigInt::from(5)),
            Scalar::Integer(BigInt::from(4)),
        ];
        let a = vec![
            Scalar::Integer(BigInt::from(2)),
            Scalar::Integer(BigInt::from(1)),
            Scalar::Integer(BigInt::from(1)),
            Scalar::Integer(BigInt::from(3)),
        ];
        let b = vec![Scalar::Integer(BigInt::from(4)), Scalar::Integer(BigInt::from(6))];
        let mut d = Dictionary::try_new(&c, &a, 2, 2, &b, Regime::Integer).unwrap();
        d.pivot(0, 0);
        assert!(!d.lastpivot.is_zero());
    }
}
