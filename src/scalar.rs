//! The numeric regime abstraction: one `Scalar` type, three variants, one dispatcher.
//!
//! The Python original carried a `self.dtype` flag alongside a NumPy object array because
//! the array itself couldn't tell you which Python type its boxed entries held. `Scalar`
//! makes that flag load-bearing: it's the enum tag itself, checked by the compiler instead
//! of by convention.

use std::fmt;

use num::bigint::BigInt;
use num::rational::{BigRational, Ratio};
use num::traits::{Signed, Zero};
use num::Integer as _;

use crate::error::DictionaryError;

/// Which `Scalar` variant a [`crate::dictionary::Dictionary`] is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Regime {
    Rational,
    Integer,
    Float,
}

/// A dictionary entry, tagged by [`Regime`].
///
/// Arithmetic between two `Scalar`s of different variants is a programmer error — a
/// `Dictionary` never mixes regimes within itself — and panics rather than silently
/// coercing, the same way the teacher never mixed its `BigInt` tableau with a float one.
#[derive(Debug, Clone)]
pub enum Scalar {
    Rational(BigRational),
    Integer(BigInt),
    Float(f64),
}

impl Scalar {
    pub fn regime(&self) -> Regime {
        match self {
            Scalar::Rational(_) => Regime::Rational,
            Scalar::Integer(_) => Regime::Integer,
            Scalar::Float(_) => Regime::Float,
        }
    }

    pub fn zero_for(regime: Regime) -> Scalar {
        match regime {
            Regime::Rational => Scalar::Rational(BigRational::zero()),
            Regime::Integer => Scalar::Integer(BigInt::zero()),
            Regime::Float => Scalar::Float(0.0),
        }
    }

    pub fn one_for(regime: Regime) -> Scalar {
        match regime {
            Regime::Rational => Scalar::Rational(BigRational::from_integer(BigInt::from(1))),
            Regime::Integer => Scalar::Integer(BigInt::from(1)),
            Regime::Float => Scalar::Float(1.0),
        }
    }

    pub fn from_i64(v: i64, regime: Regime) -> Scalar {
        match regime {
            Regime::Rational => Scalar::Rational(BigRational::from_integer(BigInt::from(v))),
            Regime::Integer => Scalar::Integer(BigInt::from(v)),
            Regime::Float => Scalar::Float(v as f64),
        }
    }

    /// Converts a boundary `Ratio<i64>` into the target regime, per the "Input
    /// representation" rules: exact for Rational, truncating-but-checked for Float,
    /// and integral-only (denominator 1) for Integer.
    pub fn from_ratio(value: Ratio<i64>, regime: Regime) -> Result<Scalar, DictionaryError> {
        match regime {
            Regime::Rational => {
                let numer = BigInt::from(*value.numer());
                let denom = BigInt::from(*value.denom());
                Ok(Scalar::Rational(BigRational::new(numer, denom)))
            }
            Regime::Integer => {
                if *value.denom() != 1 {
                    return Err(DictionaryError::NonIntegralInput {
                        value: value.to_string(),
                    });
                }
                Ok(Scalar::Integer(BigInt::from(*value.numer())))
            }
            Regime::Float => {
                let f = (*value.numer() as f64) / (*value.denom() as f64);
                if !f.is_finite() {
                    return Err(DictionaryError::NonFiniteInput { value: f });
                }
                Ok(Scalar::Float(f))
            }
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Scalar::Rational(v) => v.is_zero(),
            Scalar::Integer(v) => v.is_zero(),
            Scalar::Float(v) => *v == 0.0,
        }
    }

    pub fn is_positive(&self) -> bool {
        match self {
            Scalar::Rational(v) => v.is_positive(),
            Scalar::Integer(v) => v.is_positive(),
            Scalar::Float(v) => *v > 0.0,
        }
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Scalar::Rational(v) => v.is_negative(),
            Scalar::Integer(v) => v.is_negative(),
            Scalar::Float(v) => *v < 0.0,
        }
    }

    pub fn abs(&self) -> Scalar {
        match self {
            Scalar::Rational(v) => Scalar::Rational(v.abs()),
            Scalar::Integer(v) => Scalar::Integer(v.abs()),
            Scalar::Float(v) => Scalar::Float(v.abs()),
        }
    }

    pub fn neg(&self) -> Scalar {
        match self {
            Scalar::Rational(v) => Scalar::Rational(-v.clone()),
            Scalar::Integer(v) => Scalar::Integer(-v.clone()),
            Scalar::Float(v) => Scalar::Float(-v),
        }
    }

    pub fn add(&self, other: &Scalar) -> Scalar {
        match (self, other) {
            (Scalar::Rational(a), Scalar::Rational(b)) => Scalar::Rational(a + b),
            (Scalar::Integer(a), Scalar::Integer(b)) => Scalar::Integer(a + b),
            (Scalar::Float(a), Scalar::Float(b)) => Scalar::Float(a + b),
            _ => panic!("Scalar::add across mismatched regimes"),
        }
    }

    pub fn sub(&self, other: &Scalar) -> Scalar {
        match (self, other) {
            (Scalar::Rational(a), Scalar::Rational(b)) => Scalar::Rational(a - b),
            (Scalar::Integer(a), Scalar::Integer(b)) => Scalar::Integer(a - b),
            (Scalar::Float(a), Scalar::Float(b)) => Scalar::Float(a - b),
            _ => panic!("Scalar::sub across mismatched regimes"),
        }
    }

    pub fn mul(&self, other: &Scalar) -> Scalar {
        match (self, other) {
            (Scalar::Rational(a), Scalar::Rational(b)) => Scalar::Rational(a * b),
            (Scalar::Integer(a), Scalar::Integer(b)) => Scalar::Integer(a * b),
            (Scalar::Float(a), Scalar::Float(b)) => Scalar::Float(a * b),
            _ => panic!("Scalar::mul across mismatched regimes"),
        }
    }

    /// Exact division, valid only for Rational and Float. Panics (a pivot on a zero
    /// coefficient is a fatal bug, never a recoverable condition) if `other` is zero.
    pub fn div_real(&self, other: &Scalar) -> Scalar {
        match (self, other) {
            (Scalar::Rational(a), Scalar::Rational(b)) => {
                if b.is_zero() {
                    panic!("division by zero in Rational regime");
                }
                Scalar::Rational(a / b)
            }
            (Scalar::Float(a), Scalar::Float(b)) => Scalar::Float(a / b),
            _ => panic!("Scalar::div_real called outside the Rational/Float regimes"),
        }
    }

    /// Floor division for the Integer regime's Bareiss pivot. In debug builds, verifies
    /// the division is exact (the algorithm guarantees this structurally); a nonzero
    /// remainder means the pivot coefficient was zero or the dictionary was corrupted.
    pub fn div_floor_checked(&self, other: &Scalar) -> Scalar {
        match (self, other) {
            (Scalar::Integer(a), Scalar::Integer(b)) => {
                if b.is_zero() {
                    panic!("division by zero in Integer regime");
                }
                if cfg!(debug_assertions) {
                    let remainder = a.mod_floor(b);
                    if !remainder.is_zero() {
                        let err = DictionaryError::InexactIntegerPivot {
                            remainder: remainder.to_string(),
                            divisor: b.to_string(),
                        };
                        panic!("{err}");
                    }
                }
                Scalar::Integer(a.div_floor(b))
            }
            _ => panic!("Scalar::div_floor_checked called outside the Integer regime"),
        }
    }

    pub fn to_reported(&self) -> ReportedScalar {
        match self {
            Scalar::Rational(v) => ReportedScalar::Rational(v.clone()),
            Scalar::Integer(v) => ReportedScalar::Rational(BigRational::from_integer(v.clone())),
            Scalar::Float(v) => ReportedScalar::Float(*v),
        }
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Rational(a), Scalar::Rational(b)) => a == b,
            (Scalar::Integer(a), Scalar::Integer(b)) => a == b,
            (Scalar::Float(a), Scalar::Float(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        match (self, other) {
            (Scalar::Rational(a), Scalar::Rational(b)) => a.partial_cmp(b),
            (Scalar::Integer(a), Scalar::Integer(b)) => a.partial_cmp(b),
            (Scalar::Float(a), Scalar::Float(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Rational(v) => write!(f, "{v}"),
            Scalar::Integer(v) => write!(f, "{v}"),
            Scalar::Float(v) => write!(f, "{v}"),
        }
    }
}

/// ε-corrects a value for comparison against zero: any `Float` within `eps` of zero is
/// treated as exactly zero. A no-op for the exact regimes, where ε is meaningless.
pub fn eps_correct(value: &Scalar, eps: f64) -> Scalar {
    match value {
        Scalar::Float(v) if v.abs() <= eps => Scalar::Float(0.0),
        other => other.clone(),
    }
}

/// The value reported back to callers by [`crate::dictionary::Dictionary::value`] and
/// [`crate::dictionary::Dictionary::basic_solution`]: exact in the Rational and Integer
/// regimes, approximate in the Float regime.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportedScalar {
    Rational(BigRational),
    Float(f64),
}

impl fmt::Display for ReportedScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportedScalar::Rational(v) => write!(f, "{v}"),
            ReportedScalar::Float(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_ratio_integer_rejects_fractional() {
        let r = Ratio::new(3i64, 2i64);
        let err = Scalar::from_ratio(r, Regime::Integer).unwrap_err();
        assert!(matches!(err, DictionaryError::NonIntegralInput { .. }));
    }

    #[test]
    fn from_ratio_integer_accepts_whole() {
        let r = Ratio::from_integer(4i64);
        let s = Scalar::from_ratio(r, Regime::Integer).unwrap();
        assert_eq!(s, Scalar::Integer(BigInt::from(4)));
    }

    #[test]
    fn eps_correct_snaps_small_floats_to_zero() {
        let v = Scalar::Float(1e-9);
        let corrected = eps_correct(&v, 1e-7);
        assert!(corrected.is_zero());
    }

    #[test]
    fn eps_correct_leaves_exact_regimes_alone() {
        let v = Scalar::Integer(BigInt::from(0));
        let corrected = eps_correct(&v, 1e-7);
        assert!(corrected.is_zero());
        let nonzero = Scalar::Rational(BigRational::from_integer(BigInt::from(5)));
        let corrected = eps_correct(&nonzero, 1e-7);
        assert_eq!(corrected, nonzero);
    }

    #[test]
    fn div_floor_checked_matches_div_floor() {
        let a = Scalar::Integer(BigInt::from(10));
        let b = Scalar::Integer(BigInt::from(5));
        assert_eq!(a.div_floor_checked(&b), Scalar::Integer(BigInt::from(2)));
    }
}
