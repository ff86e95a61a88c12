//! Errors raised by the dictionary constructors.
//!
//! None of these are reachable from a well-formed `solve()` call: a caller that hands in
//! matching dimensions and data appropriate for the chosen [`crate::scalar::Regime`] never
//! sees one. They exist to turn a malformed-input bug into a readable diagnostic instead of
//! an out-of-bounds panic or silently corrupted dictionary, the same way the teacher's
//! `LCP::new` checked `m.len() % q.len() != 0` before assuming a square matrix.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DictionaryError {
    #[error(
        "shape mismatch: A is {a_rows}x{a_cols} but b has {b_len} entries and c has {c_len} entries"
    )]
    ShapeMismatch {
        a_rows: usize,
        a_cols: usize,
        b_len: usize,
        c_len: usize,
    },

    #[error(
        "coefficient {value} is not integral; the Integer regime requires a dictionary that starts out exactly integer-valued"
    )]
    NonIntegralInput { value: String },

    #[error("coefficient {value} is not finite; the Float regime requires finite input")]
    NonFiniteInput { value: f64 },

    #[error(
        "integer pivot produced a nonzero remainder ({remainder}) dividing by {divisor}; this indicates a pivot on a zero coefficient or a corrupted dictionary"
    )]
    InexactIntegerPivot { remainder: String, divisor: String },
}
