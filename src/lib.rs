//! Two-phase revised simplex over an explicit Vanderbei-style dictionary, with three
//! interchangeable numeric regimes: exact rational, Bareiss-style arbitrary-precision
//! integer, and IEEE-754 float.

mod dictionary;
mod error;
mod pivot;
mod scalar;
mod simplex;

pub use dictionary::Dictionary;
pub use error::DictionaryError;
pub use pivot::PivotRule;
pub use scalar::{Regime, ReportedScalar};
pub use simplex::{solve, LPResult, SolveOptions};
