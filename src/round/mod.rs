//! The two rounding rules, applied to a result the hardware has already rounded to nearest.
//!
//!   - **Stochastic rounding**, [`correction`]: given the rounded value `sigma` and the residual
//!     `tau` of an error-free transformation, move `sigma` one ulp towards `sigma + tau` with
//!     probability `|tau| / ulp`. The expected result is then exactly `sigma + tau`.
//!   - **Up-down rounding**, [`perturb`]: move the result one ulp up or down with probability
//!     1/2 each, whatever the operands were.
//!
//! Both are pure: the randomness comes in as an argument.

use crate::float::{Float, exponent, predecessor_abs, pow2, step_bits};

/// Stochastic rounding.
mod sr;

/// Up-down rounding.
mod ud;

pub use sr::correction;
pub use ud::perturb;
