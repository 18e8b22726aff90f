//! This crate provides *stochastic rounding* and *up-down rounding* for IEEE754 `f32` and `f64`
//! arithmetic, in software, on top of the hardware's round-to-nearest.
//!
//! # Introduction
//!
//! Every one of add, sub, mul, div, sqrt and fma is computed by the FPU as usual, together with
//! the exact rounding error of the result (via error-free transformations, see [`eft`]). That
//! error then decides how the result is perturbed:
//!
//!   - **Stochastic rounding** ([`Sr`]): the exact result is rounded to one of its two neighbouring
//!     floats, with probability proportional to its proximity to each. The rounded value is an
//!     unbiased estimator of the exact one, so errors no longer accumulate systematically.
//!   - **Up-down rounding** ([`Ud`]): the round-to-nearest result is moved one ulp up or down with
//!     probability ½ each, regardless of the operands.
//!
//! Both are used to estimate the numerical error of a computation by running it several times
//! and looking at the spread of the results.
//!
//! # Usage
//!
//! ```
//! use stochastic_float::{sr64, ud32, Sr};
//! use stochastic_float::dispatch::runtime;
//!
//! // Operators on the `Perturbed` wrapper types.
//! let x = sr64::new(1.0) + sr64::new(1e-20);
//! assert!(x.get() == 1.0 || x.get() == 1.0 + f64::EPSILON);
//! let y = ud32::new(2.0).sqrt();
//! assert_ne!(y.get(), 2.0f32.sqrt());
//!
//! // Or free functions, on scalars, slices and fixed-width vectors.
//! let a = [0.1, 0.2, 0.3];
//! let mut out = [0.0; 3];
//! runtime::add_slice::<Sr, f64>(&a, &a, &mut out);
//!
//! // Fix the seed of this thread's generator to make a run reproducible.
//! stochastic_float::rng::reseed(42, 0);
//! ```
//!
//! # Randomness
//!
//! Each thread owns its generators (xoshiro256++, see [`rng`]), seeded from a process-wide seed
//! and a per-thread ordinal. The process seed comes from the `STOCHASTIC_FLOAT_SEED` environment
//! variable, or from the OS if it is unset (see [`config`]). Setting `STOCHASTIC_FLOAT_DEBUG=1`
//! makes every operation emit a `trace`-level [`log`] record.
//!
//! # Performance
//!
//! Operations are dispatched on the best instruction set the CPU supports ([`dispatch::runtime`])
//! or the one the crate was compiled for ([`dispatch::fixed`]). Expect, as a *very rough
//! estimate*, a 3–10× slowdown relative to plain hw FPU operations.
//!
//! This crate includes benchmarks; run them with `cargo bench -F bench`.

pub mod float;
pub mod eft;
pub mod rng;
pub mod round;
pub mod ops;
pub mod dispatch;
pub mod vector;
pub mod config;
pub mod trace;

pub use float::Float;
pub use ops::{Mode, Sr, Ud, Perturbed, sr32, sr64, ud32, ud64};
pub use dispatch::{Target, Dispatchable};
pub use vector::Vector;
pub use config::ConfigError;

/// Re-export some internals for benchmarking purposes, only on `feature = "bench"`.
#[cfg(feature = "bench")]
pub mod bench;

#[cfg(test)]
const PROPTEST_CASES: u32 = if cfg!(debug_assertions) {0x1000} else {0x10000};
