//! Error-free transformations: algorithms that return both the rounded result of an operation
//! and its exact residual, using nothing but ordinary round-to-nearest arithmetic.
//!
//! All functions here expect finite operands; filtering NaN and infinities is the caller's job.
//! The order of every floating point operation matters and is written out exactly: Rust never
//! reassociates floating point arithmetic, so what you read is what the hardware executes.
//!
//! References:
//!
//!   - T. J. Dekker, *A floating-point technique for extending the available precision* (1971)
//!   - S. Boldo, J.-M. Muller, *Exact and approximated error of the FMA* (2011)
//!   - S. Graillat, J.-M. Muller, *Emulation of the FMA in rounded-to-nearest floating-point
//!     arithmetic* (2024)

use crate::float::Float;

/// Addition: TwoSum and FastTwoSum.
mod sum;

/// Multiplication: TwoProductFMA, Veltkamp's split, Dekker's product.
mod product;

/// FMA emulation and the FMA residual.
mod fma;

pub use sum::{two_sum, fast_two_sum};
pub use product::{two_product_fma, split, split_bits, dekker_product};
pub use fma::{emulated_fma, fma_residual};

/// How a fused multiply-add is obtained: either the hardware instruction or a software emulation
/// built from error-free transformations.
///
/// This is the seam between the arithmetic kernels and the target: the dispatch layer picks
/// [`NativeFma`] where the CPU has an FMA unit and [`EmulatedFma`] everywhere else.
pub trait FmaStrategy: 'static {
  /// Human-readable name, for logs.
  const NAME: &'static str;

  /// `a * b + c`, rounded once.
  fn fma<F: Float>(a: F, b: F, c: F) -> F;

  /// The exact product `a * b` as an unevaluated sum `(sigma, tau)`.
  fn two_product<F: Float>(a: F, b: F) -> (F, F);
}

/// Fused multiply-add in hardware.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NativeFma;

/// Fused multiply-add emulated with [`dekker_product`] (Graillat-Muller).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmulatedFma;

impl FmaStrategy for NativeFma {
  const NAME: &'static str = "native";

  #[inline(always)]
  fn fma<F: Float>(a: F, b: F, c: F) -> F {
    a.mul_add(b, c)
  }

  #[inline(always)]
  fn two_product<F: Float>(a: F, b: F) -> (F, F) {
    two_product_fma(a, b)
  }
}

impl FmaStrategy for EmulatedFma {
  const NAME: &'static str = "emulated";

  #[inline(always)]
  fn fma<F: Float>(a: F, b: F, c: F) -> F {
    emulated_fma(a, b, c)
  }

  #[inline(always)]
  fn two_product<F: Float>(a: F, b: F) -> (F, F) {
    dekker_product(a, b)
  }
}
