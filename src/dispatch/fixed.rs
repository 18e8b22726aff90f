//! Operations compiled for [`Target::COMPILED`], called directly.
//!
//! Slice and vector forms process [`STATIC_LANES`] elements per draw, the lane count of the
//! compile-time target. Build with `-C target-cpu=native` (or `-C target-feature=+avx2,+fma`) to
//! get the wider kernels here without going through [`super::runtime`].

use super::*;

/// Lane count of the compile-time target.
pub const STATIC_LANES: usize = Target::COMPILED.lanes();

/// The target these functions are compiled for.
#[inline]
pub const fn target() -> Target {
  Target::COMPILED
}

/// `a + b`, rounded by `M`.
#[inline]
pub fn add<M: Mode, F: Float>(a: F, b: F) -> F {
  M::add::<F, CompiledFma>(a, b, rng::next_u64(), &EnvTracer)
}

/// `a - b`, rounded by `M`.
#[inline]
pub fn sub<M: Mode, F: Float>(a: F, b: F) -> F {
  M::sub::<F, CompiledFma>(a, b, rng::next_u64(), &EnvTracer)
}

/// `a * b`, rounded by `M`.
#[inline]
pub fn mul<M: Mode, F: Float>(a: F, b: F) -> F {
  M::mul::<F, CompiledFma>(a, b, rng::next_u64(), &EnvTracer)
}

/// `a / b`, rounded by `M`.
#[inline]
pub fn div<M: Mode, F: Float>(a: F, b: F) -> F {
  M::div::<F, CompiledFma>(a, b, rng::next_u64(), &EnvTracer)
}

/// `√a`, rounded by `M`.
#[inline]
pub fn sqrt<M: Mode, F: Float>(a: F) -> F {
  M::sqrt::<F, CompiledFma>(a, rng::next_u64(), &EnvTracer)
}

/// `a * b + c`, rounded once by `M`.
#[inline]
pub fn fma<M: Mode, F: Float>(a: F, b: F, c: F) -> F {
  M::fma::<F, CompiledFma>(a, b, c, rng::next_u64(), &EnvTracer)
}

/// Element-wise [`add`]. Panics if the lengths differ.
#[inline]
pub fn add_slice<M: Mode, F: Float>(a: &[F], b: &[F], out: &mut [F]) {
  array::binary::<M, F, CompiledFma, Add, STATIC_LANES>(a, b, out, &EnvTracer)
}

/// Element-wise [`sub`]. Panics if the lengths differ.
#[inline]
pub fn sub_slice<M: Mode, F: Float>(a: &[F], b: &[F], out: &mut [F]) {
  array::binary::<M, F, CompiledFma, Sub, STATIC_LANES>(a, b, out, &EnvTracer)
}

/// Element-wise [`mul`]. Panics if the lengths differ.
#[inline]
pub fn mul_slice<M: Mode, F: Float>(a: &[F], b: &[F], out: &mut [F]) {
  array::binary::<M, F, CompiledFma, Mul, STATIC_LANES>(a, b, out, &EnvTracer)
}

/// Element-wise [`div`]. Panics if the lengths differ.
#[inline]
pub fn div_slice<M: Mode, F: Float>(a: &[F], b: &[F], out: &mut [F]) {
  array::binary::<M, F, CompiledFma, Div, STATIC_LANES>(a, b, out, &EnvTracer)
}

/// Element-wise [`sqrt`]. Panics if the lengths differ.
#[inline]
pub fn sqrt_slice<M: Mode, F: Float>(a: &[F], out: &mut [F]) {
  array::unary::<M, F, CompiledFma, Sqrt, STATIC_LANES>(a, out, &EnvTracer)
}

/// Element-wise [`fma`]. Panics if the lengths differ.
#[inline]
pub fn fma_slice<M: Mode, F: Float>(a: &[F], b: &[F], c: &[F], out: &mut [F]) {
  array::ternary::<M, F, CompiledFma, Fma, STATIC_LANES>(a, b, c, out, &EnvTracer)
}

vector_forms!{Float}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::vector::{f32x4, f64x2, f64x16};

  #[test]
  fn exact_results() {
    assert_eq!(add::<Sr, f64>(0.5, 0.25), 0.75);
    assert_eq!(sub::<Sr, f32>(0.5, 0.25), 0.25);
    assert_eq!(mul::<Sr, f64>(3.0, -0.5), -1.5);
    assert_eq!(div::<Sr, f32>(1.0, 8.0), 0.125);
    assert_eq!(sqrt::<Sr, f64>(6.25), 2.5);
    assert_eq!(fma::<Sr, f64>(2.0, 3.0, -1.0), 5.0);
  }

  #[test]
  fn ud_lands_on_a_neighbour() {
    let x = div::<Ud, f64>(1.0, 3.0);
    let nearest = 1.0f64 / 3.0;
    // An inexact result is always moved off the nearest float.
    assert!(x == f64::from_bits(nearest.to_bits() - 1) || x == f64::from_bits(nearest.to_bits() + 1), "{x:e}");
    let y = mul::<Ud, f32>(1.5, 1.5);
    assert_ne!(y, 2.25);
  }

  #[test]
  fn large_operands_stay_finite() {
    // Whatever `CompiledFma` is, products near the top of the range have exact residuals.
    assert_eq!(fma::<Sr, f32>(1e35, 2.0, 1.0), 2e35);
    assert_eq!(fma::<Sr, f64>(1e300, 2.0, 1.0), 2e300);
    let x = mul::<Sr, f32>(1.0000001e35, 3.0);
    let sigma = 1.0000001e35f32 * 3.0;
    assert!(x.to_bits().abs_diff(sigma.to_bits()) <= 1, "{x:e}");
    let y = div::<Ud, f64>(1e308, 3.0);
    assert_eq!(y.to_bits().abs_diff((1e308f64 / 3.0).to_bits()), 1, "{y:e}");
  }

  #[test]
  fn deterministic_after_reseed() {
    let a: Vec<f64> = (1 ..= 37).map(|i| 1.0 / i as f64).collect();
    let b: Vec<f64> = a.iter().rev().copied().collect();
    let run = || {
      rng::reseed(5, 0);
      let mut out = vec![0.0; a.len()];
      add_slice::<Sr, f64>(&a, &b, &mut out);
      (out, fma::<Sr, f64>(0.1, 0.2, 0.3))
    };
    assert_eq!(run(), run());
  }

  #[test]
  fn slices_with_tails() {
    for n in [0, 1, 3, 5, 17] {
      let a: Vec<f32> = (0 .. n).map(|i| (i * i) as f32).collect();
      let mut out = vec![-1.0; n];
      sqrt_slice::<Sr, f32>(&a, &mut out);
      let expected: Vec<f32> = (0 .. n).map(|i| i as f32).collect();
      assert_eq!(out, expected);
    }
  }

  #[test]
  fn vectors() {
    let a = f64x2::from([1.0, 4.0]);
    assert_eq!(mul_vector::<Sr, f64, 2>(a, a), f64x2::from([1.0, 16.0]));
    let v = f32x4::splat(1.0);
    let w = fma_vector::<Sr, f32, 4>(v, v, v);
    assert_eq!(w, f32x4::splat(2.0));
    let big = f64x16::from_fn(|i| i as f64);
    assert_eq!(sub_vector::<Sr, f64, 16>(big, big), f64x16::default());
  }
}
