//! Operations dispatched on the CPU the process runs on.
//!
//! The first call for a float type queries the CPU ([`Target::detect`]) and builds its tables; every
//! call after that is one indirect call into the kernel for the detected target. Slice and vector
//! forms process `Target::detect().lanes()` elements per draw.

use super::*;

/// The target the tables were built for.
#[inline]
pub fn target() -> Target {
  Target::detect()
}

/// `a + b`, rounded by `M`.
#[inline]
pub fn add<M: Mode, F: Dispatchable>(a: F, b: F) -> F {
  // SAFETY: tables hold kernels for the detected target only.
  unsafe { (table::get::<M, F>().add)(a, b) }
}

/// `a - b`, rounded by `M`.
#[inline]
pub fn sub<M: Mode, F: Dispatchable>(a: F, b: F) -> F {
  // SAFETY: as in `add`.
  unsafe { (table::get::<M, F>().sub)(a, b) }
}

/// `a * b`, rounded by `M`.
#[inline]
pub fn mul<M: Mode, F: Dispatchable>(a: F, b: F) -> F {
  // SAFETY: as in `add`.
  unsafe { (table::get::<M, F>().mul)(a, b) }
}

/// `a / b`, rounded by `M`.
#[inline]
pub fn div<M: Mode, F: Dispatchable>(a: F, b: F) -> F {
  // SAFETY: as in `add`.
  unsafe { (table::get::<M, F>().div)(a, b) }
}

/// `√a`, rounded by `M`.
#[inline]
pub fn sqrt<M: Mode, F: Dispatchable>(a: F) -> F {
  // SAFETY: as in `add`.
  unsafe { (table::get::<M, F>().sqrt)(a) }
}

/// `a * b + c`, rounded once by `M`.
#[inline]
pub fn fma<M: Mode, F: Dispatchable>(a: F, b: F, c: F) -> F {
  // SAFETY: as in `add`.
  unsafe { (table::get::<M, F>().fma)(a, b, c) }
}

/// Element-wise [`add`]. Panics if the lengths differ.
#[inline]
pub fn add_slice<M: Mode, F: Dispatchable>(a: &[F], b: &[F], out: &mut [F]) {
  // SAFETY: as in `add`.
  unsafe { (table::get::<M, F>().add_slice)(a, b, out) }
}

/// Element-wise [`sub`]. Panics if the lengths differ.
#[inline]
pub fn sub_slice<M: Mode, F: Dispatchable>(a: &[F], b: &[F], out: &mut [F]) {
  // SAFETY: as in `add`.
  unsafe { (table::get::<M, F>().sub_slice)(a, b, out) }
}

/// Element-wise [`mul`]. Panics if the lengths differ.
#[inline]
pub fn mul_slice<M: Mode, F: Dispatchable>(a: &[F], b: &[F], out: &mut [F]) {
  // SAFETY: as in `add`.
  unsafe { (table::get::<M, F>().mul_slice)(a, b, out) }
}

/// Element-wise [`div`]. Panics if the lengths differ.
#[inline]
pub fn div_slice<M: Mode, F: Dispatchable>(a: &[F], b: &[F], out: &mut [F]) {
  // SAFETY: as in `add`.
  unsafe { (table::get::<M, F>().div_slice)(a, b, out) }
}

/// Element-wise [`sqrt`]. Panics if the lengths differ.
#[inline]
pub fn sqrt_slice<M: Mode, F: Dispatchable>(a: &[F], out: &mut [F]) {
  // SAFETY: as in `add`.
  unsafe { (table::get::<M, F>().sqrt_slice)(a, out) }
}

/// Element-wise [`fma`]. Panics if the lengths differ.
#[inline]
pub fn fma_slice<M: Mode, F: Dispatchable>(a: &[F], b: &[F], c: &[F], out: &mut [F]) {
  // SAFETY: as in `add`.
  unsafe { (table::get::<M, F>().fma_slice)(a, b, c, out) }
}

vector_forms!{Dispatchable}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::vector::{f32x2, f32x8, f64x4, f64x16};

  #[test]
  fn exact_results() {
    assert_eq!(add::<Ud, f64>(0.0, 0.0), 0.0);
    assert_eq!(add::<Sr, f32>(1.0, 2.0), 3.0);
    assert_eq!(sub::<Sr, f64>(1.0, 1.0), 0.0);
    assert_eq!(mul::<Sr, f32>(-2.0, 0.5), -1.0);
    assert_eq!(div::<Sr, f64>(3.0, 4.0), 0.75);
    assert_eq!(sqrt::<Sr, f32>(0.0625), 0.25);
    assert_eq!(fma::<Sr, f32>(0.5, 0.5, 0.75), 1.0);
  }

  #[test]
  fn specials_pass_through() {
    assert!(sqrt::<Sr, f64>(-1.0).is_nan());
    assert!(sqrt::<Ud, f64>(-1.0).is_nan());
    assert_eq!(div::<Ud, f32>(1.0, 0.0), f32::INFINITY);
    assert!(mul::<Ud, f64>(f64::INFINITY, 0.0).is_nan());
  }

  #[test]
  fn matches_fixed_after_reseed() {
    // Both namespaces draw scalar words from the same stream.
    let ops = |add: fn(f64, f64) -> f64, div: fn(f64, f64) -> f64| {
      rng::reseed(17, 0);
      (1 ..= 50).map(|i| add(div(1.0, i as f64), 0.1)).collect::<Vec<_>>()
    };
    let runtime = ops(add::<Sr, f64>, div::<Sr, f64>);
    let fixed = ops(fixed::add::<Sr, f64>, fixed::div::<Sr, f64>);
    assert_eq!(runtime, fixed);
  }

  #[test]
  fn deterministic_after_reseed() {
    let a: Vec<f32> = (1 ..= 29).map(|i| i as f32 / 7.0).collect();
    let b: Vec<f32> = (1 ..= 29).map(|i| i as f32 + 0.5).collect();
    let run = || {
      rng::reseed(3, 1);
      let mut out = vec![0.0; a.len()];
      div_slice::<Ud, f32>(&a, &b, &mut out);
      out
    };
    assert_eq!(run(), run());
  }

  #[test]
  fn slices_with_tails() {
    for n in [0, 1, 2, 5, 9, 31] {
      let a: Vec<f64> = (0 .. n).map(|i| i as f64).collect();
      let b = vec![0.5; n];
      let mut out = vec![f64::NAN; n];
      mul_slice::<Sr, f64>(&a, &b, &mut out);
      assert!(out.iter().zip(&a).all(|(o, a)| *o == a / 2.0), "n = {n}");
      fma_slice::<Sr, f64>(&a, &b, &b, &mut out);
      assert!(out.iter().zip(&a).all(|(o, a)| *o == a / 2.0 + 0.5), "n = {n}");
    }
  }

  #[test]
  #[should_panic(expected = "operand lengths differ")]
  fn length_mismatch_panics() {
    let mut out = [0.0f32; 2];
    add_slice::<Sr, f32>(&[1.0, 2.0], &[1.0], &mut out);
  }

  #[test]
  fn every_vector_width() {
    assert_eq!(add_vector::<Sr, f32, 2>(f32x2::splat(1.0), f32x2::splat(0.5)), f32x2::splat(1.5));
    assert_eq!(div_vector::<Sr, f64, 4>(f64x4::splat(1.0), f64x4::splat(4.0)), f64x4::splat(0.25));
    let squares = f32x8::from_fn(|i| (i * i) as f32);
    assert_eq!(sqrt_vector::<Sr, f32, 8>(squares), f32x8::from_fn(|i| i as f32));
    let ones = f64x16::splat(1.0);
    let thirds = div_vector::<Ud, f64, 16>(ones, f64x16::splat(3.0));
    let nearest = 1.0f64 / 3.0;
    for k in 0 .. 16 {
      assert_eq!(thirds[k].to_bits().abs_diff(nearest.to_bits()), 1, "lane {k}");
    }
  }

  #[test]
  fn target_is_detected() {
    assert_eq!(target(), Target::detect());
  }
}
