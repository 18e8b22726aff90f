//! The perturbed arithmetic kernels.
//!
//! Each kernel computes the IEEE754 result of its operation and then rounds it by one of the two
//! [`Mode`]s, [`Sr`] or [`Ud`]. Kernels are pure: the caller supplies one random 64-bit word per
//! operation, the [`FmaStrategy`] that provides fused multiply-adds and exact products, and a
//! [`Tracer`]. Dispatch, lanes and the per-thread generator all live a layer above, in
//! [`crate::dispatch`].
//!
//! Inputs outside the domain where a perturbation makes sense (zeros, infinities, NaN) give the
//! IEEE754 result, untouched.

use crate::float::{Float, is_number};
use crate::eft::{FmaStrategy, two_sum, fma_residual};
use crate::round::{correction, perturb};
use crate::rng::unit_interval;
use crate::trace::{Tracer, trace};

/// Stochastic rounding kernels.
mod sr;

/// Up-down rounding kernels.
mod ud;

/// The [`Perturbed`] number type.
mod perturbed;

pub use perturbed::{Perturbed, sr32, sr64, ud32, ud64};

/// A rounding mode: how the correctly rounded result of each operation is perturbed.
///
/// This is a *sealed* trait, implemented by [`Sr`] and [`Ud`] only.
pub trait Mode: sealed::Sealed + core::fmt::Debug + Copy + Default + PartialEq + PartialOrd + Send + Sync + 'static {
  /// Short name, for logs.
  const NAME: &'static str;
  /// Position of this mode in per-mode tables.
  const INDEX: usize;

  fn add<F: Float, X: FmaStrategy>(a: F, b: F, word: u64, tr: &impl Tracer) -> F;
  fn sub<F: Float, X: FmaStrategy>(a: F, b: F, word: u64, tr: &impl Tracer) -> F;
  fn mul<F: Float, X: FmaStrategy>(a: F, b: F, word: u64, tr: &impl Tracer) -> F;
  fn div<F: Float, X: FmaStrategy>(a: F, b: F, word: u64, tr: &impl Tracer) -> F;
  fn sqrt<F: Float, X: FmaStrategy>(a: F, word: u64, tr: &impl Tracer) -> F;
  fn fma<F: Float, X: FmaStrategy>(a: F, b: F, c: F, word: u64, tr: &impl Tracer) -> F;
}

mod sealed {
  pub trait Sealed {}
}

/// Stochastic rounding: round to either neighbour of the exact result, with probability
/// proportional to proximity. Unbiased.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Sr;

/// Up-down rounding: move the correctly rounded result one ulp up or down, with probability 1/2
/// each.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ud;

impl sealed::Sealed for Sr {}
impl sealed::Sealed for Ud {}

impl Mode for Sr {
  const NAME: &'static str = "sr";
  const INDEX: usize = 0;

  #[inline(always)]
  fn add<F: Float, X: FmaStrategy>(a: F, b: F, word: u64, tr: &impl Tracer) -> F { sr::add(a, b, word, tr) }

  #[inline(always)]
  fn sub<F: Float, X: FmaStrategy>(a: F, b: F, word: u64, tr: &impl Tracer) -> F { sr::sub(a, b, word, tr) }

  #[inline(always)]
  fn mul<F: Float, X: FmaStrategy>(a: F, b: F, word: u64, tr: &impl Tracer) -> F { sr::mul::<F, X>(a, b, word, tr) }

  #[inline(always)]
  fn div<F: Float, X: FmaStrategy>(a: F, b: F, word: u64, tr: &impl Tracer) -> F { sr::div::<F, X>(a, b, word, tr) }

  #[inline(always)]
  fn sqrt<F: Float, X: FmaStrategy>(a: F, word: u64, tr: &impl Tracer) -> F { sr::sqrt::<F, X>(a, word, tr) }

  #[inline(always)]
  fn fma<F: Float, X: FmaStrategy>(a: F, b: F, c: F, word: u64, tr: &impl Tracer) -> F { sr::fma::<F, X>(a, b, c, word, tr) }
}

impl Mode for Ud {
  const NAME: &'static str = "ud";
  const INDEX: usize = 1;

  #[inline(always)]
  fn add<F: Float, X: FmaStrategy>(a: F, b: F, word: u64, tr: &impl Tracer) -> F { ud::add(a, b, word, tr) }

  #[inline(always)]
  fn sub<F: Float, X: FmaStrategy>(a: F, b: F, word: u64, tr: &impl Tracer) -> F { ud::sub(a, b, word, tr) }

  #[inline(always)]
  fn mul<F: Float, X: FmaStrategy>(a: F, b: F, word: u64, tr: &impl Tracer) -> F { ud::mul(a, b, word, tr) }

  #[inline(always)]
  fn div<F: Float, X: FmaStrategy>(a: F, b: F, word: u64, tr: &impl Tracer) -> F { ud::div(a, b, word, tr) }

  #[inline(always)]
  fn sqrt<F: Float, X: FmaStrategy>(a: F, word: u64, tr: &impl Tracer) -> F { ud::sqrt(a, word, tr) }

  #[inline(always)]
  fn fma<F: Float, X: FmaStrategy>(a: F, b: F, c: F, word: u64, tr: &impl Tracer) -> F { ud::fma::<F, X>(a, b, c, word, tr) }
}

/// An operation of two operands, as a type, so that slice kernels can be written once.
pub trait BinaryOp: 'static {
  const NAME: &'static str;

  fn apply<M: Mode, F: Float, X: FmaStrategy>(a: F, b: F, word: u64, tr: &impl Tracer) -> F;
}

/// See [`BinaryOp`].
pub trait UnaryOp: 'static {
  const NAME: &'static str;

  fn apply<M: Mode, F: Float, X: FmaStrategy>(a: F, word: u64, tr: &impl Tracer) -> F;
}

/// See [`BinaryOp`].
pub trait TernaryOp: 'static {
  const NAME: &'static str;

  fn apply<M: Mode, F: Float, X: FmaStrategy>(a: F, b: F, c: F, word: u64, tr: &impl Tracer) -> F;
}

macro_rules! binary_op {
  ($op:ident, $name:ident) => {
    #[derive(Debug, Clone, Copy, Default)]
    pub struct $op;

    impl BinaryOp for $op {
      const NAME: &'static str = stringify!($name);

      #[inline(always)]
      fn apply<M: Mode, F: Float, X: FmaStrategy>(a: F, b: F, word: u64, tr: &impl Tracer) -> F {
        M::$name::<F, X>(a, b, word, tr)
      }
    }
  }
}

binary_op!{Add, add}
binary_op!{Sub, sub}
binary_op!{Mul, mul}
binary_op!{Div, div}

#[derive(Debug, Clone, Copy, Default)]
pub struct Sqrt;

impl UnaryOp for Sqrt {
  const NAME: &'static str = "sqrt";

  #[inline(always)]
  fn apply<M: Mode, F: Float, X: FmaStrategy>(a: F, word: u64, tr: &impl Tracer) -> F {
    M::sqrt::<F, X>(a, word, tr)
  }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Fma;

impl TernaryOp for Fma {
  const NAME: &'static str = "fma";

  #[inline(always)]
  fn apply<M: Mode, F: Float, X: FmaStrategy>(a: F, b: F, c: F, word: u64, tr: &impl Tracer) -> F {
    M::fma::<F, X>(a, b, c, word, tr)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::eft::{NativeFma, EmulatedFma};
  use crate::eft::rational::exact;
  use crate::float::step_bits;
  use crate::float::test::cases_proptest;
  use crate::rng::Xoshiro;
  use crate::trace::Silent;
  use malachite::rational::Rational;
  use malachite::base::num::arithmetic::traits::Abs;
  use proptest::prelude::*;

  /// Whether `ups` successes out of `n` trials are plausible for a binomial with probability `p`:
  /// within `k` standard deviations, plus a couple of counts of slack. Exact arithmetic.
  fn binomial_plausible(ups: u64, n: u64, p: &Rational, k: u64) -> bool {
    let deviation = (Rational::from(ups) - Rational::from(n) * p).abs();
    if deviation <= Rational::from(2) {
      return true
    }
    let excess = deviation - Rational::from(2);
    let variance = Rational::from(n) * p * (Rational::from(1) - p);
    &excess * &excess <= Rational::from(k * k) * variance
  }

  /// Run `op` `n` times and check that every result is `sigma = RN(exact)` or its neighbour on
  /// the side of `exact`, the neighbour showing up with probability `|exact - sigma| / gap`.
  fn check_sr_frequency<F: Float>(exact_value: Rational, sigma: F, n: u64, seed: u64, mut op: impl FnMut(u64) -> F) -> Result<(), String>
  where
    Rational: TryFrom<F>,
    <Rational as TryFrom<F>>::Error: core::fmt::Debug,
  {
    let mut rng = Xoshiro::new(seed);
    let sigma_q = exact(sigma);
    if exact_value == sigma_q {
      for _ in 0 .. n {
        let result = op(rng.next_raw());
        if result != sigma {
          return Err(format!("exact result {sigma:e} perturbed to {result:e}"))
        }
      }
      return Ok(())
    }
    let away = (exact_value > sigma_q) == (sigma > F::ZERO);
    let neighbour = step_bits(sigma, away);
    let p = (exact_value - &sigma_q) / (exact(neighbour) - &sigma_q);
    let mut ups = 0;
    for _ in 0 .. n {
      let result = op(rng.next_raw());
      if result == neighbour {
        ups += 1
      } else if result != sigma {
        return Err(format!("{result:e} is neither {sigma:e} nor {neighbour:e}"))
      }
    }
    if binomial_plausible(ups, n, &p, 6) {
      Ok(())
    } else {
      Err(format!("{ups} of {n} draws rounded to {neighbour:e}, expected probability {p}"))
    }
  }

  fn words(seed: u64) -> impl Iterator<Item = u64> {
    let mut rng = Xoshiro::new(seed);
    core::iter::repeat_with(move || rng.next_raw())
  }

  #[test]
  fn sr_add_tiny_rounds_up_one_in_256() {
    let tiny = 2f64.powi(-60);
    let n = 100_000;
    let mut ups = 0;
    for word in words(2024).take(n as usize) {
      let r = Sr::add::<f64, NativeFma>(1.0, tiny, word, &Silent);
      if r == 1.0 + f64::EPSILON {
        ups += 1
      } else {
        assert_eq!(r, 1.0)
      }
    }
    assert!(binomial_plausible(ups, n, &Rational::from_signeds(1, 256), 6), "{ups} of {n}");
    assert!(ups > 0);
  }

  #[test]
  fn ud_add_one_one_is_symmetric() {
    let n = 20_000;
    let (up, down) = (2.0 + 2. * f64::EPSILON, 2.0 - f64::EPSILON);
    let mut ups = 0;
    for word in words(7).take(n as usize) {
      let r = Ud::add::<f64, NativeFma>(1.0, 1.0, word, &Silent);
      if r == up {
        ups += 1
      } else {
        assert_eq!(r, down)
      }
    }
    assert!(binomial_plausible(ups, n, &Rational::from_signeds(1, 2), 5), "{ups} of {n}");
  }

  #[test]
  fn ud_f32_is_symmetric() {
    let n = 20_000;
    let sigma = 1.0f32 / 3.0;
    let mut ups = 0;
    for word in words(8).take(n as usize) {
      let r = Ud::div::<f32, EmulatedFma>(1.0, 3.0, word, &Silent);
      if r == step_bits(sigma, true) {
        ups += 1
      } else {
        assert_eq!(r, step_bits(sigma, false))
      }
    }
    assert!(binomial_plausible(ups, n, &Rational::from_signeds(1, 2), 5), "{ups} of {n}");
  }

  #[test]
  fn exact_operations_are_never_perturbed() {
    for word in words(3).take(10_000) {
      assert_eq!(Sr::add::<f64, NativeFma>(1.5, 0.25, word, &Silent), 1.75);
      assert_eq!(Sr::sub::<f64, NativeFma>(1.5, 0.25, word, &Silent), 1.25);
      assert_eq!(Sr::mul::<f64, EmulatedFma>(3.0, 0.5, word, &Silent), 1.5);
      assert_eq!(Sr::div::<f64, NativeFma>(1.0, 4.0, word, &Silent), 0.25);
      assert_eq!(Sr::sqrt::<f64, EmulatedFma>(4.0, word, &Silent), 2.0);
      assert_eq!(Sr::fma::<f64, NativeFma>(2.0, 3.0, 1.0, word, &Silent), 7.0);
      assert_eq!(Sr::add::<f32, NativeFma>(1.5, 0.25, word, &Silent), 1.75);
      assert_eq!(Sr::fma::<f32, EmulatedFma>(2.0, 3.0, 1.0, word, &Silent), 7.0);
    }
  }

  #[test]
  fn signed_zeros_survive() {
    for word in words(4).take(1000) {
      assert_eq!(Sr::add::<f64, NativeFma>(-0.0, -0.0, word, &Silent).to_bits(), (-0.0f64).to_bits());
      assert_eq!(Sr::mul::<f64, NativeFma>(-0.0, 5.0, word, &Silent).to_bits(), (-0.0f64).to_bits());
      assert_eq!(Sr::fma::<f64, NativeFma>(-0.0, 1.0, -0.0, word, &Silent).to_bits(), (-0.0f64).to_bits());
      assert_eq!(Ud::mul::<f64, NativeFma>(-0.0, 5.0, word, &Silent).to_bits(), (-0.0f64).to_bits());
      assert_eq!(Sr::sqrt::<f32, NativeFma>(-0.0, word, &Silent).to_bits(), (-0.0f32).to_bits());
    }
  }

  #[test]
  fn specials_follow_ieee754() {
    let w = 0x1234_5678_9abc_def0;
    let t = &Silent;
    assert_eq!(Sr::add::<f64, NativeFma>(f64::INFINITY, 1.0, w, t), f64::INFINITY);
    assert!(Sr::add::<f64, NativeFma>(f64::INFINITY, f64::NEG_INFINITY, w, t).is_nan());
    assert_eq!(Sr::mul::<f64, NativeFma>(f64::MAX, 2.0, w, t), f64::INFINITY);
    assert_eq!(Sr::div::<f64, NativeFma>(1.0, 0.0, w, t), f64::INFINITY);
    assert!(Sr::div::<f64, NativeFma>(0.0, 0.0, w, t).is_nan());
    assert!(Sr::sqrt::<f64, NativeFma>(-1.0, w, t).is_nan());
    assert_eq!(Sr::sqrt::<f64, NativeFma>(f64::INFINITY, w, t), f64::INFINITY);
    assert!(Sr::fma::<f64, NativeFma>(f64::NAN, 1.0, 1.0, w, t).is_nan());
    assert_eq!(Sr::fma::<f32, NativeFma>(f32::INFINITY, 1.0, 1.0, w, t), f32::INFINITY);
    assert_eq!(Ud::add::<f64, NativeFma>(f64::INFINITY, 1.0, w, t), f64::INFINITY);
    assert!(Ud::sqrt::<f64, NativeFma>(-1.0, w, t).is_nan());
    assert_eq!(Ud::div::<f32, NativeFma>(1.0, 0.0, w, t), f32::INFINITY);
  }

  #[test]
  fn sub_is_add_of_negation() {
    for (word, a) in words(5).zip(words(6)).take(1000) {
      let a = f64::from_bits(a >> 2);
      let b = 0.1f64;
      assert_eq!(Sr::sub::<f64, NativeFma>(a, b, word, &Silent), Sr::add::<f64, NativeFma>(a, -b, word, &Silent));
    }
  }

  #[test]
  fn strategies_agree() {
    // Both strategies compute the same exact residuals, so the same word gives the same result.
    for (word, x) in words(9).zip(words(10)).take(1000) {
      let a = 1.0 + (x >> 12) as f64 * 2f64.powi(-52);
      let b = 3.0 - (x >> 40) as f64 * 2f64.powi(-30);
      assert_eq!(Sr::mul::<f64, NativeFma>(a, b, word, &Silent), Sr::mul::<f64, EmulatedFma>(a, b, word, &Silent));
      assert_eq!(Sr::div::<f64, NativeFma>(a, b, word, &Silent), Sr::div::<f64, EmulatedFma>(a, b, word, &Silent));
      assert_eq!(Sr::sqrt::<f64, NativeFma>(a, word, &Silent), Sr::sqrt::<f64, EmulatedFma>(a, word, &Silent));
      assert_eq!(Sr::fma::<f64, NativeFma>(a, b, -3.0, word, &Silent), Sr::fma::<f64, EmulatedFma>(a, b, -3.0, word, &Silent));
      assert_eq!(Ud::fma::<f64, NativeFma>(a, b, -3.0, word, &Silent), Ud::fma::<f64, EmulatedFma>(a, b, -3.0, word, &Silent));
    }
  }

  #[test]
  fn sqrt_lands_on_neighbours() {
    for (word, x) in words(11).zip(words(12)).take(10_000) {
      let a = 1.0 + (x >> 12) as f64 * 2f64.powi(-52);
      let sigma = a.sqrt();
      let r = Sr::sqrt::<f64, NativeFma>(a, word, &Silent);
      assert!(r == sigma || r == step_bits(sigma, true) || r == step_bits(sigma, false), "sqrt({a:e}) = {r:e}");
    }
  }

  macro_rules! test_sr_frequency {
    ($float:ty, $add:ident, $mul:ident, $div:ident, $fma:ident) => {
      proptest!{
        #![proptest_config(ProptestConfig::with_cases(crate::PROPTEST_CASES / 64))]

        #[test]
        fn $add(a in cases_proptest::<$float>(-30 ..= 30), b in cases_proptest::<$float>(-30 ..= 30)) {
          let sigma = a + b;
          prop_assume!(sigma != 0.0);
          let result = check_sr_frequency(exact(a) + exact(b), sigma, 2048, a.to_bits() as u64, |w| {
            Sr::add::<$float, NativeFma>(a, b, w, &Silent)
          });
          prop_assert!(result.is_ok(), "{:e} + {:e}: {:?}", a, b, result);
        }

        #[test]
        fn $mul(a in cases_proptest::<$float>(-30 ..= 30), b in cases_proptest::<$float>(-30 ..= 30)) {
          let result = check_sr_frequency(exact(a) * exact(b), a * b, 2048, b.to_bits() as u64, |w| {
            Sr::mul::<$float, EmulatedFma>(a, b, w, &Silent)
          });
          prop_assert!(result.is_ok(), "{:e} * {:e}: {:?}", a, b, result);
        }

        #[test]
        fn $div(a in cases_proptest::<$float>(-30 ..= 30), b in cases_proptest::<$float>(-30 ..= 30)) {
          let result = check_sr_frequency(exact(a) / exact(b), a / b, 2048, a.to_bits() as u64 ^ 1, |w| {
            Sr::div::<$float, NativeFma>(a, b, w, &Silent)
          });
          prop_assert!(result.is_ok(), "{:e} / {:e}: {:?}", a, b, result);
        }

        #[test]
        fn $fma(
          a in cases_proptest::<$float>(-20 ..= 20),
          b in cases_proptest::<$float>(-20 ..= 20),
          c in cases_proptest::<$float>(-40 ..= 40),
        ) {
          let sigma = a.mul_add(b, c);
          prop_assume!(sigma != 0.0);
          let result = check_sr_frequency(exact(a) * exact(b) + exact(c), sigma, 2048, c.to_bits() as u64, |w| {
            Sr::fma::<$float, NativeFma>(a, b, c, w, &Silent)
          });
          prop_assert!(result.is_ok(), "{:e} * {:e} + {:e}: {:?}", a, b, c, result);
        }
      }
    };
  }

  test_sr_frequency!{f32, sr_add_frequency_f32, sr_mul_frequency_f32, sr_div_frequency_f32, sr_fma_frequency_f32}
  test_sr_frequency!{f64, sr_add_frequency_f64, sr_mul_frequency_f64, sr_div_frequency_f64, sr_fma_frequency_f64}

  #[test]
  fn emulated_strategy_near_the_top_of_the_range() {
    let a = 1.0000001e35f32;
    let result = check_sr_frequency(exact(a) * Rational::from(3), a * 3.0, 20_000, 7, |w| {
      Sr::mul::<f32, EmulatedFma>(a, 3.0, w, &Silent)
    });
    assert!(result.is_ok(), "{result:?}");
    // A residual of 1 against an ulp of 2^94 never moves the result for a zero word.
    assert_eq!(Sr::fma::<f32, EmulatedFma>(1e35, 2.0, 1.0, 0, &Silent), 2e35);
    let ud = Ud::fma::<f32, EmulatedFma>(1e35, 2.0, 1.0, 0, &Silent);
    assert_eq!(ud.to_bits().abs_diff(2e35f32.to_bits()), 1, "{ud:e}");
  }

  macro_rules! test_sr_frequency_huge {
    ($float:ty, $mul:ident, $div:ident) => {
      proptest!{
        #![proptest_config(ProptestConfig::with_cases(crate::PROPTEST_CASES / 64))]

        #[test]
        fn $mul(
          a in cases_proptest::<$float>(<$float as crate::float::Sealed>::MAX_EXP - 30 ..= <$float as crate::float::Sealed>::MAX_EXP),
          b in cases_proptest::<$float>(-30 ..= -1),
        ) {
          let result = check_sr_frequency(exact(a) * exact(b), a * b, 2048, a.to_bits() as u64, |w| {
            Sr::mul::<$float, EmulatedFma>(a, b, w, &Silent)
          });
          prop_assert!(result.is_ok(), "{:e} * {:e}: {:?}", a, b, result);
        }

        #[test]
        fn $div(
          a in cases_proptest::<$float>(<$float as crate::float::Sealed>::MAX_EXP - 30 ..= <$float as crate::float::Sealed>::MAX_EXP),
          b in cases_proptest::<$float>(1 ..= 30),
        ) {
          let result = check_sr_frequency(exact(a) / exact(b), a / b, 2048, b.to_bits() as u64, |w| {
            Sr::div::<$float, EmulatedFma>(a, b, w, &Silent)
          });
          prop_assert!(result.is_ok(), "{:e} / {:e}: {:?}", a, b, result);
        }
      }
    };
  }

  test_sr_frequency_huge!{f32, sr_mul_frequency_huge_f32, sr_div_frequency_huge_f32}
  test_sr_frequency_huge!{f64, sr_mul_frequency_huge_f64, sr_div_frequency_huge_f64}

  #[test]
  fn tracer_sees_operations() {
    use core::cell::RefCell;
    use core::fmt;

    #[derive(Default)]
    struct Recorder(RefCell<Vec<String>>);

    impl Tracer for Recorder {
      fn enabled(&self) -> bool { true }

      fn trace(&self, op: &'static str, args: fmt::Arguments) {
        self.0.borrow_mut().push(format!("{op} {args}"))
      }
    }

    let recorder = Recorder::default();
    Sr::add::<f64, NativeFma>(1.0, 2f64.powi(-60), 0, &recorder);
    Ud::mul::<f32, NativeFma>(3.0, 0.5, 0, &recorder);
    Sr::add::<f64, NativeFma>(f64::NAN, 1.0, 0, &recorder);
    let records = recorder.0.borrow();
    assert_eq!(records.len(), 2);
    assert!(records[0].starts_with("sr_add 1e0 + 8.673617379884035e-19"), "{}", records[0]);
    assert_eq!(records[1], "ud_mul 1.5e0 -> 1.5000001e0");
  }
}
