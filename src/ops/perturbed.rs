use super::*;
use core::marker::PhantomData;
use crate::dispatch::{Dispatchable, runtime};

/// A float whose arithmetic is rounded by the mode `M`.
///
/// `Perturbed<M, F>` is a transparent wrapper around `F`, so a `&[Perturbed<M, F>]` has the same
/// layout as a `&[F]`. The operators `+ - * /` (on values and references, and their `*Assign`
/// forms), [`sqrt`](Perturbed::sqrt) and [`mul_add`](Perturbed::mul_add) go through
/// [`runtime`] dispatch and draw from the calling thread's generator. Negation, comparison and
/// formatting are those of `F`, with no perturbation.
///
/// ```
/// # use stochastic_float::sr64;
/// let tenth = sr64::new(0.1);
/// let mut sum = sr64::new(0.0);
/// for _ in 0 .. 10 {
///   sum += tenth;
/// }
/// // Each addition rounded to one of the two neighbours of its exact result.
/// assert!((sum.get() - 1.0).abs() < 1e-14);
/// ```
#[derive(Clone, Copy, Default, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Perturbed<M: Mode, F: Float>(F, PhantomData<M>);

/// `f32` with stochastic rounding.
#[allow(non_camel_case_types)]
pub type sr32 = Perturbed<Sr, f32>;

/// `f64` with stochastic rounding.
#[allow(non_camel_case_types)]
pub type sr64 = Perturbed<Sr, f64>;

/// `f32` with up-down rounding.
#[allow(non_camel_case_types)]
pub type ud32 = Perturbed<Ud, f32>;

/// `f64` with up-down rounding.
#[allow(non_camel_case_types)]
pub type ud64 = Perturbed<Ud, f64>;

impl<M: Mode, F: Float> Perturbed<M, F> {
  #[inline]
  pub const fn new(value: F) -> Self {
    Self(value, PhantomData)
  }

  /// The underlying float.
  #[inline]
  pub fn get(self) -> F {
    self.0
  }
}

impl<M: Mode, F: Dispatchable> Perturbed<M, F> {
  /// Square root, perturbed.
  #[inline]
  pub fn sqrt(self) -> Self {
    Self::new(runtime::sqrt::<M, F>(self.0))
  }

  /// `self * b + c` with a single perturbed rounding.
  #[inline]
  pub fn mul_add(self, b: Self, c: Self) -> Self {
    Self::new(runtime::fma::<M, F>(self.0, b.0, c.0))
  }
}

impl<M: Mode, F: Float> From<F> for Perturbed<M, F> {
  #[inline]
  fn from(value: F) -> Self {
    Self::new(value)
  }
}

impl<M: Mode, F: Float> core::ops::Neg for Perturbed<M, F> {
  type Output = Self;

  #[inline]
  fn neg(self) -> Self {
    Self::new(-self.0)
  }
}

impl<M: Mode, F: Float> core::ops::Neg for &Perturbed<M, F> {
  type Output = Perturbed<M, F>;

  #[inline]
  fn neg(self) -> Perturbed<M, F> {
    Perturbed::new(-self.0)
  }
}

impl<M: Mode, F: Float> core::fmt::Debug for Perturbed<M, F> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    write!(f, "{}({:?})", M::NAME, self.0)
  }
}

impl<M: Mode, F: Float> core::fmt::Display for Perturbed<M, F> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    core::fmt::Display::fmt(&self.0, f)
  }
}

impl<M: Mode, F: Float> core::fmt::LowerExp for Perturbed<M, F> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    core::fmt::LowerExp::fmt(&self.0, f)
  }
}

/// Helper macro for implementing operators for all combinations of value and reference.
macro_rules! mk_ops {
  ($trait:ident, $trait_assign:ident, $name:ident, $name_assign:ident) => {
    impl<M: Mode, F: Dispatchable>
    core::ops::$trait<Perturbed<M, F>> for Perturbed<M, F> {
      type Output = Perturbed<M, F>;

      #[inline]
      fn $name(self, rhs: Self) -> Self::Output { Perturbed::new(runtime::$name::<M, F>(self.0, rhs.0)) }
    }

    impl<M: Mode, F: Dispatchable>
    core::ops::$trait<&Perturbed<M, F>> for Perturbed<M, F> {
      type Output = Perturbed<M, F>;

      #[inline]
      fn $name(self, rhs: &Self) -> Self::Output { core::ops::$trait::$name(self, *rhs) }
    }

    impl<M: Mode, F: Dispatchable>
    core::ops::$trait<Perturbed<M, F>> for &Perturbed<M, F> {
      type Output = Perturbed<M, F>;

      #[inline]
      fn $name(self, rhs: Perturbed<M, F>) -> Self::Output { core::ops::$trait::$name(*self, rhs) }
    }

    impl<M: Mode, F: Dispatchable>
    core::ops::$trait<&Perturbed<M, F>> for &Perturbed<M, F> {
      type Output = Perturbed<M, F>;

      #[inline]
      fn $name(self, rhs: &Perturbed<M, F>) -> Self::Output { core::ops::$trait::$name(*self, *rhs) }
    }

    impl<M: Mode, F: Dispatchable>
    core::ops::$trait_assign<Perturbed<M, F>> for Perturbed<M, F> {
      #[inline]
      fn $name_assign(&mut self, rhs: Perturbed<M, F>) { *self = core::ops::$trait::$name(*self, rhs) }
    }

    impl<M: Mode, F: Dispatchable>
    core::ops::$trait_assign<&Perturbed<M, F>> for Perturbed<M, F> {
      #[inline]
      fn $name_assign(&mut self, rhs: &Perturbed<M, F>) { *self = core::ops::$trait::$name(*self, *rhs) }
    }
  }
}

mk_ops!{Add, AddAssign, add, add_assign}
mk_ops!{Sub, SubAssign, sub, sub_assign}
mk_ops!{Mul, MulAssign, mul, mul_assign}
mk_ops!{Div, DivAssign, div, div_assign}
