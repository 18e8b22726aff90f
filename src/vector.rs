//! Fixed-width groups of floats, the operands of the `*_vector` functions in
//! [`crate::dispatch`].

use crate::float::Float;
use crate::rng::Width;

/// `N` floats operated on together. `N` is one of 2, 4, 8 or 16 (see [`SupportedWidth`]).
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(transparent)]
pub struct Vector<F: Float, const N: usize>(pub [F; N]);

/// The lane counts [`Vector`] operations are provided for.
///
/// This is a *sealed* trait.
pub trait SupportedWidth: sealed::Sealed {}

mod sealed {
  pub trait Sealed {}
}

macro_rules! supported_width {
  ($($n:literal),*) => {
    $(
      impl sealed::Sealed for Width<$n> {}
      impl SupportedWidth for Width<$n> {}
    )*
  }
}

supported_width!{2, 4, 8, 16}

impl<F: Float, const N: usize> Vector<F, N> {
  /// All lanes equal to `x`.
  #[inline]
  pub fn splat(x: F) -> Self {
    Self([x; N])
  }

  #[inline]
  pub fn from_fn(f: impl FnMut(usize) -> F) -> Self {
    Self(core::array::from_fn(f))
  }

  #[inline]
  pub fn to_array(self) -> [F; N] {
    self.0
  }

  #[inline]
  pub fn as_slice(&self) -> &[F] {
    &self.0
  }

  #[inline]
  pub fn as_mut_slice(&mut self) -> &mut [F] {
    &mut self.0
  }
}

impl<F: Float, const N: usize> Default for Vector<F, N> {
  fn default() -> Self {
    Self::splat(F::ZERO)
  }
}

impl<F: Float, const N: usize> From<[F; N]> for Vector<F, N> {
  fn from(array: [F; N]) -> Self {
    Self(array)
  }
}

impl<F: Float, const N: usize> From<Vector<F, N>> for [F; N] {
  fn from(vector: Vector<F, N>) -> Self {
    vector.0
  }
}

impl<F: Float, const N: usize> core::ops::Index<usize> for Vector<F, N> {
  type Output = F;

  #[inline]
  fn index(&self, lane: usize) -> &F {
    &self.0[lane]
  }
}

impl<F: Float, const N: usize> core::ops::IndexMut<usize> for Vector<F, N> {
  #[inline]
  fn index_mut(&mut self, lane: usize) -> &mut F {
    &mut self.0[lane]
  }
}

#[allow(non_camel_case_types)]
pub type f32x2 = Vector<f32, 2>;
#[allow(non_camel_case_types)]
pub type f32x4 = Vector<f32, 4>;
#[allow(non_camel_case_types)]
pub type f32x8 = Vector<f32, 8>;
#[allow(non_camel_case_types)]
pub type f32x16 = Vector<f32, 16>;
#[allow(non_camel_case_types)]
pub type f64x2 = Vector<f64, 2>;
#[allow(non_camel_case_types)]
pub type f64x4 = Vector<f64, 4>;
#[allow(non_camel_case_types)]
pub type f64x8 = Vector<f64, 8>;
#[allow(non_camel_case_types)]
pub type f64x16 = Vector<f64, 16>;
