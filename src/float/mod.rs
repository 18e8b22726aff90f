//! This module contains the bit-level description of the IEEE754 binary formats that the rest of
//! the crate is generic over. The end-user only sees the sealed [`Float`] trait, implemented for
//! `f32` and `f64`; all constants are derived from the format parameters and never mutated.

/// The trait for the IEEE754 types that stochastic arithmetic is available for (only satisfied by
/// `f32` and `f64`).
///
/// This is a *sealed* type.
pub trait Float: Sealed {}

/// Actual constants and operations implemented here.
pub trait Sealed:
  core::fmt::Debug + core::fmt::Display + core::fmt::LowerExp +
  Copy + Clone +
  PartialEq + PartialOrd +
  Default + Send + Sync + 'static +
  core::ops::Add<Self, Output=Self> +
  core::ops::Sub<Self, Output=Self> +
  core::ops::Mul<Self, Output=Self> +
  core::ops::Div<Self, Output=Self> +
  core::ops::Neg<Output=Self>
{
  /// Width of the storage type, in bits.
  const BITS: u32;
  /// Number of explicitly stored mantissa bits (`p - 1`).
  const MANTISSA: i32;
  /// Precision `p`, counting the implicit bit.
  const PRECISION: i32;
  const BIAS: i32;
  /// Exponent of the smallest normal number.
  const MIN_EXP: i32;
  /// Exponent of the largest finite number.
  const MAX_EXP: i32;
  /// Exponent of the smallest subnormal number, `MIN_EXP - MANTISSA`.
  const MIN_EXP_SUBNORMAL: i32;

  const ZERO: Self;
  const ONE: Self;
  const TWO: Self;
  /// Gap between `1.0` and the next representable number, `2^-MANTISSA`.
  const ULP: Self;
  const MIN_NORMAL: Self;
  const MIN_SUBNORMAL: Self;
  const MAX: Self;

  const SIGN_MASK: u64;
  /// Exponent field, in place.
  const EXPONENT_MASK: u64;
  const MANTISSA_MASK: u64;
  /// Bit pattern shared by all infinities and NaNs.
  const INF_NAN_MASK: u64;

  /// `1 - 2^-p`, the factor that takes a value one step toward zero.
  const PREDECESSOR_FACTOR: Self;
  /// Veltkamp's constant `2^s + 1` with `s = ceil(p / 2)`.
  const SPLITTER: Self;
  /// `s = ceil(p / 2)`, the number of bits [`crate::eft::split`] moves into the low half.
  const SPLIT_SHIFT: u32;
  /// `2^(p - 1)`.
  const HALF_RADIX: Self;
  const THREE_HALVES: Self;

  /// How far a 64-bit random word is shifted right to keep exactly `p` bits.
  const UNIFORM_SHIFT: u32;
  /// `2^-p`; multiplying `p` random bits by this yields a uniform draw in `[0, 1)`.
  const UNIFORM_SCALE: Self;

  /// Raw bit pattern, zero-extended to 64 bits.
  fn to_raw(self) -> u64;
  /// Inverse of [`Sealed::to_raw`]; bits above [`Sealed::BITS`] are ignored.
  fn from_raw(raw: u64) -> Self;
  /// Exact conversion of an integer below `2^p`.
  fn from_small_int(x: u64) -> Self;

  fn abs(self) -> Self;
  fn sqrt(self) -> Self;
  /// Hardware (or libm) fused multiply-add, `self * b + c` with a single rounding.
  fn mul_add(self, b: Self, c: Self) -> Self;
  fn is_finite(self) -> bool;
  fn is_nan(self) -> bool;
  fn is_sign_negative(self) -> bool;
}

/// Implementation of all constants and forwarding functions.
macro_rules! impl_common {
  ($float:ty, $bits:ty, $split_shift:literal) => {
    impl Float for $float {}

    impl Sealed for $float {
      const BITS: u32 = <$bits>::BITS;
      const MANTISSA: i32 = <$float>::MANTISSA_DIGITS as i32 - 1;
      const PRECISION: i32 = <$float>::MANTISSA_DIGITS as i32;
      const BIAS: i32 = <$float>::MAX_EXP - 1;
      const MIN_EXP: i32 = <$float>::MIN_EXP - 1;
      const MAX_EXP: i32 = <$float>::MAX_EXP - 1;
      const MIN_EXP_SUBNORMAL: i32 = <Self as Sealed>::MIN_EXP - Self::MANTISSA;

      const ZERO: Self = 0.0;
      const ONE: Self = 1.0;
      const TWO: Self = 2.0;
      const ULP: Self = <$float>::EPSILON;
      const MIN_NORMAL: Self = <$float>::MIN_POSITIVE;
      const MIN_SUBNORMAL: Self = <$float>::from_bits(1);
      const MAX: Self = <$float>::MAX;

      const SIGN_MASK: u64 = 1 << (Self::BITS - 1);
      const EXPONENT_MASK: u64 = (<$bits>::MAX as u64) & !Self::SIGN_MASK & !Self::MANTISSA_MASK;
      const MANTISSA_MASK: u64 = (1 << Self::MANTISSA) - 1;
      const INF_NAN_MASK: u64 = Self::EXPONENT_MASK;

      const PREDECESSOR_FACTOR: Self = 1.0 - <$float>::EPSILON / 2.0;
      const SPLITTER: Self = (1u64 << $split_shift) as $float + 1.0;
      const SPLIT_SHIFT: u32 = $split_shift;
      const HALF_RADIX: Self = (1u64 << Self::MANTISSA) as $float;
      const THREE_HALVES: Self = 1.5;

      const UNIFORM_SHIFT: u32 = 64 - <$float>::MANTISSA_DIGITS;
      const UNIFORM_SCALE: Self = <$float>::EPSILON / 2.0;

      #[inline]
      fn to_raw(self) -> u64 { self.to_bits() as u64 }

      #[inline]
      fn from_raw(raw: u64) -> Self { <$float>::from_bits(raw as $bits) }

      #[inline]
      fn from_small_int(x: u64) -> Self {
        debug_assert!(x >> Self::PRECISION == 0);
        x as $float
      }

      #[inline]
      fn abs(self) -> Self { <$float>::abs(self) }

      #[inline]
      fn sqrt(self) -> Self { <$float>::sqrt(self) }

      #[inline]
      fn mul_add(self, b: Self, c: Self) -> Self { <$float>::mul_add(self, b, c) }

      #[inline]
      fn is_finite(self) -> bool { <$float>::is_finite(self) }

      #[inline]
      fn is_nan(self) -> bool { <$float>::is_nan(self) }

      #[inline]
      fn is_sign_negative(self) -> bool { <$float>::is_sign_negative(self) }
    }
  }
}

impl_common!{f32, u32, 12}
impl_common!{f64, u64, 27}

/// Bit-level helpers: exponent extraction, predecessor, powers of two.
mod bits;
pub use bits::{exponent, predecessor_abs, pow2, is_number, step_bits};
