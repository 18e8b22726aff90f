use super::*;

/// Unbiased binary exponent of `a`, read straight from the exponent field.
///
/// Returns `0` for `a == ±0`. Subnormals are *not* normalised: they all report `-BIAS`, exactly
/// what the raw field says.
#[inline]
pub fn exponent<F: Float>(a: F) -> i32 {
  if a == F::ZERO {
    return 0
  }
  let field = (a.to_raw() & F::EXPONENT_MASK) >> F::MANTISSA;
  field as i32 - F::BIAS
}

/// `a * (1 - 2^-p)`: `a` moved one step toward zero in magnitude.
///
/// For a power of two this lands strictly inside the binade below, which is what makes
/// [`exponent`] of the result the exponent of `a`'s predecessor.
#[inline]
pub fn predecessor_abs<F: Float>(a: F) -> F {
  a * F::PREDECESSOR_FACTOR
}

/// `2^n`, synthesised directly in the exponent field.
///
/// Below the normal range the deficit becomes a shift of a single mantissa bit, producing the
/// subnormal `2^n`, or `0` once `n` is below [`Sealed::MIN_EXP_SUBNORMAL`].
#[inline]
pub fn pow2<F: Float>(n: i32) -> F {
  debug_assert!(n <= F::MAX_EXP, "2^{n} overflows");
  if n >= F::MIN_EXP {
    F::from_raw(((n + F::BIAS) as u64) << F::MANTISSA)
  } else {
    let shift = F::MANTISSA - (F::MIN_EXP - n);
    if shift < 0 { F::ZERO } else { F::from_raw(1 << shift) }
  }
}

/// Whether `a` and `b` are both non-zero and finite: the pairs for which a perturbation means
/// something. Checked on the bit patterns.
#[inline]
pub fn is_number<F: Float>(a: F, b: F) -> bool {
  let (a, b) = (a.to_raw() & !F::SIGN_MASK, b.to_raw() & !F::SIGN_MASK);
  let nonzero = a != 0 && b != 0;
  let finite = (a & F::INF_NAN_MASK) != F::INF_NAN_MASK && (b & F::INF_NAN_MASK) != F::INF_NAN_MASK;
  nonzero && finite
}

/// The bit-adjacent neighbour of `a`: one step away from zero if `away`, toward zero otherwise.
///
/// `a` must be non-zero and finite. Stepping past the largest finite value gives infinity, and
/// stepping below the smallest subnormal gives zero, both of the same sign.
#[inline]
pub fn step_bits<F: Float>(a: F, away: bool) -> F {
  debug_assert!(a != F::ZERO && a.is_finite());
  let raw = a.to_raw();
  F::from_raw(if away { raw.wrapping_add(1) } else { raw.wrapping_sub(1) })
}
