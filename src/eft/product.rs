use super::*;
use crate::float::pow2;

/// `sigma = RN(a * b)` and `tau = a * b - sigma`, exactly, using a fused multiply-add.
///
/// Exact as long as `a * b` neither overflows nor falls below `2^(MIN_EXP + MANTISSA)`, where
/// the residual would not be representable.
#[inline]
pub fn two_product_fma<F: Float>(a: F, b: F) -> (F, F) {
  let sigma = a * b;
  let tau = a.mul_add(b, -sigma);
  (sigma, tau)
}

/// Veltkamp's split of `a` into `high + low == a`, each half fitting in `p - s` and `s - 1` bits
/// respectively (`s = ceil(p / 2)`), so that products of halves are exact.
///
/// `a * SPLITTER` must not overflow.
#[inline]
pub fn split<F: Float>(a: F) -> (F, F) {
  let gamma = F::SPLITTER * a;
  let delta = a - gamma;
  let high = gamma + delta;
  let low = a - high;
  (high, low)
}

/// The same decomposition as [`split`] by masking off the low `s` bits of the mantissa instead
/// of rounding. `high` then keeps the sign and leading bits of `a` and `low` the remainder; the
/// split is exact for every finite `a`, with no overflow precondition.
#[inline]
pub fn split_bits<F: Float>(a: F) -> (F, F) {
  let mask = !((1u64 << F::SPLIT_SHIFT) - 1);
  let high = F::from_raw(a.to_raw() & mask);
  let low = a - high;
  (high, low)
}

/// Dekker's product: `(pi_high, pi_low)` with `pi_high = RN(a * b)` and `pi_low` the exact
/// residual, using only separately rounded multiplications and additions.
///
/// Exact when the exponent sum of `a` and `b` is not below `MIN_EXP - PRECISION + 1`; below
/// that the error is bounded by `3.5 * MIN_SUBNORMAL`. When `pi_high` is not finite, `pi_low`
/// is zero. Operands and products up to the largest finite value are handled: past
/// `2^(MAX_EXP - SPLIT_SHIFT - 1)`, where [`split`] or the partial products could overflow, the
/// computation is carried out on operands scaled by a power of two.
#[inline]
pub fn dekker_product<F: Float>(a: F, b: F) -> (F, F) {
  let pi_high = a * b;
  if !pi_high.is_finite() {
    return (pi_high, F::ZERO)
  }
  let limit = pow2::<F>(F::MAX_EXP - F::SPLIT_SHIFT as i32 - 1);
  let scale = pow2::<F>(F::SPLIT_SHIFT as i32 + 2);
  // At most one operand can exceed `limit` with a finite product; trading exponent between the
  // two leaves the product unchanged.
  let (a, b) = if a.abs() > limit {
    (a / scale, b * scale)
  } else if b.abs() > limit {
    (a * scale, b / scale)
  } else {
    (a, b)
  };
  if pi_high.abs() > limit {
    (pi_high, dekker_residual(a / scale, b) * scale)
  } else {
    (pi_high, dekker_residual(a, b))
  }
}

/// `a * b - RN(a * b)` by Veltkamp halves. `a`, `b` and `a * b` must all be at most
/// `2^(MAX_EXP - SPLIT_SHIFT - 1)` in magnitude.
#[inline(always)]
fn dekker_residual<F: Float>(a: F, b: F) -> F {
  let (a_high, a_low) = split(a);
  let (b_high, b_low) = split(b);
  let t1 = a_high * b_high - a * b;
  let t2 = t1 + a_high * b_low;
  let t3 = t2 + a_low * b_high;
  t3 + a_low * b_low
}
