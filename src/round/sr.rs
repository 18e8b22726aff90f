use super::*;

/// The amount to add to `sigma`, the round-to-nearest value of some exact `sigma + tau`, to round
/// it stochastically, using `z`, uniform in `[0, 1)`: either `0` or one signed ulp in the
/// direction of `tau`.
///
/// The ulp is the gap between `sigma` and its neighbour on `tau`'s side, so when `sigma` is a power
/// of two and `tau` points towards zero, it is the smaller gap of the binade below. The neighbour
/// is chosen iff `|tau + ulp * z| >= |ulp|`, which happens with probability `|tau| / |ulp|`.
///
/// Returns `0` when `tau` is zero (the result is exact) or when either input is not finite.
/// Zero and subnormal `sigma` use the gap of the subnormal range.
#[inline]
pub fn correction<F: Float>(sigma: F, tau: F, z: F) -> F {
  if tau == F::ZERO || !sigma.is_finite() || !tau.is_finite() {
    return F::ZERO
  }
  let tau_negative = tau < F::ZERO;
  let eta = if tau_negative != (sigma < F::ZERO) {
    exponent(predecessor_abs(sigma))
  } else {
    exponent(sigma)
  };
  // Subnormals all share the spacing of the lowest normal binade.
  let eta = if sigma == F::ZERO { F::MIN_EXP } else { eta.max(F::MIN_EXP) };
  let magnitude = pow2::<F>(eta - F::MANTISSA);
  let ulp = if tau_negative { -magnitude } else { magnitude };
  let pi = ulp * z;
  if (tau + pi).abs() >= ulp.abs() { ulp } else { F::ZERO }
}
