use super::*;

/// Move `a` to one of its two bit-adjacent neighbours, chosen by the top bit of `word`: away from
/// zero when it is clear, towards zero when it is set.
///
/// Zeros, infinities and NaN are returned unchanged. The largest finite magnitude may step to
/// infinity, and the smallest subnormal to zero.
#[inline]
pub fn perturb<F: Float>(a: F, word: u64) -> F {
  if a == F::ZERO || !a.is_finite() {
    return a
  }
  step_bits(a, word >> 63 == 0)
}
