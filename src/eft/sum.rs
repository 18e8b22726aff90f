use super::*;

/// Knuth's TwoSum: `sigma = RN(a + b)` and the residual `tau` such that `sigma + tau == a + b`
/// exactly (barring overflow). No precondition on the relative magnitudes of `a` and `b`.
#[inline]
pub fn two_sum<F: Float>(a: F, b: F) -> (F, F) {
  let sigma = a + b;
  let a_ = sigma - b;
  let b_ = sigma - a_;
  let tau = (a - a_) + (b - b_);
  (sigma, tau)
}

/// Dekker's FastTwoSum: same contract as [`two_sum`] in three operations instead of six, but
/// only valid for `|a| >= |b|`. The operands are swapped first so that the precondition always
/// holds.
#[inline]
pub fn fast_two_sum<F: Float>(a: F, b: F) -> (F, F) {
  let (a, b) = if a.abs() < b.abs() { (b, a) } else { (a, b) };
  let sigma = a + b;
  let z = sigma - a;
  let tau = b - z;
  (sigma, tau)
}
