use super::*;

/// Correctly rounded `a * b + c` without a hardware FMA, after Graillat-Muller's EmulFMA.
///
/// The exact product from [`dekker_product`] is added to `c` with error-free transformations,
/// leaving `a * b + c == zh + w + t` exactly, with `w` the rounded tail and `t` its residual.
/// `RN(zh + w)` is the answer unless `zh + w` is exactly halfway between two floats (which needs
/// `w` to be a power of two), in which case the sign of `t` says which side the exact value lies
/// on, and a zero `t` is a genuine tie.
///
/// Correct when no underflow or overflow occurs in the intermediate steps.
#[inline]
pub fn emulated_fma<F: Float>(a: F, b: F, c: F) -> F {
  let (pi_high, pi_low) = dekker_product(a, b);
  let (s_high, s_low) = two_sum(pi_high, c);
  let (v_high, v_low) = two_sum(pi_low, s_low);
  let (z_high, z_low) = fast_two_sum(s_high, v_high);
  let (w, t) = two_sum(z_low, v_low);

  // `(2^(p-1) + 1) * w` is exact iff `w` is zero or a power of two.
  let l = (F::HALF_RADIX + F::ONE) * w;
  let r = F::HALF_RADIX * w;
  let nearest = z_high + w;
  if l - r != w {
    return nearest
  }
  // `zh + w` representable: the residual `t` is far too small to move it.
  if nearest - z_high == w {
    return nearest
  }
  // Below the midpoint even when pushed by another half of `w`.
  let beyond = z_high + F::THREE_HALVES * w;
  if beyond == z_high {
    return z_high
  }
  // `zh + w` is a midpoint.
  if t == F::ZERO {
    nearest
  } else if t.is_sign_negative() != w.is_sign_negative() {
    z_high
  } else {
    beyond
  }
}

/// Boldo-Muller's ErrFmaNearest: given `r1 = RN(a * b + c)`, the correction `r2` with
/// `r1 + r2 ≈ a * b + c` to within a fraction of `ulp(r2)`.
///
/// The exact product is obtained through `X` ([`two_product_fma`] or [`dekker_product`]).
#[inline]
pub fn fma_residual<F: Float, X: FmaStrategy>(a: F, b: F, c: F, r1: F) -> F {
  let (u1, u2) = X::two_product(a, b);
  let (alpha1, alpha2) = two_sum(c, u2);
  let (beta1, beta2) = two_sum(u1, alpha1);
  let gamma = (beta1 - r1) + beta2;
  gamma + alpha2
}
