use super::*;

/// `sigma` rounded stochastically against the residual `tau`, using `word` for randomness.
#[inline(always)]
fn round<F: Float>(sigma: F, tau: F, word: u64) -> F {
  let rnd = correction(sigma, tau, unit_interval::<F>(word));
  // Adding a zero correction would turn `-0` into `+0`.
  if rnd == F::ZERO { sigma } else { sigma + rnd }
}

#[inline]
pub fn add<F: Float>(a: F, b: F, word: u64, tr: &impl Tracer) -> F {
  if !is_number(a, b) {
    return a + b
  }
  let (sigma, tau) = two_sum(a, b);
  let result = round(sigma, tau, word);
  trace!(tr, "sr_add", "{a:e} + {b:e} = {sigma:e} + {tau:e} -> {result:e}");
  result
}

#[inline]
pub fn sub<F: Float>(a: F, b: F, word: u64, tr: &impl Tracer) -> F {
  add(a, -b, word, tr)
}

#[inline]
pub fn mul<F: Float, X: FmaStrategy>(a: F, b: F, word: u64, tr: &impl Tracer) -> F {
  if !is_number(a, b) {
    return a * b
  }
  let (sigma, tau) = X::two_product(a, b);
  let result = round(sigma, tau, word);
  trace!(tr, "sr_mul", "{a:e} * {b:e} = {sigma:e} + {tau:e} -> {result:e}");
  result
}

/// The residual of a division, `(a - sigma * b) / b`, is itself rounded, but its sign and
/// magnitude are accurate enough to pick the neighbour with the right probability.
#[inline]
pub fn div<F: Float, X: FmaStrategy>(a: F, b: F, word: u64, tr: &impl Tracer) -> F {
  if !is_number(a, b) {
    return a / b
  }
  let sigma = a / b;
  let tau = X::fma(-sigma, b, a) / b;
  let result = round(sigma, tau, word);
  trace!(tr, "sr_div", "{a:e} / {b:e} = {sigma:e} + {tau:e} -> {result:e}");
  result
}

/// Zero, negative and non-finite inputs get the IEEE754 square root unperturbed.
#[inline]
pub fn sqrt<F: Float, X: FmaStrategy>(a: F, word: u64, tr: &impl Tracer) -> F {
  let sigma = a.sqrt();
  if !(a > F::ZERO) || !a.is_finite() {
    return sigma
  }
  let tau = X::fma(-sigma, sigma, a) / (F::TWO * sigma);
  let result = round(sigma, tau, word);
  trace!(tr, "sr_sqrt", "sqrt({a:e}) = {sigma:e} + {tau:e} -> {result:e}");
  result
}

#[inline]
pub fn fma<F: Float, X: FmaStrategy>(a: F, b: F, c: F, word: u64, tr: &impl Tracer) -> F {
  let r1 = X::fma(a, b, c);
  if !a.is_finite() || !b.is_finite() || !c.is_finite() {
    return r1
  }
  let r2 = fma_residual::<F, X>(a, b, c, r1);
  let result = round(r1, r2, word);
  trace!(tr, "sr_fma", "{a:e} * {b:e} + {c:e} = {r1:e} + {r2:e} -> {result:e}");
  result
}
