use super::*;

#[inline(always)]
fn round<F: Float>(op: &'static str, sigma: F, word: u64, tr: &impl Tracer) -> F {
  let result = perturb(sigma, word);
  trace!(tr, op, "{sigma:e} -> {result:e}");
  result
}

#[inline]
pub fn add<F: Float>(a: F, b: F, word: u64, tr: &impl Tracer) -> F {
  round("ud_add", a + b, word, tr)
}

#[inline]
pub fn sub<F: Float>(a: F, b: F, word: u64, tr: &impl Tracer) -> F {
  round("ud_sub", a - b, word, tr)
}

#[inline]
pub fn mul<F: Float>(a: F, b: F, word: u64, tr: &impl Tracer) -> F {
  round("ud_mul", a * b, word, tr)
}

#[inline]
pub fn div<F: Float>(a: F, b: F, word: u64, tr: &impl Tracer) -> F {
  round("ud_div", a / b, word, tr)
}

#[inline]
pub fn sqrt<F: Float>(a: F, word: u64, tr: &impl Tracer) -> F {
  round("ud_sqrt", a.sqrt(), word, tr)
}

#[inline]
pub fn fma<F: Float, X: FmaStrategy>(a: F, b: F, c: F, word: u64, tr: &impl Tracer) -> F {
  round("ud_fma", X::fma(a, b, c), word, tr)
}
