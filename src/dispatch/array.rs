use super::*;

/// Apply the binary operation `O` element-wise, `out[i] = a[i] ⋅ b[i]`, `W` elements at a time.
///
/// Every group of `W` elements takes one draw from this thread's `W`-lane engine, lane `k` feeding
/// element `k` of the group. The last, partial group takes a full draw too but only touches the
/// elements that exist.
///
/// Panics if the lengths differ.
#[inline(always)]
pub(crate) fn binary<M: Mode, F: Float, X: FmaStrategy, O: BinaryOp, const W: usize>(
  a: &[F],
  b: &[F],
  out: &mut [F],
  tr: &impl Tracer,
) where
  Width<W>: LaneEngine<W>,
{
  assert_eq!(a.len(), b.len(), "{}: operand lengths differ", O::NAME);
  assert_eq!(a.len(), out.len(), "{}: output length differs from operands", O::NAME);
  Width::<W>::with(|engine| {
    let mut out_chunks = out.chunks_exact_mut(W);
    let mut a_chunks = a.chunks_exact(W);
    let mut b_chunks = b.chunks_exact(W);
    for ((out, a), b) in (&mut out_chunks).zip(&mut a_chunks).zip(&mut b_chunks) {
      let words = engine.next_raw();
      for k in 0 .. W {
        out[k] = O::apply::<M, F, X>(a[k], b[k], words[k], tr)
      }
    }
    let out = out_chunks.into_remainder();
    if !out.is_empty() {
      let (a, b) = (a_chunks.remainder(), b_chunks.remainder());
      let words = engine.next_raw();
      for k in 0 .. out.len() {
        out[k] = O::apply::<M, F, X>(a[k], b[k], words[k], tr)
      }
    }
  })
}

/// As [`binary`], for a [`UnaryOp`]: `out[i] = op(a[i])`.
#[inline(always)]
pub(crate) fn unary<M: Mode, F: Float, X: FmaStrategy, O: UnaryOp, const W: usize>(
  a: &[F],
  out: &mut [F],
  tr: &impl Tracer,
) where
  Width<W>: LaneEngine<W>,
{
  assert_eq!(a.len(), out.len(), "{}: output length differs from operand", O::NAME);
  Width::<W>::with(|engine| {
    let mut out_chunks = out.chunks_exact_mut(W);
    let mut a_chunks = a.chunks_exact(W);
    for (out, a) in (&mut out_chunks).zip(&mut a_chunks) {
      let words = engine.next_raw();
      for k in 0 .. W {
        out[k] = O::apply::<M, F, X>(a[k], words[k], tr)
      }
    }
    let out = out_chunks.into_remainder();
    if !out.is_empty() {
      let a = a_chunks.remainder();
      let words = engine.next_raw();
      for k in 0 .. out.len() {
        out[k] = O::apply::<M, F, X>(a[k], words[k], tr)
      }
    }
  })
}

/// As [`binary`], for a [`TernaryOp`]: `out[i] = op(a[i], b[i], c[i])`.
#[inline(always)]
pub(crate) fn ternary<M: Mode, F: Float, X: FmaStrategy, O: TernaryOp, const W: usize>(
  a: &[F],
  b: &[F],
  c: &[F],
  out: &mut [F],
  tr: &impl Tracer,
) where
  Width<W>: LaneEngine<W>,
{
  assert_eq!(a.len(), b.len(), "{}: operand lengths differ", O::NAME);
  assert_eq!(a.len(), c.len(), "{}: operand lengths differ", O::NAME);
  assert_eq!(a.len(), out.len(), "{}: output length differs from operands", O::NAME);
  Width::<W>::with(|engine| {
    let mut out_chunks = out.chunks_exact_mut(W);
    let mut a_chunks = a.chunks_exact(W);
    let mut b_chunks = b.chunks_exact(W);
    let mut c_chunks = c.chunks_exact(W);
    for (((out, a), b), c) in (&mut out_chunks).zip(&mut a_chunks).zip(&mut b_chunks).zip(&mut c_chunks) {
      let words = engine.next_raw();
      for k in 0 .. W {
        out[k] = O::apply::<M, F, X>(a[k], b[k], c[k], words[k], tr)
      }
    }
    let out = out_chunks.into_remainder();
    if !out.is_empty() {
      let (a, b, c) = (a_chunks.remainder(), b_chunks.remainder(), c_chunks.remainder());
      let words = engine.next_raw();
      for k in 0 .. out.len() {
        out[k] = O::apply::<M, F, X>(a[k], b[k], c[k], words[k], tr)
      }
    }
  })
}
