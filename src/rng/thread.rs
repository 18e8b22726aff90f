use super::*;
use core::cell::RefCell;
use std::sync::atomic::{AtomicU64, Ordering};

/// Everything one OS thread draws random bits from.
///
/// All five engines are carved out of one base generator, `Xoshiro::for_thread(seed, ordinal)`,
/// by consecutive jumps, always in field order, so their streams never meet.
///
/// The slice kernels only draw from the widths a [`Target`](crate::Target) uses (2 and 4 lanes).
/// The 8- and 16-lane engines serve callers of [`LaneEngine`] that vectorize their own code
/// wider; they are carved even if never drawn from, so every width's stream is the same
/// whichever widths a thread happens to use.
#[derive(Debug, Clone)]
pub(crate) struct ThreadRng {
  pub(crate) ordinal: u64,
  pub(crate) scalar: CachedXoshiro<1024, 4>,
  pub(crate) lanes2: VectorXoshiro<2>,
  pub(crate) lanes4: VectorXoshiro<4>,
  pub(crate) lanes8: VectorXoshiro<8>,
  pub(crate) lanes16: VectorXoshiro<16>,
}

impl ThreadRng {
  pub(crate) fn new(seed: u64, ordinal: u64) -> Self {
    let mut base = Xoshiro::for_thread(seed, ordinal);
    Self {
      ordinal,
      scalar: CachedXoshiro::from_base(&mut base),
      lanes2: VectorXoshiro::from_base(&mut base),
      lanes4: VectorXoshiro::from_base(&mut base),
      lanes8: VectorXoshiro::from_base(&mut base),
      lanes16: VectorXoshiro::from_base(&mut base),
    }
  }
}

/// Hands out thread ordinals in creation order.
static NEXT_ORDINAL: AtomicU64 = AtomicU64::new(0);

thread_local! {
  static RNG: RefCell<ThreadRng> = RefCell::new({
    let seed = crate::config::process_seed();
    let ordinal = NEXT_ORDINAL.fetch_add(1, Ordering::Relaxed);
    log::debug!("thread {ordinal} generator created from seed {seed}");
    ThreadRng::new(seed, ordinal)
  });
}

/// Run `f` on this thread's generator, creating it on first use. `f` must not reenter.
#[inline]
pub(crate) fn with<R>(f: impl FnOnce(&mut ThreadRng) -> R) -> R {
  RNG.with(|rng| f(&mut rng.borrow_mut()))
}

/// Replace this thread's generator with the one for `seed` and `ordinal`.
///
/// After `reseed(s, t)` the thread draws exactly the sequence thread `t` of a process seeded
/// with `s` would. The ordinal counter is not touched.
pub fn reseed(seed: u64, ordinal: u64) {
  log::debug!("thread generator reseeded: seed {seed}, ordinal {ordinal}");
  with(|rng| *rng = ThreadRng::new(seed, ordinal))
}

/// Ordinal of this thread's generator.
pub fn thread_ordinal() -> u64 {
  with(|rng| rng.ordinal)
}

/// The next 64 random bits from this thread's scalar stream.
#[inline]
pub fn next_u64() -> u64 {
  with(|rng| rng.scalar.next_raw())
}

/// A uniform draw in `[0, 1)` from this thread's scalar stream.
#[inline]
pub fn uniform<F: Float>() -> F {
  unit_interval(next_u64())
}
