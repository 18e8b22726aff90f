use super::*;

/// `W` independent [`Xoshiro`] streams advanced in lock-step.
///
/// The state is stored transposed: `s[j]` holds word `j` of every lane, so that one call to
/// [`VectorXoshiro::next_raw`] is the scalar algorithm applied to four `W`-wide registers, which
/// the compiler turns into plain vector instructions.
///
/// Lane `k` is the base generator jumped `k` times (2^128 steps apart), so no two lanes can
/// overlap within any realistic run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[repr(align(64))]
pub struct VectorXoshiro<const W: usize> {
  s: [[u64; W]; 4],
}

impl<const W: usize> VectorXoshiro<W> {
  /// Lanes for thread `ordinal` of a process seeded with `seed`: lane `k` is
  /// `Xoshiro::for_thread(seed, ordinal)` jumped `k` times.
  pub fn new(seed: u64, ordinal: u64) -> Self {
    Self::from_base(&mut Xoshiro::for_thread(seed, ordinal))
  }

  /// Take `W` consecutive streams from `base`: lane 0 is `base` as it is now, and `base` is
  /// jumped once after each lane, so it is left ready to hand out the next stream.
  pub fn from_base(base: &mut Xoshiro) -> Self {
    const { assert!(W > 0 && W.is_power_of_two(), "lane count must be a power of two") }
    let mut s = [[0; W]; 4];
    for lane in 0 .. W {
      for (word, value) in s.iter_mut().zip(base.state()) {
        word[lane] = value
      }
      base.jump();
    }
    Self { s }
  }

  /// The state of lane `k` as a scalar generator.
  pub fn lane(&self, k: usize) -> Xoshiro {
    Xoshiro::from_state(core::array::from_fn(|j| self.s[j][k]))
  }

  /// Advance every lane one step and return one 64-bit draw per lane.
  #[inline(always)]
  pub fn next_raw(&mut self) -> [u64; W] {
    let [s0, s1, s2, s3] = &mut self.s;
    let mut result = [0; W];
    for i in 0 .. W {
      result[i] = s0[i].wrapping_add(s3[i]).rotate_left(23).wrapping_add(s0[i]);
    }
    for i in 0 .. W {
      let t = s1[i] << 17;
      s2[i] ^= s0[i];
      s3[i] ^= s1[i];
      s1[i] ^= s2[i];
      s0[i] ^= s3[i];
      s2[i] ^= t;
      s3[i] = s3[i].rotate_left(45);
    }
    result
  }

  /// One uniform draw in `[0, 1)` per lane.
  #[inline]
  pub fn uniform<F: Float>(&mut self) -> [F; W] {
    self.next_raw().map(unit_interval)
  }
}

/// Marker for a lane count; used to look up the per-thread engine of that width.
pub struct Width<const W: usize>;

/// The widths a thread keeps a lane engine for: 2, 4, 8 and 16.
///
/// The dispatched slice kernels draw from 2 and 4 lanes; 8 and 16 are there for code that wants
/// wider random words of its own, from the same reproducible per-thread streams:
///
/// ```
/// use stochastic_float::rng::{self, Width, LaneEngine};
///
/// rng::reseed(3, 0);
/// let words: [u64; 8] = Width::<8>::with(|engine| engine.next_raw());
/// let z: [f64; 16] = Width::<16>::with(|engine| engine.uniform());
/// rng::reseed(3, 0);
/// assert_eq!(Width::<8>::with(|engine| engine.next_raw()), words);
/// assert!(z.iter().all(|z| (0.0 .. 1.0).contains(z)));
/// ```
///
/// This is a *sealed* trait.
pub trait LaneEngine<const W: usize>: sealed::Sealed {
  /// Run `f` on this thread's `W`-lane engine.
  fn with<R>(f: impl FnOnce(&mut VectorXoshiro<W>) -> R) -> R;
}

mod sealed {
  pub trait Sealed {}
}

macro_rules! impl_lane_engine {
  ($w:literal, $field:ident) => {
    impl sealed::Sealed for Width<$w> {}

    impl LaneEngine<$w> for Width<$w> {
      #[inline]
      fn with<R>(f: impl FnOnce(&mut VectorXoshiro<$w>) -> R) -> R {
        thread::with(|rng| f(&mut rng.$field))
      }
    }
  }
}

impl_lane_engine!{2, lanes2}
impl_lane_engine!{4, lanes4}
impl_lane_engine!{8, lanes8}
impl_lane_engine!{16, lanes16}
