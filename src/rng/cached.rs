use super::*;

/// A scalar generator backed by a [`VectorXoshiro`]: draws are produced `W` at a time into a
/// buffer of `SIZE` words and handed out one by one, refilling once the buffer runs out.
///
/// Word `W * i + k` of a refill is draw `i` of lane `k`. `SIZE` must be a power of two and a
/// multiple of `W`.
#[derive(Debug, Clone)]
pub struct CachedXoshiro<const SIZE: usize, const W: usize> {
  engine: VectorXoshiro<W>,
  buffer: [u64; SIZE],
  index: usize,
}

impl<const SIZE: usize, const W: usize> CachedXoshiro<SIZE, W> {
  pub fn new(seed: u64, ordinal: u64) -> Self {
    Self::from_engine(VectorXoshiro::new(seed, ordinal))
  }

  /// Take `W` streams from `base`, as [`VectorXoshiro::from_base`].
  pub fn from_base(base: &mut Xoshiro) -> Self {
    Self::from_engine(VectorXoshiro::from_base(base))
  }

  /// Wrap `engine`; the buffer starts out full.
  pub fn from_engine(engine: VectorXoshiro<W>) -> Self {
    const { assert!(SIZE.is_power_of_two() && SIZE % W == 0, "buffer must be a power of two holding whole vectors") }
    let mut cached = Self { engine, buffer: [0; SIZE], index: 0 };
    cached.refill();
    cached
  }

  fn refill(&mut self) {
    for chunk in self.buffer.chunks_exact_mut(W) {
      chunk.copy_from_slice(&self.engine.next_raw())
    }
    self.index = 0;
  }

  /// The next 64 random bits.
  #[inline]
  pub fn next_raw(&mut self) -> u64 {
    if self.index == SIZE {
      self.refill()
    }
    let word = self.buffer[self.index];
    self.index += 1;
    word
  }

  /// A uniform draw in `[0, 1)`.
  #[inline]
  pub fn uniform<F: Float>(&mut self) -> F {
    unit_interval(self.next_raw())
  }
}

impl<const SIZE: usize, const W: usize> RngCore for CachedXoshiro<SIZE, W> {
  #[inline]
  fn next_u32(&mut self) -> u32 {
    (self.next_raw() >> 32) as u32
  }

  #[inline]
  fn next_u64(&mut self) -> u64 {
    self.next_raw()
  }

  fn fill_bytes(&mut self, dest: &mut [u8]) {
    rand_core::impls::fill_bytes_via_next(self, dest)
  }

  fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
    self.fill_bytes(dest);
    Ok(())
  }
}
