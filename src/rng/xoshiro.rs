use super::*;

/// Jump polynomial: advances the state by 2^128 steps.
pub(crate) const JUMP: [u64; 4] = [
  0x180e_c6d3_3cfd_0aba, 0xd5a6_1266_f0c9_392c, 0xa958_2618_e03f_c9aa, 0x39ab_dc45_29b1_661c,
];

/// Long-jump polynomial: advances the state by 2^192 steps.
pub(crate) const LONG_JUMP: [u64; 4] = [
  0x76e1_5d3e_fefd_cbbf, 0xc500_4e44_1c52_2fb3, 0x7771_0069_854e_e241, 0x3910_9bb0_2acb_e635,
];

/// The scalar xoshiro256 generator with the `++` scrambler: 256 bits of state, period
/// `2^256 - 1`, and jump functions to split it into non-overlapping streams.
///
/// This is also the reference every lane of a [`VectorXoshiro`] is checked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xoshiro {
  s: [u64; 4],
}

impl Xoshiro {
  /// Expand `seed` into a full state with [`SplitMix64`].
  pub fn new(seed: u64) -> Self {
    let mut expander = SplitMix64::new(seed);
    Self { s: core::array::from_fn(|_| expander.next_u64()) }
  }

  /// The generator for thread `ordinal`: the one for `seed`, long-jumped `ordinal` times.
  pub fn for_thread(seed: u64, ordinal: u64) -> Self {
    let mut x = Self::new(seed);
    for _ in 0 .. ordinal {
      x.long_jump()
    }
    x
  }

  /// Build from a raw state, which must not be all zeros.
  pub const fn from_state(s: [u64; 4]) -> Self {
    debug_assert!(s[0] | s[1] | s[2] | s[3] != 0);
    Self { s }
  }

  pub const fn state(&self) -> [u64; 4] {
    self.s
  }

  /// Advance one step and return 64 random bits.
  #[inline]
  pub fn next_raw(&mut self) -> u64 {
    let s = &mut self.s;
    let result = s[0].wrapping_add(s[3]).rotate_left(23).wrapping_add(s[0]);
    let t = s[1] << 17;
    s[2] ^= s[0];
    s[3] ^= s[1];
    s[1] ^= s[2];
    s[0] ^= s[3];
    s[2] ^= t;
    s[3] = s[3].rotate_left(45);
    result
  }

  /// A uniform draw in `[0, 1)` carrying `F::PRECISION` random bits.
  #[inline]
  pub fn uniform<F: Float>(&mut self) -> F {
    unit_interval(self.next_raw())
  }

  /// Advance by 2^128 steps.
  pub fn jump(&mut self) {
    self.jump_by(&JUMP)
  }

  /// Advance by 2^192 steps.
  pub fn long_jump(&mut self) {
    self.jump_by(&LONG_JUMP)
  }

  /// Evaluate the jump polynomial `poly` at the current state: the xor of the states reached at
  /// each set bit of `poly`.
  fn jump_by(&mut self, poly: &[u64; 4]) {
    let mut acc = [0u64; 4];
    for word in poly {
      for bit in 0 .. 64 {
        if word & (1 << bit) != 0 {
          for (a, s) in acc.iter_mut().zip(self.s) {
            *a ^= s
          }
        }
        self.next_raw();
      }
    }
    self.s = acc;
  }
}

impl RngCore for Xoshiro {
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

impl SeedableRng for Xoshiro {
  type Seed = [u8; 32];

  /// Little-endian words. The all-zero seed, a fixed point of the generator, is replaced by the
  /// expansion of `0`.
  fn from_seed(seed: [u8; 32]) -> Self {
    if seed == [0; 32] {
      return Self::new(0)
    }
    let s = core::array::from_fn(|i| {
      let mut word = [0u8; 8];
      word.copy_from_slice(&seed[8 * i .. 8 * i + 8]);
      u64::from_le_bytes(word)
    });
    Self::from_state(s)
  }

  fn seed_from_u64(seed: u64) -> Self {
    Self::new(seed)
  }
}
