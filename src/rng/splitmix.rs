/// Vigna's SplitMix64: a tiny generator used only to expand a 64-bit seed into the 256-bit
/// state of a [`super::Xoshiro`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitMix64 {
  state: u64,
}

impl SplitMix64 {
  const GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

  pub const fn new(seed: u64) -> Self {
    Self { state: seed }
  }

  #[inline]
  pub fn next_u64(&mut self) -> u64 {
    self.state = self.state.wrapping_add(Self::GAMMA);
    let z = self.state;
    let z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    let z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
  }
}
