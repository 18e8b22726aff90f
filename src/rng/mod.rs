//! Random bits for the perturbations.
//!
//! The generator is xoshiro256++ (Blackman & Vigna), seeded through [`SplitMix64`]. It comes in
//! three shapes sharing one algorithm:
//!
//!   - [`Xoshiro`], the scalar reference, with `jump` (2^128 steps) and `long_jump` (2^192 steps)
//!     and the [`rand_core`] traits;
//!   - [`VectorXoshiro`], `W` jumped copies stepped together, one draw per lane per call;
//!   - [`CachedXoshiro`], a buffered [`VectorXoshiro`] serving one draw at a time.
//!
//! Each thread owns one generator of each width (see [`reseed`]), all derived from the process
//! seed ([`crate::config::process_seed`]) and a thread ordinal: thread `t` starts from the seed
//! long-jumped `t` times, and its engines are carved from there by consecutive jumps. No locks are
//! taken on the hot path.

use crate::float::Float;
use rand_core::{RngCore, SeedableRng};

mod splitmix;
mod xoshiro;
mod lanes;
mod cached;
mod thread;

pub use splitmix::SplitMix64;
pub use xoshiro::Xoshiro;
pub use lanes::{VectorXoshiro, Width, LaneEngine};
pub use cached::CachedXoshiro;
pub use thread::{reseed, thread_ordinal, next_u64, uniform};

/// A uniform value in `[0, 1)` from the top `p` bits of `word`, `p` being the precision of `F`:
/// 53 bits for `f64`, 24 for `f32`. Every such value is exactly representable.
#[inline(always)]
pub fn unit_interval<F: Float>(word: u64) -> F {
  F::from_small_int(word >> F::UNIFORM_SHIFT) * F::UNIFORM_SCALE
}
