//! Re-export some internals for benchmarking purposes; available with feature = "bench".
//!
//! The kernels here take their random word as an argument and never trace, so a benchmark can
//! time the arithmetic apart from the generator and the dispatch.

use crate::float::Float;
use crate::eft::FmaStrategy;
use crate::ops::Mode;
use crate::trace::Silent;

pub use crate::eft::{NativeFma, EmulatedFma};

pub fn add<M: Mode, F: Float, X: FmaStrategy>(a: F, b: F, word: u64) -> F {
  M::add::<F, X>(a, b, word, &Silent)
}

pub fn mul<M: Mode, F: Float, X: FmaStrategy>(a: F, b: F, word: u64) -> F {
  M::mul::<F, X>(a, b, word, &Silent)
}

pub fn div<M: Mode, F: Float, X: FmaStrategy>(a: F, b: F, word: u64) -> F {
  M::div::<F, X>(a, b, word, &Silent)
}

pub fn sqrt<M: Mode, F: Float, X: FmaStrategy>(a: F, word: u64) -> F {
  M::sqrt::<F, X>(a, word, &Silent)
}

pub fn fma<M: Mode, F: Float, X: FmaStrategy>(a: F, b: F, c: F, word: u64) -> F {
  M::fma::<F, X>(a, b, c, word, &Silent)
}

// Export these for inspection with `cargo asm`.

#[unsafe(no_mangle)]
pub fn sr_add_f32(a: f32, b: f32, word: u64) -> f32 {
  add::<crate::Sr, f32, NativeFma>(a, b, word)
}

#[unsafe(no_mangle)]
pub fn sr_add_f64(a: f64, b: f64, word: u64) -> f64 {
  add::<crate::Sr, f64, NativeFma>(a, b, word)
}

#[unsafe(no_mangle)]
pub fn ud_add_f64(a: f64, b: f64, word: u64) -> f64 {
  add::<crate::Ud, f64, NativeFma>(a, b, word)
}

//

#[unsafe(no_mangle)]
pub fn sr_mul_f32(a: f32, b: f32, word: u64) -> f32 {
  mul::<crate::Sr, f32, NativeFma>(a, b, word)
}

#[unsafe(no_mangle)]
pub fn sr_mul_f64(a: f64, b: f64, word: u64) -> f64 {
  mul::<crate::Sr, f64, NativeFma>(a, b, word)
}

#[unsafe(no_mangle)]
pub fn sr_mul_f64_emulated(a: f64, b: f64, word: u64) -> f64 {
  mul::<crate::Sr, f64, EmulatedFma>(a, b, word)
}

//

#[unsafe(no_mangle)]
pub fn sr_div_f64(a: f64, b: f64, word: u64) -> f64 {
  div::<crate::Sr, f64, NativeFma>(a, b, word)
}

#[unsafe(no_mangle)]
pub fn sr_sqrt_f64(a: f64, word: u64) -> f64 {
  sqrt::<crate::Sr, f64, NativeFma>(a, word)
}

#[unsafe(no_mangle)]
pub fn sr_fma_f64(a: f64, b: f64, c: f64, word: u64) -> f64 {
  fma::<crate::Sr, f64, NativeFma>(a, b, c, word)
}

#[unsafe(no_mangle)]
pub fn sr_fma_f64_emulated(a: f64, b: f64, c: f64, word: u64) -> f64 {
  fma::<crate::Sr, f64, EmulatedFma>(a, b, c, word)
}
