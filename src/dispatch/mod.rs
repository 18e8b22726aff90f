//! Entry points: scalar, slice and fixed-width vector forms of every operation, for every mode
//! and float type.
//!
//! There are two namespaces with the same functions:
//!
//!   - [`fixed`] is resolved at compile time, from the target features the crate is built with
//!     ([`Target::COMPILED`]). Calls are direct and fully inlinable.
//!   - [`runtime`] queries the CPU once ([`Target::detect`]) and goes through a table of function
//!     pointers built for the detected target. One indirect call per operation (or per slice).
//!
//! Both draw from the calling thread's generator ([`crate::rng`]): scalar forms from its scalar
//! stream, slice and vector forms from its lane engine of the target's native width.
//!
//! ```
//! use stochastic_float::{Sr, Ud};
//! use stochastic_float::dispatch::{fixed, runtime};
//! use stochastic_float::vector::f64x4;
//!
//! let x = runtime::add::<Sr, f64>(1.0, 1e-20);
//! assert!(x == 1.0 || x == 1.0 + f64::EPSILON);
//!
//! let a = [1.0f32, 2.0, 3.0];
//! let mut out = [0.0; 3];
//! fixed::mul_slice::<Ud, f32>(&a, &a, &mut out);
//!
//! let v = runtime::sqrt_vector::<Sr, f64, 4>(f64x4::splat(4.0));
//! assert_eq!(v, f64x4::splat(2.0));
//! ```

use std::sync::OnceLock;
use crate::float::Float;
use crate::eft::{FmaStrategy, NativeFma};
use crate::ops::{Mode, Sr, Ud, BinaryOp, UnaryOp, TernaryOp, Add, Sub, Mul, Div, Sqrt, Fma};
use crate::rng::{self, Width, LaneEngine};
use crate::trace::{Tracer, EnvTracer};
use crate::vector::{Vector, SupportedWidth};

/// Generic slice kernels.
mod array;

/// Function pointer tables and the per-target kernels they point to.
mod table;

/// The `*_vector` forms, written once over each namespace's `*_slice` functions.
macro_rules! vector_forms {
  ($bound:path) => {
    /// Element-wise [`add`] over a [`Vector`].
    #[inline]
    pub fn add_vector<M: Mode, F: $bound, const N: usize>(a: Vector<F, N>, b: Vector<F, N>) -> Vector<F, N>
    where Width<N>: SupportedWidth {
      let mut out = Vector::default();
      add_slice::<M, F>(&a.0, &b.0, &mut out.0);
      out
    }

    /// Element-wise [`sub`] over a [`Vector`].
    #[inline]
    pub fn sub_vector<M: Mode, F: $bound, const N: usize>(a: Vector<F, N>, b: Vector<F, N>) -> Vector<F, N>
    where Width<N>: SupportedWidth {
      let mut out = Vector::default();
      sub_slice::<M, F>(&a.0, &b.0, &mut out.0);
      out
    }

    /// Element-wise [`mul`] over a [`Vector`].
    #[inline]
    pub fn mul_vector<M: Mode, F: $bound, const N: usize>(a: Vector<F, N>, b: Vector<F, N>) -> Vector<F, N>
    where Width<N>: SupportedWidth {
      let mut out = Vector::default();
      mul_slice::<M, F>(&a.0, &b.0, &mut out.0);
      out
    }

    /// Element-wise [`div`] over a [`Vector`].
    #[inline]
    pub fn div_vector<M: Mode, F: $bound, const N: usize>(a: Vector<F, N>, b: Vector<F, N>) -> Vector<F, N>
    where Width<N>: SupportedWidth {
      let mut out = Vector::default();
      div_slice::<M, F>(&a.0, &b.0, &mut out.0);
      out
    }

    /// Element-wise [`sqrt`] over a [`Vector`].
    #[inline]
    pub fn sqrt_vector<M: Mode, F: $bound, const N: usize>(a: Vector<F, N>) -> Vector<F, N>
    where Width<N>: SupportedWidth {
      let mut out = Vector::default();
      sqrt_slice::<M, F>(&a.0, &mut out.0);
      out
    }

    /// Element-wise [`fma`] over a [`Vector`].
    #[inline]
    pub fn fma_vector<M: Mode, F: $bound, const N: usize>(a: Vector<F, N>, b: Vector<F, N>, c: Vector<F, N>) -> Vector<F, N>
    where Width<N>: SupportedWidth {
      let mut out = Vector::default();
      fma_slice::<M, F>(&a.0, &b.0, &c.0, &mut out.0);
      out
    }
  }
}

pub mod fixed;
pub mod runtime;

pub use table::Dispatchable;

/// An instruction set the kernels are compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
  /// Any CPU. Two lanes; hardware FMA only if the build enables it.
  Portable,
  /// x86-64 with AVX2 and FMA.
  Avx2,
  /// AArch64 with NEON (always present).
  Neon,
}

/// Fused multiply-add as available to code built with the crate's compile-time target features.
#[cfg(any(target_feature = "fma", target_arch = "aarch64"))]
pub type CompiledFma = NativeFma;

/// Fused multiply-add as available to code built with the crate's compile-time target features.
#[cfg(not(any(target_feature = "fma", target_arch = "aarch64")))]
pub type CompiledFma = crate::eft::EmulatedFma;

impl Target {
  /// The target the crate is compiled for.
  pub const COMPILED: Target =
    if cfg!(all(target_arch = "x86_64", target_feature = "avx2", target_feature = "fma")) {
      Target::Avx2
    } else if cfg!(target_arch = "aarch64") {
      Target::Neon
    } else {
      Target::Portable
    };

  /// The best target the running CPU supports. Queried once per process.
  pub fn detect() -> Target {
    static DETECTED: OnceLock<Target> = OnceLock::new();
    *DETECTED.get_or_init(|| {
      let target = Self::query_cpu();
      log::debug!("dispatch target: {} ({} lanes, {} fma)", target.name(), target.lanes(), target.fma_name());
      target
    })
  }

  #[cfg(target_arch = "x86_64")]
  fn query_cpu() -> Target {
    if is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma") {
      Target::Avx2
    } else {
      Target::Portable
    }
  }

  #[cfg(not(target_arch = "x86_64"))]
  fn query_cpu() -> Target {
    Self::COMPILED
  }

  pub const fn name(self) -> &'static str {
    match self {
      Target::Portable => "portable",
      Target::Avx2 => "avx2",
      Target::Neon => "neon",
    }
  }

  /// Native lane count: how many elements slice kernels process per draw.
  pub const fn lanes(self) -> usize {
    match self {
      Target::Portable => 2,
      Target::Avx2 => 4,
      Target::Neon => 2,
    }
  }

  /// Name of the [`FmaStrategy`] the kernels for this target use.
  pub const fn fma_name(self) -> &'static str {
    match self {
      Target::Portable => CompiledFma::NAME,
      Target::Avx2 | Target::Neon => NativeFma::NAME,
    }
  }
}

impl core::fmt::Display for Target {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(self.name())
  }
}
