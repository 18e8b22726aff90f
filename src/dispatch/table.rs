use super::*;

/// The kernels of one mode and float type, compiled for one [`Target`].
///
/// All entries are `unsafe` because the target-specific ones may only run on a CPU with the
/// target's features; a table is only ever built for [`Target::detect`].
pub struct KernelTable<F> {
  pub target: Target,
  pub add: unsafe fn(F, F) -> F,
  pub sub: unsafe fn(F, F) -> F,
  pub mul: unsafe fn(F, F) -> F,
  pub div: unsafe fn(F, F) -> F,
  pub sqrt: unsafe fn(F) -> F,
  pub fma: unsafe fn(F, F, F) -> F,
  pub add_slice: unsafe fn(&[F], &[F], &mut [F]),
  pub sub_slice: unsafe fn(&[F], &[F], &mut [F]),
  pub mul_slice: unsafe fn(&[F], &[F], &mut [F]),
  pub div_slice: unsafe fn(&[F], &[F], &mut [F]),
  pub sqrt_slice: unsafe fn(&[F], &mut [F]),
  pub fma_slice: unsafe fn(&[F], &[F], &[F], &mut [F]),
}

impl<F: Float> KernelTable<F> {
  fn build<M: Mode>(target: Target) -> Self {
    match target {
      #[cfg(target_arch = "x86_64")]
      Target::Avx2 => avx2::table::<M, F>(),
      #[cfg(target_arch = "aarch64")]
      Target::Neon => neon::table::<M, F>(),
      _ => portable::table::<M, F>(),
    }
  }
}

/// Float types with runtime dispatch tables: `f32` and `f64`.
///
/// This is a *sealed* trait.
pub trait Dispatchable: Float + sealed::Tables {}

pub(crate) mod sealed {
  /// The tables for `Sr` and `Ud`, in [`crate::ops::Mode::INDEX`] order, built on first use.
  pub trait Tables: Sized + 'static {
    fn tables() -> &'static [super::KernelTable<Self>; 2];
  }
}

macro_rules! impl_dispatchable {
  ($float:ty) => {
    impl Dispatchable for $float {}

    impl sealed::Tables for $float {
      fn tables() -> &'static [KernelTable<$float>; 2] {
        static TABLES: OnceLock<[KernelTable<$float>; 2]> = OnceLock::new();
        TABLES.get_or_init(|| {
          let target = Target::detect();
          log::debug!("building {} kernel tables for {target}", stringify!($float));
          [KernelTable::build::<Sr>(target), KernelTable::build::<Ud>(target)]
        })
      }
    }
  }
}

impl_dispatchable!{f32}
impl_dispatchable!{f64}

/// The table for mode `M` and float `F`.
#[inline]
pub(crate) fn get<M: Mode, F: Dispatchable>() -> &'static KernelTable<F> {
  &<F as sealed::Tables>::tables()[M::INDEX]
}

/// Defines a module of kernels for one target: every operation in scalar and slice form, for `W`
/// lanes and the FMA strategy `X`, each carrying the target's `#[target_feature]` attributes, and
/// a `table` function collecting them.
macro_rules! target_kernels {
  ($module:ident, $target:expr, $lanes:literal, $fma:ty $(, #[$attr:meta])*) => {
    mod $module {
      use super::*;

      $(#[$attr])*
      unsafe fn add<M: Mode, F: Float>(a: F, b: F) -> F { M::add::<F, $fma>(a, b, rng::next_u64(), &EnvTracer) }
      $(#[$attr])*
      unsafe fn sub<M: Mode, F: Float>(a: F, b: F) -> F { M::sub::<F, $fma>(a, b, rng::next_u64(), &EnvTracer) }
      $(#[$attr])*
      unsafe fn mul<M: Mode, F: Float>(a: F, b: F) -> F { M::mul::<F, $fma>(a, b, rng::next_u64(), &EnvTracer) }
      $(#[$attr])*
      unsafe fn div<M: Mode, F: Float>(a: F, b: F) -> F { M::div::<F, $fma>(a, b, rng::next_u64(), &EnvTracer) }
      $(#[$attr])*
      unsafe fn sqrt<M: Mode, F: Float>(a: F) -> F { M::sqrt::<F, $fma>(a, rng::next_u64(), &EnvTracer) }
      $(#[$attr])*
      unsafe fn fma<M: Mode, F: Float>(a: F, b: F, c: F) -> F { M::fma::<F, $fma>(a, b, c, rng::next_u64(), &EnvTracer) }

      $(#[$attr])*
      unsafe fn add_slice<M: Mode, F: Float>(a: &[F], b: &[F], out: &mut [F]) {
        array::binary::<M, F, $fma, Add, $lanes>(a, b, out, &EnvTracer)
      }
      $(#[$attr])*
      unsafe fn sub_slice<M: Mode, F: Float>(a: &[F], b: &[F], out: &mut [F]) {
        array::binary::<M, F, $fma, Sub, $lanes>(a, b, out, &EnvTracer)
      }
      $(#[$attr])*
      unsafe fn mul_slice<M: Mode, F: Float>(a: &[F], b: &[F], out: &mut [F]) {
        array::binary::<M, F, $fma, Mul, $lanes>(a, b, out, &EnvTracer)
      }
      $(#[$attr])*
      unsafe fn div_slice<M: Mode, F: Float>(a: &[F], b: &[F], out: &mut [F]) {
        array::binary::<M, F, $fma, Div, $lanes>(a, b, out, &EnvTracer)
      }
      $(#[$attr])*
      unsafe fn sqrt_slice<M: Mode, F: Float>(a: &[F], out: &mut [F]) {
        array::unary::<M, F, $fma, Sqrt, $lanes>(a, out, &EnvTracer)
      }
      $(#[$attr])*
      unsafe fn fma_slice<M: Mode, F: Float>(a: &[F], b: &[F], c: &[F], out: &mut [F]) {
        array::ternary::<M, F, $fma, Fma, $lanes>(a, b, c, out, &EnvTracer)
      }

      pub(super) fn table<M: Mode, F: Float>() -> KernelTable<F> {
        KernelTable {
          target: $target,
          add: add::<M, F>,
          sub: sub::<M, F>,
          mul: mul::<M, F>,
          div: div::<M, F>,
          sqrt: sqrt::<M, F>,
          fma: fma::<M, F>,
          add_slice: add_slice::<M, F>,
          sub_slice: sub_slice::<M, F>,
          mul_slice: mul_slice::<M, F>,
          div_slice: div_slice::<M, F>,
          sqrt_slice: sqrt_slice::<M, F>,
          fma_slice: fma_slice::<M, F>,
        }
      }
    }
  }
}

target_kernels!{portable, Target::Portable, 2, CompiledFma}

#[cfg(target_arch = "x86_64")]
target_kernels!{avx2, Target::Avx2, 4, NativeFma, #[target_feature(enable = "avx2,fma")]}

#[cfg(target_arch = "aarch64")]
target_kernels!{neon, Target::Neon, 2, NativeFma, #[target_feature(enable = "neon")]}
