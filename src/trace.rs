//! Per-operation trace records.
//!
//! Every arithmetic kernel takes a `&impl Tracer` and reports its operands, the random word it
//! drew and its result. What happens to that record is up to the tracer: [`Silent`] drops it,
//! [`LogTracer`] always forwards it to the [`log`] facade at `trace` level, and [`EnvTracer`] (what
//! the public entry points use) forwards it only when `STOCHASTIC_FLOAT_DEBUG=1` and the installed
//! logger accepts `trace` records.
//!
//! Records are formatted lazily; a disabled tracer costs one branch.

use core::fmt;

/// Sink for trace records.
pub trait Tracer {
  /// Whether records would go anywhere. Callers skip building them when this is false.
  fn enabled(&self) -> bool;

  /// Record one operation named `op`.
  fn trace(&self, op: &'static str, args: fmt::Arguments);
}

/// Never records.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

/// Forwards every record to `log::trace!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTracer;

/// [`LogTracer`], gated on [`crate::config::debug_enabled`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvTracer;

impl Tracer for Silent {
  #[inline(always)]
  fn enabled(&self) -> bool { false }

  #[inline(always)]
  fn trace(&self, _op: &'static str, _args: fmt::Arguments) {}
}

impl Tracer for LogTracer {
  #[inline]
  fn enabled(&self) -> bool {
    log::log_enabled!(target: "stochastic_float::trace", log::Level::Trace)
  }

  fn trace(&self, op: &'static str, args: fmt::Arguments) {
    log::trace!(target: "stochastic_float::trace", "{op}: {args}")
  }
}

impl Tracer for EnvTracer {
  #[inline]
  fn enabled(&self) -> bool {
    crate::config::debug_enabled() && LogTracer.enabled()
  }

  fn trace(&self, op: &'static str, args: fmt::Arguments) {
    if self.enabled() {
      LogTracer.trace(op, args)
    }
  }
}

/// Record through `$tracer` if it is enabled, formatting only then.
macro_rules! trace {
  ($tracer:expr, $op:expr, $($arg:tt)*) => {
    if $crate::trace::Tracer::enabled($tracer) {
      $crate::trace::Tracer::trace($tracer, $op, format_args!($($arg)*))
    }
  };
}

pub(crate) use trace;
