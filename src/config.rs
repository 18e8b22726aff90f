//! Process-wide configuration, read from the environment.
//!
//!   - `STOCHASTIC_FLOAT_SEED`: decimal `u64` seed for every thread's generator. When unset the
//!     seed comes from the operating system; when it does not parse, the error is logged and the
//!     seed comes from the operating system as well.
//!   - `STOCHASTIC_FLOAT_DEBUG=1`: record a trace line for every perturbed operation (see
//!     [`crate::trace`]). Results are unaffected.
//!
//! Both are read once, on first use, and cached for the lifetime of the process.

use std::num::ParseIntError;
use std::sync::OnceLock;
use rand_core::{OsRng, RngCore};
use thiserror::Error;
use crate::rng::SplitMix64;

pub const SEED_VAR: &str = "STOCHASTIC_FLOAT_SEED";
pub const DEBUG_VAR: &str = "STOCHASTIC_FLOAT_DEBUG";

/// Errors while setting up the process configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("invalid STOCHASTIC_FLOAT_SEED {value:?}: {source}")]
  InvalidSeed {
    value: String,
    source: ParseIntError,
  },

  #[error("process seed already set to {0}")]
  SeedAlreadySet(u64),

  #[error("no entropy available: {0}")]
  Entropy(#[from] rand_core::Error),
}

/// The settings read from the environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
  /// Fixed process seed, if one was given.
  pub seed: Option<u64>,
  /// Whether per-operation tracing was requested.
  pub debug: bool,
}

impl Config {
  /// Read [`SEED_VAR`] and [`DEBUG_VAR`].
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::parse(var(SEED_VAR).as_deref(), var(DEBUG_VAR).as_deref())
  }

  /// Interpret the raw values of the two variables (`None` if unset). A blank seed counts as
  /// unset; tracing is on only for exactly `1`.
  pub fn parse(seed: Option<&str>, debug: Option<&str>) -> Result<Self, ConfigError> {
    let seed = match seed.map(str::trim) {
      None | Some("") => None,
      Some(value) => Some(value.parse().map_err(|source| ConfigError::InvalidSeed {
        value: value.to_owned(),
        source,
      })?),
    };
    Ok(Self { seed, debug: parse_debug(debug) })
  }
}

fn var(name: &str) -> Option<String> {
  std::env::var(name).ok()
}

fn parse_debug(value: Option<&str>) -> bool {
  value.map(str::trim) == Some("1")
}

static PROCESS_SEED: OnceLock<u64> = OnceLock::new();
static DEBUG: OnceLock<bool> = OnceLock::new();

/// The seed all thread generators derive from, resolved on first call.
pub fn process_seed() -> u64 {
  *PROCESS_SEED.get_or_init(|| {
    match Config::from_env() {
      Ok(Config { seed: Some(seed), .. }) => {
        log::debug!("process seed {seed} from {SEED_VAR}");
        return seed
      },
      Ok(_) => (),
      Err(e) => log::error!("{e}; falling back to a random seed"),
    }
    let seed = entropy_seed().unwrap_or_else(|e| {
      log::warn!("{e}; seeding from the clock");
      clock_seed()
    });
    log::debug!("process seed {seed} from the operating system");
    seed
  })
}

/// Fix the process seed before any thread has drawn a random number.
///
/// Fails with [`ConfigError::SeedAlreadySet`] if a different seed is already in use, either set
/// earlier or resolved by a first draw. Setting the seed already in use is a no-op.
pub fn set_process_seed(seed: u64) -> Result<(), ConfigError> {
  match PROCESS_SEED.set(seed) {
    Ok(()) => {
      log::debug!("process seed {seed} set explicitly");
      Ok(())
    },
    Err(_) => {
      let current = process_seed();
      if current == seed { Ok(()) } else { Err(ConfigError::SeedAlreadySet(current)) }
    },
  }
}

/// Whether [`DEBUG_VAR`] is `1`; read once.
pub fn debug_enabled() -> bool {
  *DEBUG.get_or_init(|| parse_debug(var(DEBUG_VAR).as_deref()))
}

/// 64 bits from the operating system's entropy source.
pub fn entropy_seed() -> Result<u64, ConfigError> {
  let mut bytes = [0u8; 8];
  OsRng.try_fill_bytes(&mut bytes)?;
  Ok(u64::from_le_bytes(bytes))
}

fn clock_seed() -> u64 {
  let nanos = std::time::SystemTime::now()
    .duration_since(std::time::UNIX_EPOCH)
    .map_or(0, |d| d.as_nanos() as u64);
  SplitMix64::new(nanos ^ u64::from(std::process::id())).next_u64()
}
