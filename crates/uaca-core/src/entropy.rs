// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Entropy Sources
// ─────────────────────────────────────────────────────────────────────
//! Pluggable randomness for the update rules.
//!
//! Every randomized delta in the engine draws from an `EntropySource`
//! owned by the simulation context, never from an ambient generator.
//! Tests swap in `FixedEntropy` to pin draws at 0 or 1 and hit clamp
//! and threshold edges exactly.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use uaca_types::EngineConfig;

/// Source of uniform draws in [0, 1].
pub trait EntropySource: Send {
    fn next_unit(&mut self) -> f64;
}

/// ChaCha8-backed source, reproducible for a given seed.
pub struct SeededEntropy {
    rng: ChaCha8Rng,
}

impl SeededEntropy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seed from the operating system.
    pub fn from_os() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Seeded when the config carries a seed, OS-seeded otherwise.
    pub fn from_config(config: &EngineConfig) -> Self {
        match config.seed {
            Some(seed) => Self::new(seed),
            None => Self::from_os(),
        }
    }
}

impl EntropySource for SeededEntropy {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Returns the same value on every draw.
#[derive(Debug, Clone, Copy)]
pub struct FixedEntropy {
    value: f64,
}

impl FixedEntropy {
    pub fn new(value: f64) -> Self {
        Self {
            value: sanitize(value),
        }
    }

    pub fn zero() -> Self {
        Self::new(0.0)
    }

    pub fn max() -> Self {
        Self::new(1.0)
    }
}

impl EntropySource for FixedEntropy {
    fn next_unit(&mut self) -> f64 {
        self.value
    }
}

type DrawFn = Box<dyn FnMut() -> f64 + Send>;

/// Entropy source delegating to a caller-supplied closure.
///
/// Non-finite draws become 0.0 and out-of-range draws are clamped.
pub struct ExternalEntropy {
    draw_fn: DrawFn,
}

impl ExternalEntropy {
    pub fn new(draw_fn: impl FnMut() -> f64 + Send + 'static) -> Self {
        Self {
            draw_fn: Box::new(draw_fn),
        }
    }
}

impl EntropySource for ExternalEntropy {
    fn next_unit(&mut self) -> f64 {
        sanitize((self.draw_fn)())
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        log::warn!("entropy: non-finite draw {value}, using 0.0");
        0.0
    }
}
