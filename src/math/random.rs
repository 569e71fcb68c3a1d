use std::sync::{Mutex, OnceLock};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Serialize, Deserialize};

use crate::error::{NetworkError, Result};

/// Process-wide random source. Seeded exactly once: either explicitly via
/// [`seed`] or from OS entropy on first use.
static ENGINE_RNG: OnceLock<Mutex<StdRng>> = OnceLock::new();

/// Seeds the engine RNG. Returns `false` (and ignores `seed`) if the source
/// has already been initialised, whether by an earlier call or by a draw.
pub fn seed(seed: u64) -> bool {
    let mut applied = false;
    ENGINE_RNG.get_or_init(|| {
        applied = true;
        Mutex::new(StdRng::seed_from_u64(seed))
    });
    if !applied {
        tracing::warn!(seed, "engine RNG already initialised; ignoring seed");
    }
    applied
}

fn engine_rng() -> &'static Mutex<StdRng> {
    ENGINE_RNG.get_or_init(|| Mutex::new(StdRng::from_entropy()))
}

/// Uniform weight-initialisation range `[low, high]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightInit {
    pub low: f64,
    pub high: f64,
}

impl WeightInit {
    /// Sigmoid is close to linear inside roughly [-2.5, 2.5], so weights start
    /// there for every activation.
    pub const DEFAULT_LIMIT: f64 = 2.5;

    pub fn symmetric(limit: f64) -> WeightInit {
        WeightInit { low: -limit, high: limit }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.low.is_finite() || !self.high.is_finite() || self.low >= self.high {
            return Err(NetworkError::construction(format!(
                "weight init range [{}, {}] is empty or not finite",
                self.low, self.high
            )));
        }
        // The uniform sampler needs the span itself to be representable.
        if !(self.high - self.low).is_finite() {
            return Err(NetworkError::construction(format!(
                "weight init range [{}, {}] is too wide to sample",
                self.low, self.high
            )));
        }
        Ok(())
    }
}

impl Default for WeightInit {
    fn default() -> Self {
        WeightInit::symmetric(WeightInit::DEFAULT_LIMIT)
    }
}

/// Overwrites every slot of `buf` with a sample from `init`.
pub fn fill_uniform(buf: &mut [f64], init: &WeightInit) -> Result<()> {
    init.validate()?;
    // A poisoned lock still holds a usable generator.
    let mut rng = engine_rng().lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    for slot in buf.iter_mut() {
        *slot = rng.gen_range(init.low..=init.high);
    }
    Ok(())
}
