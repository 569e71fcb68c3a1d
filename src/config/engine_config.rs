use serde::{Serialize, Deserialize};

use crate::error::Result;
use crate::math::random::WeightInit;

/// Engine-wide knobs used when building networks.
///
/// Every field has a default, so a JSON file only needs the keys it changes:
///
/// ```json
/// { "weight_init": { "low": -1.0, "high": 1.0 }, "parallel_threshold": 128 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Range new weights are drawn from.
    pub weight_init: WeightInit,
    /// Layers with at least this many neurons are evaluated on the rayon
    /// pool. `usize::MAX` keeps every layer on the calling thread.
    pub parallel_threshold: usize,
    /// Seed for the process-wide RNG. Only honoured if nothing has drawn
    /// from it yet.
    pub seed: Option<u64>,
}

impl EngineConfig {
    pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

    pub fn validate(&self) -> Result<()> {
        self.weight_init.validate()
    }

    pub fn load_json(path: &str) -> Result<EngineConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: EngineConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            weight_init: WeightInit::default(),
            parallel_threshold: EngineConfig::DEFAULT_PARALLEL_THRESHOLD,
            seed: None,
        }
    }
}
