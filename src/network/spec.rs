use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{NetworkError, Result};

/// Describes one layer in a network specification.
///
/// Fields:
/// - `size`       — number of neurons in this layer
/// - `activation` — activation function shared by every neuron of the layer
///
/// The input width is not stored: it is the previous layer's `size`, or the
/// network's `input_size` for the first layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub size: usize,
    pub activation: ActivationFunction,
}

/// A serializable topology: the external input width plus the ordered list
/// of layers. Weights are not part of it; see
/// [`NetworkSnapshot`](crate::network::snapshot::NetworkSnapshot) for those.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Human-readable name used as the model file stem.
    #[serde(default)]
    pub name: String,
    pub input_size: usize,
    /// Ordered list of layer descriptions (input → output).
    pub layers: Vec<LayerSpec>,
}

impl NetworkSpec {
    /// Pairs `layer_sizes` with `activations`. Fails if their lengths differ
    /// or the topology is otherwise invalid.
    pub fn new(
        name: impl Into<String>,
        layer_sizes: &[usize],
        activations: &[ActivationFunction],
        input_size: usize,
    ) -> Result<NetworkSpec> {
        if layer_sizes.len() != activations.len() {
            return Err(NetworkError::construction(format!(
                "{} layer sizes but {} activations",
                layer_sizes.len(),
                activations.len()
            )));
        }
        let spec = NetworkSpec {
            name: name.into(),
            input_size,
            layers: layer_sizes
                .iter()
                .zip(activations)
                .map(|(&size, &activation)| LayerSpec { size, activation })
                .collect(),
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn validate(&self) -> Result<()> {
        if self.layers.is_empty() {
            return Err(NetworkError::construction("a network needs at least one layer"));
        }
        if self.input_size == 0 {
            return Err(NetworkError::construction("input width must be positive"));
        }
        if let Some(i) = self.layers.iter().position(|l| l.size == 0) {
            return Err(NetworkError::construction(format!("layer {} has no neurons", i)));
        }
        Ok(())
    }

    /// Input width of each layer, in order.
    pub fn input_sizes(&self) -> Vec<usize> {
        std::iter::once(self.input_size)
            .chain(self.layers.iter().map(|l| l.size))
            .take(self.layers.len())
            .collect()
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes and validates a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let spec: NetworkSpec = serde_json::from_reader(reader)?;
        spec.validate()?;
        Ok(spec)
    }
}
