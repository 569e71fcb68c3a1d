use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;

/// Weights of one layer: one row per neuron, bias last in each row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSnapshot {
    pub activation: ActivationFunction,
    pub weights: Vec<Vec<f64>>,
}

/// Topology plus weights of a network, as written by
/// [`Network::save_json`](crate::Network::save_json).
///
/// Retained state and the reserved gradient buffers are not captured; a
/// network rebuilt from a snapshot starts with them zeroed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub input_size: usize,
    pub layers: Vec<LayerSnapshot>,
}
