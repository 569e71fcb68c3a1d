use std::fmt;

use crate::activation::activation::ActivationFunction;
use crate::config::engine_config::EngineConfig;
use crate::error::{NetworkError, Result};
use crate::layers::dense::Layer;
use crate::math::{random, vector};
use crate::network::snapshot::{LayerSnapshot, NetworkSnapshot};
use crate::network::spec::NetworkSpec;
use crate::neuron::neuron::Neuron;

/// An ordered stack of layers; each layer's output feeds the next one.
#[derive(Debug)]
pub struct Network {
    layers: Vec<Layer>,
    input_size: usize,
    last_input: Vec<f64>,
    last_output: Vec<f64>,
}

impl Network {
    /// Builds a randomly initialised network. Layer 0 takes `input_size`
    /// inputs, every later layer takes the previous layer's width.
    pub fn new(
        layer_sizes: &[usize],
        activations: &[ActivationFunction],
        input_size: usize,
    ) -> Result<Network> {
        Network::with_config(layer_sizes, activations, input_size, &EngineConfig::default())
    }

    pub fn with_config(
        layer_sizes: &[usize],
        activations: &[ActivationFunction],
        input_size: usize,
        config: &EngineConfig,
    ) -> Result<Network> {
        let spec = NetworkSpec::new("", layer_sizes, activations, input_size)?;
        Network::from_spec_with_config(&spec, config)
    }

    pub fn from_spec(spec: &NetworkSpec) -> Result<Network> {
        Network::from_spec_with_config(spec, &EngineConfig::default())
    }

    pub fn from_spec_with_config(spec: &NetworkSpec, config: &EngineConfig) -> Result<Network> {
        spec.validate()?;
        config.validate()?;
        if let Some(seed) = config.seed {
            random::seed(seed);
        }

        let layers = spec
            .layers
            .iter()
            .zip(spec.input_sizes())
            .map(|(layer, input_size)| Layer::with_config(layer.size, input_size, layer.activation, config))
            .collect::<Result<Vec<_>>>()?;

        let network = Network::from_layers(layers)?;
        tracing::debug!(
            name = %spec.name,
            input_size = network.input_size,
            topology = ?network.topology(),
            "network constructed"
        );
        Ok(network)
    }

    /// Stacks existing layers. Each layer's input width must equal the
    /// previous layer's size.
    pub fn from_layers(layers: Vec<Layer>) -> Result<Network> {
        let first = layers
            .first()
            .ok_or_else(|| NetworkError::construction("a network needs at least one layer"))?;
        let input_size = first.input_size();

        for (i, pair) in layers.windows(2).enumerate() {
            if pair[1].input_size() != pair[0].size() {
                return Err(NetworkError::construction(format!(
                    "layer {} takes {} inputs but layer {} produces {}",
                    i + 1,
                    pair[1].input_size(),
                    i,
                    pair[0].size()
                )));
            }
        }

        let output_size = layers[layers.len() - 1].size();
        Ok(Network {
            last_input: vector::zeroed(input_size)?,
            last_output: vector::zeroed(output_size)?,
            layers,
            input_size,
        })
    }

    /// Threads `input` through every layer in order and returns the last
    /// layer's output.
    ///
    /// Every buffer the pass needs is reserved before the first layer runs:
    /// two scratch vectors as wide as the widest hidden layer, swapped
    /// between layers, plus the output. An allocation failure therefore
    /// surfaces before any retained state changes.
    pub fn forward(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        vector::check_width(self.input_size, input.len())?;

        let last = self.layers.len() - 1;
        let hidden_width = self.layers[..last].iter().map(Layer::size).max().unwrap_or(0);
        let mut current = vector::zeroed(hidden_width)?;
        let mut next = vector::zeroed(hidden_width)?;
        let mut output = vector::zeroed(self.layers[last].size())?;

        for (i, layer) in self.layers.iter_mut().enumerate() {
            let layer_input: &[f64] = if i == 0 { input } else { &current[..layer.input_size()] };
            if i == last {
                layer.forward_into(layer_input, &mut output)?;
            } else {
                let width = layer.size();
                layer.forward_into(layer_input, &mut next[..width])?;
                std::mem::swap(&mut current, &mut next);
            }
        }

        self.last_input.copy_from_slice(input);
        self.last_output.copy_from_slice(&output);
        tracing::trace!(layers = self.layers.len(), "network forward");
        Ok(output)
    }

    /// Deep copy with the same topology, activations and weights. The copy
    /// shares no buffer with `self` and starts with zeroed retained state.
    pub fn copy(&self) -> Result<Network> {
        let mut copy = Network::from_snapshot(&self.snapshot())?;
        for (dst, src) in copy.layers.iter_mut().zip(&self.layers) {
            dst.set_parallel_threshold(src.parallel_threshold());
        }
        Ok(copy)
    }

    pub fn snapshot(&self) -> NetworkSnapshot {
        NetworkSnapshot {
            input_size: self.input_size,
            layers: self
                .layers
                .iter()
                .map(|layer| LayerSnapshot {
                    activation: layer.activation(),
                    weights: layer.neurons().iter().map(|n| n.weights().to_vec()).collect(),
                })
                .collect(),
        }
    }

    /// Rebuilds a network from saved weights, checking that every row has
    /// exactly one weight per input plus the bias.
    pub fn from_snapshot(snapshot: &NetworkSnapshot) -> Result<Network> {
        if snapshot.input_size == 0 {
            return Err(NetworkError::construction("input width must be positive"));
        }
        let mut input_size = snapshot.input_size;
        let mut layers = Vec::with_capacity(snapshot.layers.len());
        for layer in &snapshot.layers {
            let neurons = layer
                .weights
                .iter()
                .map(|row| {
                    vector::check_width(input_size.saturating_add(1), row.len())?;
                    Neuron::from_weights(vector::copied(row)?, layer.activation)
                })
                .collect::<Result<Vec<_>>>()?;
            let layer = Layer::from_neurons(neurons, EngineConfig::DEFAULT_PARALLEL_THRESHOLD)?;
            input_size = layer.size();
            layers.push(layer);
        }
        Network::from_layers(layers)
    }

    /// Serializes the network weights to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &self.snapshot())?;
        Ok(())
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    pub fn load_json(path: &str) -> Result<Network> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let snapshot: NetworkSnapshot = serde_json::from_reader(reader)?;
        Network::from_snapshot(&snapshot)
    }

    /// Releases the network. Layers, then their neurons, then the neuron
    /// buffers are dropped in order; the value cannot be used afterwards.
    pub fn destroy(self) {
        tracing::debug!(topology = ?self.topology(), "network destroyed");
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn output_size(&self) -> usize {
        self.last_output.len()
    }

    /// Layer widths in order.
    pub fn topology(&self) -> Vec<usize> {
        self.layers.iter().map(Layer::size).collect()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.layers.get_mut(index)
    }

    pub fn set_parallel_threshold(&mut self, threshold: usize) {
        for layer in &mut self.layers {
            layer.set_parallel_threshold(threshold);
        }
    }

    pub fn last_input(&self) -> &[f64] {
        &self.last_input
    }

    pub fn last_output(&self) -> &[f64] {
        &self.last_output
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, layer) in self.layers.iter().enumerate() {
            writeln!(f, "------Layer[{}]------", i)?;
            write!(f, "{}", layer)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ActivationFunction::*;

    #[test]
    fn constructor_chains_input_widths() {
        let net = Network::new(&[5, 5, 3, 2, 1], &[ReLU, Sigmoid, ReLU, Sigmoid, Sigmoid], 6).unwrap();
        let inputs: Vec<usize> = net.layers().iter().map(Layer::input_size).collect();
        assert_eq!(inputs, vec![6, 5, 5, 3, 2]);
        assert_eq!(net.topology(), vec![5, 5, 3, 2, 1]);
        assert_eq!(net.input_size(), 6);
        assert_eq!(net.output_size(), 1);
        assert_eq!(net.last_input(), &[0.0; 6]);
    }

    #[test]
    fn rejects_bad_topologies() {
        assert!(matches!(Network::new(&[], &[], 3), Err(NetworkError::Construction(_))));
        assert!(matches!(Network::new(&[3, 0], &[ReLU, ReLU], 3), Err(NetworkError::Construction(_))));
        assert!(matches!(Network::new(&[3, 1], &[ReLU], 3), Err(NetworkError::Construction(_))));
    }

    #[test]
    fn single_layer_network_returns_its_output() {
        let mut net = Network::new(&[3], &[Linear], 2).unwrap();
        let expected = {
            let layer = net.layer(0).unwrap();
            layer.neurons().iter().map(|n| n.evaluate(&[1.0, -1.0]).unwrap().output).collect::<Vec<_>>()
        };
        assert_eq!(net.forward(&[1.0, -1.0]).unwrap(), expected);
    }

    #[test]
    fn forward_equals_layer_by_layer_application() {
        let mut net = Network::new(&[4, 3, 2], &[Sigmoid, ReLU, Softplus], 3).unwrap();
        let mut reference = net.copy().unwrap();
        let x = [0.2, -0.7, 1.1];

        let out = net.forward(&x).unwrap();
        let mut v = x.to_vec();
        for i in 0..reference.layers().len() {
            v = reference.layer_mut(i).unwrap().forward(&v).unwrap();
        }
        assert_eq!(out, v);
        assert_eq!(net.last_input(), &x);
        assert_eq!(net.last_output(), out.as_slice());
    }

    #[test]
    fn layer_order_matters() {
        let layers = |swap: bool| {
            let double = Layer::from_neurons(vec![Neuron::from_weights(vec![2.0, 0.0], Linear).unwrap()], 64).unwrap();
            let shift = Layer::from_neurons(vec![Neuron::from_weights(vec![1.0, -1.0], ReLU).unwrap()], 64).unwrap();
            if swap { vec![shift, double] } else { vec![double, shift] }
        };
        let mut a = Network::from_layers(layers(false)).unwrap();
        let mut b = Network::from_layers(layers(true)).unwrap();
        // relu(2x - 1) vs 2 * relu(x - 1)
        assert_relative_eq!(a.forward(&[0.75]).unwrap()[0], 0.5);
        assert_relative_eq!(b.forward(&[0.75]).unwrap()[0], 0.0);
    }

    #[test]
    fn from_layers_rejects_broken_chain() {
        let l0 = Layer::new(3, 2, ReLU).unwrap();
        let l1 = Layer::new(1, 4, ReLU).unwrap();
        assert!(matches!(Network::from_layers(vec![l0, l1]), Err(NetworkError::Construction(_))));
        assert!(Network::from_layers(vec![]).is_err());
    }

    #[test]
    fn every_neuron_mirrors_its_layer_after_forward() {
        let mut net = Network::new(&[2, 1], &[Linear, Linear], 2).unwrap();
        net.forward(&[1.0, 2.0]).unwrap();
        for layer in net.layers() {
            for (i, neuron) in layer.neurons().iter().enumerate() {
                assert_eq!(neuron.last_input(), layer.last_input());
                assert_eq!(neuron.last_net(), layer.last_net()[i]);
                assert_eq!(neuron.last_output(), layer.last_output()[i]);
            }
        }
        assert_eq!(net.layer(0).unwrap().last_input(), &[1.0, 2.0]);
        assert_eq!(net.layer(1).unwrap().last_input(), net.layer(0).unwrap().last_output());
    }

    #[test]
    fn scratch_buffers_handle_narrowing_and_widening_layers() {
        let mut net = Network::new(&[2, 7, 3, 5], &[ReLU, Sigmoid, Linear, Softplus], 4).unwrap();
        let mut reference = net.copy().unwrap();
        let x = [0.5, -1.0, 0.25, 2.0];
        let mut v = x.to_vec();
        for i in 0..reference.layers().len() {
            v = reference.layer_mut(i).unwrap().forward(&v).unwrap();
        }
        assert_eq!(net.forward(&x).unwrap(), v);
    }

    #[test]
    fn dimension_mismatch_does_not_touch_state() {
        let mut net = Network::new(&[2, 1], &[Sigmoid, Sigmoid], 4).unwrap();
        let err = net.forward(&[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, NetworkError::DimensionMismatch { expected: 4, actual: 3 }));
        assert_eq!(net.last_input(), &[0.0; 4]);
        assert_eq!(net.layer(0).unwrap().last_input(), &[0.0; 4]);
        assert!(net.layers().iter().flat_map(|l| l.neurons()).all(|n| n.last_net() == 0.0));
    }

    #[test]
    fn copy_is_independent() {
        let mut original = Network::new(&[3, 2], &[Sigmoid, Linear], 2).unwrap();
        let mut copy = original.copy().unwrap();
        let x = [0.5, -0.25];
        let before = original.forward(&x).unwrap();
        assert_eq!(copy.forward(&x).unwrap(), before);

        for w in copy.layer_mut(1).unwrap().neuron_mut(0).unwrap().weights_mut() {
            *w += 1.0;
        }
        assert_ne!(copy.forward(&x).unwrap(), before);
        assert_eq!(original.forward(&x).unwrap(), before);
    }

    #[test]
    fn from_snapshot_checks_row_widths() {
        let net = Network::new(&[2, 1], &[Step, Step], 2).unwrap();
        let mut snapshot = net.snapshot();
        snapshot.layers[1].weights[0].push(0.0);
        assert!(matches!(
            Network::from_snapshot(&snapshot),
            Err(NetworkError::DimensionMismatch { expected: 3, actual: 4 })
        ));
    }

    #[test]
    fn display_lists_layers_in_order() {
        let net = Network::new(&[2, 1], &[Step, Step], 2).unwrap();
        let dump = net.to_string();
        let l0 = dump.find("------Layer[0]------").unwrap();
        let l1 = dump.find("------Layer[1]------").unwrap();
        assert!(l0 < l1);
        assert_eq!(dump.matches("Beta = ").count(), 3);
    }
}
