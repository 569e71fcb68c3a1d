use std::fmt;

use rayon::prelude::*;

use crate::activation::activation::ActivationFunction;
use crate::config::engine_config::EngineConfig;
use crate::error::{NetworkError, Result};
use crate::math::vector;
use crate::neuron::neuron::Neuron;

/// A row of neurons sharing one input vector and one activation function.
///
/// After every forward pass `last_net()[i]` and `last_output()[i]` equal
/// the retained state of neuron `i`.
#[derive(Debug)]
pub struct Layer {
    neurons: Vec<Neuron>,
    input_size: usize,
    activation: ActivationFunction,
    parallel_threshold: usize,
    last_input: Vec<f64>,
    last_net: Vec<f64>,
    last_output: Vec<f64>,
}

impl Layer {
    pub fn new(size: usize, input_size: usize, activation: ActivationFunction) -> Result<Layer> {
        Layer::with_config(size, input_size, activation, &EngineConfig::default())
    }

    pub fn with_config(
        size: usize,
        input_size: usize,
        activation: ActivationFunction,
        config: &EngineConfig,
    ) -> Result<Layer> {
        let mut neurons = Vec::new();
        neurons
            .try_reserve_exact(size)
            .map_err(|source| NetworkError::Allocation { requested: size, source })?;
        for _ in 0..size {
            neurons.push(Neuron::with_init(input_size, activation, &config.weight_init)?);
        }
        Layer::from_neurons(neurons, config.parallel_threshold)
    }

    /// Assembles a layer from existing neurons, which must all share the same
    /// input width and activation.
    pub fn from_neurons(neurons: Vec<Neuron>, parallel_threshold: usize) -> Result<Layer> {
        let first = neurons
            .first()
            .ok_or_else(|| NetworkError::construction("a layer needs at least one neuron"))?;
        let input_size = first.input_count();
        let activation = first.activation();

        for (i, neuron) in neurons.iter().enumerate() {
            if neuron.input_count() != input_size {
                return Err(NetworkError::construction(format!(
                    "neuron {} takes {} inputs, expected {}",
                    i,
                    neuron.input_count(),
                    input_size
                )));
            }
            if neuron.activation() != activation {
                return Err(NetworkError::construction(format!(
                    "neuron {} uses {:?}, expected {:?}",
                    i,
                    neuron.activation(),
                    activation
                )));
            }
        }

        let size = neurons.len();
        Ok(Layer {
            last_input: vector::zeroed(input_size)?,
            last_net: vector::zeroed(size)?,
            last_output: vector::zeroed(size)?,
            neurons,
            input_size,
            activation,
            parallel_threshold,
        })
    }

    /// Number of neurons, i.e. the width of the output vector.
    pub fn size(&self) -> usize {
        self.neurons.len()
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn activation(&self) -> ActivationFunction {
        self.activation
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    pub fn neuron(&self, index: usize) -> Option<&Neuron> {
        self.neurons.get(index)
    }

    pub fn neuron_mut(&mut self, index: usize) -> Option<&mut Neuron> {
        self.neurons.get_mut(index)
    }

    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    pub fn set_parallel_threshold(&mut self, threshold: usize) {
        self.parallel_threshold = threshold;
    }

    /// Runs every neuron on `input` and returns one output per neuron.
    ///
    /// Layers at least `parallel_threshold` wide are spread over the rayon
    /// pool. Each neuron sums its own inputs sequentially, so both paths
    /// produce identical bits.
    pub fn forward(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        vector::check_width(self.input_size, input.len())?;
        let mut output = vector::zeroed(self.neurons.len())?;
        self.forward_into(input, &mut output)?;
        Ok(output)
    }

    /// Same as [`Layer::forward`] but writes into a caller-provided buffer
    /// of exactly `size()` values. Both widths are checked before any
    /// neuron runs, and nothing here allocates, so once the checks pass the
    /// call cannot fail halfway.
    pub fn forward_into(&mut self, input: &[f64], output: &mut [f64]) -> Result<()> {
        vector::check_width(self.input_size, input.len())?;
        vector::check_width(self.neurons.len(), output.len())?;

        if self.neurons.len() >= self.parallel_threshold {
            self.neurons
                .par_iter_mut()
                .zip(output.par_iter_mut())
                .try_for_each(|(neuron, out)| neuron.forward(input).map(|value| *out = value))?;
        } else {
            for (neuron, out) in self.neurons.iter_mut().zip(output.iter_mut()) {
                *out = neuron.forward(input)?;
            }
        }

        // Mirrors of the neuron state, written from the neurons themselves.
        for (i, neuron) in self.neurons.iter().enumerate() {
            self.last_net[i] = neuron.last_net();
            self.last_output[i] = neuron.last_output();
        }
        self.last_input.copy_from_slice(input);

        tracing::trace!(width = output.len(), "layer forward");
        Ok(())
    }

    pub fn last_input(&self) -> &[f64] {
        &self.last_input
    }

    pub fn last_net(&self) -> &[f64] {
        &self.last_net
    }

    pub fn last_output(&self) -> &[f64] {
        &self.last_output
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, neuron) in self.neurons.iter().enumerate() {
            writeln!(f, "---Neuron[{}]---", i)?;
            write!(f, "{}", neuron)?;
        }
        Ok(())
    }
}
