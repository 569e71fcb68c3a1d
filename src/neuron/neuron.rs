use std::fmt;

use crate::activation::activation::ActivationFunction;
use crate::error::{NetworkError, Result};
use crate::math::random::{self, WeightInit};
use crate::math::vector;

/// Net value and activated output produced by one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub net: f64,
    pub output: f64,
}

/// A single unit: weighted sum of its inputs plus a bias, passed through an
/// activation function.
///
/// `weights` holds one coefficient per input followed by the bias, so its
/// length is always `input_count() + 1`. No method can change that length.
#[derive(Debug)]
pub struct Neuron {
    weights: Vec<f64>,
    activation: ActivationFunction,
    last_input: Vec<f64>,
    last_net: f64,
    last_output: f64,
    // Reserved for a training component; allocated and zeroed, never written here.
    last_gradient: Vec<f64>,
    gradient_propagation: Vec<f64>,
}

impl Neuron {
    /// Builds a neuron with `input_count` inputs and weights drawn from the
    /// default range.
    pub fn new(input_count: usize, activation: ActivationFunction) -> Result<Neuron> {
        Neuron::with_init(input_count, activation, &WeightInit::default())
    }

    pub fn with_init(
        input_count: usize,
        activation: ActivationFunction,
        init: &WeightInit,
    ) -> Result<Neuron> {
        let len = input_count
            .checked_add(1)
            .ok_or_else(|| NetworkError::construction("neuron input count overflows"))?;
        let mut weights = vector::zeroed(len)?;
        random::fill_uniform(&mut weights, init)?;
        Neuron::from_weights(weights, activation)
    }

    /// Builds a neuron around explicit weights; the last value is the bias.
    pub fn from_weights(weights: Vec<f64>, activation: ActivationFunction) -> Result<Neuron> {
        if weights.is_empty() {
            return Err(NetworkError::construction("a neuron needs at least its bias weight"));
        }
        let len = weights.len();
        Ok(Neuron {
            last_input: vector::zeroed(len - 1)?,
            last_net: 0.0,
            last_output: 0.0,
            last_gradient: vector::zeroed(len)?,
            gradient_propagation: vector::zeroed(len)?,
            weights,
            activation,
        })
    }

    pub fn input_count(&self) -> usize {
        self.weights.len() - 1
    }

    pub fn activation(&self) -> ActivationFunction {
        self.activation
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Mutable view of the weights. The slice cannot grow or shrink.
    pub fn weights_mut(&mut self) -> &mut [f64] {
        &mut self.weights
    }

    pub fn bias(&self) -> f64 {
        self.weights[self.weights.len() - 1]
    }

    /// Replaces every weight (bias last). `weights` must match the current length.
    pub fn set_weights(&mut self, weights: &[f64]) -> Result<()> {
        vector::check_width(self.weights.len(), weights.len())?;
        self.weights.copy_from_slice(weights);
        Ok(())
    }

    /// Computes net and output for `input` without touching retained state.
    pub fn evaluate(&self, input: &[f64]) -> Result<Evaluation> {
        vector::check_width(self.input_count(), input.len())?;
        let net = vector::net_input(&self.weights, input);
        Ok(Evaluation { net, output: self.activation.evaluate(net, false) })
    }

    /// Evaluates `input` and records it, its net and its output as this
    /// neuron's retained state.
    pub fn forward(&mut self, input: &[f64]) -> Result<f64> {
        let Evaluation { net, output } = self.evaluate(input)?;
        self.last_input.copy_from_slice(input);
        self.last_net = net;
        self.last_output = output;
        Ok(output)
    }

    /// Input of the last [`Neuron::forward`] call, including calls made by
    /// the owning [`Layer`](crate::Layer).
    pub fn last_input(&self) -> &[f64] {
        &self.last_input
    }

    pub fn last_net(&self) -> f64 {
        self.last_net
    }

    pub fn last_output(&self) -> f64 {
        self.last_output
    }

    pub fn last_gradient(&self) -> &[f64] {
        &self.last_gradient
    }

    pub fn gradient_propagation(&self) -> &[f64] {
        &self.gradient_propagation
    }
}

impl fmt::Display for Neuron {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (coefficients, _) = self.weights.split_at(self.input_count());
        for (i, w) in coefficients.iter().enumerate() {
            writeln!(f, "Weight[{}] = {:.6}", i, w)?;
        }
        writeln!(f, "Beta = {:.6}", self.bias())
    }
}
