pub mod neuron;

pub use neuron::{Evaluation, Neuron};
