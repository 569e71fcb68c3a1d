pub mod error;
pub mod math;
pub mod activation;
pub mod neuron;
pub mod layers;
pub mod network;
pub mod config;
pub mod logging;

// Convenience re-exports
pub use error::{NetworkError, Result};
pub use math::random::WeightInit;
pub use activation::activation::ActivationFunction;
pub use neuron::neuron::{Evaluation, Neuron};
pub use layers::dense::Layer;
pub use network::network::Network;
pub use network::spec::{NetworkSpec, LayerSpec};
pub use network::snapshot::NetworkSnapshot;
pub use config::engine_config::EngineConfig;
