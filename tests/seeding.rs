// Kept in its own test binary: the engine RNG is process-wide and must not
// have been drawn from before the seed is applied.
use ferrite_ffn::math::random;
use ferrite_ffn::{ActivationFunction::*, EngineConfig, Network, WeightInit};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn configured_seed_gives_reproducible_weights() {
    let config = EngineConfig {
        weight_init: WeightInit::symmetric(1.0),
        seed: Some(2024),
        ..EngineConfig::default()
    };
    let network = Network::with_config(&[3, 2], &[Sigmoid, Linear], 2, &config).unwrap();

    // Weights are drawn neuron by neuron, layer by layer, from the seeded source.
    let mut expected = StdRng::seed_from_u64(2024);
    for layer in network.layers() {
        for neuron in layer.neurons() {
            for &w in neuron.weights() {
                assert_eq!(w, expected.gen_range(-1.0..=1.0));
            }
        }
    }

    // The source is now initialised; a second seed cannot rewind it.
    assert!(!random::seed(2024));
}
