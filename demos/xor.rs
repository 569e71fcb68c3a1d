use ferrite_ffn::{ActivationFunction, Network};

fn main() -> ferrite_ffn::Result<()> {
    let mut network = Network::new(
        &[2, 1],
        &[ActivationFunction::Step, ActivationFunction::Step],
        2,
    )?;

    // Hidden layer: OR and NAND gates; output layer: AND of the two.
    let hidden = network.layer_mut(0).expect("hidden layer");
    hidden.neuron_mut(0).expect("or gate").set_weights(&[1.0, 1.0, -0.5])?;
    hidden.neuron_mut(1).expect("nand gate").set_weights(&[-1.0, -1.0, 1.5])?;
    network
        .layer_mut(1)
        .expect("output layer")
        .neuron_mut(0)
        .expect("and gate")
        .set_weights(&[1.0, 1.0, -1.5])?;

    print!("{}", network);

    let inputs = vec![
        vec![0.0, 0.0],
        vec![1.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 1.0],
    ];
    for input in &inputs {
        println!("Input: {:?} -> Output: {:.1}", input, network.forward(input)?[0]);
    }

    network.destroy();
    Ok(())
}
