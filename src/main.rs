// Thin command-line front end over the library.
// All network logic lives in src/lib.rs and its modules. Try the XOR demo with:
//   cargo run --example xor
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use ferrite_ffn::logging::init_logging;
use ferrite_ffn::{EngineConfig, Network, NetworkSpec};

#[derive(Parser)]
#[command(name = "ferrite-ffn", about = "Evaluate layered feedforward networks")]
struct Cli {
    /// Log level used when RUST_LOG is not set.
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a randomly initialised network from a topology file and save it.
    Init {
        #[arg(long)]
        spec: String,
        #[arg(long)]
        out: String,
        /// Optional engine configuration (init range, parallelism, seed).
        #[arg(long)]
        config: Option<String>,
    },
    /// Run one forward pass and print the output vector.
    Eval {
        #[arg(long)]
        model: String,
        /// Comma-separated input values, e.g. `0,1`.
        #[arg(long, required = true, value_delimiter = ',', allow_hyphen_values = true)]
        input: Vec<f64>,
    },
    /// Print every neuron's weights, layer by layer.
    Inspect {
        #[arg(long)]
        model: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Command::Init { spec, out, config } => {
            let topology = NetworkSpec::load_json(&spec)
                .with_context(|| format!("loading topology from {}", spec))?;
            let config = match config {
                Some(path) => EngineConfig::load_json(&path)
                    .with_context(|| format!("loading engine config from {}", path))?,
                None => EngineConfig::default(),
            };
            let network = Network::from_spec_with_config(&topology, &config)?;
            network.save_json(&out).with_context(|| format!("writing {}", out))?;
            info!(path = %out, topology = ?network.topology(), "model saved");
        }
        Command::Eval { model, input } => {
            let mut network = Network::load_json(&model)
                .with_context(|| format!("loading model from {}", model))?;
            let output = network.forward(&input)?;
            let rendered: Vec<String> = output.iter().map(|v| format!("{:.6}", v)).collect();
            println!("{}", rendered.join(", "));
        }
        Command::Inspect { model } => {
            let network = Network::load_json(&model)
                .with_context(|| format!("loading model from {}", model))?;
            print!("{}", network);
        }
    }

    Ok(())
}
