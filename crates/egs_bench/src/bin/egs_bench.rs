//! Standard vs EGS benchmark runner
//!
//! Usage:
//!   cargo run --release --bin egs-bench -- --qubits 10 --layers 2 --shots 8192
//!   cargo run --release --bin egs-bench -- --config bench.json --format markdown
//!   cargo run --release --bin egs-bench -- --qubits 8 --scaling --format csv

use anyhow::{Context, Result};
use clap::Parser;
use egs_bench::prelude::*;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "egs-bench")]
#[command(version, about = "Compare standard and entropic gate scheduling on a noisy simulator")]
struct Args {
    /// JSON config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Ansatz width
    #[arg(short, long)]
    qubits: Option<usize>,

    /// Ansatz layers
    #[arg(short, long)]
    layers: Option<usize>,

    /// Shots per circuit
    #[arg(short, long)]
    shots: Option<u64>,

    /// Seed for parameters and sampling
    #[arg(long, env = "EGS_SEED")]
    seed: Option<u64>,

    /// Transpiler optimisation level (0-3)
    #[arg(short = 'O', long = "opt-level")]
    opt_level: Option<u8>,

    /// Report format instead of the plain summary
    #[arg(short, long, value_enum)]
    format: Option<ReportFormat>,

    /// Sweep widths from 3 up to --qubits
    #[arg(long)]
    scaling: bool,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Args {
    fn bench_config(&self) -> Result<BenchConfig> {
        let mut config = match &self.config {
            Some(path) => BenchConfig::from_json_file(path)?,
            None => BenchConfig::default(),
        };

        if let Some(qubits) = self.qubits {
            config = config.with_qubits(qubits);
        }
        if let Some(layers) = self.layers {
            config = config.with_layers(layers);
        }
        if let Some(shots) = self.shots {
            config = config.with_shots(shots);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(level) = self.opt_level {
            config = config.with_optimization_level(level);
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.bench_config()?;

    log::info!(
        "{} qubits, {} layers, {} shots, seed {}, level {}",
        config.num_qubits,
        config.layers,
        config.shots,
        config.seed,
        config.optimization_level
    );

    let report = if args.scaling {
        let max_qubits = config.num_qubits;
        let mut suite = BenchSuite::with_config(config);
        suite.run_qubit_scaling(max_qubits)?;

        match args.format {
            Some(format) => Reporter::report(suite.results(), format),
            None => Reporter::scaling_report(suite.results()),
        }
    } else {
        let result = EgsBenchmark::run(&config)?;

        match args.format {
            Some(format) => Reporter::report(std::slice::from_ref(&result), format),
            None => result.summary(),
        }
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &report)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            log::info!("Report written to {}", path.display());
        }
        None => println!("{}", report),
    }

    Ok(())
}
