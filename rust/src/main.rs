use anyhow::{Context, Result};
use clap::Parser;
use pi_estimator::{default_workers, EstimationRequest, EstimationResult, Estimator};
use tracing_subscriber::EnvFilter;

/// Estimate π by Monte Carlo sampling.
#[derive(Parser, Debug)]
#[command(name = "pi-estimate")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Number of samples to draw (1..=100000000)
    #[arg(short = 'n', long, default_value_t = 1_000_000)]
    iterations: u64,

    /// Split the work over a pool of worker threads
    #[arg(short, long)]
    parallel: bool,

    /// Worker threads for the parallel path (defaults to available cores)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Base seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Log level filter (overrides RUST_LOG)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn print_report(result: &EstimationResult) {
    println!("Monte Carlo Pi Estimation");
    println!("Total samples: {}", result.sample_count);
    println!(
        "Mode: {}",
        if result.parallel { "parallel" } else { "sequential" }
    );
    println!("Workers: {}", result.concurrency_degree);
    println!("Pi estimate: {:.6}", result.estimate);
    println!("Error: {:.6} ({:.4}%)", result.absolute_error, result.percentage_error);
    println!("Time: {:.3}ms", result.elapsed_ms());
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let estimator = Estimator::new()
        .with_workers(cli.workers.unwrap_or_else(default_workers))
        .with_seed(cli.seed);

    let request = EstimationRequest::new(cli.iterations, cli.parallel)
        .context("invalid --iterations")?;
    let result = estimator.run(&request).context("estimation failed")?;

    print_report(&result);
    Ok(())
}
