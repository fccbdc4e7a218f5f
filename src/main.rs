//! yespower CLI
//!
//! A command-line tool for computing and benchmarking yespower digests.
//!
//! # Commands
//!
//! - `hash` - Print the digest of an input
//! - `benchmark` - Run a multi-threaded performance benchmark
//! - `params` - Show the memory layout for a parameter set

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use yespower::algorithm::{mix_steps, DIGEST_SIZE, SBOXES_BYTES};
use yespower::input::{params_from_args, parse_bytes};
use yespower::{benchmark, hash};

#[derive(Parser)]
#[command(name = "yespower")]
#[command(author = "Cyberia")]
#[command(version = "0.1.0")]
#[command(about = "yespower memory-hard hash tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Args, Clone)]
struct CostArgs {
    /// Cost factor N (power of two, at least 2)
    #[arg(short = 'N', long = "n", default_value = "2048")]
    n: u32,

    /// Block factor r (at least 1)
    #[arg(short, long, default_value = "8")]
    r: u32,

    /// Personalization string
    #[arg(short, long)]
    pers: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the digest of an input
    Hash {
        /// Input (UTF-8 text, or hex with --hex)
        input: String,

        /// Treat the input as hex
        #[arg(long)]
        hex: bool,

        #[command(flatten)]
        cost: CostArgs,
    },

    /// Run performance benchmark
    Benchmark {
        /// Number of hashes to compute
        #[arg(short, long, default_value = "100")]
        count: u32,

        /// Number of threads to use (default: number of CPU cores)
        #[arg(short, long)]
        threads: Option<usize>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        cost: CostArgs,
    },

    /// Show the memory layout for a parameter set
    Params {
        #[command(flatten)]
        cost: CostArgs,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let result = match cli.command {
        Commands::Hash { input, hex, cost } => cmd_hash(&input, hex, &cost),
        Commands::Benchmark {
            count,
            threads,
            json,
            cost,
        } => cmd_benchmark(count, threads, json, &cost),
        Commands::Params { cost } => cmd_params(&cost),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn cmd_hash(input: &str, is_hex: bool, cost: &CostArgs) -> anyhow::Result<()> {
    let data = parse_bytes(input, is_hex)?;
    let params = params_from_args(cost.n, cost.r, cost.pers.as_deref());

    let digest = hash(&data, &params)
        .with_context(|| format!("hashing with N={} r={}", cost.n, cost.r))?;
    println!("{}", hex::encode(digest));
    Ok(())
}

fn cmd_benchmark(
    count: u32,
    threads: Option<usize>,
    json: bool,
    cost: &CostArgs,
) -> anyhow::Result<()> {
    let params = params_from_args(cost.n, cost.r, cost.pers.as_deref());
    let threads = threads.unwrap_or_else(num_cpus::get);

    if !json {
        println!(
            "Running benchmark with {} hashes on {} threads...",
            count, threads
        );
    }

    let report = benchmark::run(&params, count, threads).context("benchmark failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("\nResults:");
    println!("  Total hashes: {}", report.hashes);
    println!("  Time elapsed: {:.2}s", report.elapsed_secs);
    println!("  Hashrate: {:.2} H/s", report.hashrate);
    println!("  Digest XOR: {}", report.digest_xor);

    println!("\nAlgorithm parameters:");
    println!("  N: {}", report.n);
    println!("  r: {}", report.r);
    println!("  Personalized: {}", report.personalized);
    println!(
        "  Memory per thread: {} KB",
        report.memory_per_thread / 1024
    );

    Ok(())
}

fn cmd_params(cost: &CostArgs) -> anyhow::Result<()> {
    let params = params_from_args(cost.n, cost.r, cost.pers.as_deref());
    params.validate()?;

    let (rw_steps, tail_steps) = mix_steps(params.n);
    println!("N: {}", params.n);
    println!("r: {}", params.r);
    println!("Block size: {} bytes", params.block_size());
    println!("Scratch: {} KB", params.scratch_size() / 1024);
    println!("S-boxes: {} KB", SBOXES_BYTES / 1024);
    println!(
        "Mix steps: {} read-write + {} tail",
        rw_steps, tail_steps
    );
    println!("Digest: {} bytes", DIGEST_SIZE);
    Ok(())
}
