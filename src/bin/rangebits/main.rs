//! Rangebits CLI tool for generating, applying and cross-checking run lists.

mod generators;

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use rangebits::{
    CONTAINER_WORDS, Run, SetterKind, UnionConfig, Unroll, cardinality, union_runs,
    union_runs_with,
};
use serde_json::json;
use tracing::{debug, info, warn};

use generators::{RunShape, generate_runs, reference_bitmap};

#[derive(Debug, Parser)]
#[command(name = "rangebits")]
#[command(about = "Run-length encoded ranges to bitmap toolkit", long_about = None)]
#[command(version)]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a seeded run list as JSON
    Generate(GenerateRuns),
    /// Apply a JSON run list to an empty bitmap
    Union(UnionRuns),
    /// Cross-check every driver variant against a bit-by-bit reference
    Verify(VerifyRuns),
}

/// Shape of generated workloads
#[derive(Debug, clap::Args)]
struct ShapeArgs {
    /// Longest run, in values
    #[arg(long, default_value = "71", value_parser = clap::value_parser!(u32).range(1..=65536))]
    max_len: u32,

    /// Gaps between runs are drawn from 0..MAX_GAP
    #[arg(long, default_value = "128", value_parser = clap::value_parser!(u32).range(1..))]
    max_gap: u32,
}

impl From<&ShapeArgs> for RunShape {
    fn from(args: &ShapeArgs) -> Self {
        RunShape {
            max_len: args.max_len,
            max_gap: args.max_gap,
        }
    }
}

#[derive(Debug, Parser)]
struct GenerateRuns {
    /// Number of runs to generate (truncated at the end of the 16-bit domain)
    #[arg(short = 'n', long, default_value = "1024")]
    runs: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value = "42")]
    seed: u64,

    #[command(flatten)]
    shape: ShapeArgs,

    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty print JSON
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, Parser)]
struct UnionRuns {
    /// JSON run list (defaults to stdin)
    input: Option<PathBuf>,

    /// Bitmap size in 64-bit words (at most 2^26, the u32 position space)
    #[arg(short, long, default_value_t = CONTAINER_WORDS, value_parser = parse_words)]
    words: usize,

    /// Range setter; selects the validate-then-apply driver
    #[arg(long, value_enum)]
    setter: Option<SetterArg>,

    /// Runs per loop iteration; selects the validate-then-apply driver
    #[arg(long, value_enum)]
    unroll: Option<UnrollArg>,

    /// Print every set position instead of a summary
    #[arg(long)]
    positions: bool,
}

#[derive(Debug, Parser)]
struct VerifyRuns {
    /// Runs per workload
    #[arg(short = 'n', long, default_value = "1024")]
    runs: usize,

    /// Base seed (workload i uses seed + i)
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Number of workloads to check
    #[arg(short, long, default_value = "16")]
    iterations: u64,

    #[command(flatten)]
    shape: ShapeArgs,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SetterArg {
    /// set_range(value, value + length + 1)
    HalfOpen,
    /// set_range_len(value, length)
    LengthOffset,
}

impl From<SetterArg> for SetterKind {
    fn from(arg: SetterArg) -> Self {
        match arg {
            SetterArg::HalfOpen => SetterKind::HalfOpen,
            SetterArg::LengthOffset => SetterKind::LengthOffset,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum UnrollArg {
    #[value(name = "1")]
    One,
    #[value(name = "2")]
    Two,
    #[value(name = "4")]
    Four,
}

impl From<UnrollArg> for Unroll {
    fn from(arg: UnrollArg) -> Self {
        match arg {
            UnrollArg::One => Unroll::One,
            UnrollArg::Two => Unroll::Two,
            UnrollArg::Four => Unroll::Four,
        }
    }
}

/// Largest useful bitmap: positions are `u32`, so 2^32 bits.
const MAX_WORDS: usize = 1 << 26;

fn parse_words(s: &str) -> Result<usize, String> {
    let words: usize = s
        .trim()
        .parse()
        .map_err(|e| format!("Invalid word count '{}': {}", s, e))?;
    if words > MAX_WORDS {
        return Err(format!(
            "Word count {} exceeds the maximum of {} (2^32 addressable bits)",
            words, MAX_WORDS
        ));
    }
    Ok(words)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Union(args) => run_union(args),
        Command::Verify(args) => run_verify(args),
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_generate(args: GenerateRuns) -> Result<()> {
    let workload = generate_runs(args.runs, RunShape::from(&args.shape), args.seed);
    if workload.truncated {
        warn!(
            requested = args.runs,
            generated = workload.runs.len(),
            "run list truncated at the end of the 16-bit domain"
        );
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&workload.runs)?
    } else {
        serde_json::to_string(&workload.runs)?
    };

    match &args.output {
        Some(path) => {
            fs::write(path, json.as_bytes())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(runs = workload.runs.len(), path = %path.display(), "wrote run list");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

fn read_runs(input: Option<&Path>) -> Result<Vec<Run>> {
    let text = match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read run list from stdin")?;
            text
        }
    };
    serde_json::from_str(&text).context("Failed to parse run list")
}

fn run_union(args: UnionRuns) -> Result<()> {
    let runs = read_runs(args.input.as_deref())?;
    let mut bitmap = vec![0u64; args.words];

    if args.setter.is_none() && args.unroll.is_none() {
        debug!(runs = runs.len(), words = args.words, "checked driver");
        union_runs(&mut bitmap, &runs)?;
    } else {
        let config = UnionConfig {
            setter: args.setter.map(Into::into).unwrap_or_default(),
            unroll: args.unroll.map(Into::into).unwrap_or_default(),
        };
        debug!(runs = runs.len(), words = args.words, ?config, "configured driver");
        union_runs_with(&mut bitmap, &runs, config)?;
    }

    let mut stdout = io::stdout().lock();
    if args.positions {
        let positions: Vec<u64> = (0..bitmap.len() as u64 * 64)
            .filter(|&i| (bitmap[(i / 64) as usize] >> (i % 64)) & 1 == 1)
            .collect();
        serde_json::to_writer(&mut stdout, &positions)?;
    } else {
        let summary = json!({
            "runs": runs.len(),
            "words": bitmap.len(),
            "cardinality": cardinality(&bitmap),
        });
        serde_json::to_writer(&mut stdout, &summary)?;
    }
    stdout.write_all(b"\n")?;
    Ok(())
}

fn run_verify(args: VerifyRuns) -> Result<()> {
    let shape = RunShape::from(&args.shape);
    let mut mismatches = 0usize;

    for i in 0..args.iterations {
        let seed = args.seed.wrapping_add(i);
        let workload = generate_runs(args.runs, shape, seed);
        let expected = reference_bitmap(CONTAINER_WORDS, &workload.runs);

        let mut bitmap = vec![0u64; CONTAINER_WORDS];
        union_runs(&mut bitmap, &workload.runs)?;
        if bitmap != expected {
            warn!(seed, driver = "checked", "bitmap differs from reference");
            mismatches += 1;
        }

        // a second pass must not change anything
        union_runs(&mut bitmap, &workload.runs)?;
        if bitmap != expected {
            warn!(seed, driver = "checked", "second pass changed the bitmap");
            mismatches += 1;
        }

        for config in UnionConfig::ALL {
            bitmap.fill(0);
            union_runs_with(&mut bitmap, &workload.runs, config)?;
            if bitmap != expected {
                warn!(seed, ?config, "bitmap differs from reference");
                mismatches += 1;
            }
        }

        debug!(
            seed,
            runs = workload.runs.len(),
            cardinality = cardinality(&expected),
            "workload verified"
        );
    }

    let drivers = UnionConfig::ALL.len() + 1;
    if mismatches > 0 {
        bail!(
            "{} mismatches across {} workloads x {} drivers",
            mismatches,
            args.iterations,
            drivers
        );
    }

    info!(workloads = args.iterations, drivers, "all drivers agree");
    println!(
        "verified {} workloads x {} drivers: all match",
        args.iterations, drivers
    );
    Ok(())
}
