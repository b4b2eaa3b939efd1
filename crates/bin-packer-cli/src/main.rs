use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

use bin_packer_core::prelude::*;

mod source;
mod svg;

use source::ItemGenerator;

#[derive(Parser, Debug)]
#[command(
    name = "bin-packer",
    about = "Pack rectangular items into bins",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(short, long, default_value_t = false, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate random items and save them as CSV
    Gen(GenArgs),
    /// Load items from CSV and pack them into bins
    Pack(PackArgs),
}

#[derive(Parser, Debug)]
struct GenArgs {
    /// Output CSV file
    output: PathBuf,
    /// Number of items to generate
    #[arg(short, long, default_value_t = 42)]
    count: usize,
    /// RNG seed for reproducible streams
    #[arg(short, long, default_value_t = 1)]
    seed: u64,
    /// Bin width (caps item widths)
    #[arg(long, default_value_t = 100)]
    bin_width: u32,
    /// Bin height (caps item heights)
    #[arg(long, default_value_t = 100)]
    bin_height: u32,
    /// Minimum item width
    #[arg(long, default_value_t = 5)]
    min_width: u32,
    /// Maximum item width
    #[arg(long, default_value_t = 45)]
    max_width: u32,
    /// Minimum item height
    #[arg(long, default_value_t = 5)]
    min_height: u32,
    /// Maximum item height
    #[arg(long, default_value_t = 45)]
    max_height: u32,
}

#[derive(Parser, Debug)]
struct PackArgs {
    /// Input CSV file (width,height per row)
    input: PathBuf,
    /// Bin width
    #[arg(long, default_value_t = 100)]
    bin_width: u32,
    /// Bin height
    #[arg(long, default_value_t = 100)]
    bin_height: u32,
    /// Algorithm: shelf | skyline | maxrects | guillotine
    #[arg(short, long, default_value = "skyline")]
    algorithm: String,
    /// Heuristic: nf|ff|baf|waf|bwf|wwf|bhf|whf (or full snake_case names)
    #[arg(long, default_value = "first_fit")]
    heuristic: String,
    /// Allow 90 degree rotation
    #[arg(long, default_value_t = false)]
    allow_rotation: bool,
    /// Sort key, e.g. none | area_desc | height_desc | side_diff_asc
    #[arg(long, default_value = "none")]
    sort: String,
    /// YAML config file (overrides the algorithm options above)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write a JSON layout report here
    #[arg(long)]
    json: Option<PathBuf>,
    /// Write one SVG per bin under this directory
    #[arg(long)]
    svg: Option<PathBuf>,
}

/// Optional config file; any present field overrides the corresponding flag.
#[derive(Debug, Deserialize, Default)]
struct YamlConfig {
    algorithm: Option<String>,
    heuristic: Option<String>,
    allow_rotation: Option<bool>,
    sort: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);
    match &cli.command {
        Commands::Gen(args) => run_gen(args),
        Commands::Pack(args) => run_pack(args),
    }
}

fn run_gen(args: &GenArgs) -> anyhow::Result<()> {
    let generator = ItemGenerator {
        bin_width: args.bin_width,
        bin_height: args.bin_height,
        min_width: args.min_width,
        max_width: args.max_width,
        min_height: args.min_height,
        max_height: args.max_height,
    };
    let items = generator.generate(args.count, args.seed);
    generator.save_csv(&args.output, &items)?;
    info!(
        count = items.len(),
        seed = args.seed,
        path = %args.output.display(),
        "items written"
    );
    Ok(())
}

fn run_pack(args: &PackArgs) -> anyhow::Result<()> {
    let cfg = build_config(args)?;
    let generator = ItemGenerator {
        bin_width: cfg.bin_width,
        bin_height: cfg.bin_height,
        min_width: 0,
        max_width: cfg.bin_width,
        min_height: 0,
        max_height: cfg.bin_height,
    };
    let items = generator.load_csv(&args.input)?;
    if items.is_empty() {
        anyhow::bail!("no packable items in {}", args.input.display());
    }
    info!(items = items.len(), ?cfg.algorithm, ?cfg.heuristic, "packing");

    let mut manager = BinManager::new(cfg)?;
    manager.execute(items)?;
    let bins = manager.bins();

    let s = stats(bins);
    println!(
        "bins: {}  items: {}  occupancy: {:.1}%",
        s.bins,
        s.items,
        s.occupancy * 100.0
    );

    if let Some(path) = &args.json {
        fs::write(path, layout_json(bins)?)
            .with_context(|| format!("write report to {}", path.display()))?;
        info!(path = %path.display(), "layout report written");
    }

    if let Some(dir) = &args.svg {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        for (idx, bin) in bins.iter().enumerate() {
            let path = dir.join(format!("bin_{idx}.svg"));
            let mut file =
                fs::File::create(&path).with_context(|| format!("create {}", path.display()))?;
            svg::dump_svg(bin, &mut file)?;
        }
        info!(bins = bins.len(), dir = %dir.display(), "SVG files written");
    }

    Ok(())
}

fn build_config(args: &PackArgs) -> anyhow::Result<PackConfig> {
    let overrides: YamlConfig = match &args.config {
        Some(path) => {
            let file = fs::read_to_string(path)
                .with_context(|| format!("read config from {}", path.display()))?;
            serde_yaml::from_str(&file)?
        }
        None => YamlConfig::default(),
    };

    let algorithm = overrides.algorithm.as_deref().unwrap_or(&args.algorithm);
    let heuristic = overrides.heuristic.as_deref().unwrap_or(&args.heuristic);
    let sort = overrides.sort.as_deref().unwrap_or(&args.sort);

    Ok(PackConfig::builder()
        .with_bin_dimensions(args.bin_width, args.bin_height)
        .algorithm(Algorithm::from_str(algorithm)?)
        .heuristic(Heuristic::from_str(heuristic)?)
        .allow_rotation(overrides.allow_rotation.unwrap_or(args.allow_rotation))
        .sort(SortKey::from_str(sort)?)
        .build())
}

/// Verbosity flags map to a default level filter; `RUST_LOG` still wins when
/// set, so `-v`/`--quiet` only move the baseline.
fn init_tracing(quiet: bool, verbose: u8) {
    let baseline = match (quiet, verbose) {
        (true, _) => LevelFilter::ERROR,
        (false, 0) => LevelFilter::INFO,
        (false, 1) => LevelFilter::DEBUG,
        (false, _) => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(baseline.into())
        .from_env_lossy();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
