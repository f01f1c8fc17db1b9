use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cell_grid::EdgePolicy;
use terragrid::models::RunConfig;
use terragrid::services::{GridPipeline, RunReport};

const CONFIG_ENV: &str = "TERRAGRID_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "terragrid.yaml";

#[derive(Parser)]
#[command(name = "terragrid")]
#[command(about = "Dominant-color grids and heatmaps from terrameter images")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample an image into a grid and write tables and heatmap
    Scan {
        /// Input image (PNG, JPEG, BMP, TIFF, ...)
        image: PathBuf,

        /// Number of grid columns (Grid_X)
        #[arg(short, long)]
        columns: Option<u32>,

        /// Number of grid rows (Grid_Z)
        #[arg(short, long)]
        rows: Option<u32>,

        /// Output directory
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Cell boundary rounding: "truncate" or "cover"
        #[arg(long)]
        edge: Option<EdgePolicy>,

        /// Also write a PNG preview
        #[arg(long)]
        preview: bool,

        /// Config file (default: $TERRAGRID_CONFIG)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Rebuild pivot table and heatmap from a long-form CSV
    Pivot {
        /// Long-form table (Grid_X,Grid_Z,RGB_Color,Hex_Color)
        csv: PathBuf,

        /// Output directory
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Also write a PNG preview
        #[arg(long)]
        preview: bool,

        /// Config file (default: $TERRAGRID_CONFIG)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Write a default terragrid.yaml
    Init {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Scan {
            image,
            columns,
            rows,
            out_dir,
            edge,
            preview,
            config,
        }) => {
            init_logging();
            let mut run_config = load_config(config.as_deref())?;
            if let Some(columns) = columns {
                run_config.grid.columns = columns;
            }
            if let Some(rows) = rows {
                run_config.grid.rows = rows;
            }
            if let Some(edge) = edge {
                run_config.grid.edge = edge;
            }
            if let Some(dir) = out_dir {
                run_config.output.dir = dir;
            }
            run_scan_command(run_config, &image, preview)
        }
        Some(Commands::Pivot {
            csv,
            out_dir,
            preview,
            config,
        }) => {
            init_logging();
            let mut run_config = load_config(config.as_deref())?;
            if let Some(dir) = out_dir {
                run_config.output.dir = dir;
            }
            run_pivot_command(run_config, &csv, preview)
        }
        Some(Commands::Init { force }) => run_init_command(force),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "terragrid=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// `--config` wins over the environment; without either the defaults apply
fn load_config(cli_path: Option<&Path>) -> anyhow::Result<RunConfig> {
    let env_path = std::env::var(CONFIG_ENV).ok().map(PathBuf::from);
    let path = cli_path.map(Path::to_path_buf).or(env_path);

    RunConfig::load(path.as_deref())
        .with_context(|| format!("Failed to load configuration from {path:?}"))
}

fn run_scan_command(config: RunConfig, image: &Path, preview: bool) -> anyhow::Result<()> {
    let pipeline = GridPipeline::new(config)
        .context("Invalid configuration")?
        .with_preview(preview);
    let report = pipeline
        .run(image)
        .with_context(|| format!("Failed to process {}", image.display()))?;

    print_report(&report);
    Ok(())
}

fn run_pivot_command(config: RunConfig, csv: &Path, preview: bool) -> anyhow::Result<()> {
    let pipeline = GridPipeline::new(config)
        .context("Invalid configuration")?
        .with_preview(preview);
    let report = pipeline
        .pivot_existing(csv)
        .with_context(|| format!("Failed to pivot {}", csv.display()))?;

    print_report(&report);
    Ok(())
}

fn print_report(report: &RunReport) {
    if let Some((width, height)) = report.image_size {
        println!("Image:  {width}x{height} px");
    }
    let (columns, rows) = report.grid_size;
    println!("Grid:   {columns}x{rows} cells, {} colors", report.distinct_colors);
    if let Some(share) = report.mean_share {
        println!(
            "Share:  {:.1}% mean dominance, {} ambiguous cells",
            share * 100.0,
            report.ambiguous_cells
        );
    }
    println!("Wrote:");
    for path in report.outputs.paths() {
        println!("  + {}", path.display());
    }
}

/// Write the default configuration file
fn run_init_command(force: bool) -> anyhow::Result<()> {
    let path = Path::new(DEFAULT_CONFIG_FILE);
    if path.exists() && !force {
        println!("{DEFAULT_CONFIG_FILE} already exists (use --force to overwrite)");
        return Ok(());
    }

    let yaml = RunConfig::default().to_yaml()?;
    std::fs::write(path, yaml).with_context(|| format!("Failed to write {DEFAULT_CONFIG_FILE}"))?;
    println!("  + {DEFAULT_CONFIG_FILE}");
    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_env = std::env::var(CONFIG_ENV).ok();

    println!("Terragrid v{VERSION}");
    println!("Dominant-color grids from terrameter images\n");

    println!("Environment Variables:");
    println!(
        "  {CONFIG_ENV} = {}",
        config_env.as_deref().unwrap_or("(not set)")
    );

    let (source, config) = match config_env {
        Some(ref path) => match RunConfig::load_from_file(Path::new(path)) {
            Ok(config) => (path.to_string(), config),
            Err(e) => (format!("defaults ({e})"), RunConfig::default()),
        },
        None => ("defaults".to_string(), RunConfig::default()),
    };

    println!("\nConfiguration:");
    println!("  Source:  {source}");
    println!(
        "  Grid:    {}x{} ({})",
        config.grid.columns, config.grid.rows, config.grid.edge
    );
    println!("  Output:  {}", config.output.dir.display());

    println!("\nCommands:");
    println!("  terragrid scan    Sample an image into a color grid");
    println!("  terragrid pivot   Rebuild pivot table and heatmap from a CSV");
    println!("  terragrid init    Write a default {DEFAULT_CONFIG_FILE}");
    println!("\nRun 'terragrid --help' for more details.");
}
