use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use glance_render::models::RenderConfig;
use glance_render::services::{
    analyze_file, palette_report, BatchService, ConversionReport, QuantizeMode,
};
use spectra_dither::{DitherAlgorithm, PaletteCatalog, PaletteColor};

#[derive(Parser)]
#[command(name = "glance-render")]
#[command(about = "Dither PNG images for six-color Spectra 6 e-paper panels")]
struct Cli {
    /// YAML config file (falls back to $CONFIG_FILE)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Dither PNG files to the panel palette
    Dither {
        /// Input PNG files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Directory for the preview PNGs (and packed buffers)
        #[arg(short, long)]
        out_dir: PathBuf,

        /// Diffusion kernel: "floyd-steinberg" or "atkinson"
        #[arg(short, long)]
        algorithm: Option<DitherAlgorithm>,

        /// Saturation multiplier applied before dithering (e.g. 1.3)
        #[arg(short, long)]
        saturation: Option<f32>,

        /// Skip the saturation pre-pass
        #[arg(long)]
        no_boost: bool,

        /// Scan every row left to right
        #[arg(long)]
        no_serpentine: bool,

        /// Map pixels with the weighted-RGB matcher instead of dithering
        #[arg(long)]
        adaptive: bool,

        /// Also write the device's packed 4-bit buffer (.bin)
        #[arg(long)]
        packed: bool,

        /// Number of images converted at once
        #[arg(short, long)]
        workers: Option<usize>,
    },
    /// Print brightness, saturation and hue statistics of a PNG
    Analyze {
        input: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List the hardware inks
    Palette {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "glance_render=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match cli.command {
        Some(Commands::Dither {
            inputs,
            out_dir,
            algorithm,
            saturation,
            no_boost,
            no_serpentine,
            adaptive,
            packed,
            workers,
        }) => {
            let mut config = RenderConfig::load(cli.config.as_deref());
            if let Some(algorithm) = algorithm {
                config.algorithm = algorithm.as_str().to_string();
            }
            if let Some(saturation) = saturation {
                config.saturation_boost = saturation;
            }
            if no_boost {
                config.boost_enabled = false;
            }
            if no_serpentine {
                config.serpentine = false;
            }
            if workers.is_some() {
                config.workers = workers;
            }
            let mode = if adaptive {
                QuantizeMode::Adaptive
            } else {
                QuantizeMode::Dither
            };
            run_dither_command(&config, inputs, out_dir, mode, packed).await
        }
        Some(Commands::Analyze { input, json }) => run_analyze_command(&input, json).await,
        Some(Commands::Palette { json }) => run_palette_command(json),
        None => {
            run_status_command(cli.config.as_deref());
            Ok(())
        }
    }
}

async fn run_dither_command(
    config: &RenderConfig,
    inputs: Vec<PathBuf>,
    out_dir: PathBuf,
    mode: QuantizeMode,
    packed: bool,
) -> anyhow::Result<()> {
    let options = config
        .dither_options()
        .context("Invalid dither settings")?;
    tokio::fs::create_dir_all(&out_dir)
        .await
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let workers = config.worker_count();
    tracing::info!(
        images = inputs.len(),
        workers,
        algorithm = %options.algorithm,
        saturation_boost = options.saturation_boost,
        "Starting batch"
    );

    let service = Arc::new(
        BatchService::new(options, workers)
            .mode(mode)
            .packed_output(packed),
    );
    let results = service.run(inputs, out_dir).await;

    let mut failed = 0;
    for (input, result) in &results {
        match result {
            Ok(report) => print_conversion(report),
            Err(e) => {
                failed += 1;
                eprintln!("{}: {e}", input.display());
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} images failed", results.len());
    }
    Ok(())
}

fn print_conversion(report: &ConversionReport) {
    let inks: Vec<String> = PaletteColor::ALL
        .iter()
        .zip(report.ink_counts)
        .filter(|(_, n)| *n > 0)
        .map(|(color, n)| format!("{color}={n}"))
        .collect();
    println!(
        "{} -> {} ({}x{}; {})",
        report.input.display(),
        report.preview.display(),
        report.width,
        report.height,
        inks.join(" ")
    );
    if let Some(packed) = &report.packed {
        println!("  packed: {}", packed.display());
    }
}

async fn run_analyze_command(input: &Path, json: bool) -> anyhow::Result<()> {
    let report = analyze_file(input)
        .await
        .with_context(|| format!("Failed to analyze {}", input.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} ({}x{})", input.display(), report.width, report.height);
    println!("  samples:    {}", report.samples);
    println!(
        "  brightness: min {:.1}  max {:.1}  avg {:.1}",
        report.brightness.min, report.brightness.max, report.brightness.avg
    );
    println!(
        "  saturation: min {:.1}%  max {:.1}%  avg {:.1}%",
        report.saturation.min, report.saturation.max, report.saturation.avg
    );
    println!(
        "  hues:       red {}  yellow {}  green {}  blue {}",
        report.red, report.yellow, report.green, report.blue
    );
    Ok(())
}

fn run_palette_command(json: bool) -> anyhow::Result<()> {
    let inks = palette_report(&PaletteCatalog::new());

    if json {
        println!("{}", serde_json::to_string_pretty(&inks)?);
        return Ok(());
    }

    for ink in &inks {
        println!(
            "{:<7} index {}  {}  L*a*b* ({:6.2}, {:7.2}, {:7.2})",
            ink.name, ink.index, ink.hex, ink.lab[0], ink.lab[1], ink.lab[2]
        );
    }
    Ok(())
}

fn run_status_command(config: Option<&Path>) {
    let config = RenderConfig::load(config);

    println!("glance-render {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Configuration:");
    println!("  algorithm:        {}", config.algorithm);
    println!("  saturation_boost: {}", config.saturation_boost);
    println!("  boost_enabled:    {}", config.boost_enabled);
    println!("  serpentine:       {}", config.serpentine);
    println!("  workers:          {}", config.worker_count());
    println!();
    println!("Commands:");
    println!("  glance-render dither <inputs...> --out-dir <dir>");
    println!("  glance-render analyze <input>");
    println!("  glance-render palette");
}
