// Entry point for the WebP optimizer command-line tool.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use webp_optimizer::core::RunConfig;
use webp_optimizer::optimize_project;
use webp_optimizer::reporting::{ConsoleReporter, Reporter};
use webp_optimizer::utils::ensure_codecs_available;

/// Converts PNG/JPEG images in a project tree to WebP, in place.
#[derive(Parser, Debug)]
#[command(name = "webp-optimizer")]
#[command(version, about, long_about = None)]
struct Args {
    /// Project root directory
    #[arg(default_value = ".")]
    project_dir: PathBuf,

    /// JSON configuration file (settings and content roots)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// WebP quality (0-100)
    #[arg(short, long)]
    quality: Option<u8>,

    /// Largest width/height in pixels before images are scaled down (1-16383)
    #[arg(long)]
    max_dimension: Option<u32>,

    /// libwebp effort level (0-6)
    #[arg(long)]
    method: Option<u8>,

    /// Subdirectory to process after the root; repeat to list several.
    /// Replaces the configured list.
    #[arg(long = "content-root", value_name = "NAME")]
    content_roots: Vec<String>,

    /// Write the per-directory results as JSON
    #[arg(long, value_name = "FILE")]
    json_report: Option<PathBuf>,
}

impl Args {
    fn run_config(&self) -> anyhow::Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_file(path)?,
            None => RunConfig::default(),
        };

        if let Some(quality) = self.quality {
            config.settings.webp_quality = quality;
        }
        if let Some(max_dimension) = self.max_dimension {
            config.settings.resize_threshold = max_dimension;
        }
        if let Some(method) = self.method {
            config.settings.webp_method = method;
        }
        if !self.content_roots.is_empty() {
            config.content_roots = self.content_roots.clone();
        }

        config.validate().context("invalid settings")?;
        Ok(config)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)       // Remove module path
        .with_thread_ids(false)   // Remove thread IDs
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();
    let mut reporter = ConsoleReporter::stdout();

    if let Err(e) = ensure_codecs_available() {
        reporter.error(&format!("{e}. Rebuild with the image crate's png and jpeg features."));
        return ExitCode::from(1);
    }

    let config = match args.run_config() {
        Ok(config) => config,
        Err(e) => {
            reporter.error(&format!("{e:#}"));
            return ExitCode::from(1);
        }
    };
    debug!("Effective config: {:?}", config);

    match run(&args, &config, &mut reporter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            reporter.error(&format!("{e:#}"));
            ExitCode::from(1)
        }
    }
}

fn run(args: &Args, config: &RunConfig, reporter: &mut dyn Reporter) -> anyhow::Result<()> {
    let report = optimize_project(&args.project_dir, config, reporter)
        .with_context(|| format!("optimizing {}", args.project_dir.display()))?;

    info!(
        "{} images converted, {} skipped",
        report.total_converted(),
        report.total_failed()
    );

    if let Some(path) = &args.json_report {
        report
            .write_json(path)
            .with_context(|| format!("writing report to {}", path.display()))?;
        reporter.info(&format!("JSON report written to {}", path.display()));
    }

    Ok(())
}
