//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use chempack_core::pipeline::ProgressReporter;
use chempack_core::writer::ArtifactMeta;
use chempack_shared::{AppConfig, init_config, load_config, load_config_from};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// chempack — spreadsheet reference data into one portable HTML document.
#[derive(Parser)]
#[command(
    name = "chempack",
    version,
    about = "Extract reference datasets from spreadsheets and bundle them into a single HTML document.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Config file path (defaults to ./chempack.toml).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Read the source workbooks and write the JSON dataset files.
    Extract,

    /// Assemble the self-contained HTML document from datasets and web assets.
    Bundle,

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Extract => cmd_extract(cli.config.as_deref()),
        Command::Bundle => cmd_bundle(cli.config.as_deref()),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(cli.config.as_deref()),
        },
    }
}

fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(p) => load_config_from(p)?,
        None => load_config()?,
    };
    Ok(config)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_extract(config_path: Option<&Path>) -> Result<()> {
    let config = resolve_config(config_path)?;

    info!(
        units = %config.sources.units_workbook.display(),
        periodic = %config.sources.periodic_workbook.display(),
        constants = %config.sources.constants_workbook.display(),
        "extracting reference data"
    );

    let reporter = CliProgress::new();
    let report = chempack_core::pipeline::run_extract(&config, &reporter)?;
    reporter.finish();

    let s = &report.summary;
    println!();
    println!("  Datasets extracted successfully!");
    println!("  Units:     {}", s.units.kept);
    println!("  Prefixes:  {}", s.prefixes.kept);
    println!("  Derived:   {}", s.derived.kept);
    println!("  Elements:  {}", s.elements.kept);
    println!("  Constants: {}", s.constants.kept);
    if s.total_skipped() > 0 {
        println!("  Skipped:   {} rows (see warnings above)", s.total_skipped());
    }
    for artifact in &report.artifacts {
        println!("  Wrote:     {}", artifact.path.display());
    }
    println!("  Time:      {:.1}s", report.elapsed.as_secs_f64());
    println!();

    Ok(())
}

fn cmd_bundle(config_path: Option<&Path>) -> Result<()> {
    let config = resolve_config(config_path)?;

    info!(
        shell = %config.web.shell.display(),
        modules = %config.web.modules_dir.display(),
        out = %config.output.bundle.display(),
        "bundling document"
    );

    let reporter = CliProgress::new();
    let report = chempack_core::pipeline::run_bundle(&config, &reporter)?;
    reporter.finish();

    println!();
    println!("  Bundle assembled successfully!");
    println!("  Modules: {}", report.module_count);
    println!(
        "  Size:    {:.1} KiB",
        report.artifact.size_bytes as f64 / 1024.0
    );
    println!("  Path:    {}", report.artifact.path.display());
    println!("  Time:    {:.1}s", report.elapsed.as_secs_f64());
    println!();

    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let config = resolve_config(config_path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn artifact_written(&self, meta: &ArtifactMeta) {
        self.spinner
            .set_message(format!("Wrote {}", meta.path.display()));
    }
}
