//! dexsheets CLI - sprite mirroring and workbook generation

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dexsheets::config::HostKind;
use dexsheets::{Config, HttpApi, SpriteFetcher};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dexsheets")]
#[command(
    author,
    version,
    about = "Pokémon collection-tracking spreadsheet generator"
)]
struct Cli {
    /// Config file (default: ./dexsheets.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download a sprite for every species that lacks one
    #[command(alias = "fetch")]
    FetchSprites,

    /// Build the checklist and boxes workbook
    Build {
        /// Output workbook (default: from config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Point image formulas at the remote sprite host
        #[arg(long)]
        remote: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    tracing::debug!(?config, "resolved configuration");

    match cli.command {
        Commands::FetchSprites => fetch_sprites(&config),
        Commands::Build { output, remote } => build(config, output, remote),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(Some(path))
            .with_context(|| format!("Failed to load config '{}'", path.display())),
        None => Config::load(None).context("Failed to load dexsheets.toml"),
    }
}

fn fetch_sprites(config: &Config) -> Result<()> {
    let api = HttpApi::new(&config.api_base)
        .with_context(|| format!("Failed to create client for '{}'", config.api_base))?;

    let report = SpriteFetcher::new(api, config)
        .run()
        .context("Sprite fetch failed")?;

    eprintln!(
        "Downloaded {} sprites ({} already present, {} without sprite, {} failed)",
        report.downloaded, report.skipped_existing, report.no_sprite, report.failed
    );
    if report.failed > 0 {
        eprintln!("Failures logged to '{}'", config.failure_log.display());
    }
    Ok(())
}

fn build(mut config: Config, output: Option<PathBuf>, remote: bool) -> Result<()> {
    if let Some(output) = output {
        config.output = output;
    }
    if remote {
        config.sprite_host.kind = HostKind::Remote;
    }

    let report = dexsheets::build(&config)
        .with_context(|| format!("Failed to build '{}'", config.output.display()))?;

    eprintln!(
        "Wrote {} species and {} boxes to '{}'",
        report.species,
        report.boxes.boxes,
        report.output.display()
    );
    if report.missing_sprites > 0 || report.boxes.unlinked > 0 {
        eprintln!(
            "{} species without sprite, {} box slots without a checklist row",
            report.missing_sprites, report.boxes.unlinked
        );
    }
    Ok(())
}
