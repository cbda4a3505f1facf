//! a11y-sweep main entry point
//!
//! This is the command-line interface for the sitemap accessibility auditor.

use a11y_sweep::audit::Pa11yEngine;
use a11y_sweep::config::{discover_config, load_config, resolve_output_dir, Config};
use a11y_sweep::sitemap::SitemapClient;
use a11y_sweep::{run_all, ReportType, RunSettings, SiteOutcome};
use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// a11y-sweep: sitemap-driven accessibility audits
///
/// a11y-sweep reads the sitemaps listed in its configuration, audits every
/// page with pa11y, and reports each page's issues plus a deduplicated
/// summary per site.
#[derive(Parser, Debug)]
#[command(name = "a11y-sweep")]
#[command(version)]
#[command(about = "Sitemap-driven accessibility audits", long_about = None)]
struct Cli {
    /// Where reports go
    #[arg(short, long, value_enum, default_value_t = ReportType::Console, env = "A11Y_SWEEP_OUTPUT")]
    output: ReportType,

    /// Path to the TOML configuration file (searched upwards from the working directory if omitted)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let cwd = std::env::current_dir().context("Failed to read the working directory")?;

    let (config, config_path) = match locate_and_load(cli.config.as_deref(), &cwd) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Could not load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    if config.sites.is_empty() {
        eprintln!("No sitemaps to process. Exiting.");
        std::process::exit(0);
    }

    let output_dir = resolve_output_dir(&config, &config_path);
    std::fs::create_dir_all(&output_dir).with_context(|| {
        format!("Failed to create output directory {}", output_dir.display())
    })?;

    let mut audit_settings = config.audit.clone();
    audit_settings.node_path = resolve_node_path(audit_settings.node_path, &config_path, &cwd);

    tracing::info!(
        "Auditing {} sites with runners [{}], output {}",
        config.sites.len(),
        audit_settings.runners.join(", "),
        cli.output
    );

    let engine = Pa11yEngine::from_settings(&audit_settings);
    let lister = SitemapClient::new().context("Failed to build HTTP client")?;
    let settings = RunSettings {
        report_type: cli.output,
        output_dir,
        runners: audit_settings.runners.clone(),
    };

    let outcomes = run_all(&config.sites, &settings, &lister, &engine).await;
    log_outcomes(&config, &outcomes);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so console reports on stdout stay clean.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("a11y_sweep=info,warn"),
            1 => EnvFilter::new("a11y_sweep=debug,info"),
            2 => EnvFilter::new("a11y_sweep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Finds and loads the configuration
fn locate_and_load(explicit: Option<&Path>, cwd: &Path) -> anyhow::Result<(Config, PathBuf)> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => discover_config(cwd)?,
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let config = load_config(&path)
        .with_context(|| format!("Failed to load {}", path.display()))?;

    Ok((config, path))
}

/// Resolves NODE_PATH for the audit bridge
///
/// A configured path is taken relative to the config file. Without one, a
/// `node_modules` directory in the working directory is used if present.
fn resolve_node_path(configured: Option<PathBuf>, config_path: &Path, cwd: &Path) -> Option<PathBuf> {
    match configured {
        Some(path) if path.is_absolute() => Some(path),
        Some(path) => {
            let base = config_path.parent().unwrap_or_else(|| Path::new("."));
            Some(base.join(path))
        }
        None => {
            let local = cwd.join("node_modules");
            local.is_dir().then_some(local)
        }
    }
}

fn log_outcomes(config: &Config, outcomes: &[SiteOutcome]) {
    let mut failed = 0;

    for (site, outcome) in config.sites.iter().zip(outcomes) {
        match outcome {
            SiteOutcome::Skipped => {
                tracing::info!("{}: skipped, sitemap lists no URLs", site.url);
            }
            SiteOutcome::Failed(error) => {
                failed += 1;
                tracing::error!("{}: failed before auditing: {}", site.url, error);
            }
            SiteOutcome::Ran(run) => {
                if !run.is_done() {
                    failed += 1;
                }
                tracing::info!(
                    "{}: {}, {} pages audited, {} failed, {} distinct issues",
                    site.url,
                    run.state,
                    run.pages_audited,
                    run.pages_failed,
                    run.summary.as_ref().map_or(0, |s| s.len())
                );
            }
        }
    }

    tracing::info!(
        "Processed {} sites ({} failed)",
        outcomes.len(),
        failed
    );
}
