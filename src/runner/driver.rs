//! Runs every configured site, one after another

use crate::audit::{AuditEngine, AuditOptions};
use crate::config::SiteConfig;
use crate::naming::{folder_name_for, hostname_of, RunDate};
use crate::report::{ReportType, Reporter};
use crate::runner::orchestrator::{run_site, RunContext, RunOutcome};
use crate::sitemap::SitemapClient;
use crate::SweepError;
use std::fs;
use std::path::PathBuf;

/// Settings shared by every site of an invocation
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub report_type: ReportType,

    /// Root directory; each site writes into a subfolder named after its host
    pub output_dir: PathBuf,

    /// Runners enabled for every site
    pub runners: Vec<String>,
}

/// How one configured site ended
#[derive(Debug, Clone)]
pub enum SiteOutcome {
    /// The sitemap listed no URLs; no browser was launched
    Skipped,

    /// The site never reached its site-run
    Failed(String),

    /// The site-run happened
    Ran(RunOutcome),
}

impl SiteOutcome {
    /// Returns true if the site was skipped or its run finished
    pub fn is_success(&self) -> bool {
        match self {
            Self::Skipped => true,
            Self::Failed(_) => false,
            Self::Ran(outcome) => outcome.is_done(),
        }
    }
}

/// Runs every site in configuration order
///
/// Sites run sequentially and independently: a failing site is logged and
/// the next one starts. Returns one outcome per site, in order.
pub async fn run_all<E: AuditEngine>(
    sites: &[SiteConfig],
    settings: &RunSettings,
    lister: &SitemapClient,
    engine: &E,
) -> Vec<SiteOutcome> {
    if sites.is_empty() {
        tracing::info!("No sitemaps to process");
        return Vec::new();
    }

    let reporter = Reporter::new(settings.report_type);
    let mut outcomes = Vec::with_capacity(sites.len());

    for site in sites {
        tracing::info!("Processing sitemap {}", site.url);
        let outcome = match run_one(site, settings, lister, engine, &reporter).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("Site {} failed: {}", site.url, e);
                SiteOutcome::Failed(e.to_string())
            }
        };
        outcomes.push(outcome);
    }

    outcomes
}

async fn run_one<E: AuditEngine>(
    site: &SiteConfig,
    settings: &RunSettings,
    lister: &SitemapClient,
    engine: &E,
    reporter: &Reporter,
) -> Result<SiteOutcome, SweepError> {
    let folder_name = folder_name_for(&hostname_of(&site.url)?);
    let output_dir = settings.output_dir.join(&folder_name);

    if settings.report_type == ReportType::Html {
        fs::create_dir_all(&output_dir).map_err(|source| SweepError::ReportWrite {
            path: output_dir.clone(),
            source,
        })?;
    }

    let url_list = lister.list_urls(&site.url).await?;
    if url_list.is_empty() {
        tracing::warn!("Sitemap {} lists no URLs, skipping", site.url);
        return Ok(SiteOutcome::Skipped);
    }

    let ctx = RunContext {
        folder_name,
        url_list,
        output_dir,
        run_date: RunDate::today(),
    };
    let options = AuditOptions::new(site.config.clone(), settings.runners.clone());

    Ok(SiteOutcome::Ran(
        run_site(engine, &ctx, &options, reporter).await,
    ))
}
