//! a11y-sweep: sitemap-driven accessibility audits
//!
//! This crate reads a site's sitemap, audits every listed page with an external
//! accessibility engine, deduplicates the findings across pages, and reports them
//! either on the console or as per-page and summary HTML files.

pub mod audit;
pub mod config;
pub mod naming;
pub mod report;
pub mod runner;
pub mod sitemap;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for a11y-sweep operations
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to fetch sitemap {url}: {source}")]
    SitemapFetch { url: String, source: reqwest::Error },

    #[error("Sitemap {url} returned HTTP {status}")]
    SitemapStatus { url: String, status: u16 },

    #[error("Failed to parse sitemap {url}: {message}")]
    SitemapParse { url: String, message: String },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("URL has no hostname: {url}")]
    MissingHost { url: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Failed to write report {}: {source}", path.display())]
    ReportWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Audit error: {0}")]
    Audit(#[from] audit::AuditError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not find configuration (searched for {file_name} from {})", start.display())]
    NotFound { file_name: String, start: PathBuf },

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for a11y-sweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use audit::{Issue, IssueType, PageResult, SummaryResult};
pub use config::{Config, SiteConfig};
pub use naming::{file_name_for, folder_name_for, RunDate};
pub use report::ReportType;
pub use runner::{run_all, run_site, RunContext, RunOutcome, RunSettings, RunState, SiteOutcome};
