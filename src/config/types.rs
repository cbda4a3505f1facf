use serde::Deserialize;
use std::path::PathBuf;

/// Runners enabled when the configuration does not name any
pub const DEFAULT_RUNNERS: [&str; 2] = ["axe", "htmlcs"];

/// Main configuration structure for a11y-sweep
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub audit: AuditSettings,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub sites: Vec<SiteConfig>,
}

/// Audit engine settings shared by every site
#[derive(Debug, Clone, Deserialize)]
pub struct AuditSettings {
    /// Accessibility runners enabled for every page
    #[serde(default = "default_runners")]
    pub runners: Vec<String>,

    /// Node.js executable used to host the audit bridge
    #[serde(default = "default_node")]
    pub node: String,

    /// Directory holding the pa11y and puppeteer modules (exported as NODE_PATH)
    #[serde(rename = "node-path", default)]
    pub node_path: Option<PathBuf>,
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            runners: default_runners(),
            node: default_node(),
            node_path: None,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Base directory for HTML reports, relative to the config file
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
        }
    }
}

/// One site to audit
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Sitemap endpoint
    pub url: String,

    /// Audit engine options, passed through verbatim
    #[serde(default)]
    pub config: serde_json::Map<String, serde_json::Value>,
}

fn default_runners() -> Vec<String> {
    DEFAULT_RUNNERS.iter().map(|r| r.to_string()).collect()
}

fn default_node() -> String {
    "node".to_string()
}

fn default_output_directory() -> PathBuf {
    PathBuf::from(".a11y-sweep")
}
