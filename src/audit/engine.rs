//! Browser and audit engine traits
//!
//! The run orchestrator only talks to these traits. A site-run launches one
//! [`Browser`], opens one page per URL, audits it through the
//! [`AuditEngine`], and closes every page before closing the browser.

use crate::audit::types::PageResult;
use crate::audit::AuditError;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// A browser session shared by all pages of one site-run
#[async_trait]
pub trait Browser: Send {
    /// Handle to one open page
    type Page: Send + Sync;

    /// Opens a new page in this session
    async fn new_page(&mut self) -> Result<Self::Page, AuditError>;

    /// Closes a page opened by [`new_page`](Self::new_page)
    async fn close_page(&mut self, page: Self::Page) -> Result<(), AuditError>;

    /// Shuts the session down
    async fn close(self) -> Result<(), AuditError>;
}

/// An accessibility audit engine driving a [`Browser`]
#[async_trait]
pub trait AuditEngine: Send + Sync {
    type Browser: Browser;

    /// Launches a browser session
    async fn launch(&self) -> Result<Self::Browser, AuditError>;

    /// Loads `url` in `page` and returns the issues found
    async fn audit(
        &self,
        browser: &mut Self::Browser,
        page: &<Self::Browser as Browser>::Page,
        url: &str,
        options: &AuditOptions,
    ) -> Result<PageResult, AuditError>;
}

/// Options handed to the engine for every page of a site
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditOptions {
    /// The site's engine configuration, passed through verbatim
    pub config: Map<String, Value>,

    /// Runners enabled for this site-run
    pub runners: Vec<String>,
}

impl AuditOptions {
    pub fn new(config: Map<String, Value>, runners: Vec<String>) -> Self {
        Self { config, runners }
    }

    /// The site configuration with `runners` overridden by the run's runners
    pub fn merged(&self) -> Value {
        let mut merged = self.config.clone();
        merged.insert(
            "runners".to_string(),
            Value::Array(self.runners.iter().cloned().map(Value::String).collect()),
        );
        Value::Object(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merged_overrides_runners() {
        let mut config = Map::new();
        config.insert("standard".to_string(), json!("WCAG2AA"));
        config.insert("runners".to_string(), json!(["htmlcs"]));

        let options = AuditOptions::new(config, vec!["axe".to_string(), "htmlcs".to_string()]);

        assert_eq!(
            options.merged(),
            json!({ "standard": "WCAG2AA", "runners": ["axe", "htmlcs"] })
        );
    }

    #[test]
    fn test_merged_without_config() {
        let options = AuditOptions::new(Map::new(), vec!["axe".to_string()]);
        assert_eq!(options.merged(), json!({ "runners": ["axe"] }));
    }
}
