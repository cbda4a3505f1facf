use crate::config::types::{AuditSettings, Config, SiteConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
///
/// An empty site list is valid; the caller decides how to report it.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_audit_settings(&config.audit)?;
    validate_sites(&config.sites)?;
    Ok(())
}

/// Validates audit engine settings
fn validate_audit_settings(settings: &AuditSettings) -> Result<(), ConfigError> {
    if settings.runners.is_empty() {
        return Err(ConfigError::Validation(
            "audit.runners must name at least one runner".to_string(),
        ));
    }

    if let Some(runner) = settings.runners.iter().find(|r| r.trim().is_empty()) {
        return Err(ConfigError::Validation(format!(
            "audit.runners contains an empty runner name: '{}'",
            runner
        )));
    }

    if settings.node.trim().is_empty() {
        return Err(ConfigError::Validation(
            "audit.node cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates site entries
fn validate_sites(sites: &[SiteConfig]) -> Result<(), ConfigError> {
    for site in sites {
        let url = Url::parse(&site.url).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid sitemap URL '{}': {}", site.url, e))
        })?;

        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(ConfigError::Validation(format!(
                "Sitemap URL '{}' must use http or https",
                site.url
            )));
        }

        if url.host_str().is_none() {
            return Err(ConfigError::InvalidUrl(format!(
                "Sitemap URL '{}' has no hostname",
                site.url
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(url: &str) -> SiteConfig {
        SiteConfig {
            url: url.to_string(),
            config: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_validate_sites() {
        assert!(validate_sites(&[site("https://www.example.com/sitemap.xml")]).is_ok());
        assert!(validate_sites(&[site("http://localhost:8080/sitemap.xml")]).is_ok());
        assert!(validate_sites(&[]).is_ok());

        assert!(validate_sites(&[site("")]).is_err());
        assert!(validate_sites(&[site("ftp://example.com/sitemap.xml")]).is_err());
        assert!(validate_sites(&[site("example.com/sitemap.xml")]).is_err());
    }

    #[test]
    fn test_validate_audit_settings() {
        assert!(validate_audit_settings(&AuditSettings::default()).is_ok());

        let mut settings = AuditSettings::default();
        settings.runners.clear();
        assert!(validate_audit_settings(&settings).is_err());

        let mut settings = AuditSettings::default();
        settings.runners.push("  ".to_string());
        assert!(validate_audit_settings(&settings).is_err());

        let mut settings = AuditSettings::default();
        settings.node = String::new();
        assert!(validate_audit_settings(&settings).is_err());
    }
}
