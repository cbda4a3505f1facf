//! Configuration module for a11y-sweep
//!
//! This module handles discovering, loading, and validating the TOML
//! configuration file that lists the sitemaps to audit.
//!
//! # Example
//!
//! ```no_run
//! use a11y_sweep::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("a11y-sweep.toml")).unwrap();
//! println!("Sites to audit: {}", config.sites.len());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{AuditSettings, Config, OutputConfig, SiteConfig, DEFAULT_RUNNERS};

// Re-export parser functions
pub use parser::{discover_config, discover_config_within, load_config, resolve_output_dir, CONFIG_FILE_NAME};
