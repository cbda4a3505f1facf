//! Audit module: accessibility findings and the engine that produces them
//!
//! This module contains:
//! - The issue and page result types returned by the audit engine
//! - The summary that deduplicates issues across pages
//! - The browser and engine traits the run orchestrator drives
//! - A pa11y backend hosted in a resident Node.js bridge process

mod engine;
mod pa11y;
mod summary;
mod types;

pub use engine::{AuditEngine, AuditOptions, Browser};
pub use pa11y::{Pa11yBrowser, Pa11yEngine, Pa11yPage};
pub use summary::SummaryResult;
pub use types::{Issue, IssueKey, IssueType, PageResult};

use thiserror::Error;

/// Errors raised by the audit engine and its browser session
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    #[error("Browser page error: {0}")]
    Page(String),

    #[error("Audit failed for {url}: {message}")]
    PageAudit { url: String, message: String },

    #[error("Audit bridge error: {0}")]
    Bridge(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for audit operations
pub type AuditResult<T> = Result<T, AuditError>;
