use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity pa11y assigns to an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueType {
    Error,
    Warning,
    Notice,
}

impl IssueType {
    /// Label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
            Self::Notice => "Notice",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One accessibility finding
///
/// Fields the reports do not use (`typeCode`, `runnerExtras`, ...) are kept
/// in `extra` and serialized back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub code: String,

    #[serde(rename = "type")]
    pub issue_type: IssueType,

    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub context: Option<String>,

    #[serde(default)]
    pub selector: String,

    #[serde(default)]
    pub runner: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Identity of an issue for deduplication: (runner, code, selector)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IssueKey {
    pub runner: String,
    pub code: String,
    pub selector: String,
}

impl Issue {
    /// Returns the identity triple of this issue
    pub fn key(&self) -> IssueKey {
        IssueKey {
            runner: self.runner.clone(),
            code: self.code.clone(),
            selector: self.selector.clone(),
        }
    }
}

/// Audit result for one page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    #[serde(default)]
    pub document_title: String,

    pub page_url: String,

    #[serde(default)]
    pub issues: Vec<Issue>,
}

impl PageResult {
    /// Creates a result for `page_url` with no title
    pub fn new(page_url: impl Into<String>, issues: Vec<Issue>) -> Self {
        Self {
            document_title: String::new(),
            page_url: page_url.into(),
            issues,
        }
    }

    /// Returns true if the page has at least one issue
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Counts issues of the given type
    pub fn count(&self, issue_type: IssueType) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.issue_type == issue_type)
            .count()
    }
}
