use crate::audit::types::{Issue, IssueKey, PageResult};
use std::collections::HashSet;

/// Deduplicated issues of a whole site-run
///
/// The document title and URL are copied from the first page result; issues
/// are appended in first-seen order and an issue whose (runner, code,
/// selector) triple was already seen is skipped, so the first page's copy of
/// a shared issue is the one kept.
#[derive(Debug, Clone)]
pub struct SummaryResult {
    result: PageResult,
    seen: HashSet<IssueKey>,
}

impl SummaryResult {
    /// Starts a summary using `template` for the shared metadata
    ///
    /// The template's issues are not merged; call [`merge`](Self::merge).
    pub fn new(template: &PageResult) -> Self {
        Self {
            result: PageResult {
                document_title: template.document_title.clone(),
                page_url: template.page_url.clone(),
                issues: Vec::new(),
            },
            seen: HashSet::new(),
        }
    }

    /// Merges a page's issues into the summary
    ///
    /// Returns the number of issues that were new.
    pub fn merge(&mut self, page: &PageResult) -> usize {
        let before = self.result.issues.len();

        for issue in &page.issues {
            if self.seen.insert(issue.key()) {
                self.result.issues.push(issue.clone());
            }
        }

        self.result.issues.len() - before
    }

    /// Deduplicated issues in first-seen order
    pub fn issues(&self) -> &[Issue] {
        &self.result.issues
    }

    /// The summary viewed as a page result, for rendering
    pub fn as_result(&self) -> &PageResult {
        &self.result
    }

    /// Number of distinct issues
    pub fn len(&self) -> usize {
        self.result.issues.len()
    }

    /// Returns true if no issue has been merged
    pub fn is_empty(&self) -> bool {
        self.result.issues.is_empty()
    }
}
