//! Standalone HTML report generation

use crate::audit::{Issue, IssueType, PageResult};

const STYLESHEET: &str = r#"
body { font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; margin: 2rem auto; max-width: 60rem; padding: 0 1rem; color: #1a1a1a; }
h1 { font-size: 1.6rem; }
.counts { display: flex; gap: 1rem; list-style: none; padding: 0; }
.count { border-radius: 4px; padding: 0.4rem 0.8rem; font-weight: bold; }
.count-error { background: #fbe3e4; color: #8a1f11; }
.count-warning { background: #fff6bf; color: #514721; }
.count-notice { background: #e8f0fe; color: #1c3d8c; }
.results-list { list-style: none; padding: 0; }
.result { border-left: 6px solid #ccc; margin: 1rem 0; padding: 0.5rem 1rem; background: #fafafa; }
.result-error { border-color: #c0392b; }
.result-warning { border-color: #d4a017; }
.result-notice { border-color: #2f6fd6; }
.result h2 { font-size: 1.05rem; margin: 0 0 0.5rem; }
.result pre { white-space: pre-wrap; word-break: break-all; background: #fff; padding: 0.4rem; border: 1px solid #e3e3e3; }
.meta { color: #555; font-size: 0.9rem; margin: 0.2rem 0; }
"#;

/// Renders a result as a standalone HTML document
///
/// Every value taken from the result is escaped with [`escape_html`].
pub fn render_html(result: &PageResult) -> String {
    let title = if result.document_title.is_empty() {
        result.page_url.as_str()
    } else {
        result.document_title.as_str()
    };

    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!(
        "<title>Accessibility Report For \"{}\" ({})</title>\n",
        escape_html(title),
        escape_html(&result.page_url)
    ));
    html.push_str(&format!("<style>{}</style>\n", STYLESHEET));
    html.push_str("</head>\n<body>\n");

    html.push_str(&format!(
        "<h1>Accessibility Report For \"<a href=\"{}\">{}</a>\"</h1>\n",
        escape_html(&result.page_url),
        escape_html(title)
    ));

    html.push_str("<ul class=\"counts\">\n");
    for (issue_type, noun) in [
        (IssueType::Error, "errors"),
        (IssueType::Warning, "warnings"),
        (IssueType::Notice, "notices"),
    ] {
        html.push_str(&format!(
            "<li class=\"count count-{}\">{} {}</li>\n",
            type_class(issue_type),
            result.count(issue_type),
            noun
        ));
    }
    html.push_str("</ul>\n");

    if result.has_issues() {
        html.push_str("<ul class=\"results-list\">\n");
        for issue in &result.issues {
            html.push_str(&render_issue(issue));
        }
        html.push_str("</ul>\n");
    } else {
        html.push_str("<p class=\"no-issues\">No issues found!</p>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_issue(issue: &Issue) -> String {
    let mut li = format!(
        "<li class=\"result result-{}\">\n<h2>{}: {}</h2>\n",
        type_class(issue.issue_type),
        issue.issue_type,
        escape_html(&issue.message)
    );
    li.push_str(&format!(
        "<p class=\"meta code\">{}</p>\n",
        escape_html(&issue.code)
    ));
    if !issue.runner.is_empty() {
        li.push_str(&format!(
            "<p class=\"meta runner\">Runner: {}</p>\n",
            escape_html(&issue.runner)
        ));
    }
    li.push_str(&format!(
        "<pre class=\"selector\">{}</pre>\n",
        escape_html(&issue.selector)
    ));
    if let Some(context) = issue.context.as_deref().filter(|c| !c.is_empty()) {
        li.push_str(&format!(
            "<pre class=\"context\">{}</pre>\n",
            escape_html(context)
        ));
    }
    li.push_str("</li>\n");
    li
}

fn type_class(issue_type: IssueType) -> &'static str {
    match issue_type {
        IssueType::Error => "error",
        IssueType::Warning => "warning",
        IssueType::Notice => "notice",
    }
}

/// Escapes text for use in HTML content and double-quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
