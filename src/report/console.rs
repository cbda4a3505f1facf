use crate::audit::{IssueType, PageResult};
use console::style;

/// Formats a result for the terminal
///
/// One bullet per issue with its message, followed by the code, selector and
/// context, then a count per issue type. Colors are dropped automatically
/// when standard output is not a terminal.
pub fn render_console(result: &PageResult) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "\nResults for URL: {}\n",
        style(&result.page_url).underlined()
    ));

    if !result.has_issues() {
        out.push_str(&format!("\n{}\n", style("No issues found!").green().bold()));
        return out;
    }

    for issue in &result.issues {
        let label = match issue.issue_type {
            IssueType::Error => style(format!("• {}:", issue.issue_type)).red(),
            IssueType::Warning => style(format!("• {}:", issue.issue_type)).yellow(),
            IssueType::Notice => style(format!("• {}:", issue.issue_type)).cyan(),
        };

        out.push_str(&format!("\n {} {}\n", label, issue.message));
        out.push_str(&format!("   ├── {}\n", style(&issue.code).dim()));
        out.push_str(&format!("   ├── {}\n", style(&issue.selector).dim()));
        out.push_str(&format!(
            "   └── {}\n",
            style(issue.context.as_deref().unwrap_or("")).dim()
        ));
    }

    out.push('\n');
    out.push_str(&count_line(result.count(IssueType::Error), "Error", "Errors"));
    out.push_str(&count_line(result.count(IssueType::Warning), "Warning", "Warnings"));
    out.push_str(&count_line(result.count(IssueType::Notice), "Notice", "Notices"));

    out
}

fn count_line(count: usize, singular: &str, plural: &str) -> String {
    if count == 0 {
        return String::new();
    }
    let noun = if count == 1 { singular } else { plural };
    format!("{} {}\n", count, noun)
}
