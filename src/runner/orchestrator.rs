//! Site-run orchestration
//!
//! One site-run audits a site's URL list in a single browser session:
//! - Launch the browser once
//! - Open one page per URL and audit it, in order
//! - Merge each page's issues into the site summary
//! - Report each page with issues, plus the refreshed summary
//! - Close every page, then the browser, on every exit path
//!
//! Failures never escape a site-run. A page whose audit fails is logged and
//! skipped; a browser that cannot be launched ends the run as `Failed`.

use crate::audit::{AuditEngine, AuditError, AuditOptions, Browser, PageResult, SummaryResult};
use crate::naming::{file_name_for, summary_file_name, RunDate};
use crate::report::{ReportType, Reporter};
use crate::runner::state::RunState;
use std::path::PathBuf;

/// Everything one site-run needs to know about its site
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Folder name derived from the site's hostname
    pub folder_name: String,

    /// Pages to audit, in sitemap order
    pub url_list: Vec<String>,

    /// Directory receiving this site's HTML reports
    pub output_dir: PathBuf,

    /// Date used in report file names
    pub run_date: RunDate,
}

/// What a finished site-run reports back
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Final state: `Done` or `Failed`
    pub state: RunState,

    /// Pages whose audit returned a result
    pub pages_audited: usize,

    /// Pages whose audit failed
    pub pages_failed: usize,

    /// Report writes that failed
    pub reports_failed: usize,

    /// Deduplicated issues, present once any page was audited
    pub summary: Option<SummaryResult>,

    /// Error that failed the run
    pub error: Option<String>,
}

impl RunOutcome {
    /// Returns true if the run ended in `Done`
    pub fn is_done(&self) -> bool {
        self.state == RunState::Done
    }
}

/// Audits every URL of one site
///
/// Never fails: errors are logged and reflected in the returned
/// [`RunOutcome`]. There is no timeout around browser launch or page audits;
/// a hung browser stalls this site-run.
///
/// # Arguments
///
/// * `engine` - The audit engine providing the browser session
/// * `ctx` - The site's URL list and output location
/// * `options` - Engine configuration and runners for every page
/// * `reporter` - Where per-page and summary reports go
pub async fn run_site<E: AuditEngine>(
    engine: &E,
    ctx: &RunContext,
    options: &AuditOptions,
    reporter: &Reporter,
) -> RunOutcome {
    let mut run = SiteRun::new(ctx, reporter);

    tracing::info!(
        "Auditing {} URLs for {}",
        ctx.url_list.len(),
        ctx.folder_name
    );

    run.transition(RunState::BrowserStarting);
    let mut browser = match engine.launch().await {
        Ok(browser) => browser,
        Err(e) => {
            tracing::error!("Failed to launch browser for {}: {}", ctx.folder_name, e);
            run.error = Some(e.to_string());
            run.transition(RunState::Failed);
            return run.into_outcome();
        }
    };

    run.transition(RunState::PageLoop);
    let mut pages = Vec::with_capacity(ctx.url_list.len());
    let loop_result = run.page_loop(engine, &mut browser, &mut pages, options).await;

    if reporter.report_type() == ReportType::Console {
        run.print_summary();
    }

    run.transition(RunState::BrowserClosing);
    for page in pages {
        if let Err(e) = browser.close_page(page).await {
            tracing::warn!("Failed to close page for {}: {}", ctx.folder_name, e);
        }
    }
    if let Err(e) = browser.close().await {
        tracing::warn!("Failed to close browser for {}: {}", ctx.folder_name, e);
    }

    match loop_result {
        Ok(()) => {
            run.transition(RunState::Done);
            tracing::info!(
                "Finished {}: {} audited, {} failed, {} distinct issues",
                ctx.folder_name,
                run.pages_audited,
                run.pages_failed,
                run.summary.as_ref().map_or(0, SummaryResult::len)
            );
        }
        Err(e) => {
            tracing::error!("Site run for {} aborted: {}", ctx.folder_name, e);
            run.error = Some(e.to_string());
            run.transition(RunState::Failed);
        }
    }

    run.into_outcome()
}

/// Mutable state of one site-run
struct SiteRun<'a> {
    ctx: &'a RunContext,
    reporter: &'a Reporter,
    state: RunState,
    pages_audited: usize,
    pages_failed: usize,
    reports_failed: usize,
    summary: Option<SummaryResult>,
    error: Option<String>,
}

impl<'a> SiteRun<'a> {
    fn new(ctx: &'a RunContext, reporter: &'a Reporter) -> Self {
        Self {
            ctx,
            reporter,
            state: RunState::Idle,
            pages_audited: 0,
            pages_failed: 0,
            reports_failed: 0,
            summary: None,
            error: None,
        }
    }

    fn transition(&mut self, next: RunState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid run transition {} -> {}",
            self.state,
            next
        );
        tracing::trace!("{}: {} -> {}", self.ctx.folder_name, self.state, next);
        self.state = next;
    }

    /// Opens and audits one page per URL
    ///
    /// Each page is pushed onto `pages` once its audit returns, so the caller
    /// can close them whatever this returns. Only a failure to open a page ends the loop.
    async fn page_loop<E: AuditEngine>(
        &mut self,
        engine: &E,
        browser: &mut E::Browser,
        pages: &mut Vec<<E::Browser as Browser>::Page>,
        options: &AuditOptions,
    ) -> Result<(), AuditError> {
        let ctx = self.ctx;
        for (index, url) in ctx.url_list.iter().enumerate() {
            tracing::info!("[{}/{}] Auditing {}", index + 1, ctx.url_list.len(), url);

            let page = browser.new_page().await?;
            let audited = engine.audit(browser, &page, url, options).await;
            pages.push(page);

            match audited {
                Ok(result) => self.record(url, result),
                Err(e) => {
                    self.pages_failed += 1;
                    tracing::error!("Audit of {} failed: {}", url, e);
                }
            }
        }

        Ok(())
    }

    /// Merges a page result into the summary and reports it
    fn record(&mut self, url: &str, result: PageResult) {
        self.pages_audited += 1;

        let summary = self
            .summary
            .get_or_insert_with(|| SummaryResult::new(&result));
        let added = summary.merge(&result);

        tracing::debug!(
            "{}: {} issues, {} new to the summary",
            url,
            result.issues.len(),
            added
        );

        if !result.has_issues() {
            return;
        }

        match self.reporter.report_type() {
            ReportType::Html => self.write_html(url, &result),
            ReportType::Console => self.reporter.print(&self.reporter.render(&result)),
        }
    }

    /// Writes the refreshed summary and the page report
    ///
    /// Both are rewritten after every page with issues so a run that stalls
    /// later still leaves a usable summary on disk.
    fn write_html(&mut self, url: &str, result: &PageResult) {
        let mut reports = Vec::with_capacity(2);
        if let Some(summary) = &self.summary {
            reports.push((
                summary_file_name(&self.ctx.folder_name, self.ctx.run_date),
                self.reporter.render(summary.as_result()),
            ));
        }
        reports.push((
            file_name_for(url, self.ctx.run_date),
            self.reporter.render(result),
        ));

        for (file_name, content) in reports {
            let path = self.ctx.output_dir.join(file_name);
            if let Err(e) = self.reporter.persist(&path, &content) {
                self.reports_failed += 1;
                tracing::error!("{}", e);
            }
        }
    }

    fn print_summary(&self) {
        if let Some(summary) = &self.summary {
            self.reporter.print("Printing summary results of all issues...");
            self.reporter.print(&self.reporter.render(summary.as_result()));
        }
    }

    fn into_outcome(self) -> RunOutcome {
        RunOutcome {
            state: self.state,
            pages_audited: self.pages_audited,
            pages_failed: self.pages_failed,
            reports_failed: self.reports_failed,
            summary: self.summary,
            error: self.error,
        }
    }
}
