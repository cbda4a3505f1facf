//! Integration tests for a full sweep
//!
//! These tests serve sitemaps from wiremock and audit them with a scripted
//! engine, then inspect the HTML reports written to disk.

use a11y_sweep::audit::{AuditEngine, AuditError, AuditOptions, Browser};
use a11y_sweep::sitemap::SitemapClient;
use a11y_sweep::{
    run_all, Issue, IssueType, PageResult, ReportType, RunSettings, RunState, SiteConfig,
    SiteOutcome,
};
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Engine answering each URL from a script and recording the options it saw
#[derive(Default)]
struct ScriptedEngine {
    results: HashMap<String, Result<Vec<Issue>, String>>,
    seen_options: Mutex<Vec<AuditOptions>>,
    launches: Mutex<usize>,
}

struct ScriptedBrowser;

#[async_trait]
impl Browser for ScriptedBrowser {
    type Page = ();

    async fn new_page(&mut self) -> Result<(), AuditError> {
        Ok(())
    }

    async fn close_page(&mut self, _page: ()) -> Result<(), AuditError> {
        Ok(())
    }

    async fn close(self) -> Result<(), AuditError> {
        Ok(())
    }
}

#[async_trait]
impl AuditEngine for ScriptedEngine {
    type Browser = ScriptedBrowser;

    async fn launch(&self) -> Result<ScriptedBrowser, AuditError> {
        *self.launches.lock().unwrap() += 1;
        Ok(ScriptedBrowser)
    }

    async fn audit(
        &self,
        _browser: &mut ScriptedBrowser,
        _page: &(),
        url: &str,
        options: &AuditOptions,
    ) -> Result<PageResult, AuditError> {
        self.seen_options.lock().unwrap().push(options.clone());
        match self.results.get(url) {
            Some(Ok(issues)) => Ok(PageResult {
                document_title: format!("Title of {}", url),
                page_url: url.to_string(),
                issues: issues.clone(),
            }),
            Some(Err(message)) => Err(AuditError::PageAudit {
                url: url.to_string(),
                message: message.clone(),
            }),
            None => Ok(PageResult {
                document_title: format!("Title of {}", url),
                page_url: url.to_string(),
                issues: vec![],
            }),
        }
    }
}

fn issue(runner: &str, code: &str, selector: &str) -> Issue {
    Issue {
        code: code.to_string(),
        issue_type: IssueType::Error,
        message: format!("{} violated", code),
        context: Some(format!("<div id=\"{}\">", selector)),
        selector: selector.to_string(),
        runner: runner.to_string(),
        extra: serde_json::Map::new(),
    }
}

fn sitemap(urls: &[&str]) -> String {
    let entries: String = urls
        .iter()
        .map(|u| format!("  <url><loc>{}</loc></url>\n", u))
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{}</urlset>",
        entries
    )
}

async fn serve_sitemap(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

fn html_settings(output_dir: PathBuf) -> RunSettings {
    RunSettings {
        report_type: ReportType::Html,
        output_dir,
        runners: vec!["axe".to_string(), "htmlcs".to_string()],
    }
}

fn site(url: String) -> SiteConfig {
    SiteConfig {
        url,
        config: serde_json::Map::new(),
    }
}

/// Lists the report files of a site folder, sorted
fn report_files(dir: &Path) -> Vec<String> {
    let mut files: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    files.sort();
    files
}

fn count_results(html: &str) -> usize {
    let document = Html::parse_document(html);
    let selector = Selector::parse("li.result").unwrap();
    document.select(&selector).count()
}

fn read_file_ending_with(dir: &Path, suffix: &str) -> String {
    let name = report_files(dir)
        .into_iter()
        .find(|f| f.ends_with(suffix))
        .unwrap_or_else(|| panic!("no report ending with {}", suffix));
    std::fs::read_to_string(dir.join(name)).unwrap()
}

#[tokio::test]
async fn test_clean_site_writes_no_reports() {
    let server = MockServer::start().await;
    serve_sitemap(
        &server,
        "/sitemap.xml",
        sitemap(&["https://example.com/", "https://example.com/about"]),
    )
    .await;

    let out = TempDir::new().unwrap();
    let engine = ScriptedEngine::default();
    let lister = SitemapClient::new().unwrap();

    let outcomes = run_all(
        &[site(format!("{}/sitemap.xml", server.uri()))],
        &html_settings(out.path().to_path_buf()),
        &lister,
        &engine,
    )
    .await;

    let SiteOutcome::Ran(run) = &outcomes[0] else {
        panic!("expected a site run, got {:?}", outcomes[0]);
    };
    assert_eq!(run.state, RunState::Done);
    assert_eq!(run.pages_audited, 2);
    assert!(run.summary.as_ref().unwrap().is_empty());

    let folder = out.path().join("1270.0.1");
    assert!(folder.is_dir());
    assert!(report_files(&folder).is_empty());
}

#[tokio::test]
async fn test_shared_issue_reported_once_in_summary() {
    let server = MockServer::start().await;
    serve_sitemap(
        &server,
        "/sitemap.xml",
        sitemap(&["https://example.com/1", "https://example.com/2"]),
    )
    .await;

    let mut engine = ScriptedEngine::default();
    engine.results.insert(
        "https://example.com/1".to_string(),
        Ok(vec![issue("axe", "X1", "#a")]),
    );
    engine.results.insert(
        "https://example.com/2".to_string(),
        Ok(vec![issue("axe", "X1", "#a"), issue("htmlcs", "X2", "#b")]),
    );

    let out = TempDir::new().unwrap();
    let lister = SitemapClient::new().unwrap();
    let outcomes = run_all(
        &[site(format!("{}/sitemap.xml", server.uri()))],
        &html_settings(out.path().to_path_buf()),
        &lister,
        &engine,
    )
    .await;
    assert!(outcomes[0].is_success());

    let folder = out.path().join("1270.0.1");
    let files = report_files(&folder);
    assert_eq!(files.len(), 3, "unexpected reports: {:?}", files);
    assert!(files.iter().any(|f| f.ends_with("-httpsexamplecom1.html")));
    assert!(files.iter().any(|f| f.ends_with("-httpsexamplecom2.html")));

    let summary = read_file_ending_with(&folder, "-1270.0.1-summary.html");
    assert_eq!(count_results(&summary), 2);
    assert!(summary.contains("Title of https://example.com/1"));

    let page_two = read_file_ending_with(&folder, "-httpsexamplecom2.html");
    assert_eq!(count_results(&page_two), 2);

    let options = engine.seen_options.lock().unwrap();
    assert_eq!(options.len(), 2);
    assert_eq!(options[0].runners, vec!["axe", "htmlcs"]);
}

#[tokio::test]
async fn test_empty_sitemap_never_launches_browser() {
    let server = MockServer::start().await;
    serve_sitemap(&server, "/sitemap.xml", sitemap(&[])).await;

    let out = TempDir::new().unwrap();
    let engine = ScriptedEngine::default();
    let lister = SitemapClient::new().unwrap();

    let outcomes = run_all(
        &[site(format!("{}/sitemap.xml", server.uri()))],
        &html_settings(out.path().to_path_buf()),
        &lister,
        &engine,
    )
    .await;

    assert!(matches!(outcomes[..], [SiteOutcome::Skipped]));
    assert_eq!(*engine.launches.lock().unwrap(), 0);
}

#[tokio::test]
async fn test_failed_page_skipped_and_run_completes() {
    let server = MockServer::start().await;
    serve_sitemap(
        &server,
        "/sitemap.xml",
        sitemap(&[
            "https://example.com/1",
            "https://example.com/2",
            "https://example.com/3",
        ]),
    )
    .await;

    let mut engine = ScriptedEngine::default();
    engine.results.insert(
        "https://example.com/2".to_string(),
        Err("net::ERR_NAME_NOT_RESOLVED".to_string()),
    );
    engine.results.insert(
        "https://example.com/3".to_string(),
        Ok(vec![issue("htmlcs", "X3", "img")]),
    );

    let out = TempDir::new().unwrap();
    let lister = SitemapClient::new().unwrap();
    let outcomes = run_all(
        &[site(format!("{}/sitemap.xml", server.uri()))],
        &html_settings(out.path().to_path_buf()),
        &lister,
        &engine,
    )
    .await;

    let SiteOutcome::Ran(run) = &outcomes[0] else {
        panic!("expected a site run, got {:?}", outcomes[0]);
    };
    assert_eq!(run.state, RunState::Done);
    assert_eq!(run.pages_audited, 2);
    assert_eq!(run.pages_failed, 1);

    let folder = out.path().join("1270.0.1");
    let summary = read_file_ending_with(&folder, "-summary.html");
    assert_eq!(count_results(&summary), 1);
    assert!(summary.contains("X3"));
    // The summary takes its title from the first audited page, even a clean one
    assert!(summary.contains("<title>Accessibility Report For \"Title of https://example.com/1\""));
    assert!(!summary.contains("Title of https://example.com/3"));
}

#[tokio::test]
async fn test_sites_run_independently() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.xml"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    serve_sitemap(
        &server,
        "/sitemap.xml",
        sitemap(&["https://example.com/1"]),
    )
    .await;

    let mut engine = ScriptedEngine::default();
    engine.results.insert(
        "https://example.com/1".to_string(),
        Ok(vec![issue("axe", "X1", "#a")]),
    );

    let out = TempDir::new().unwrap();
    let lister = SitemapClient::new().unwrap();
    let outcomes = run_all(
        &[
            site(format!("{}/missing.xml", server.uri())),
            site(format!("{}/sitemap.xml", server.uri())),
        ],
        &html_settings(out.path().to_path_buf()),
        &lister,
        &engine,
    )
    .await;

    assert!(matches!(&outcomes[0], SiteOutcome::Failed(msg) if msg.contains("404")));
    assert!(outcomes[1].is_success());
    assert_eq!(*engine.launches.lock().unwrap(), 1);
    assert_eq!(report_files(&out.path().join("1270.0.1")).len(), 2);
}
