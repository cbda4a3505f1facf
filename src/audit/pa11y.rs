//! pa11y audit backend
//!
//! pa11y and puppeteer are Node.js libraries, so this backend keeps a small
//! Node.js bridge process alive for the whole site-run. The bridge launches a
//! single headless browser and executes commands read as JSON lines on stdin:
//!
//! | Action      | Reply                     |
//! |-------------|---------------------------|
//! | `newPage`   | `{ "page": <id> }`        |
//! | `audit`     | `{ "result": <pa11y result> }` |
//! | `closePage` | `{}`                      |
//! | `close`     | `{}`, then the bridge exits |
//!
//! Every reply echoes the request `id` and carries `error` on failure.
//! pa11y log lines arrive as `log` events in between and are forwarded to
//! `tracing`. Requests are strictly sequential.

use crate::audit::engine::{AuditEngine, AuditOptions, Browser};
use crate::audit::types::PageResult;
use crate::audit::AuditError;
use crate::config::AuditSettings;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::path::PathBuf;
use std::process::Stdio;
use tempfile::TempDir;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};

/// Node.js side of the bridge
const BRIDGE_SCRIPT: &str = r#"'use strict';
const readline = require('readline');
const pa11y = require('pa11y');
const puppeteer = require('puppeteer');

const send = (message) => process.stdout.write(JSON.stringify(message) + '\n');
const describe = (error) => (error && error.message ? error.message : String(error));
const logger = (url) => ({
  debug: (message) => send({ event: 'log', level: 'debug', url, message: String(message) }),
  info: (message) => send({ event: 'log', level: 'info', url, message: String(message) }),
  error: (message) => send({ event: 'log', level: 'error', url, message: String(message) }),
});

(async () => {
  const browser = await puppeteer.launch();
  const pages = new Map();
  let nextPage = 1;

  send({ event: 'ready' });

  const lines = readline.createInterface({ input: process.stdin });
  for await (const line of lines) {
    if (!line.trim()) continue;
    const request = JSON.parse(line);
    const reply = (body) => send({ event: 'reply', id: request.id, ...body });
    try {
      switch (request.action) {
        case 'newPage': {
          const id = nextPage++;
          pages.set(id, await browser.newPage());
          reply({ page: id });
          break;
        }
        case 'audit': {
          const page = pages.get(request.page);
          if (!page) throw new Error(`unknown page ${request.page}`);
          const result = await pa11y(request.url, {
            ...request.options,
            browser,
            page,
            log: logger(request.url),
          });
          reply({ result });
          break;
        }
        case 'closePage': {
          const page = pages.get(request.page);
          pages.delete(request.page);
          if (page) await page.close();
          reply({});
          break;
        }
        case 'close': {
          await browser.close();
          reply({});
          return;
        }
        default:
          throw new Error(`unknown action ${request.action}`);
      }
    } catch (error) {
      reply({ error: describe(error) });
    }
  }
  await browser.close();
})().catch((error) => {
  send({ event: 'fatal', error: describe(error) });
  process.exitCode = 1;
});
"#;

/// Messages written by the bridge on stdout
#[derive(Debug, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
enum BridgeEvent {
    Ready,
    Log {
        level: String,
        #[serde(default)]
        url: Option<String>,
        message: String,
    },
    Reply {
        id: u64,
        #[serde(default)]
        error: Option<String>,
        #[serde(flatten)]
        body: Map<String, Value>,
    },
    Fatal {
        error: String,
    },
}

/// Audit engine backed by pa11y running in a Node.js bridge
#[derive(Debug, Clone)]
pub struct Pa11yEngine {
    node: String,
    node_path: Option<PathBuf>,
}

impl Pa11yEngine {
    /// Creates an engine running `node`, resolving modules from `node_path`
    pub fn new(node: impl Into<String>, node_path: Option<PathBuf>) -> Self {
        Self {
            node: node.into(),
            node_path,
        }
    }

    /// Creates an engine from the `[audit]` configuration section
    pub fn from_settings(settings: &AuditSettings) -> Self {
        Self::new(settings.node.clone(), settings.node_path.clone())
    }
}

/// One pa11y bridge process and the browser it hosts
pub struct Pa11yBrowser {
    child: Child,
    stdin: ChildStdin,
    stdout: Lines<BufReader<ChildStdout>>,
    next_id: u64,
    _scratch: TempDir,
}

/// A page opened in the bridge's browser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pa11yPage {
    id: u64,
}

#[async_trait]
impl AuditEngine for Pa11yEngine {
    type Browser = Pa11yBrowser;

    async fn launch(&self) -> Result<Pa11yBrowser, AuditError> {
        let scratch = tempfile::Builder::new()
            .prefix("a11y-sweep-")
            .tempdir()
            .map_err(|e| AuditError::Launch(format!("failed to create scratch dir: {}", e)))?;
        let script = scratch.path().join("bridge.js");
        tokio::fs::write(&script, BRIDGE_SCRIPT)
            .await
            .map_err(|e| AuditError::Launch(format!("failed to write bridge script: {}", e)))?;

        let mut command = Command::new(&self.node);
        command
            .arg(&script)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(node_path) = &self.node_path {
            command.env("NODE_PATH", node_path);
        }

        let mut child = command
            .spawn()
            .map_err(|e| AuditError::Launch(format!("failed to start {}: {}", self.node, e)))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| AuditError::Launch("bridge stdin unavailable".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| AuditError::Launch("bridge stdout unavailable".to_string()))?;
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(async move {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    tracing::debug!("pa11y bridge: {}", line);
                }
            });
        }

        let mut browser = Pa11yBrowser {
            child,
            stdin,
            stdout: BufReader::new(stdout).lines(),
            next_id: 0,
            _scratch: scratch,
        };
        browser.wait_ready().await?;

        tracing::debug!("pa11y bridge ready");
        Ok(browser)
    }

    async fn audit(
        &self,
        browser: &mut Pa11yBrowser,
        page: &Pa11yPage,
        url: &str,
        options: &AuditOptions,
    ) -> Result<PageResult, AuditError> {
        let reply = browser
            .request(
                "audit",
                json!({ "page": page.id, "url": url, "options": options.merged() }),
            )
            .await?;

        let mut body = reply.map_err(|message| AuditError::PageAudit {
            url: url.to_string(),
            message,
        })?;

        let result = body.remove("result").ok_or_else(|| AuditError::PageAudit {
            url: url.to_string(),
            message: "bridge reply carried no result".to_string(),
        })?;

        Ok(serde_json::from_value(result)?)
    }
}

#[async_trait]
impl Browser for Pa11yBrowser {
    type Page = Pa11yPage;

    async fn new_page(&mut self) -> Result<Pa11yPage, AuditError> {
        let body = self
            .request("newPage", json!({}))
            .await?
            .map_err(AuditError::Page)?;

        let id = body
            .get("page")
            .and_then(Value::as_u64)
            .ok_or_else(|| AuditError::Bridge("newPage reply carried no page id".to_string()))?;

        Ok(Pa11yPage { id })
    }

    async fn close_page(&mut self, page: Pa11yPage) -> Result<(), AuditError> {
        self.request("closePage", json!({ "page": page.id }))
            .await?
            .map_err(AuditError::Page)?;
        Ok(())
    }

    async fn close(mut self) -> Result<(), AuditError> {
        let reply = self.request("close", json!({})).await;

        // Closing stdin ends the bridge's read loop even if `close` failed.
        drop(self.stdin);
        let status = self.child.wait().await?;
        if !status.success() {
            tracing::warn!("pa11y bridge exited with {}", status);
        }

        reply?.map_err(AuditError::Bridge)?;
        Ok(())
    }
}

impl Pa11yBrowser {
    /// Reads bridge output until the browser is up
    async fn wait_ready(&mut self) -> Result<(), AuditError> {
        loop {
            let line = self.stdout.next_line().await?.ok_or_else(|| {
                AuditError::Launch("bridge exited before the browser was ready".to_string())
            })?;

            match parse_event(&line) {
                Some(BridgeEvent::Ready) => return Ok(()),
                Some(BridgeEvent::Fatal { error }) => return Err(AuditError::Launch(error)),
                Some(BridgeEvent::Log {
                    level,
                    url,
                    message,
                }) => forward_log(&level, url.as_deref(), &message),
                Some(BridgeEvent::Reply { .. }) | None => {}
            }
        }
    }

    /// Sends one request and waits for its reply
    ///
    /// The outer error is a transport failure; the inner one is the error
    /// message the bridge reported for this request.
    async fn request(
        &mut self,
        action: &str,
        body: Value,
    ) -> Result<Result<Map<String, Value>, String>, AuditError> {
        self.next_id += 1;
        let id = self.next_id;

        let mut message = match body {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        message.insert("id".to_string(), json!(id));
        message.insert("action".to_string(), json!(action));

        let mut line = serde_json::to_string(&message)?;
        line.push('\n');
        self.stdin.write_all(line.as_bytes()).await?;
        self.stdin.flush().await?;

        loop {
            let line = self.stdout.next_line().await?.ok_or_else(|| {
                AuditError::Bridge(format!("bridge exited while handling {}", action))
            })?;

            match parse_event(&line) {
                Some(BridgeEvent::Reply {
                    id: reply_id,
                    error,
                    body,
                }) if reply_id == id => {
                    return Ok(match error {
                        Some(error) => Err(error),
                        None => Ok(body),
                    });
                }
                Some(BridgeEvent::Reply { id: reply_id, .. }) => {
                    tracing::warn!("Ignoring stale bridge reply {} (waiting for {})", reply_id, id);
                }
                Some(BridgeEvent::Log {
                    level,
                    url,
                    message,
                }) => forward_log(&level, url.as_deref(), &message),
                Some(BridgeEvent::Fatal { error }) => return Err(AuditError::Bridge(error)),
                Some(BridgeEvent::Ready) | None => {}
            }
        }
    }
}

/// Parses one bridge output line; non-protocol output is logged and skipped
fn parse_event(line: &str) -> Option<BridgeEvent> {
    match serde_json::from_str(line) {
        Ok(event) => Some(event),
        Err(_) => {
            if !line.trim().is_empty() {
                tracing::debug!("pa11y bridge: {}", line);
            }
            None
        }
    }
}

/// Forwards a pa11y log line to tracing
fn forward_log(level: &str, url: Option<&str>, message: &str) {
    let url = url.unwrap_or("-");
    match level {
        "error" => tracing::error!(url = %url, "{}", message),
        "info" => tracing::info!(url = %url, "{}", message),
        _ => tracing::debug!(url = %url, "{}", message),
    }
}
