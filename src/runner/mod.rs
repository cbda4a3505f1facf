//! Runner module: drives audits across pages and sites
//!
//! This module contains:
//! - The site-run state machine
//! - The orchestrator that audits one site's URL list in one browser session
//! - The driver that runs every configured site in turn

mod driver;
mod orchestrator;
mod state;

pub use driver::{run_all, RunSettings, SiteOutcome};
pub use orchestrator::{run_site, RunContext, RunOutcome};
pub use state::RunState;
