//! Naming module for report output
//!
//! This module derives stable, filesystem-safe names for report files and
//! per-site report folders.

mod file_name;
mod folder;

pub use file_name::{file_name_for, slugify, summary_file_name};
pub use folder::{folder_name_for, hostname_of};

use chrono::{Datelike, Local, NaiveDate};
use std::fmt;

/// Calendar date a site-run started on
///
/// Displayed as `YYYY-M-D`: month and day are not zero-padded, which keeps
/// report file names compatible with earlier runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunDate {
    year: i32,
    month: u32,
    day: u32,
}

impl RunDate {
    /// Creates a run date from its parts
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Returns today's date on the local clock
    pub fn today() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    /// Converts a calendar date
    pub fn from_date(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month(), date.day())
    }
}

impl fmt::Display for RunDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.year, self.month, self.day)
    }
}
