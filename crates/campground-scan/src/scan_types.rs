use std::path::PathBuf;

use chrono::{Month, NaiveDate};
use serde::Serialize;

/// Custom error type for scan operations.
///
/// Every variant is fatal to a run: they are raised before any campground is checked.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Settings file does not exist
    #[error(
        "settings file {} not found. Copy settings.yaml.template to settings.yaml and configure it",
        .path.display()
    )]
    ConfigNotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// Settings file exists but could not be read
    #[error("failed to read settings file {}: {source}", .path.display())]
    ConfigRead {
        /// Path of the settings file
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid YAML
    #[error("error reading settings: {0}")]
    ConfigParse(String),

    /// Settings are valid YAML but do not match the expected schema
    #[error("{0}")]
    Validation(String),
}

/// A configured site that can be booked on a given date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteHit {
    /// Site label as written in the settings
    pub site: String,
    /// Site label as reported by recreation.gov, e.g. "012" for a configured "12"
    pub source_site: String,
    /// The available night
    pub date: NaiveDate,
}

/// What a month looked like for one campground
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "sites", rename_all = "snake_case")]
pub enum MonthOutcome {
    /// At least one configured site is bookable on a candidate date
    Available(Vec<SiteHit>),
    /// Nothing bookable, but some dates have not been released yet
    NotYetReleased,
    /// Nothing bookable and nothing pending release (or no data could be fetched)
    NoSitesFound,
}

impl MonthOutcome {
    /// Collapse the scan of a month into its outcome.
    pub fn from_scan(hits: Vec<SiteHit>, saw_not_yet_released: bool) -> Self {
        if !hits.is_empty() {
            MonthOutcome::Available(hits)
        } else if saw_not_yet_released {
            MonthOutcome::NotYetReleased
        } else {
            MonthOutcome::NoSitesFound
        }
    }

    /// Bookable sites, empty for the negative outcomes
    pub fn hits(&self) -> &[SiteHit] {
        match self {
            MonthOutcome::Available(hits) => hits,
            _ => &[],
        }
    }
}

/// Outcome of one month for one campground
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthReport {
    /// Month number (5 for May ... 9 for September)
    pub month: u32,
    /// What was found
    pub outcome: MonthOutcome,
    /// Why the month could not be fetched, when it could not
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_error: Option<String>,
}

impl MonthReport {
    /// Report for a month whose availability was fetched
    pub fn fetched(month: u32, outcome: MonthOutcome) -> Self {
        Self {
            month,
            outcome,
            fetch_error: None,
        }
    }

    /// Report for a month whose fetch failed; nothing can be shown for it
    pub fn failed(month: u32, error: impl ToString) -> Self {
        Self {
            month,
            outcome: MonthOutcome::NoSitesFound,
            fetch_error: Some(error.to_string()),
        }
    }

    /// English month name, e.g. "August"
    pub fn month_name(&self) -> &'static str {
        month_name(self.month)
    }
}

/// Full result of checking one campground
#[derive(Debug, Clone, Serialize)]
pub struct CampgroundReport {
    /// Campground ID from the settings
    pub campground_id: String,
    /// Display name, or a placeholder when the lookup failed
    pub name: String,
    /// Public recreation.gov page
    pub url: String,
    /// Season year that was checked
    pub year: i32,
    /// One entry per month that had candidate dates, in month order
    pub months: Vec<MonthReport>,
}

impl CampgroundReport {
    /// Total bookable (site, date) pairs across all months
    pub fn available_count(&self) -> usize {
        self.months.iter().map(|m| m.outcome.hits().len()).sum()
    }
}

/// English name of a month number
pub fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or("Unknown")
}
