use std::sync::Arc;

use chrono::NaiveDate;
use rec_gov::{AvailabilitySource, AvailabilityStatus, CampsiteAvailability};
use tracing::{debug, info, warn};

use crate::scan_types::{MonthOutcome, MonthReport, SiteHit};
use crate::season::group_by_month;
use crate::settings::CampgroundSpec;

/// Site label with leading zeros removed; all-zero labels become "0".
pub fn normalize_site_label(label: &str) -> &str {
    let trimmed = label.trim_start_matches('0');
    if trimmed.is_empty() { "0" } else { trimmed }
}

/// Checks configured sites against monthly availability
pub struct AvailabilityEvaluator {
    source: Arc<dyn AvailabilitySource>,
}

impl AvailabilityEvaluator {
    /// Create an evaluator fetching from `source`
    pub fn new(source: Arc<dyn AvailabilitySource>) -> Self {
        Self { source }
    }

    /// Evaluate every month that has candidate dates.
    ///
    /// A failed fetch only affects its own month, which is reported as
    /// [`MonthOutcome::NoSitesFound`] with the error kept in
    /// [`MonthReport::fetch_error`].
    pub async fn evaluate(
        &self,
        campground: &CampgroundSpec,
        year: i32,
        dates: &[NaiveDate],
    ) -> Vec<MonthReport> {
        let mut months = Vec::new();

        for (month, month_dates) in group_by_month(dates) {
            let report = match self.source.fetch_month(&campground.id, month, year).await {
                Ok(campsites) => MonthReport::fetched(
                    month,
                    evaluate_month(&campground.sites, &campsites, &month_dates),
                ),
                Err(e) => {
                    warn!(
                        "Recoverable: no data for campground {} in {}/{}: {}",
                        campground.id, month, year, e
                    );
                    MonthReport::failed(month, e)
                }
            };

            for hit in report.outcome.hits() {
                info!(
                    "Available: {} - {} - {}",
                    campground.id, hit.source_site, hit.date
                );
            }

            months.push(report);
        }

        months
    }
}

/// Outcome of one month given the fetched campsites and that month's candidate dates
pub fn evaluate_month(
    configured_sites: &[String],
    campsites: &[CampsiteAvailability],
    dates: &[NaiveDate],
) -> MonthOutcome {
    let mut hits = Vec::new();
    let mut saw_not_yet_released = false;

    for campsite in campsites {
        let site = normalize_site_label(&campsite.site);
        let Some(configured) = configured_sites
            .iter()
            .find(|configured| normalize_site_label(configured) == site)
        else {
            continue;
        };

        for &date in dates {
            match campsite.status_on(date) {
                Some(status) if status.is_available() => hits.push(SiteHit {
                    site: configured.clone(),
                    source_site: campsite.site.clone(),
                    date,
                }),
                Some(AvailabilityStatus::NotYetReleased) => saw_not_yet_released = true,
                Some(status) => debug!("Site {} on {}: {}", campsite.site, date, status),
                None => {}
            }
        }
    }

    MonthOutcome::from_scan(hits, saw_not_yet_released)
}
