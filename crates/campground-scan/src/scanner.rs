use std::sync::Arc;

use chrono::NaiveDate;
use rec_gov::{AvailabilitySource, CampgroundNames, NameSource, campground_url};
use tracing::info;

use crate::evaluator::AvailabilityEvaluator;
use crate::scan_types::CampgroundReport;
use crate::settings::{CampgroundSpec, Settings};

/// Checks campgrounds one after another, remembering names for the run
pub struct CampgroundScanner {
    evaluator: AvailabilityEvaluator,
    name_source: Arc<dyn NameSource>,
    names: CampgroundNames,
}

impl CampgroundScanner {
    /// Create a scanner over the given sources
    pub fn new(
        availability_source: Arc<dyn AvailabilitySource>,
        name_source: Arc<dyn NameSource>,
    ) -> Self {
        Self {
            evaluator: AvailabilityEvaluator::new(availability_source),
            name_source,
            names: CampgroundNames::new(),
        }
    }

    /// Resolve the campground's name and evaluate each month with candidate dates
    pub async fn scan_campground(
        &mut self,
        campground: &CampgroundSpec,
        year: i32,
        dates: &[NaiveDate],
    ) -> CampgroundReport {
        info!("Checking campground ID: {}", campground.id);

        let name = self
            .names
            .resolve(self.name_source.as_ref(), &campground.id)
            .await;
        let months = self.evaluator.evaluate(campground, year, dates).await;

        CampgroundReport {
            campground_id: campground.id.clone(),
            name,
            url: campground_url(&campground.id),
            year,
            months,
        }
    }

    /// Scan every configured campground in order
    pub async fn scan_all(
        &mut self,
        settings: &Settings,
        year: i32,
        dates: &[NaiveDate],
    ) -> Vec<CampgroundReport> {
        let mut reports = Vec::with_capacity(settings.campgrounds.len());
        for campground in &settings.campgrounds {
            reports.push(self.scan_campground(campground, year, dates).await);
        }
        reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan_types::MonthOutcome;
    use crate::settings::parse_settings;
    use rec_gov::{CampsiteAvailability, RecGovError, availability_key};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Campground "1" is unreachable, every other one has site 5 free on the first date.
    struct MockRecGov {
        availability_calls: AtomicUsize,
        name_calls: AtomicUsize,
    }

    impl MockRecGov {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                availability_calls: AtomicUsize::new(0),
                name_calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait::async_trait]
    impl AvailabilitySource for MockRecGov {
        async fn fetch_month(
            &self,
            campground_id: &str,
            month: u32,
            year: i32,
        ) -> Result<Vec<CampsiteAvailability>, RecGovError> {
            self.availability_calls.fetch_add(1, Ordering::SeqCst);
            if campground_id == "1" {
                return Err(RecGovError::Timeout);
            }
            let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
            Ok(vec![CampsiteAvailability {
                campsite_id: "99".to_string(),
                site: "005".to_string(),
                campsite_loop: None,
                availabilities: [(availability_key(first), "Available".to_string())]
                    .into_iter()
                    .collect(),
            }])
        }
    }

    #[async_trait::async_trait]
    impl NameSource for MockRecGov {
        async fn fetch_campground_name(
            &self,
            campground_id: &str,
        ) -> Result<String, RecGovError> {
            self.name_calls.fetch_add(1, Ordering::SeqCst);
            match campground_id {
                "1" => Err(RecGovError::Timeout),
                id => Ok(format!("Camp {}", id)),
            }
        }
    }

    fn dates() -> Vec<NaiveDate> {
        // Friday 2025-08-01 and Friday 2025-09-05
        vec![
            NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 9, 5).unwrap(),
        ]
    }

    #[tokio::test]
    async fn test_empty_campground_list_yields_no_reports() {
        let rec_gov = MockRecGov::new();
        let mut scanner = CampgroundScanner::new(rec_gov.clone(), rec_gov.clone());
        let settings = parse_settings("campgrounds: []").unwrap();

        let reports = scanner.scan_all(&settings, 2025, &dates()).await;

        assert!(reports.is_empty());
        assert_eq!(rec_gov.availability_calls.load(Ordering::SeqCst), 0);
        assert_eq!(rec_gov.name_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failing_campground_does_not_stop_the_next() {
        let rec_gov = MockRecGov::new();
        let mut scanner = CampgroundScanner::new(rec_gov.clone(), rec_gov.clone());
        let settings = parse_settings(
            r#"
campgrounds:
  - id: 1
    sites: ["5"]
  - id: 2
    sites: ["5"]
  - id: 2
    sites: ["5"]
"#,
        )
        .unwrap();

        let reports = scanner.scan_all(&settings, 2025, &dates()).await;

        assert_eq!(reports.len(), 3);

        assert_eq!(reports[0].name, "Campground 1 (network error)");
        assert!(
            reports[0]
                .months
                .iter()
                .all(|m| m.outcome == MonthOutcome::NoSitesFound
                    && m.fetch_error.as_deref() == Some("Request timed out"))
        );
        assert!(reports[1].months.iter().all(|m| m.fetch_error.is_none()));

        assert_eq!(reports[1].name, "Camp 2");
        assert_eq!(
            reports[1].url,
            "https://www.recreation.gov/camping/campgrounds/2"
        );
        assert_eq!(reports[1].months.len(), 2);
        assert_eq!(reports[1].months[0].outcome.hits()[0].site, "5");
        // September 1st is a Monday, so it is not a candidate date
        assert_eq!(reports[1].months[1].outcome, MonthOutcome::NoSitesFound);

        // Names are cached for the run, availability is always fetched
        assert_eq!(rec_gov.name_calls.load(Ordering::SeqCst), 2);
        assert_eq!(rec_gov.availability_calls.load(Ordering::SeqCst), 6);
    }
}
