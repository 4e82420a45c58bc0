use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::source::{AvailabilitySource, NameSource};
use crate::types::*;

/// Public page for a campground, shown next to each report.
pub const CAMPGROUND_PAGE_URL: &str = "https://www.recreation.gov/camping/campgrounds";

/// Link to the public recreation.gov page of a campground
pub fn campground_url(campground_id: &str) -> String {
    format!(
        "{}/{}",
        CAMPGROUND_PAGE_URL,
        urlencoding::encode(campground_id)
    )
}

/// Settings for [`RecGovClient`]
#[derive(Debug, Clone)]
pub struct RecGovConfig {
    /// Base URL of the camps API (default: https://www.recreation.gov/api/camps)
    pub base_url: String,

    /// Per-request timeout (default: 30 seconds)
    pub timeout: Duration,

    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for RecGovConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.recreation.gov/api/camps".to_string(),
            timeout: Duration::from_secs(30),
            user_agent: "Mozilla/5.0".to_string(),
        }
    }
}

impl RecGovConfig {
    /// Defaults overridden by `RECGOV_API_BASE` and `RECGOV_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(base_url) = lookup("RECGOV_API_BASE") {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }

        if let Some(raw) = lookup("RECGOV_TIMEOUT_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => warn!(
                    "Ignoring invalid RECGOV_TIMEOUT_SECS '{}', using {:?}",
                    raw, config.timeout
                ),
            }
        }

        config
    }
}

/// Client for interacting with the recreation.gov camps API
#[derive(Debug, Clone)]
pub struct RecGovClient {
    client: Client,
    base_url: String,
}

impl RecGovClient {
    /// Create a new recreation.gov API client
    pub fn new(config: RecGovConfig) -> Result<Self, RecGovError> {
        let client = Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()
            .map_err(|e| RecGovError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    /// URL of the monthly availability endpoint for a campground
    pub fn month_url(&self, campground_id: &str) -> String {
        format!(
            "{}/availability/campground/{}/month",
            self.base_url,
            urlencoding::encode(campground_id)
        )
    }

    /// URL of the campground details endpoint
    pub fn campground_details_url(&self, campground_id: &str) -> String {
        format!(
            "{}/campgrounds/{}",
            self.base_url,
            urlencoding::encode(campground_id)
        )
    }

    /// Get availability of every campsite in a campground for one month
    pub async fn get_month_availability(
        &self,
        campground_id: &str,
        month: u32,
        year: i32,
    ) -> Result<Vec<CampsiteAvailability>, RecGovError> {
        debug!(
            "Fetching data for campground {}, month {}/{}",
            campground_id, month, year
        );

        let url = self.month_url(campground_id);
        let params = [("start_date", month_start_param(month, year)?)];

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(RecGovError::from_transport)?;

        let month_response: MonthAvailabilityResponse = decode(check_status(response).await?).await?;
        let campsites = month_response.into_campsites();

        debug!(
            "Successfully fetched {} campsites for {}",
            campsites.len(),
            campground_id
        );

        Ok(campsites)
    }

    /// Get the display name of a campground
    pub async fn get_campground_name(&self, campground_id: &str) -> Result<String, RecGovError> {
        debug!("Getting campground details for {}", campground_id);

        let response = self
            .client
            .get(self.campground_details_url(campground_id))
            .send()
            .await
            .map_err(RecGovError::from_transport)?;

        let details: CampgroundDetailsResponse = decode(check_status(response).await?).await?;
        Ok(details.campground.facility_name)
    }
}

#[async_trait::async_trait]
impl AvailabilitySource for RecGovClient {
    async fn fetch_month(
        &self,
        campground_id: &str,
        month: u32,
        year: i32,
    ) -> Result<Vec<CampsiteAvailability>, RecGovError> {
        self.get_month_availability(campground_id, month, year)
            .await
    }
}

#[async_trait::async_trait]
impl NameSource for RecGovClient {
    async fn fetch_campground_name(&self, campground_id: &str) -> Result<String, RecGovError> {
        self.get_campground_name(campground_id).await
    }
}

/// `start_date` query value: first day of the month at midnight UTC, e.g. `2025-08-01T00:00:00.000Z`.
pub fn month_start_param(month: u32, year: i32) -> Result<String, RecGovError> {
    let month_start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| RecGovError::DataFormat(format!("Invalid month {}/{}", month, year)))?;

    Ok(format!("{}T00:00:00.000Z", month_start.format("%Y-%m-%d")))
}

async fn check_status(response: Response) -> Result<Response, RecGovError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unable to read response body".to_string());
    warn!("API request failed with status {}: {}", status, body);

    match status.as_u16() {
        400 => Err(RecGovError::InvalidRequest(body)),
        404 => Err(RecGovError::NotFound),
        429 => Err(RecGovError::RateLimited),
        code => Err(RecGovError::Status(code)),
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, RecGovError> {
    response.json::<T>().await.map_err(|e| {
        if e.is_decode() {
            RecGovError::Parse(e.to_string())
        } else {
            RecGovError::from_transport(e)
        }
    })
}
