use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Errors returned by the recreation.gov client
#[derive(thiserror::Error, Debug)]
pub enum RecGovError {
    /// The API rejected the request (HTTP 400), usually an invalid campground ID
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Campground not found (HTTP 404)
    #[error("Campground not found")]
    NotFound,

    /// Rate limited by recreation.gov (HTTP 429)
    #[error("Rate limited by recreation.gov")]
    RateLimited,

    /// Any other non-success HTTP status
    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    /// The request did not complete within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Transport level failure (DNS, TLS, connection reset...)
    #[error("Network error: {0}")]
    Network(String),

    /// The response body could not be decoded
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// A request parameter could not be built
    #[error("Data format error: {0}")]
    DataFormat(String),
}

impl RecGovError {
    /// Maps a reqwest transport error, keeping timeouts distinguishable.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RecGovError::Timeout
        } else {
            RecGovError::Network(err.to_string())
        }
    }
}

/// Availability status of one campsite on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AvailabilityStatus {
    /// Bookable right now
    Available,
    /// Not yet released ("NYR"): the booking window has not opened
    NotYetReleased,
    /// Already booked
    Reserved,
    /// Closed or otherwise unavailable
    NotAvailable,
    /// Exists but cannot be reserved online
    NotReservable,
    /// First-come first-served only
    WalkUp,
    /// Any status string we do not recognise
    Other(String),
}

impl AvailabilityStatus {
    /// Parse a status string from the availability payload.
    pub fn parse(status: &str) -> Self {
        match status {
            "Available" => AvailabilityStatus::Available,
            "NYR" => AvailabilityStatus::NotYetReleased,
            "Reserved" => AvailabilityStatus::Reserved,
            "Not Available" => AvailabilityStatus::NotAvailable,
            "Not Reservable" | "Not Reservable Management" => AvailabilityStatus::NotReservable,
            "Walk-up" => AvailabilityStatus::WalkUp,
            other => AvailabilityStatus::Other(other.to_string()),
        }
    }

    /// Only `Available` counts as a bookable site.
    pub fn is_available(&self) -> bool {
        matches!(self, AvailabilityStatus::Available)
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvailabilityStatus::Available => f.write_str("Available"),
            AvailabilityStatus::NotYetReleased => f.write_str("NYR"),
            AvailabilityStatus::Reserved => f.write_str("Reserved"),
            AvailabilityStatus::NotAvailable => f.write_str("Not Available"),
            AvailabilityStatus::NotReservable => f.write_str("Not Reservable"),
            AvailabilityStatus::WalkUp => f.write_str("Walk-up"),
            AvailabilityStatus::Other(raw) => f.write_str(raw),
        }
    }
}

/// Key used by the availability payload for a given day, e.g. `2025-08-16T00:00:00Z`.
pub fn availability_key(date: NaiveDate) -> String {
    format!("{}T00:00:00Z", date.format("%Y-%m-%d"))
}

/// Availability of a single campsite for one month.
#[derive(Debug, Clone, Serialize)]
pub struct CampsiteAvailability {
    /// recreation.gov internal campsite ID
    pub campsite_id: String,
    /// Site label shown to campers, e.g. "012"
    pub site: String,
    /// Loop the site belongs to, when reported
    pub campsite_loop: Option<String>,
    /// Raw status strings keyed by `YYYY-MM-DDT00:00:00Z`
    pub availabilities: HashMap<String, String>,
}

impl CampsiteAvailability {
    /// Status for `date`, or `None` when the payload has no entry for that day.
    pub fn status_on(&self, date: NaiveDate) -> Option<AvailabilityStatus> {
        self.availabilities
            .get(&availability_key(date))
            .map(|status| AvailabilityStatus::parse(status))
    }
}

/// Response structure from the monthly campground availability endpoint
#[derive(Debug, Deserialize)]
pub struct MonthAvailabilityResponse {
    /// Campsites keyed by campsite ID
    pub campsites: HashMap<String, CampsiteAvailabilityData>,
}

/// Campsite availability data from the monthly endpoint
#[derive(Debug, Deserialize)]
pub struct CampsiteAvailabilityData {
    /// Internal campsite ID
    pub campsite_id: Option<String>,
    /// Site label
    pub site: String,
    /// Loop name
    #[serde(rename = "loop")]
    pub campsite_loop: Option<String>,
    /// Status strings keyed by day
    #[serde(default)]
    pub availabilities: HashMap<String, String>,
}

impl MonthAvailabilityResponse {
    /// Flatten the payload into records ordered by site label.
    pub fn into_campsites(self) -> Vec<CampsiteAvailability> {
        let mut campsites: Vec<CampsiteAvailability> = self
            .campsites
            .into_iter()
            .map(|(key, data)| CampsiteAvailability {
                campsite_id: data.campsite_id.unwrap_or(key),
                site: data.site,
                campsite_loop: data.campsite_loop,
                availabilities: data.availabilities,
            })
            .collect();

        campsites.sort_by(|a, b| {
            a.site
                .cmp(&b.site)
                .then_with(|| a.campsite_id.cmp(&b.campsite_id))
        });
        campsites
    }
}

/// Response structure from the campground details endpoint
#[derive(Debug, Deserialize)]
pub struct CampgroundDetailsResponse {
    /// Campground details
    pub campground: CampgroundDetails,
}

/// The subset of campground details we use
#[derive(Debug, Deserialize)]
pub struct CampgroundDetails {
    /// Display name, e.g. "Upper Pines"
    pub facility_name: String,
}
