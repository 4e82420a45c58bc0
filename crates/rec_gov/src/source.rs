use crate::types::{CampsiteAvailability, RecGovError};

/// Anything that can report monthly campsite availability for a campground
#[async_trait::async_trait]
pub trait AvailabilitySource: Send + Sync {
    /// Fetch every campsite's availability for `month`/`year`.
    async fn fetch_month(
        &self,
        campground_id: &str,
        month: u32,
        year: i32,
    ) -> Result<Vec<CampsiteAvailability>, RecGovError>;
}

/// Anything that can look up a campground's display name
#[async_trait::async_trait]
pub trait NameSource: Send + Sync {
    /// Fetch the display name for `campground_id`.
    async fn fetch_campground_name(&self, campground_id: &str) -> Result<String, RecGovError>;
}
