use std::collections::HashMap;

use tracing::{debug, warn};

use crate::source::NameSource;
use crate::types::RecGovError;

/// Campground display names looked up during a single run.
///
/// Failed lookups are cached as their fallback text so a campground listed
/// twice is only requested once.
#[derive(Debug, Default)]
pub struct CampgroundNames {
    cache: HashMap<String, String>,
}

impl CampgroundNames {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of `campground_id`, from cache or from `source`.
    ///
    /// Never fails: lookup errors are replaced by a descriptive placeholder.
    pub async fn resolve(&mut self, source: &dyn NameSource, campground_id: &str) -> String {
        if let Some(name) = self.cache.get(campground_id) {
            debug!("Using cached name for campground {}", campground_id);
            return name.clone();
        }

        let name = match source.fetch_campground_name(campground_id).await {
            Ok(name) => {
                debug!("Fetched name for campground {}: {}", campground_id, name);
                name
            }
            Err(e) => {
                warn!("Could not fetch name for campground {}: {}", campground_id, e);
                fallback_name(campground_id, &e)
            }
        };

        self.cache.insert(campground_id.to_string(), name.clone());
        name
    }

    /// Number of cached names
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Whether nothing has been resolved yet
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

/// Placeholder shown when the name lookup fails.
pub fn fallback_name(campground_id: &str, error: &RecGovError) -> String {
    let reason = match error {
        RecGovError::NotFound => "name not found",
        RecGovError::InvalidRequest(_) | RecGovError::RateLimited | RecGovError::Status(_) => {
            "error fetching name"
        }
        RecGovError::Network(_) | RecGovError::Timeout => "network error",
        RecGovError::Parse(_) | RecGovError::DataFormat(_) => "unexpected error",
    };
    format!("Campground {} ({})", campground_id, reason)
}
