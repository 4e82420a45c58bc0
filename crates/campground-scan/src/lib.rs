//! # Campground Scan
//!
//! This crate finds bookable weekend campsites. It loads and validates the user's
//! campground settings, works out which Fridays and Saturdays of the camping season
//! are still ahead, and checks each configured site's availability month by month.

/// Types shared by the scan: errors, month outcomes and campground reports
mod scan_types;
pub use scan_types::*;

/// Loading and validation of the YAML settings file
mod settings;
pub use settings::*;

/// Candidate weekend dates within the camping season
mod season;
pub use season::*;

/// Filtering monthly availability down to configured sites
mod evaluator;
pub use evaluator::*;

/// Per-campground scan combining name lookup and evaluation
mod scanner;
pub use scanner::*;
