//! # RecGov
//!
//! This crate provides a client for the recreation.gov campground API, which is used to
//! look up campground names and monthly per-site availability.

/// HTTP client for the recreation.gov campground endpoints.
mod client;
pub use client::*;

/// Per-run cache of campground display names.
mod names;
pub use names::*;

/// Traits describing where availability and names come from.
mod source;
pub use source::*;

/// Wire types, availability statuses and errors.
mod types;
pub use types::*;
