//! # ZoneKit Communication
//!
//! Fetches the zone feature collection from the remote zone service.
//! Failures never reach the editor: [`FeatureSource::fetch_or_empty`] logs
//! them and yields an empty collection.

pub mod client;
pub mod error;

pub use client::{FeatureSource, PolygonClient};
pub use error::FetchError;
