//! HTTP client for the zone service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, error, info};
use zonekit_core::FeatureCollection;

use crate::error::FetchError;

/// Anything that can produce the current zone feature collection.
#[async_trait]
pub trait FeatureSource: Send + Sync {
    /// Fetch the current collection.
    async fn fetch(&self) -> Result<FeatureCollection, FetchError>;

    /// Fetch the current collection, degrading to an empty one on failure.
    async fn fetch_or_empty(&self) -> FeatureCollection {
        match self.fetch().await {
            Ok(collection) => collection,
            Err(e) => {
                error!("Failed to fetch zones: {}", e);
                FeatureCollection::empty()
            }
        }
    }
}

/// Fetches zones with `GET {base_url}{polygons_path}`.
#[derive(Debug, Clone)]
pub struct PolygonClient {
    http: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl PolygonClient {
    /// Creates a client for an explicit endpoint URL.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: url.into(),
            timeout,
        })
    }

    /// Creates a client from a service root and endpoint path.
    pub fn from_parts(
        base_url: &str,
        polygons_path: &str,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let base = base_url.trim_end_matches('/');
        let path = polygons_path.trim_start_matches('/');
        Self::new(format!("{}/{}", base, path), timeout)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn request(&self) -> Result<FeatureCollection, FetchError> {
        let response = self
            .http
            .get(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body = response.text().await.map_err(|e| self.classify(e))?;
        let collection: FeatureCollection = serde_json::from_str(&body)?;
        Ok(collection)
    }

    fn classify(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::Http(e)
        }
    }
}

#[async_trait]
impl FeatureSource for PolygonClient {
    async fn fetch(&self) -> Result<FeatureCollection, FetchError> {
        debug!(url = %self.url, "Fetching zones");
        let collection = tokio::time::timeout(self.timeout, self.request())
            .await
            .map_err(|_| FetchError::Timeout(self.timeout))??;
        info!(count = collection.len(), "Fetched zones");
        Ok(collection)
    }
}
