//! Fetch errors.

use std::time::Duration;

use thiserror::Error;

/// Errors raised while fetching the zone feature collection.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport failure: connection refused, DNS, TLS, broken body.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// The request did not complete in time.
    #[error("Request timed out after {} ms", .0.as_millis())]
    Timeout(Duration),

    /// The body is not a feature collection.
    #[error("Malformed feature collection: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Whether retrying later could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(_) | Self::Timeout(_) => true,
            Self::Status { status, .. } => *status >= 500,
            Self::Decode(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = FetchError::Timeout(Duration::from_millis(5000));
        assert_eq!(err.to_string(), "Request timed out after 5000 ms");

        let err = FetchError::Status {
            status: 404,
            url: "http://localhost:42001/api/polygons/geojson".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unexpected status 404 from http://localhost:42001/api/polygons/geojson"
        );
    }

    #[test]
    fn test_transient() {
        assert!(FetchError::Timeout(Duration::from_millis(1)).is_transient());
        assert!(FetchError::Status {
            status: 503,
            url: String::new()
        }
        .is_transient());
        assert!(!FetchError::Status {
            status: 404,
            url: String::new()
        }
        .is_transient());

        let decode = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(!FetchError::from(decode).is_transient());
    }
}
