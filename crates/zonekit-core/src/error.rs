//! Error handling for ZoneKit
//!
//! - Geometry errors (empty vertex lists, bad indices, degenerate scales)
//! - Feature errors (unknown or malformed zone records)
//!
//! All error types use `thiserror`. None of them is fatal for the editor:
//! callers log and carry on with the previous state.

use thiserror::Error;

/// Geometry error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// An operation that needs at least one vertex got none
    #[error("Vertex list is empty")]
    EmptyVertexList,

    /// A vertex index points past the end of the vertex list
    #[error("Vertex index {index} out of range for a polygon with {len} vertices")]
    VertexOutOfRange {
        /// The requested vertex index.
        index: usize,
        /// The number of vertices of the polygon.
        len: usize,
    },

    /// Not enough vertices to build a polygon
    #[error("Polygon needs at least {min} vertices, got {actual}")]
    TooFewVertices {
        /// The minimum number of vertices.
        min: usize,
        /// The number of vertices supplied.
        actual: usize,
    },

    /// Image scale factors must be finite and strictly positive
    #[error("Invalid image scale {scale_width}x{scale_height}")]
    InvalidScale {
        /// Horizontal display-to-natural ratio.
        scale_width: f64,
        /// Vertical display-to-natural ratio.
        scale_height: f64,
    },
}

/// Feature error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeatureError {
    /// No record with this identifier
    #[error("Unknown zone: {id}")]
    UnknownFeature {
        /// The identifier that was looked up.
        id: String,
    },

    /// A record could not be interpreted
    #[error("Malformed zone {id}: {reason}")]
    MalformedFeature {
        /// The identifier of the record.
        id: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// Main error type for ZoneKit
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Feature error
    #[error(transparent)]
    Feature(#[from] FeatureError),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }

    /// Check if this is a feature error
    pub fn is_feature_error(&self) -> bool {
        matches!(self, Error::Feature(_))
    }
}

/// Result type for ZoneKit operations
pub type Result<T> = std::result::Result<T, Error>;
