use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the venue routing library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Venue description file could not be located at the resolved path.
    #[error("venue description not found at {path}")]
    VenueNotFound { path: PathBuf },

    /// Two nodes in the venue description share an identifier.
    #[error("duplicate node id: {id}")]
    DuplicateNode { id: String },

    /// An edge references a node id that is not part of the venue.
    #[error("edge {from} -> {to} references unknown node {missing}")]
    UnknownNode {
        from: String,
        to: String,
        missing: String,
    },

    /// Node coordinates must be finite numbers.
    #[error("node {id} has non-finite coordinates ({lat}, {lng})")]
    InvalidNodePosition { id: String, lat: f64, lng: f64 },

    /// Edge distances must be finite and strictly positive.
    #[error("edge {from} -> {to} has invalid distance {distance}; expected a positive number")]
    InvalidDistance {
        from: String,
        to: String,
        distance: f64,
    },

    /// Edge risk factors must lie in `[0, 1]`.
    #[error("edge {from} -> {to} has invalid risk factor {risk_factor}; expected 0.0..=1.0")]
    InvalidRiskFactor {
        from: String,
        to: String,
        risk_factor: f64,
    },

    /// The crowd penalty coefficient must be finite and strictly positive.
    #[error("invalid crowd penalty coefficient {value}; expected a positive number")]
    InvalidCrowdPenalty { value: f64 },

    /// A query required coordinate resolution but the venue has no nodes.
    #[error("venue graph is empty; cannot resolve coordinates to a node")]
    EmptyGraph,

    /// A route query supplied neither a destination coordinate nor a category.
    #[error("route query requires a destination coordinate or a target category")]
    MissingDestination,

    /// A route query supplied only one half of the destination coordinate.
    #[error("destination coordinate requires both latitude and longitude")]
    IncompleteCoordinate,

    /// Coordinates supplied by a caller must be finite numbers.
    #[error("coordinate ({lat}, {lng}) is not a finite position")]
    InvalidCoordinate { lat: f64, lng: f64 },

    /// Raised when a category name could not be parsed.
    #[error("unknown category: {name}; expected one of entry, stage, food, medical, exit, path")]
    UnknownCategory { name: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for venue description parse errors.
    #[error("failed to parse venue description: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error was caused by the caller's query rather than the
    /// loaded venue or its configuration.
    pub fn is_invalid_query(&self) -> bool {
        matches!(
            self,
            Error::MissingDestination
                | Error::IncompleteCoordinate
                | Error::InvalidCoordinate { .. }
                | Error::UnknownCategory { .. }
        )
    }
}
