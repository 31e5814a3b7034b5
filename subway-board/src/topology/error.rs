//! Trunk topology error types.

use std::path::PathBuf;

/// Errors from loading or validating a trunk table.
#[derive(Debug, thiserror::Error)]
pub enum TopologyError {
    /// The table file could not be read
    #[error("failed to read trunk table {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The table is not valid JSON for a trunk table
    #[error("trunk table JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A service code is listed under two trunks
    #[error("service {code} listed under both {first} and {second}")]
    DuplicateService {
        code: String,
        first: String,
        second: String,
    },

    /// Two trunks share a name
    #[error("trunk {0} is listed twice")]
    DuplicateTrunk(String),

    /// A stop id is overridden to two different service codes
    #[error("stop {stop_id} overridden to both {first} and {second}")]
    DuplicateOverride {
        stop_id: String,
        first: String,
        second: String,
    },

    /// An override names a service code no trunk carries
    #[error("stop {stop_id} overridden to unknown service {service}")]
    UnknownOverrideService { stop_id: String, service: String },
}
