//! Headway records.

use serde::Serialize;

/// Headway statistics for one route at a stop.
///
/// Either value may be unreported. Zero is a real observation and is kept
/// distinct from `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadwayRecord {
    pub route_id: String,
    /// Scheduled headway in seconds.
    pub scheduled_seconds: Option<f64>,
    /// Observed headway in seconds.
    pub observed_seconds: Option<f64>,
}
