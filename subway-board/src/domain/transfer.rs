//! Transfer records.

use serde::Serialize;

/// A cross-platform transfer available from a stop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferRecord {
    pub from_stop_name: String,
    pub to_stop_name: String,
    /// Lower-cased route code derived from the origin stop id.
    pub from_route_code: String,
    /// Lower-cased route code derived from the target stop id.
    pub to_route_code: String,
    /// Origin stop id, without any realtime suffix.
    pub from_stop_id: String,
    /// Target stop id, without any realtime suffix.
    pub to_stop_id: String,
    /// Upstream transfer type, when reported.
    pub transfer_type: Option<String>,
    /// Minimum transfer time in seconds, when reported.
    pub min_transfer_time: Option<f64>,
}
