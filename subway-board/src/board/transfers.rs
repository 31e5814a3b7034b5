//! Transfers available from a stop.

use std::time::Duration;

use tracing::debug;

use crate::domain::{StopId, TransferRecord, strip_realtime};
use crate::transiter::{StopReference, StopResponse, TransitApi};

use super::upstream::attempt;

/// Placeholder for a transfer endpoint reported without a name.
pub const UNKNOWN_STATION: &str = "Unknown Station";

/// Stop id prefixes whose route code is not their lower-cased first
/// character, checked in order.
const PREFIX_CODES: [(&str, &str); 3] = [("FS", "fs"), ("H", "h"), ("S", "s")];

/// Lower-cased route code for a transfer endpoint.
pub fn route_code_for(stop_id: &str) -> Option<String> {
    if let Some((_, code)) = PREFIX_CODES.iter().find(|(p, _)| stop_id.starts_with(p)) {
        return Some(code.to_string());
    }
    let first = stop_id.chars().next()?;
    Some(first.to_lowercase().collect())
}

/// Turn the upstream transfer list into records.
///
/// Edges missing either endpoint id are skipped.
pub fn normalize(board: &StopResponse) -> Vec<TransferRecord> {
    board
        .transfers()
        .iter()
        .filter_map(|t| {
            let from = endpoint(t.from_stop.as_ref())?;
            let to = endpoint(t.to_stop.as_ref())?;
            let (Some(from_route_code), Some(to_route_code)) =
                (route_code_for(&from.0), route_code_for(&to.0))
            else {
                return None;
            };

            Some(TransferRecord {
                from_stop_name: from.1,
                to_stop_name: to.1,
                from_route_code,
                to_route_code,
                from_stop_id: from.0,
                to_stop_id: to.0,
                transfer_type: t.transfer_type.clone(),
                min_transfer_time: t.min_transfer_time,
            })
        })
        .collect()
}

/// (clean id, name) of one endpoint.
fn endpoint(stop: Option<&StopReference>) -> Option<(String, String)> {
    let Some(id) = stop.and_then(|s| s.id.as_deref()).filter(|id| !id.is_empty()) else {
        debug!("skipping transfer without endpoint id");
        return None;
    };
    let name = stop
        .and_then(|s| s.name.clone())
        .unwrap_or_else(|| UNKNOWN_STATION.to_string());
    Some((strip_realtime(id), name))
}

/// Resolves the transfers of a stop.
pub struct TransferResolver<'a, A> {
    api: &'a A,
    timeout: Duration,
}

impl<'a, A: TransitApi> TransferResolver<'a, A> {
    pub fn new(api: &'a A, timeout: Duration) -> Self {
        Self { api, timeout }
    }

    /// Transfers from `stop`; empty if the upstream fails.
    pub async fn resolve(&self, stop: &StopId) -> Vec<TransferRecord> {
        let clean = stop.clean();
        match attempt("transfers", clean.as_str(), self.timeout, self.api.stop(&clean)).await {
            Ok(board) => normalize(&board),
            Err(_) => Vec::new(),
        }
    }
}
