//! Headway statistics for a stop.

use std::time::Duration;

use crate::domain::{HeadwayRecord, StopId};
use crate::transiter::{StopResponse, TransitApi};

use super::upstream::attempt;

/// One record per route entry that reports headways.
pub fn normalize(board: &StopResponse) -> Vec<HeadwayRecord> {
    board
        .route_stats()
        .iter()
        .filter_map(|stats| {
            let headways = stats.headways.as_ref()?;
            let route_id = stats.route.as_ref()?.id.clone()?;
            Some(HeadwayRecord {
                route_id,
                scheduled_seconds: headways.scheduled,
                observed_seconds: headways.observed,
            })
        })
        .collect()
}

/// Resolves the headways of a stop.
pub struct HeadwayResolver<'a, A> {
    api: &'a A,
    timeout: Duration,
}

impl<'a, A: TransitApi> HeadwayResolver<'a, A> {
    pub fn new(api: &'a A, timeout: Duration) -> Self {
        Self { api, timeout }
    }

    /// Headways at `stop`; empty if the upstream fails.
    pub async fn resolve(&self, stop: &StopId) -> Vec<HeadwayRecord> {
        let clean = stop.clean();
        match attempt("headways", clean.as_str(), self.timeout, self.api.stop(&clean)).await {
            Ok(board) => normalize(&board),
            Err(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transiter::MockTransitApi;
    use serde_json::json;

    #[tokio::test]
    async fn zero_is_kept_distinct_from_missing() {
        let mock = MockTransitApi::new().with_stop_json(
            "A09",
            json!({"data": [
                {"route": {"id": "A"}, "headways": {"scheduled": 480, "observed": "0"}},
                {"route": {"id": "C"}, "headways": {"scheduled": null}},
                {"route": {"id": "E"}}
            ]}),
        );
        let stop = StopId::parse("A09/realtime").unwrap();
        let headways = HeadwayResolver::new(&mock, Duration::from_secs(1))
            .resolve(&stop)
            .await;

        assert_eq!(mock.requests(), ["stops/A09"]);
        assert_eq!(
            headways,
            [
                HeadwayRecord {
                    route_id: "A".to_string(),
                    scheduled_seconds: Some(480.0),
                    observed_seconds: Some(0.0),
                },
                HeadwayRecord {
                    route_id: "C".to_string(),
                    scheduled_seconds: None,
                    observed_seconds: None,
                },
            ]
        );
    }

    #[tokio::test]
    async fn failure_is_empty() {
        let mock = MockTransitApi::new()
            .with_stop_json("A09", json!({}))
            .failing("stops/A09");
        let stop = StopId::parse("A09").unwrap();
        let headways = HeadwayResolver::new(&mock, Duration::from_secs(1))
            .resolve(&stop)
            .await;
        assert!(headways.is_empty());
    }
}
