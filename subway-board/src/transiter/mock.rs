//! Mock Transiter client for testing without network access.
//!
//! Serves route and stop responses from JSON fixtures, either loaded from
//! a directory or registered in memory. Individual paths can be made to
//! fail or to respond slowly, which is how partial upstream outages are
//! exercised.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::StopId;

use super::error::UpstreamError;
use super::types::{RouteResponse, StopResponse};

/// Mock client keyed by request path (`routes/A`, `stops/A09N`).
#[derive(Debug, Clone, Default)]
pub struct MockTransitApi {
    responses: HashMap<String, Value>,
    failing: HashSet<String>,
    delays: HashMap<String, Duration>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockTransitApi {
    /// Create an empty mock. Every request answers "not found".
    pub fn new() -> Self {
        Self::default()
    }

    /// Load fixtures from a directory.
    ///
    /// Expects `routes/{code}.json` and `stops/{stop_id}.json`; either
    /// subdirectory may be missing.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, UpstreamError> {
        let data_dir = data_dir.as_ref();
        let mut mock = Self::new();

        for kind in ["routes", "stops"] {
            let dir = data_dir.join(kind);
            if !dir.is_dir() {
                continue;
            }

            let entries = std::fs::read_dir(&dir).map_err(|e| {
                UpstreamError::Mock(format!("failed to read {}: {e}", dir.display()))
            })?;

            for entry in entries {
                let path = entry
                    .map_err(|e| UpstreamError::Mock(format!("failed to read entry: {e}")))?
                    .path();
                if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                    continue;
                }

                let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };

                let json = std::fs::read_to_string(&path).map_err(|e| {
                    UpstreamError::Mock(format!("failed to read {}: {e}", path.display()))
                })?;
                let value: Value = serde_json::from_str(&json).map_err(|e| {
                    UpstreamError::Mock(format!("failed to parse {}: {e}", path.display()))
                })?;

                mock.responses.insert(format!("{kind}/{key}"), value);
            }
        }

        if mock.responses.is_empty() {
            return Err(UpstreamError::Mock(format!(
                "no fixtures found in {}",
                data_dir.display()
            )));
        }

        Ok(mock)
    }

    /// Register a route whose metadata carries the given short name.
    pub fn with_route(self, code: &str, short_name: &str) -> Self {
        self.with_route_json(
            code,
            serde_json::json!({ "id": code, "shortName": short_name }),
        )
    }

    /// Register a raw route body.
    pub fn with_route_json(mut self, code: &str, body: Value) -> Self {
        self.responses.insert(format!("routes/{code}"), body);
        self
    }

    /// Register a raw stop body for a stop id (without `/realtime`).
    pub fn with_stop_json(mut self, stop_id: &str, body: Value) -> Self {
        self.responses.insert(format!("stops/{stop_id}"), body);
        self
    }

    /// Make requests for a path fail as a network error would.
    pub fn failing(mut self, path: &str) -> Self {
        self.failing.insert(path.to_string());
        self
    }

    /// Delay responses for a path.
    pub fn delayed(mut self, path: &str, delay: Duration) -> Self {
        self.delays.insert(path.to_string(), delay);
        self
    }

    /// Paths requested so far, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Get route metadata by service code.
    pub async fn get_route(&self, code: &str) -> Result<RouteResponse, UpstreamError> {
        self.respond(&format!("routes/{code}"), None).await
    }

    /// Get a stop board.
    ///
    /// Realtime queries are logged with their suffix but served from the
    /// fixture of the clean id.
    pub async fn get_stop(&self, stop: &StopId) -> Result<StopResponse, UpstreamError> {
        let path = format!("stops/{}", stop.query_path());
        let fixture = format!("stops/{}", stop.as_str());
        self.respond(&path, Some(&fixture)).await
    }

    async fn respond<T: DeserializeOwned>(
        &self,
        path: &str,
        fixture: Option<&str>,
    ) -> Result<T, UpstreamError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(path.to_string());
        }

        let fixture = fixture.unwrap_or(path);

        if let Some(delay) = self.delays.get(path).or_else(|| self.delays.get(fixture)) {
            tokio::time::sleep(*delay).await;
        }

        if self.failing.contains(path) || self.failing.contains(fixture) {
            return Err(UpstreamError::Mock(format!("simulated failure for {path}")));
        }

        let body = self
            .responses
            .get(fixture)
            .ok_or_else(|| UpstreamError::NotFound(path.to_string()))?;

        serde_json::from_value(body.clone()).map_err(|e| UpstreamError::Json {
            message: e.to_string(),
            body: Some(body.to_string().chars().take(500).collect()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stop(s: &str) -> StopId {
        StopId::parse(s).unwrap()
    }

    #[tokio::test]
    async fn serves_registered_route() {
        let mock = MockTransitApi::new().with_route("A", "A");
        let route = mock.get_route("A").await.unwrap();
        assert_eq!(route.short_name.as_deref(), Some("A"));
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let mock = MockTransitApi::new();
        let err = mock.get_stop(&stop("Z99")).await.unwrap_err();
        assert!(matches!(err, UpstreamError::NotFound(_)));
    }

    #[tokio::test]
    async fn realtime_query_uses_clean_fixture() {
        let mock = MockTransitApi::new().with_stop_json("A09", json!({"name": "168 St"}));
        let board = mock.get_stop(&stop("A09/realtime")).await.unwrap();
        assert_eq!(board.name.as_deref(), Some("168 St"));
        assert_eq!(mock.requests(), ["stops/A09/realtime"]);
    }

    #[tokio::test]
    async fn failing_path() {
        let mock = MockTransitApi::new()
            .with_stop_json("A09N", json!({"name": "168 St"}))
            .failing("stops/A09N");
        let err = mock.get_stop(&stop("A09N")).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Mock(_)));
    }

    #[tokio::test]
    async fn malformed_body_is_json_error() {
        let mock = MockTransitApi::new().with_stop_json("A09", json!({"stopTimes": "nope"}));
        let err = mock.get_stop(&stop("A09")).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Json { .. }));
    }

    #[tokio::test]
    async fn records_requests_in_order() {
        let mock = MockTransitApi::new();
        let _ = mock.get_route("GS").await;
        let _ = mock.get_stop(&stop("101")).await;
        assert_eq!(mock.requests(), ["routes/GS", "stops/101"]);
    }

    #[test]
    fn load_fixture_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("routes")).unwrap();
        std::fs::write(
            dir.path().join("routes").join("A.json"),
            r#"{"id": "A", "shortName": "A"}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("routes").join("notes.txt"), "ignored").unwrap();

        let mock = MockTransitApi::from_dir(dir.path()).unwrap();
        assert_eq!(mock.responses.len(), 1);
        assert!(mock.responses.contains_key("routes/A"));
    }

    #[test]
    fn empty_fixture_dir_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(MockTransitApi::from_dir(dir.path()).is_err());
    }

    #[test]
    fn bundled_fixtures_load() {
        let mock = MockTransitApi::from_dir("data/mock").unwrap();
        assert!(mock.responses.contains_key("stops/A09"));
        assert!(mock.responses.contains_key("routes/A"));
    }
}
