//! Route display names.
//!
//! The upstream labels every shuttle with the short name "S"; the requested
//! service code decides which shuttle it is.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use futures::future::join_all;
use tracing::debug;

use crate::cache::RouteNameCache;
use crate::transiter::TransitApi;

use super::upstream::attempt;

/// Name used when a route cannot be resolved. Arrivals carrying it are
/// never shown.
pub const UNKNOWN_TRAIN: &str = "Unknown Train";

/// Short name the upstream gives every shuttle.
pub const SHUTTLE_MARKER: &str = "S";

/// Display name of a shuttle, by the service code it was requested with.
pub fn shuttle_name(code: &str) -> &'static str {
    match code {
        "GS" => "42nd Street Shuttle",
        "FS" => "Franklin Avenue Shuttle",
        "H" => "Rockaway Shuttle",
        _ => "Shuttle",
    }
}

/// Display name for a route given its upstream short name.
pub fn display_name(code: &str, short_name: Option<&str>) -> String {
    match short_name {
        None | Some("") => UNKNOWN_TRAIN.to_string(),
        Some(SHUTTLE_MARKER) => shuttle_name(code).to_string(),
        Some(name) => name.to_string(),
    }
}

/// Resolves service codes to display names for one board.
pub struct RouteNamer<'a, A> {
    api: &'a A,
    timeout: Duration,
    cache: Option<&'a RouteNameCache>,
}

impl<'a, A: TransitApi> RouteNamer<'a, A> {
    pub fn new(api: &'a A, timeout: Duration) -> Self {
        Self {
            api,
            timeout,
            cache: None,
        }
    }

    /// Reuse names resolved by earlier boards.
    pub fn with_cache(mut self, cache: Option<&'a RouteNameCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Display name for one service code. Never fails: an unresolvable
    /// route yields [`UNKNOWN_TRAIN`].
    pub async fn name_for(&self, code: &str) -> String {
        if let Some(cache) = self.cache {
            if let Some(name) = cache.get(code).await {
                return name;
            }
        }

        let name = match attempt("route", code, self.timeout, self.api.route(code)).await {
            Ok(route) => display_name(code, route.short_name.as_deref()),
            Err(_) => UNKNOWN_TRAIN.to_string(),
        };

        match self.cache {
            Some(cache) if name != UNKNOWN_TRAIN => cache.insert(code, name.clone()).await,
            _ => {}
        }

        name
    }

    /// Resolve each distinct code once, concurrently.
    pub async fn names_for<'c>(
        &self,
        codes: impl IntoIterator<Item = &'c str>,
    ) -> HashMap<String, String> {
        let mut seen = HashSet::new();
        let distinct: Vec<&str> = codes.into_iter().filter(|c| seen.insert(*c)).collect();

        debug!(routes = distinct.len(), "resolving route names");

        let names = join_all(distinct.iter().map(|code| self.name_for(code))).await;

        distinct
            .into_iter()
            .map(str::to_string)
            .zip(names)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::RouteCacheConfig;
    use crate::transiter::MockTransitApi;

    const TIMEOUT: Duration = Duration::from_secs(1);

    #[test]
    fn shuttle_names_by_requested_code() {
        assert_eq!(display_name("GS", Some("S")), "42nd Street Shuttle");
        assert_eq!(display_name("FS", Some("S")), "Franklin Avenue Shuttle");
        assert_eq!(display_name("H", Some("S")), "Rockaway Shuttle");
        assert_eq!(display_name("SI", Some("S")), "Shuttle");
    }

    #[test]
    fn plain_and_missing_names() {
        assert_eq!(display_name("A", Some("A")), "A");
        assert_eq!(display_name("6X", Some("6")), "6");
        assert_eq!(display_name("A", None), UNKNOWN_TRAIN);
        assert_eq!(display_name("A", Some("")), UNKNOWN_TRAIN);
    }

    #[tokio::test]
    async fn resolves_from_upstream() {
        let mock = MockTransitApi::new()
            .with_route("GS", "S")
            .with_route("A", "A");
        let namer = RouteNamer::new(&mock, TIMEOUT);

        assert_eq!(namer.name_for("GS").await, "42nd Street Shuttle");
        assert_eq!(namer.name_for("A").await, "A");
    }

    #[tokio::test]
    async fn failures_yield_sentinel() {
        let mock = MockTransitApi::new()
            .with_route("A", "A")
            .failing("routes/A")
            .with_route_json("C", serde_json::json!({"id": "C"}));
        let namer = RouteNamer::new(&mock, TIMEOUT);

        assert_eq!(namer.name_for("A").await, UNKNOWN_TRAIN);
        assert_eq!(namer.name_for("C").await, UNKNOWN_TRAIN);
        assert_eq!(namer.name_for("Z").await, UNKNOWN_TRAIN);
    }

    #[tokio::test]
    async fn slow_route_times_out_to_sentinel() {
        let mock = MockTransitApi::new()
            .with_route("A", "A")
            .delayed("routes/A", Duration::from_millis(500));
        let namer = RouteNamer::new(&mock, Duration::from_millis(20));

        assert_eq!(namer.name_for("A").await, UNKNOWN_TRAIN);
    }

    #[tokio::test]
    async fn distinct_codes_resolved_once() {
        let mock = MockTransitApi::new()
            .with_route("A", "A")
            .with_route("C", "C");
        let namer = RouteNamer::new(&mock, TIMEOUT);

        let names = namer.names_for(["A", "C", "A", "A"]).await;
        assert_eq!(names.len(), 2);
        assert_eq!(names["C"], "C");

        let mut requests = mock.requests();
        requests.sort();
        assert_eq!(requests, ["routes/A", "routes/C"]);
    }

    #[tokio::test]
    async fn cache_skips_upstream_for_known_names() {
        let mock = MockTransitApi::new().with_route("GS", "S");
        let cache = RouteNameCache::new(&RouteCacheConfig::default());
        let namer = RouteNamer::new(&mock, TIMEOUT).with_cache(Some(&cache));

        assert_eq!(namer.name_for("GS").await, "42nd Street Shuttle");
        assert_eq!(namer.name_for("GS").await, "42nd Street Shuttle");
        assert_eq!(mock.requests(), ["routes/GS"]);
    }

    #[tokio::test]
    async fn sentinel_is_not_cached() {
        let mock = MockTransitApi::new();
        let cache = RouteNameCache::new(&RouteCacheConfig::default());
        let namer = RouteNamer::new(&mock, TIMEOUT).with_cache(Some(&cache));

        assert_eq!(namer.name_for("A").await, UNKNOWN_TRAIN);
        assert_eq!(namer.name_for("A").await, UNKNOWN_TRAIN);
        assert_eq!(cache.get("A").await, None);
        assert_eq!(mock.requests().len(), 2);
    }
}
