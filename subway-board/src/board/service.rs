//! The stop board service.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::cache::RouteNameCache;
use crate::catalog::StopCatalog;
use crate::domain::{ArrivalRecord, HeadwayRecord, StopId, TransferRecord};
use crate::topology::{LineView, TrunkSummary, TrunkTopology};
use crate::transiter::TransitApi;

use super::aggregate::ArrivalAggregator;
use super::config::BoardConfig;
use super::error::BoardError;
use super::fetcher::ArrivalFetcher;
use super::headways::{self, HeadwayResolver};
use super::namer::RouteNamer;
use super::transfers::{self, TransferResolver};

/// Everything shown for one stop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopBoard {
    /// The queried id, without any realtime suffix.
    pub stop_id: String,
    pub stop_name: String,
    pub trunk_line: Option<String>,
    pub trunk_color: Option<String>,
    pub arrivals: Vec<ArrivalRecord>,
    pub transfers: Vec<TransferRecord>,
    pub headways: Vec<HeadwayRecord>,
}

/// Builds stop boards and line listings.
///
/// The catalog and topology are loaded once and shared read-only; every
/// board request issues its own upstream calls.
pub struct StopBoardService<A> {
    api: A,
    catalog: Arc<StopCatalog>,
    topology: Arc<TrunkTopology>,
    config: BoardConfig,
    route_cache: Option<RouteNameCache>,
}

impl<A: TransitApi> StopBoardService<A> {
    pub fn new(
        api: A,
        catalog: Arc<StopCatalog>,
        topology: Arc<TrunkTopology>,
        config: BoardConfig,
    ) -> Self {
        Self {
            api,
            catalog,
            topology,
            config,
            route_cache: None,
        }
    }

    /// Share resolved route names across boards.
    pub fn with_route_cache(mut self, cache: RouteNameCache) -> Self {
        self.route_cache = Some(cache);
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn catalog(&self) -> &StopCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Build the board for a stop as of `now` (Unix seconds).
    ///
    /// A realtime query resolves transfers and headways from the clean id
    /// concurrently with the arrivals. Otherwise the base payload fetched
    /// for arrivals already is the clean board and is read once. An
    /// upstream failure only empties the affected part; the board fails
    /// only when the stop has no name anywhere.
    pub async fn board(&self, stop: &StopId, now: f64) -> Result<StopBoard, BoardError> {
        let timeout = self.config.call_timeout();
        let namer = RouteNamer::new(&self.api, timeout).with_cache(self.route_cache.as_ref());
        let fetcher = ArrivalFetcher::new(&self.api, timeout);
        let aggregator = ArrivalAggregator::new(&self.config);

        let fetch_arrivals = async {
            let raw = fetcher.fetch(stop).await;
            let arrivals = aggregator.aggregate(&raw, &namer, now).await;
            (raw, arrivals)
        };

        let (raw, arrivals, transfers, headways) = if stop.is_realtime() {
            let transfer_resolver = TransferResolver::new(&self.api, timeout);
            let headway_resolver = HeadwayResolver::new(&self.api, timeout);
            let ((raw, arrivals), transfers, headways) = tokio::join!(
                fetch_arrivals,
                transfer_resolver.resolve(stop),
                headway_resolver.resolve(stop)
            );
            (raw, arrivals, transfers, headways)
        } else {
            let (raw, arrivals) = fetch_arrivals.await;
            let base = raw
                .first()
                .filter(|fetched| fetched.stop == *stop)
                .and_then(|fetched| fetched.payload.as_ref());
            let transfers = base.map(transfers::normalize).unwrap_or_default();
            let headways = base.map(headways::normalize).unwrap_or_default();
            (raw, arrivals, transfers, headways)
        };

        let stop_name = self
            .catalog
            .lookup_stop(stop)
            .map(|s| s.stop_name.clone())
            .or_else(|| {
                raw.first()
                    .and_then(|fetched| fetched.stop_name())
                    .map(str::to_string)
            })
            .ok_or_else(|| BoardError::StopNotFound(stop.to_string()))?;

        let trunk = self.topology.trunk_for_stop(stop);

        debug!(
            stop = %stop,
            arrivals = arrivals.len(),
            transfers = transfers.len(),
            headways = headways.len(),
            "built stop board"
        );

        Ok(StopBoard {
            stop_id: stop.as_str().to_string(),
            stop_name,
            trunk_line: trunk.map(|t| t.name.clone()),
            trunk_color: trunk.map(|t| t.color.clone()),
            arrivals,
            transfers,
            headways,
        })
    }

    /// Build the board for a stop as of the current time.
    pub async fn board_now(&self, stop: &StopId) -> Result<StopBoard, BoardError> {
        self.board(stop, now_epoch_seconds()).await
    }

    /// The display group for a service code or trunk name.
    pub fn line(&self, code_or_name: &str) -> Option<LineView> {
        self.topology.line_view(code_or_name)
    }

    /// Every trunk with its stop count.
    pub fn lines(&self) -> Vec<TrunkSummary> {
        self.topology.trunks()
    }
}

/// Current time as Unix seconds.
pub fn now_epoch_seconds() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}
