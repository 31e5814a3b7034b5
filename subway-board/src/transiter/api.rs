//! The upstream seam used by the board engine.

use std::future::Future;

use crate::domain::StopId;

use super::client::TransiterClient;
use super::error::UpstreamError;
use super::mock::MockTransitApi;
use super::types::{RouteResponse, StopResponse};

/// Read-only access to a realtime transit API.
///
/// This abstraction allows the board engine to be tested with mock data.
pub trait TransitApi: Send + Sync {
    /// Route metadata for a service code.
    fn route(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<RouteResponse, UpstreamError>> + Send;

    /// Board for one stop id, realtime suffix included when set.
    fn stop(
        &self,
        stop: &StopId,
    ) -> impl Future<Output = Result<StopResponse, UpstreamError>> + Send;
}

impl TransitApi for TransiterClient {
    async fn route(&self, code: &str) -> Result<RouteResponse, UpstreamError> {
        self.get_route(code).await
    }

    async fn stop(&self, stop: &StopId) -> Result<StopResponse, UpstreamError> {
        self.get_stop(stop).await
    }
}

impl TransitApi for MockTransitApi {
    async fn route(&self, code: &str) -> Result<RouteResponse, UpstreamError> {
        self.get_route(code).await
    }

    async fn stop(&self, stop: &StopId) -> Result<StopResponse, UpstreamError> {
        self.get_stop(stop).await
    }
}

/// The upstream chosen at startup: a live Transiter instance or fixtures.
#[derive(Debug, Clone)]
pub enum Upstream {
    Live(TransiterClient),
    Mock(MockTransitApi),
}

impl TransitApi for Upstream {
    async fn route(&self, code: &str) -> Result<RouteResponse, UpstreamError> {
        match self {
            Upstream::Live(client) => client.get_route(code).await,
            Upstream::Mock(mock) => mock.get_route(code).await,
        }
    }

    async fn stop(&self, stop: &StopId) -> Result<StopResponse, UpstreamError> {
        match self {
            Upstream::Live(client) => client.get_stop(stop).await,
            Upstream::Mock(mock) => mock.get_stop(stop).await,
        }
    }
}
