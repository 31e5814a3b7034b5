//! Stop board fan-out.

use std::time::Duration;

use futures::future::join_all;

use crate::domain::StopId;
use crate::transiter::{StopResponse, StopTime, TransitApi};

use super::upstream::attempt;

/// The upstream answer for one queried stop id.
#[derive(Debug, Clone)]
pub struct FetchedStop {
    pub stop: StopId,
    /// `None` when the call failed or timed out.
    pub payload: Option<StopResponse>,
}

impl FetchedStop {
    /// Stop times in feed order; empty for a failed call.
    pub fn stop_times(&self) -> &[StopTime] {
        self.payload
            .as_ref()
            .map(StopResponse::stop_times)
            .unwrap_or_default()
    }

    /// Stop name reported by the upstream.
    pub fn stop_name(&self) -> Option<&str> {
        self.payload.as_ref()?.name.as_deref()
    }

    pub fn is_failed(&self) -> bool {
        self.payload.is_none()
    }
}

/// Fetches the boards of a stop and its directional platforms.
pub struct ArrivalFetcher<'a, A> {
    api: &'a A,
    timeout: Duration,
}

impl<'a, A: TransitApi> ArrivalFetcher<'a, A> {
    pub fn new(api: &'a A, timeout: Duration) -> Self {
        Self { api, timeout }
    }

    /// Query every variant of `stop` concurrently.
    ///
    /// Returns one entry per variant, in [`StopId::query_variants`] order.
    /// A failed variant is an entry with no payload; its siblings are
    /// unaffected.
    pub async fn fetch(&self, stop: &StopId) -> Vec<FetchedStop> {
        let calls = stop.query_variants().into_iter().map(|variant| async move {
            let target = variant.query_path();
            let payload = attempt("stop", &target, self.timeout, self.api.stop(&variant))
                .await
                .ok();
            FetchedStop {
                stop: variant,
                payload,
            }
        });

        join_all(calls).await
    }
}
