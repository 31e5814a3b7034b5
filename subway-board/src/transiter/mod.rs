//! Transiter realtime API client.
//!
//! This module provides an HTTP client for a Transiter instance, which
//! serves realtime stop boards and route metadata for a transit system.
//!
//! Key characteristics of Transiter:
//! - Stop ids are GTFS ids; directional platforms append `N` or `S`
//! - Stop queries may carry a `/realtime` suffix
//! - Epoch times and durations are often encoded as JSON strings

mod api;
mod client;
mod error;
mod mock;
mod types;

pub use api::{TransitApi, Upstream};
pub use client::{TransiterClient, TransiterConfig};
pub use error::UpstreamError;
pub use mock::MockTransitApi;
pub use types::{
    EstimatedTime, Headways, RouteReference, RouteResponse, RouteStats, StopReference,
    StopResponse, StopTime, Transfer, TripReference,
};
