//! Stop board engine.
//!
//! For a queried stop:
//! 1. Fetch the stop and its directional platforms concurrently
//! 2. Name each route once, merge, dedup and rank the arrivals
//! 3. Resolve transfers and headways alongside
//!
//! Every upstream call is a single attempt under its own deadline; a
//! failed call only empties its own part of the board.

mod aggregate;
mod config;
mod error;
mod fetcher;
mod headways;
mod namer;
mod service;
mod transfers;
mod upstream;

pub use aggregate::{ArrivalAggregator, Candidate, admit, rank};
pub use config::BoardConfig;
pub use error::BoardError;
pub use fetcher::{ArrivalFetcher, FetchedStop};
pub use headways::HeadwayResolver;
pub use namer::{RouteNamer, SHUTTLE_MARKER, UNKNOWN_TRAIN, display_name, shuttle_name};
pub use service::{StopBoard, StopBoardService, now_epoch_seconds};
pub use transfers::{TransferResolver, UNKNOWN_STATION, route_code_for};
pub use upstream::attempt;
