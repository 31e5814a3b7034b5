//! Stop to trunk line topology.
//!
//! Groups parent stops from the [`StopCatalog`](crate::catalog::StopCatalog)
//! into rider-facing trunk lines using a static [`TrunkTable`]. Built once
//! at startup and shared read-only between requests.

mod error;
mod index;
mod table;

pub use error::TopologyError;
pub use index::{LineView, TrunkStop, TrunkSummary, TrunkTopology, service_code};
pub use table::{CodeOverride, TABLE_VERSION, TrunkLine, TrunkTable, TrunkTableBuilder, nyc_subway};
