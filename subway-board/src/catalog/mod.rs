//! Static stop catalog.
//!
//! Loads the GTFS `stops.txt` file once at startup. Directional child
//! platforms (ids ending in `N` or `S`) are dropped: they are only ever
//! used as realtime query targets, never displayed.

mod error;
mod stops;

pub use error::CatalogError;
pub use stops::{Stop, StopCatalog};
