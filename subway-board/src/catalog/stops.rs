//! Stop catalog loading and lookup.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{StopId, is_directional};

use super::error::CatalogError;

/// Columns that every stop file must carry.
const REQUIRED_COLUMNS: [&str; 4] = ["stop_id", "stop_name", "stop_lat", "stop_lon"];

/// A displayable (parent) stop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stop {
    pub stop_id: String,
    pub stop_name: String,
    pub stop_lat: f64,
    pub stop_lon: f64,
    /// GTFS location type, when the file has the column.
    pub location_type: Option<u8>,
}

impl Stop {
    /// Returns true for a directional child platform. Never true for a
    /// stop held by the catalog.
    pub fn is_child(&self) -> bool {
        is_directional(&self.stop_id)
    }
}

/// One row of `stops.txt`. Extra columns are ignored.
#[derive(Deserialize)]
struct Record {
    stop_id: String,
    stop_name: String,
    stop_lat: f64,
    stop_lon: f64,
    #[serde(default)]
    location_type: Option<u8>,
}

/// In-memory index of parent stops, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StopCatalog {
    stops: Vec<Stop>,
    index: HashMap<String, usize>,
}

impl StopCatalog {
    /// Load the catalog from CSV data.
    ///
    /// Child platforms are skipped. If a stop id appears twice the first
    /// row wins.
    pub fn load<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut reader = csv::Reader::from_reader(reader);
        let headers = reader.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h.trim() == column) {
                return Err(CatalogError::MissingColumn(column));
            }
        }

        let mut catalog = Self::default();
        let mut skipped_children = 0usize;
        let mut raw = csv::StringRecord::new();

        while reader.read_record(&mut raw)? {
            let line = raw.position().map_or(0, |p| p.line());
            let rec: Record = raw.deserialize(Some(&headers))?;

            let stop_id = rec.stop_id.trim();
            if stop_id.is_empty() {
                return Err(CatalogError::BlankStopId { line });
            }

            if is_directional(stop_id) {
                skipped_children += 1;
                continue;
            }

            if catalog.index.contains_key(stop_id) {
                warn!(stop_id, line, "duplicate stop id in stop file, keeping first");
                continue;
            }

            catalog
                .index
                .insert(stop_id.to_string(), catalog.stops.len());
            catalog.stops.push(Stop {
                stop_id: stop_id.to_string(),
                stop_name: rec.stop_name,
                stop_lat: rec.stop_lat,
                stop_lon: rec.stop_lon,
                location_type: rec.location_type,
            });
        }

        debug!(
            stops = catalog.stops.len(),
            skipped_children, "loaded stop catalog"
        );

        Ok(catalog)
    }

    /// Load the catalog from a file on disk.
    pub fn load_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::load(file)
    }

    /// Look up a parent stop by its exact id.
    pub fn lookup(&self, stop_id: &str) -> Option<&Stop> {
        self.index.get(stop_id).map(|&i| &self.stops[i])
    }

    /// Look up the displayable stop for a query id.
    ///
    /// Directional platform ids resolve to their parent stop.
    pub fn lookup_stop(&self, stop: &StopId) -> Option<&Stop> {
        if let Some(found) = self.lookup(stop.as_str()) {
            return Some(found);
        }
        let parent = stop.parent()?;
        self.lookup(parent.as_str())
    }

    /// Iterate over stops in source order.
    pub fn iter(&self) -> impl Iterator<Item = &Stop> {
        self.stops.iter()
    }

    /// Number of parent stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns true if the catalog has no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}
