//! Stop ↔ trunk indices.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::catalog::StopCatalog;
use crate::domain::StopId;

use super::table::{TrunkLine, TrunkTable};

/// A stop as listed under its trunk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrunkStop {
    pub stop_id: String,
    pub stop_name: String,
    /// Service code the stop was grouped by.
    pub service: String,
}

/// A trunk and its stops, grouped for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineView {
    pub trunk: String,
    pub color: String,
    pub services: Vec<String>,
    pub stops: Vec<TrunkStop>,
}

/// Summary of one trunk for index listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrunkSummary {
    pub trunk: String,
    pub color: String,
    pub services: Vec<String>,
    pub stop_count: usize,
}

/// Derive the service code of a stop id.
///
/// Stops listed in the override table use the listed code; every other
/// stop uses its first character. A code named by any override is only
/// reachable through the override list, so an unlisted stop sharing its
/// prefix has no code.
pub fn service_code<'a>(
    stop_id: &'a str,
    overrides: &HashMap<&str, &'a str>,
) -> Option<&'a str> {
    if let Some(&code) = overrides.get(stop_id) {
        return Some(code);
    }
    let first = stop_id.chars().next()?;
    let code = &stop_id[..first.len_utf8()];
    if overrides.values().any(|&listed| listed == code) {
        return None;
    }
    Some(code)
}

/// Read-only mapping between stops and trunk lines.
///
/// Invariant: a stop is listed in `trunk_to_stops[t]` exactly when
/// `stop_to_trunk` maps it to `t`.
#[derive(Debug, Clone, PartialEq)]
pub struct TrunkTopology {
    table: TrunkTable,
    /// Stop id → index into `table.trunks`.
    stop_to_trunk: HashMap<String, usize>,
    /// Stops per trunk, parallel to `table.trunks`, in catalog order.
    trunk_to_stops: Vec<Vec<TrunkStop>>,
}

impl TrunkTopology {
    /// Build both indices from a catalog and a trunk table.
    ///
    /// Stops whose service code belongs to no trunk are left out.
    pub fn build(catalog: &StopCatalog, table: TrunkTable) -> Self {
        let mut stop_to_trunk = HashMap::new();
        let mut trunk_to_stops = vec![Vec::new(); table.trunks.len()];

        {
            let services = table.service_index();
            let overrides = table.override_index();

            for stop in catalog.iter() {
                let Some(code) = service_code(&stop.stop_id, &overrides) else {
                    continue;
                };
                let Some(&trunk) = services.get(code) else {
                    continue;
                };

                stop_to_trunk.insert(stop.stop_id.clone(), trunk);
                trunk_to_stops[trunk].push(TrunkStop {
                    stop_id: stop.stop_id.clone(),
                    stop_name: stop.stop_name.clone(),
                    service: code.to_string(),
                });
            }
        }

        debug!(
            version = table.version,
            trunks = table.trunks.len(),
            stops = stop_to_trunk.len(),
            "built trunk topology"
        );

        Self {
            table,
            stop_to_trunk,
            trunk_to_stops,
        }
    }

    /// The table this topology was built from.
    pub fn table(&self) -> &TrunkTable {
        &self.table
    }

    /// The trunk a stop belongs to.
    pub fn trunk_for(&self, stop_id: &str) -> Option<&TrunkLine> {
        self.stop_to_trunk
            .get(stop_id)
            .map(|&i| &self.table.trunks[i])
    }

    /// The trunk for a query id, resolving directional ids to their parent.
    pub fn trunk_for_stop(&self, stop: &StopId) -> Option<&TrunkLine> {
        self.trunk_for(stop.as_str())
            .or_else(|| self.trunk_for(stop.parent()?.as_str()))
    }

    /// Stops of a trunk, in catalog order. Unknown trunks have none.
    pub fn stops_for(&self, trunk_name: &str) -> &[TrunkStop] {
        match self.position(trunk_name) {
            Some(i) => &self.trunk_to_stops[i],
            None => &[],
        }
    }

    /// Resolve a service code or trunk name to its display group.
    pub fn line_view(&self, code_or_name: &str) -> Option<LineView> {
        let trunk = self.table.find(code_or_name)?;
        Some(LineView {
            trunk: trunk.name.clone(),
            color: trunk.color.clone(),
            services: trunk.services.clone(),
            stops: self.stops_for(&trunk.name).to_vec(),
        })
    }

    /// Summaries of every trunk, in table order.
    pub fn trunks(&self) -> Vec<TrunkSummary> {
        self.table
            .trunks
            .iter()
            .zip(&self.trunk_to_stops)
            .map(|(trunk, stops)| TrunkSummary {
                trunk: trunk.name.clone(),
                color: trunk.color.clone(),
                services: trunk.services.clone(),
                stop_count: stops.len(),
            })
            .collect()
    }

    /// Number of stops assigned to a trunk.
    pub fn len(&self) -> usize {
        self.stop_to_trunk.len()
    }

    /// Returns true if no stop was assigned to any trunk.
    pub fn is_empty(&self) -> bool {
        self.stop_to_trunk.is_empty()
    }

    fn position(&self, trunk_name: &str) -> Option<usize> {
        self.table.trunks.iter().position(|t| t.name == trunk_name)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::topology::nyc_subway;
    use proptest::prelude::*;

    fn arb_catalog() -> impl Strategy<Value = StopCatalog> {
        prop::collection::vec("[0-9A-HJ-MQ-Z][0-9]{2}[NS]?", 0..40).prop_map(|ids| {
            let mut csv = String::from("stop_id,stop_name,stop_lat,stop_lon\n");
            for id in ids {
                csv.push_str(&format!("{id},Stop {id},40.7,-73.9\n"));
            }
            StopCatalog::load(csv.as_bytes()).unwrap()
        })
    }

    proptest! {
        /// Every stop listed under a trunk maps back to that trunk
        #[test]
        fn stops_map_back_to_their_trunk(catalog in arb_catalog()) {
            let topo = TrunkTopology::build(&catalog, nyc_subway());
            for trunk in &topo.table().trunks {
                for stop in topo.stops_for(&trunk.name) {
                    prop_assert_eq!(&topo.trunk_for(&stop.stop_id).unwrap().name, &trunk.name);
                }
            }
        }

        /// Every indexed stop is listed exactly once, under its trunk
        #[test]
        fn indexed_stops_listed_once(catalog in arb_catalog()) {
            let topo = TrunkTopology::build(&catalog, nyc_subway());
            for stop in catalog.iter() {
                let listed: usize = topo
                    .table()
                    .trunks
                    .iter()
                    .map(|t| topo.stops_for(&t.name).iter().filter(|s| s.stop_id == stop.stop_id).count())
                    .sum();
                match topo.trunk_for(&stop.stop_id) {
                    Some(trunk) => {
                        prop_assert_eq!(listed, 1);
                        prop_assert!(topo.stops_for(&trunk.name).iter().any(|s| s.stop_id == stop.stop_id));
                    }
                    None => prop_assert_eq!(listed, 0),
                }
            }
        }

        /// Stops outside the override list never land on the Rockaway Park Shuttle
        #[test]
        fn rockaway_shuttle_holds_only_listed_stops(catalog in arb_catalog()) {
            let topo = TrunkTopology::build(&catalog, nyc_subway());
            let overrides = topo.table().override_index();
            for stop in topo.stops_for("Rockaway Park Shuttle") {
                prop_assert_eq!(overrides.get(stop.stop_id.as_str()), Some(&"H"));
            }
        }

        /// Rebuilding from the same inputs gives equal indices
        #[test]
        fn rebuild_is_structurally_equal(catalog in arb_catalog()) {
            let a = TrunkTopology::build(&catalog, nyc_subway());
            let b = TrunkTopology::build(&catalog.clone(), nyc_subway());
            prop_assert_eq!(a, b);
        }
    }
}
