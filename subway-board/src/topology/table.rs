//! Trunk line configuration table.
//!
//! One versioned structure holds every trunk, its member service codes
//! and display color, plus the stop ids whose service code cannot be read
//! off their first character (shuttles and the Staten Island Railway).

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::TopologyError;

/// Current version of the built-in table.
pub const TABLE_VERSION: u32 = 1;

/// A rider-facing group of services sharing track and branding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrunkLine {
    pub name: String,
    /// Service codes that belong to this trunk, in display order.
    pub services: Vec<String>,
    /// Hex display color, e.g. `#0039e6`.
    pub color: String,
}

impl TrunkLine {
    /// Returns true if this trunk carries the given service code.
    pub fn has_service(&self, code: &str) -> bool {
        self.services.iter().any(|s| s == code)
    }
}

/// Explicit service code for one stop id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeOverride {
    pub stop_id: String,
    pub service: String,
}

/// The full trunk configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrunkTable {
    pub version: u32,
    pub trunks: Vec<TrunkLine>,
    #[serde(default)]
    pub overrides: Vec<CodeOverride>,
}

impl TrunkTable {
    /// Parse a table from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, TopologyError> {
        let table: TrunkTable = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Read a table from a JSON file and validate it.
    pub fn load_path(path: impl AsRef<Path>) -> Result<Self, TopologyError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TopologyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Check that no service code or trunk name is listed twice, and that
    /// every override names a known code and lists its stop once.
    ///
    /// A duplicated code would let one stop belong to two trunks.
    pub fn validate(&self) -> Result<(), TopologyError> {
        let mut names = HashSet::new();
        let mut owners: HashMap<&str, &str> = HashMap::new();

        for trunk in &self.trunks {
            if !names.insert(trunk.name.as_str()) {
                return Err(TopologyError::DuplicateTrunk(trunk.name.clone()));
            }
            for code in &trunk.services {
                if let Some(first) = owners.insert(code.as_str(), trunk.name.as_str()) {
                    return Err(TopologyError::DuplicateService {
                        code: code.clone(),
                        first: first.to_string(),
                        second: trunk.name.clone(),
                    });
                }
            }
        }

        let mut overridden: HashMap<&str, &str> = HashMap::new();
        for o in &self.overrides {
            if !owners.contains_key(o.service.as_str()) {
                return Err(TopologyError::UnknownOverrideService {
                    stop_id: o.stop_id.clone(),
                    service: o.service.clone(),
                });
            }
            match overridden.get(o.stop_id.as_str()) {
                Some(&first) if first != o.service => {
                    return Err(TopologyError::DuplicateOverride {
                        stop_id: o.stop_id.clone(),
                        first: first.to_string(),
                        second: o.service.clone(),
                    });
                }
                Some(_) => {}
                None => {
                    overridden.insert(o.stop_id.as_str(), o.service.as_str());
                }
            }
        }

        Ok(())
    }

    /// Map each service code to its trunk's position in `trunks`.
    ///
    /// If a code is listed under several trunks the first one wins.
    pub fn service_index(&self) -> HashMap<&str, usize> {
        let mut index = HashMap::new();
        for (i, trunk) in self.trunks.iter().enumerate() {
            for code in &trunk.services {
                index.entry(code.as_str()).or_insert(i);
            }
        }
        index
    }

    /// Map each overridden stop id to its service code.
    ///
    /// If a stop id is listed several times the first entry wins.
    pub fn override_index(&self) -> HashMap<&str, &str> {
        let mut index = HashMap::new();
        for o in &self.overrides {
            index
                .entry(o.stop_id.as_str())
                .or_insert(o.service.as_str());
        }
        index
    }

    /// Find the trunk for a service code or trunk name.
    pub fn find(&self, code_or_name: &str) -> Option<&TrunkLine> {
        self.trunks
            .iter()
            .find(|t| t.has_service(code_or_name))
            .or_else(|| self.trunks.iter().find(|t| t.name == code_or_name))
    }
}

impl Default for TrunkTable {
    fn default() -> Self {
        nyc_subway()
    }
}

/// Builder for trunk tables.
#[derive(Debug)]
pub struct TrunkTableBuilder {
    inner: TrunkTable,
}

impl TrunkTableBuilder {
    /// Create a new builder for the given table version.
    pub fn new(version: u32) -> Self {
        Self {
            inner: TrunkTable {
                version,
                trunks: Vec::new(),
                overrides: Vec::new(),
            },
        }
    }

    /// Add a trunk with its services and color.
    pub fn trunk(mut self, name: &str, services: &[&str], color: &str) -> Self {
        self.inner.trunks.push(TrunkLine {
            name: name.to_string(),
            services: services.iter().map(|s| s.to_string()).collect(),
            color: color.to_string(),
        });
        self
    }

    /// Assign a service code to an explicit list of stop ids.
    pub fn stops(mut self, service: &str, stop_ids: &[&str]) -> Self {
        self.inner
            .overrides
            .extend(stop_ids.iter().map(|id| CodeOverride {
                stop_id: id.to_string(),
                service: service.to_string(),
            }));
        self
    }

    /// Build the table.
    pub fn build(self) -> TrunkTable {
        self.inner
    }
}

/// The New York City subway trunk table.
pub fn nyc_subway() -> TrunkTable {
    TrunkTableBuilder::new(TABLE_VERSION)
        .trunk("Eighth Avenue Line", &["A", "C", "E"], "#0039e6")
        .trunk("Sixth Avenue Line", &["B", "D", "F", "M"], "#ff6319")
        .trunk("Crosstown Line", &["G"], "#6cbe45")
        .trunk("Canarsie Line", &["L"], "#a7a9ac")
        .trunk("Nassau Street Line", &["J", "Z"], "#996633")
        .trunk("Broadway Line", &["N", "Q", "R", "W"], "#fccc0a")
        .trunk("Broadway–Seventh Avenue Line", &["1", "2", "3"], "#ee352e")
        .trunk("Lexington Avenue Line", &["4", "5", "6"], "#00933c")
        .trunk("Flushing Line", &["7"], "#b933ad")
        .trunk("Second Avenue Line", &["T"], "#00add0")
        .trunk("Shuttles", &["S"], "#808183")
        .trunk("42nd Street Shuttle", &["GS"], "#808183")
        .trunk("Franklin Avenue Shuttle", &["FS"], "#808183")
        .trunk("Rockaway Park Shuttle", &["H"], "#808183")
        .trunk("Staten Island Railway", &["SIR"], "#0039e6")
        .stops("GS", &["901", "902"])
        .stops("FS", &["S01", "S03", "S04"])
        .stops("H", &["H12", "H13", "H14", "H15"])
        .stops(
            "SIR",
            &[
                "S09", "S11", "S13", "S14", "S15", "S16", "S17", "S18", "S19", "S20", "S21",
                "S22", "S23", "S24", "S25", "S26", "S27", "S28", "S29", "S30", "S31",
            ],
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_is_valid() {
        let table = nyc_subway();
        assert_eq!(table.version, TABLE_VERSION);
        assert!(table.validate().is_ok());
        assert_eq!(table.trunks.len(), 15);
    }

    #[test]
    fn find_by_code_or_name() {
        let table = nyc_subway();
        assert_eq!(table.find("C").unwrap().name, "Eighth Avenue Line");
        assert_eq!(table.find("GS").unwrap().name, "42nd Street Shuttle");
        assert_eq!(table.find("Canarsie Line").unwrap().services, ["L"]);
        assert!(table.find("X").is_none());
    }

    #[test]
    fn overrides_enumerate_shuttle_stops() {
        let table = nyc_subway();
        let overrides = table.override_index();
        assert_eq!(overrides.get("901"), Some(&"GS"));
        assert_eq!(overrides.get("S01"), Some(&"FS"));
        assert_eq!(overrides.get("H15"), Some(&"H"));
        assert_eq!(overrides.get("S31"), Some(&"SIR"));
        assert_eq!(overrides.get("A09"), None);
    }

    #[test]
    fn duplicate_service_rejected() {
        let table = TrunkTableBuilder::new(1)
            .trunk("One", &["A"], "#000000")
            .trunk("Two", &["B", "A"], "#ffffff")
            .build();
        let err = table.validate().unwrap_err();
        assert!(matches!(err, TopologyError::DuplicateService { ref code, .. } if code == "A"));
    }

    #[test]
    fn duplicate_trunk_rejected() {
        let table = TrunkTableBuilder::new(1)
            .trunk("One", &["A"], "#000000")
            .trunk("One", &["B"], "#ffffff")
            .build();
        assert!(matches!(
            table.validate(),
            Err(TopologyError::DuplicateTrunk(_))
        ));
    }

    #[test]
    fn service_index_first_trunk_wins() {
        let table = TrunkTableBuilder::new(1)
            .trunk("One", &["A"], "#000000")
            .trunk("Two", &["A"], "#ffffff")
            .build();
        assert_eq!(table.service_index().get("A"), Some(&0));
    }

    #[test]
    fn duplicate_override_rejected() {
        let table = TrunkTableBuilder::new(1)
            .trunk("Eighth", &["A"], "#000000")
            .trunk("Rockaway", &["H"], "#ffffff")
            .stops("H", &["H12", "H13"])
            .stops("A", &["H12"])
            .build();
        let err = table.validate().unwrap_err();
        assert!(matches!(
            err,
            TopologyError::DuplicateOverride { ref stop_id, ref first, ref second }
                if stop_id == "H12" && first == "H" && second == "A"
        ));
    }

    #[test]
    fn repeated_identical_override_accepted() {
        let table = TrunkTableBuilder::new(1)
            .trunk("Rockaway", &["H"], "#ffffff")
            .stops("H", &["H12", "H12"])
            .build();
        assert!(table.validate().is_ok());
    }

    #[test]
    fn override_to_unknown_service_rejected() {
        let json = r##"{
            "version": 1,
            "trunks": [{"name": "Shuttles", "services": ["S"], "color": "#808183"}],
            "overrides": [{"stop_id": "901", "service": "GS"}]
        }"##;
        assert!(matches!(
            TrunkTable::from_json(json),
            Err(TopologyError::UnknownOverrideService { ref service, .. }) if service == "GS"
        ));
    }

    #[test]
    fn override_index_first_entry_wins() {
        let table = TrunkTableBuilder::new(1)
            .trunk("Eighth", &["A"], "#000000")
            .trunk("Rockaway", &["H"], "#ffffff")
            .stops("H", &["H12"])
            .stops("A", &["H12"])
            .build();
        assert_eq!(table.override_index().get("H12"), Some(&"H"));
    }

    #[test]
    fn json_roundtrip_of_default_table() {
        let json = serde_json::to_string(&nyc_subway()).unwrap();
        assert_eq!(TrunkTable::from_json(&json).unwrap(), nyc_subway());
    }

    #[test]
    fn json_without_overrides() {
        let json = r##"{"version": 2, "trunks": [{"name": "Canarsie Line", "services": ["L"], "color": "#a7a9ac"}]}"##;
        let table = TrunkTable::from_json(json).unwrap();
        assert_eq!(table.version, 2);
        assert!(table.overrides.is_empty());
    }

    #[test]
    fn invalid_json_rejected() {
        assert!(matches!(
            TrunkTable::from_json("{not json"),
            Err(TopologyError::Json(_))
        ));
    }
}
