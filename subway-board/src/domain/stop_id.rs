//! Upstream stop identifier types.

use std::fmt;

/// Suffix the upstream API accepts on stop queries to request realtime data.
pub const REALTIME_SUFFIX: &str = "/realtime";

/// Error returned when parsing an invalid stop identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop id: {reason}")]
pub struct InvalidStopId {
    reason: &'static str,
}

/// Platform direction of a child stop.
///
/// Child stops share their parent's id with a trailing `N` or `S`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
}

impl Direction {
    /// Both directions, in query order.
    pub const ALL: [Direction; 2] = [Direction::North, Direction::South];

    /// The character appended to a parent stop id.
    pub fn suffix(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::South => 'S',
        }
    }

    /// Parse a trailing direction character.
    pub fn from_suffix(c: char) -> Option<Self> {
        match c {
            'N' => Some(Direction::North),
            'S' => Some(Direction::South),
            _ => None,
        }
    }
}

/// Returns true if the raw id names a directional child platform.
pub fn is_directional(raw: &str) -> bool {
    raw.chars().last().and_then(Direction::from_suffix).is_some()
}

/// Remove any realtime query suffix from a raw upstream id.
pub fn strip_realtime(raw: &str) -> String {
    raw.replace(REALTIME_SUFFIX, "")
}

/// A stop identifier as used against the upstream API.
///
/// The identifier keeps its clean form (used for display, catalog lookups
/// and transfer records) separate from whether the caller asked for the
/// realtime variant of the query. The realtime flag is carried through to
/// [`StopId::query_path`] and to directional variants.
///
/// # Examples
///
/// ```
/// use subway_board::domain::StopId;
///
/// let stop = StopId::parse("A09/realtime").unwrap();
/// assert_eq!(stop.as_str(), "A09");
/// assert_eq!(stop.query_path(), "A09/realtime");
///
/// let ids: Vec<String> = stop.query_variants().iter().map(|s| s.query_path()).collect();
/// assert_eq!(ids, ["A09/realtime", "A09N/realtime", "A09S/realtime"]);
///
/// assert!(StopId::parse("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StopId {
    base: String,
    realtime: bool,
}

impl StopId {
    /// Parse a stop identifier, splitting off a trailing `/realtime`.
    pub fn parse(s: &str) -> Result<Self, InvalidStopId> {
        let s = s.trim();
        let (base, realtime) = match s.strip_suffix(REALTIME_SUFFIX) {
            Some(base) => (base, true),
            None => (s, false),
        };

        if base.is_empty() {
            return Err(InvalidStopId {
                reason: "must not be empty",
            });
        }

        if base.contains('/') || base.chars().any(char::is_whitespace) {
            return Err(InvalidStopId {
                reason: "must not contain '/' or whitespace",
            });
        }

        Ok(Self {
            base: base.to_string(),
            realtime,
        })
    }

    /// The clean identifier, without any realtime suffix.
    pub fn as_str(&self) -> &str {
        &self.base
    }

    /// Whether the caller asked for the realtime variant.
    pub fn is_realtime(&self) -> bool {
        self.realtime
    }

    /// The identifier as it should be sent upstream.
    pub fn query_path(&self) -> String {
        if self.realtime {
            format!("{}{}", self.base, REALTIME_SUFFIX)
        } else {
            self.base.clone()
        }
    }

    /// The same stop without the realtime flag.
    pub fn clean(&self) -> StopId {
        Self {
            base: self.base.clone(),
            realtime: false,
        }
    }

    /// Direction of this stop, if it is a child platform.
    pub fn direction(&self) -> Option<Direction> {
        self.base.chars().last().and_then(Direction::from_suffix)
    }

    /// Returns true if this id names a directional child platform.
    pub fn is_directional(&self) -> bool {
        self.direction().is_some()
    }

    /// The child platform id for one direction of this stop.
    pub fn with_direction(&self, direction: Direction) -> StopId {
        let mut base = self.base.clone();
        base.push(direction.suffix());
        Self {
            base,
            realtime: self.realtime,
        }
    }

    /// The parent stop of a directional id.
    ///
    /// Returns `None` for non-directional ids, or when stripping the
    /// direction would leave nothing behind.
    pub fn parent(&self) -> Option<StopId> {
        self.direction()?;
        let base = &self.base[..self.base.len() - 1];
        if base.is_empty() {
            return None;
        }
        Some(Self {
            base: base.to_string(),
            realtime: self.realtime,
        })
    }

    /// Every id to query for arrivals at this stop.
    ///
    /// Directional ids are queried alone; any other id is queried together
    /// with its northbound and southbound platforms, in that order.
    pub fn query_variants(&self) -> Vec<StopId> {
        let mut ids = vec![self.clone()];
        if !self.is_directional() {
            ids.extend(Direction::ALL.map(|d| self.with_direction(d)));
        }
        ids
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.query_path())
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Ids ending in a direction letter are only ever queried alone
        #[test]
        fn directional_queries_itself_only(base in "[A-Z0-9]{1,4}", dir in "[NS]") {
            let id = StopId::parse(&format!("{base}{dir}")).unwrap();
            prop_assert_eq!(id.query_variants(), vec![id.clone()]);
        }

        /// Any other id is queried as {id, idN, idS}
        #[test]
        fn parent_queries_three(base in "[A-Z0-9]{0,3}[A-MO-RT-Z0-9]") {
            let id = StopId::parse(&base).unwrap();
            let paths: Vec<String> = id.query_variants().iter().map(|s| s.query_path()).collect();
            prop_assert_eq!(paths, vec![base.clone(), format!("{base}N"), format!("{base}S")]);
        }
    }
}
