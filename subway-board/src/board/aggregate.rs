//! Arrival aggregation and ranking.
//!
//! Turns the raw platform boards of one stop into at most
//! [`BoardConfig::display_limit`] display records, soonest first.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::domain::{ArrivalRecord, UNKNOWN_TEXT, minutes_until};
use crate::transiter::TransitApi;

use super::config::BoardConfig;
use super::fetcher::FetchedStop;
use super::namer::{RouteNamer, UNKNOWN_TRAIN};

/// An admitted stop time whose line has not been named yet.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub route_code: Option<String>,
    pub destination: String,
    pub headsign: String,
    pub departure: f64,
}

/// Select the stop times worth naming.
///
/// An entry is admitted when it reports a departure time later than
/// `now - past_tolerance`. At most `per_stop_limit` entries are admitted
/// from each queried platform, in feed order.
pub fn admit(raw: &[FetchedStop], now: f64, config: &BoardConfig) -> Vec<Candidate> {
    let cutoff = now - config.past_tolerance_secs;
    let per_stop = config.per_stop_limit.unwrap_or(usize::MAX);
    let mut admitted = Vec::new();

    for fetched in raw {
        let upcoming = fetched
            .stop_times()
            .iter()
            .filter_map(|st| Some((st, st.departure_time()?)))
            .filter(|&(_, departure)| departure > cutoff)
            .take(per_stop);

        for (st, departure) in upcoming {
            admitted.push(Candidate {
                route_code: st.route_id().map(str::to_string),
                destination: st.destination_name().unwrap_or(UNKNOWN_TEXT).to_string(),
                headsign: st.headsign.as_deref().unwrap_or(UNKNOWN_TEXT).to_string(),
                departure,
            });
        }
    }

    admitted
}

/// Build the final board from named candidates.
///
/// 1. Drop candidates with neither destination nor headsign, or whose line
///    could not be named
/// 2. Keep the first of each (line, destination, departure) triple
/// 3. Stable sort by minutes until departure
/// 4. Keep the first `limit`
pub fn rank(
    candidates: Vec<Candidate>,
    names: &HashMap<String, String>,
    now: f64,
    limit: usize,
) -> Vec<ArrivalRecord> {
    let mut seen = HashSet::new();

    let mut records: Vec<ArrivalRecord> = candidates
        .into_iter()
        .filter_map(|c| {
            if c.destination == UNKNOWN_TEXT && c.headsign == UNKNOWN_TEXT {
                debug!(departure = c.departure, "dropping arrival without destination");
                return None;
            }

            let line_name = c
                .route_code
                .as_deref()
                .and_then(|code| names.get(code))
                .map_or(UNKNOWN_TRAIN, String::as_str);
            if line_name == UNKNOWN_TRAIN {
                debug!(route = ?c.route_code, "dropping arrival on unnamed route");
                return None;
            }

            Some(ArrivalRecord {
                line_name: line_name.to_string(),
                destination: c.destination,
                headsign: c.headsign,
                departure_epoch_seconds: c.departure,
                minutes_until_departure: minutes_until(c.departure, now),
            })
        })
        .filter(|record| seen.insert(record.dedup_key()))
        .collect();

    records.sort_by_key(|r| r.minutes_until_departure);
    records.truncate(limit);
    records
}

/// Merges the platform boards of one stop.
pub struct ArrivalAggregator<'a> {
    config: &'a BoardConfig,
}

impl<'a> ArrivalAggregator<'a> {
    pub fn new(config: &'a BoardConfig) -> Self {
        Self { config }
    }

    /// Admit, name, filter, dedup, sort and cap.
    pub async fn aggregate<A: TransitApi>(
        &self,
        raw: &[FetchedStop],
        namer: &RouteNamer<'_, A>,
        now: f64,
    ) -> Vec<ArrivalRecord> {
        let candidates = admit(raw, now, self.config);
        let names = namer
            .names_for(candidates.iter().filter_map(|c| c.route_code.as_deref()))
            .await;

        let admitted = candidates.len();
        let records = rank(candidates, &names, now, self.config.display_limit);
        debug!(admitted, shown = records.len(), "aggregated arrivals");
        records
    }
}
