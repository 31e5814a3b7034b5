//! Transiter API response DTOs.
//!
//! These types map to the JSON served by Transiter's `routes` and `stops`
//! endpoints. Only the fields the board reads are declared, so an odd shape
//! in any other field never fails a payload. Everything is optional because
//! Transiter omits fields rather than sending nulls, and encodes 64-bit
//! integers (epoch times, durations) as strings.

use serde::Deserialize;

/// Response from `GET /systems/{system}/routes/{code}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResponse {
    /// Rider-facing short name ("A", "7", or "S" for every shuttle).
    pub short_name: Option<String>,
}

/// Response from `GET /systems/{system}/stops/{stop_id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopResponse {
    /// Human-readable stop name.
    pub name: Option<String>,

    /// Upcoming stop times, in feed order.
    pub stop_times: Option<Vec<StopTime>>,

    /// Transfers to other platforms or stations.
    pub transfers: Option<Vec<Transfer>>,

    /// Per-route statistics, including headways.
    pub data: Option<Vec<RouteStats>>,
}

impl StopResponse {
    /// Stop times, or an empty slice when the field was omitted.
    pub fn stop_times(&self) -> &[StopTime] {
        self.stop_times.as_deref().unwrap_or_default()
    }

    /// Transfers, or an empty slice when the field was omitted.
    pub fn transfers(&self) -> &[Transfer] {
        self.transfers.as_deref().unwrap_or_default()
    }

    /// Route statistics, or an empty slice when the field was omitted.
    pub fn route_stats(&self) -> &[RouteStats] {
        self.data.as_deref().unwrap_or_default()
    }
}

/// A vehicle's scheduled or estimated call at the stop.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopTime {
    pub departure: Option<EstimatedTime>,
    pub trip: Option<TripReference>,
    pub headsign: Option<String>,
}

impl StopTime {
    /// Departure time as Unix seconds, if reported.
    pub fn departure_time(&self) -> Option<f64> {
        self.departure.as_ref()?.time
    }

    /// Route id of the trip, if reported.
    pub fn route_id(&self) -> Option<&str> {
        self.trip.as_ref()?.route.as_ref()?.id.as_deref()
    }

    /// Destination stop name of the trip, if reported.
    pub fn destination_name(&self) -> Option<&str> {
        self.trip.as_ref()?.destination.as_ref()?.name.as_deref()
    }
}

/// A departure estimate.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimatedTime {
    /// Unix seconds.
    #[serde(default, deserialize_with = "lenient::option_f64")]
    pub time: Option<f64>,
}

/// Trip summary attached to a stop time.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripReference {
    pub route: Option<RouteReference>,
    pub destination: Option<StopReference>,
}

/// A route reference.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteReference {
    pub id: Option<String>,
}

/// A stop reference.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopReference {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// A transfer edge between two stops.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub from_stop: Option<StopReference>,
    pub to_stop: Option<StopReference>,

    #[serde(rename = "type", default, deserialize_with = "lenient::option_string")]
    pub transfer_type: Option<String>,

    /// Seconds.
    #[serde(default, deserialize_with = "lenient::option_f64")]
    pub min_transfer_time: Option<f64>,
}

/// Statistics for one route serving the stop.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStats {
    pub route: Option<RouteReference>,
    pub headways: Option<Headways>,
}

/// Scheduled and observed headways, in seconds.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Headways {
    #[serde(default, deserialize_with = "lenient::option_f64")]
    pub scheduled: Option<f64>,

    #[serde(default, deserialize_with = "lenient::option_f64")]
    pub observed: Option<f64>,
}

/// Deserializers for values Transiter sends as either numbers or strings.
mod lenient {
    use serde::{Deserialize, Deserializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Number(f64),
        Text(String),
        Flag(bool),
    }

    pub fn option_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Scalar>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Scalar::Number(n)) => Ok(Some(n)),
            Some(Scalar::Text(s)) if s.trim().is_empty() => Ok(None),
            Some(Scalar::Text(s)) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("expected a number, got {s:?}"))),
            Some(Scalar::Flag(b)) => Err(D::Error::custom(format!(
                "expected a number, got {b}"
            ))),
        }
    }

    pub fn option_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Scalar>::deserialize(deserializer)? {
            None => None,
            Some(Scalar::Number(n)) => Some(n.to_string()),
            Some(Scalar::Text(s)) => Some(s),
            Some(Scalar::Flag(b)) => Some(b.to_string()),
        })
    }
}
