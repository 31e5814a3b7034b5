//! Ranked arrival records.

use serde::Serialize;

/// Placeholder substituted for missing destination and headsign text.
pub const UNKNOWN_TEXT: &str = "Unknown";

/// One upcoming departure at a stop, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrivalRecord {
    /// Rider-facing line name (e.g. "A", "42nd Street Shuttle").
    pub line_name: String,
    /// Trip destination name, or [`UNKNOWN_TEXT`].
    pub destination: String,
    /// Platform headsign, or [`UNKNOWN_TEXT`].
    pub headsign: String,
    /// Departure time as Unix seconds.
    pub departure_epoch_seconds: f64,
    /// Whole minutes until departure, never negative.
    pub minutes_until_departure: u32,
}

impl ArrivalRecord {
    /// The identity used to collapse the same train seen from several
    /// platform queries.
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey {
            line_name: self.line_name.clone(),
            destination: self.destination.clone(),
            departure_bits: self.departure_epoch_seconds.to_bits(),
        }
    }
}

/// (line name, destination, departure time) identity of an arrival.
///
/// The departure time is compared bit-for-bit: two records are the same
/// train only if the upstream reported the identical timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    line_name: String,
    destination: String,
    departure_bits: u64,
}

/// Whole minutes from `now` until `departure`, floored and clamped at zero.
pub fn minutes_until(departure: f64, now: f64) -> u32 {
    let minutes = ((departure - now) / 60.0).floor();
    if minutes <= 0.0 {
        0
    } else if minutes >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        minutes as u32
    }
}
