//! Configuration for board aggregation.

use std::time::Duration;

/// Tunable parameters for building a stop board.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Maximum number of arrivals on a board.
    pub display_limit: usize,

    /// How long after departure a train is still shown (seconds).
    /// Absorbs clock and feed skew.
    pub past_tolerance_secs: f64,

    /// Maximum admitted stop times per queried platform.
    /// `None` admits every upcoming stop time.
    pub per_stop_limit: Option<usize>,

    /// Deadline for each individual upstream call (milliseconds).
    pub call_timeout_ms: u64,
}

impl BoardConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        display_limit: usize,
        past_tolerance_secs: f64,
        per_stop_limit: Option<usize>,
        call_timeout_ms: u64,
    ) -> Self {
        Self {
            display_limit,
            past_tolerance_secs,
            per_stop_limit,
            call_timeout_ms,
        }
    }

    /// Returns the per-call deadline as a Duration.
    pub fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.call_timeout_ms)
    }

    /// Set the past-departure tolerance.
    pub fn with_past_tolerance(mut self, secs: f64) -> Self {
        self.past_tolerance_secs = secs;
        self
    }

    /// Set the per-call deadline.
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            display_limit: 5,
            past_tolerance_secs: 60.0,
            per_stop_limit: Some(5),
            call_timeout_ms: 5_000,
        }
    }
}
