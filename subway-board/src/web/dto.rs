//! Request and response types for the HTTP API.

use serde::{Deserialize, Serialize};

use crate::topology::TrunkSummary;

/// Query parameters for a board request.
#[derive(Debug, Default, Deserialize)]
pub struct BoardQuery {
    /// Evaluate the board as of this Unix time instead of now.
    pub at: Option<f64>,
}

/// Response listing every trunk line.
#[derive(Debug, Serialize)]
pub struct LinesResponse {
    pub lines: Vec<TrunkSummary>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
