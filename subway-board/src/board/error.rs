//! Board error types.

/// Errors surfaced to callers of the board service.
///
/// Upstream degradation never appears here: it only empties fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// Neither the catalog nor the upstream knows the stop
    #[error("stop {0} not found")]
    StopNotFound(String),
}
