//! Application state for the web layer.

use std::sync::Arc;

use crate::board::StopBoardService;
use crate::transiter::Upstream;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Board service over the live or mock upstream
    pub board: Arc<StopBoardService<Upstream>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(board: StopBoardService<Upstream>) -> Self {
        Self {
            board: Arc::new(board),
        }
    }
}
