//! Web layer for the arrival board.
//!
//! JSON endpoints for stop boards and line listings.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
