//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tracing::warn;

use crate::board::{BoardError, StopBoard};
use crate::domain::{InvalidStopId, StopId};
use crate::topology::LineView;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/lines", get(list_lines))
        .route("/api/lines/:line", get(show_line))
        .route("/api/board/*stop_id", get(show_board))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Every trunk line with its stop count.
async fn list_lines(State(state): State<AppState>) -> Json<LinesResponse> {
    Json(LinesResponse {
        lines: state.board.lines(),
    })
}

/// Stops of one trunk, looked up by service code or trunk name.
async fn show_line(
    State(state): State<AppState>,
    Path(line): Path<String>,
) -> Result<Json<LineView>, AppError> {
    state
        .board
        .line(&line)
        .map(Json)
        .ok_or_else(|| AppError::NotFound {
            message: format!("Unknown line: {line}"),
        })
}

/// Arrivals, transfers and headways for a stop.
///
/// The stop id may carry a `/realtime` suffix.
async fn show_board(
    State(state): State<AppState>,
    Path(stop_id): Path<String>,
    Query(query): Query<BoardQuery>,
) -> Result<Json<StopBoard>, AppError> {
    let stop = StopId::parse(stop_id.trim_start_matches('/'))?;
    let board = match query.at {
        Some(at) => state.board.board(&stop, at).await?,
        None => state.board.board_now(&stop).await?,
    };
    Ok(Json(board))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
}

impl From<InvalidStopId> for AppError {
    fn from(e: InvalidStopId) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<BoardError> for AppError {
    fn from(e: BoardError) -> Self {
        match e {
            BoardError::StopNotFound(_) => AppError::NotFound {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
        };

        warn!(status = status.as_u16(), %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::board::{BoardConfig, StopBoardService};
    use crate::catalog::StopCatalog;
    use crate::topology::{TrunkTopology, nyc_subway};
    use crate::transiter::{MockTransitApi, Upstream};
    use serde_json::json;

    const STOPS: &str = "\
stop_id,stop_name,stop_lat,stop_lon
A09,168 St,40.840719,-73.939561
";

    fn state() -> AppState {
        let catalog = StopCatalog::load(STOPS.as_bytes()).unwrap();
        let topology = TrunkTopology::build(&catalog, nyc_subway());
        let mock = MockTransitApi::new()
            .with_route("A", "A")
            .with_stop_json("A09", json!({"name": "168 St"}));
        AppState::new(StopBoardService::new(
            Upstream::Mock(mock),
            Arc::new(catalog),
            Arc::new(topology),
            BoardConfig::default(),
        ))
    }

    #[test]
    fn router_builds() {
        let _router = create_router(state());
    }

    #[tokio::test]
    async fn board_for_known_stop() {
        let Json(board) = show_board(
            State(state()),
            Path("A09/realtime".to_string()),
            Query(BoardQuery { at: Some(0.0) }),
        )
        .await
        .unwrap();

        assert_eq!(board.stop_id, "A09");
        assert_eq!(board.stop_name, "168 St");
    }

    #[tokio::test]
    async fn invalid_stop_is_bad_request() {
        let err = show_board(
            State(state()),
            Path("A 09".to_string()),
            Query(BoardQuery::default()),
        )
        .await
        .unwrap_err();

        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_stop_is_not_found() {
        let err = show_board(
            State(state()),
            Path("Z99".to_string()),
            Query(BoardQuery::default()),
        )
        .await
        .unwrap_err();

        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn lines_listing_and_lookup() {
        let Json(lines) = list_lines(State(state())).await;
        assert_eq!(lines.lines.len(), 15);

        let Json(line) = show_line(State(state()), Path("A".to_string()))
            .await
            .unwrap();
        assert_eq!(line.trunk, "Eighth Avenue Line");
        assert_eq!(line.stops.len(), 1);

        let err = show_line(State(state()), Path("X".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
