//! Game CRUD and ingestion handlers.
//!
//! - `GET /games`         — all games
//! - `GET /games/{id}`    — single game
//! - `POST /games`        — create with full validation
//! - `PUT /games/{id}`    — partial update of the supplied fields only
//! - `DELETE /games`      — unconditional bulk delete
//! - `DELETE /games/{id}` — single delete
//! - `POST /games/fetch`  — ingest one game from the CheapShark API

pub(super) mod fetch;
pub(super) mod write;

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use gamedb_core::Game;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, AppState};

/// GET /games — every stored game, oldest first.
pub(super) async fn list_games(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<Vec<Game>>, ApiError> {
    let rows = gamedb_db::list_games(&state.pool)
        .await
        .map_err(|e| map_db_error(&req_id.0, &e))?;

    tracing::info!(request_id = %req_id.0, count = rows.len(), "fetched all games");
    Ok(Json(rows.into_iter().map(Game::from).collect()))
}

/// GET /games/{id} — a single game, or 404.
pub(super) async fn get_game(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<i64>,
) -> Result<Json<Game>, ApiError> {
    let row = gamedb_db::get_game(&state.pool, id)
        .await
        .map_err(|e| map_db_error(&req_id.0, &e))?
        .ok_or_else(|| ApiError::new("not_found", "Game not found"))?;

    Ok(Json(Game::from(row)))
}
