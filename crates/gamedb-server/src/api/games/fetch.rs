//! Ingestion from the CheapShark API.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;

use gamedb_cheapshark::{normalize, CheapsharkError};

use crate::middleware::RequestId;

use super::super::{map_db_error, ApiError, AppState};
use super::write::{map_unique_violation, CreateGameResponse};

#[derive(Debug, Deserialize)]
pub(in crate::api) struct FetchQuery {
    pub id: Option<String>,
}

/// POST /games/fetch — fetch one game from the upstream API and store it.
///
/// The upstream game id comes from the optional `?id=` query parameter,
/// falling back to the configured default. Ingested data goes through the
/// same validation pipeline as manual creates; failures there are upstream
/// data problems, not client errors, and surface as an invalid-response 404.
pub(in crate::api) async fn fetch_and_store_game(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<FetchQuery>,
) -> Result<(StatusCode, Json<CreateGameResponse>), ApiError> {
    let rid = &req_id.0;
    let upstream_id = query
        .id
        .as_deref()
        .unwrap_or(&state.default_upstream_game_id);

    let lookup = match state.upstream.game_lookup(upstream_id).await {
        Ok(lookup) => lookup,
        Err(CheapsharkError::Deserialize { context, source }) => {
            tracing::warn!(request_id = %rid, %context, error = %source, "unusable upstream payload");
            return Err(ApiError::new("not_found", "Invalid API response"));
        }
        Err(e) => {
            tracing::error!(request_id = %rid, error = %e, "cheapshark request failed");
            return Err(ApiError::new(
                "internal_error",
                "Failed to fetch/store game data",
            ));
        }
    };

    if lookup.is_empty() {
        tracing::warn!(request_id = %rid, game_id = upstream_id, "no valid data received from API");
        return Err(ApiError::new("not_found", "Invalid API response"));
    }

    let draft = normalize::to_game_draft(&lookup);
    let new_game = match gamedb_core::validate_game_draft(draft) {
        Ok(game) => game,
        Err(e) => {
            tracing::warn!(request_id = %rid, error = %e, "upstream data failed validation");
            return Err(ApiError::new("not_found", "Invalid API response"));
        }
    };

    let existing = gamedb_db::find_conflicting_game(
        &state.pool,
        Some(&new_game.title),
        new_game.game_id.as_deref(),
        None,
    )
    .await
    .map_err(|e| map_db_error(rid, &e))?;

    if let Some(existing) = existing {
        tracing::info!(
            request_id = %rid,
            existing_id = existing.id,
            "game already exists in the database, skipping insertion"
        );
        return Err(ApiError::new(
            "conflict",
            "Game already exists in the database.",
        ));
    }

    let row = gamedb_db::insert_game(&state.pool, &new_game)
        .await
        .map_err(|e| map_unique_violation(rid, &e))?;

    tracing::info!(request_id = %rid, id = row.id, title = %row.title, "game inserted from upstream");
    Ok((
        StatusCode::CREATED,
        Json(CreateGameResponse {
            message: "Game inserted successfully!",
            id: row.id,
        }),
    ))
}
