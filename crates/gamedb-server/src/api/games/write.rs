//! Game write handlers: create, partial update, delete.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Deserializer, Serialize};

use gamedb_core::{
    validate_deals, validate_price, validate_thumb, validate_title, DealInput, GameDraft,
    GamePatch, NewGame, PriceField, PriceInput, ValidationError,
};
use gamedb_db::GameRow;

use crate::middleware::RequestId;

use super::super::{map_db_error, ApiError, AppState};

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Every field is optional on the wire so the validators — not serde — own
/// the missing-field error messages.
#[derive(Debug, Deserialize)]
pub(in crate::api) struct CreateGameRequest {
    pub title: Option<String>,
    #[serde(rename = "gameID")]
    pub game_id: Option<String>,
    pub thumb: Option<String>,
    #[serde(rename = "cheapestPrice")]
    pub cheapest_price: Option<PriceInput>,
    pub deals: Option<Vec<DealInput>>,
}

// Option<Option<String>> is intentional: outer None = "key absent" (keep
// current), Some(None) = `"gameID": null` (explicitly cleared),
// Some(Some(v)) = "set to value".
#[allow(clippy::option_option)]
#[derive(Debug, Deserialize)]
pub(in crate::api) struct UpdateGameRequest {
    pub title: Option<String>,
    pub thumb: Option<String>,
    #[serde(rename = "cheapestPrice")]
    pub cheapest_price: Option<PriceInput>,
    pub deals: Option<Vec<DealInput>>,
    #[serde(rename = "gameID", default, deserialize_with = "double_option")]
    pub game_id: Option<Option<String>>,
}

/// Keeps `"gameID": null` distinguishable from an absent key.
#[allow(clippy::option_option)]
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(in crate::api) struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub(in crate::api) struct CreateGameResponse {
    pub message: &'static str,
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub(in crate::api) struct DeleteAllResponse {
    pub message: String,
    pub count: u64,
}

// ---------------------------------------------------------------------------
// Error mapping helpers
// ---------------------------------------------------------------------------

fn validation_error(e: &ValidationError) -> ApiError {
    ApiError::new("validation_error", e.to_string())
}

/// Maps a unique-index violation (a write racing past the duplicate
/// pre-check) to the same conflict outcome the pre-check produces.
pub(super) fn map_unique_violation(request_id: &str, e: &gamedb_db::DbError) -> ApiError {
    if let gamedb_db::DbError::Sqlx(sqlx::Error::Database(db_err)) = e {
        if db_err.code().as_deref() == Some("23505") {
            return ApiError::new("conflict", "title or gameID already exists in the database.");
        }
    }
    map_db_error(request_id, e)
}

/// Names the colliding field(s) the way the duplicate lookup found them.
fn duplicate_fields_conflict(existing: &GameRow, candidate: &NewGame) -> ApiError {
    let mut fields = Vec::new();
    if existing.title == candidate.title {
        fields.push("title");
    }
    if candidate.game_id.is_some() && existing.game_id == candidate.game_id {
        fields.push("gameID");
    }

    let message = if fields.len() > 1 {
        format!("{} already exist in the database.", fields.join(" and "))
    } else {
        format!(
            "{} already exists in the database.",
            fields.first().copied().unwrap_or("title")
        )
    };
    ApiError::new("conflict", message)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /games — create a game with full validation.
pub(in crate::api) async fn create_game(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<CreateGameRequest>,
) -> Result<(StatusCode, Json<CreateGameResponse>), ApiError> {
    let rid = &req_id.0;

    let draft = GameDraft {
        title: body.title,
        game_id: body.game_id,
        thumb: body.thumb,
        cheapest_price: body.cheapest_price,
        deals: body.deals,
    };
    let new_game = gamedb_core::validate_game_draft(draft).map_err(|e| validation_error(&e))?;

    let existing = gamedb_db::find_conflicting_game(
        &state.pool,
        Some(&new_game.title),
        new_game.game_id.as_deref(),
        None,
    )
    .await
    .map_err(|e| map_db_error(rid, &e))?;

    if let Some(existing) = existing {
        return Err(duplicate_fields_conflict(&existing, &new_game));
    }

    let row = gamedb_db::insert_game(&state.pool, &new_game)
        .await
        .map_err(|e| map_unique_violation(rid, &e))?;

    tracing::info!(request_id = %rid, id = row.id, title = %row.title, "game added");
    Ok((
        StatusCode::CREATED,
        Json(CreateGameResponse {
            message: "Game added successfully!",
            id: row.id,
        }),
    ))
}

/// PUT /games/{id} — partial update; validates only the supplied fields.
pub(in crate::api) async fn update_game(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateGameRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let rid = &req_id.0;

    // Update failures other than duplicates surface as 400, matching the
    // documented contract.
    gamedb_db::get_game(&state.pool, id)
        .await
        .map_err(|e| map_db_error(rid, &e))?
        .ok_or_else(|| ApiError::new("bad_request", "Game not found."))?;

    let patch = build_patch(body).map_err(|e| validation_error(&e))?;

    let title_clause = patch.title.as_deref();
    // An explicit null clears the field and never collides: nulls are not
    // unique.
    let game_id_clause = match &patch.game_id {
        Some(Some(v)) => Some(v.as_str()),
        _ => None,
    };
    if title_clause.is_some() || game_id_clause.is_some() {
        let duplicate =
            gamedb_db::find_conflicting_game(&state.pool, title_clause, game_id_clause, Some(id))
                .await
                .map_err(|e| map_db_error(rid, &e))?;
        if duplicate.is_some() {
            return Err(ApiError::new("conflict", "Duplicate title or gameID found."));
        }
    }

    if patch.is_empty() {
        return Err(validation_error(&ValidationError::EmptyUpdate));
    }

    let affected = gamedb_db::update_game(&state.pool, id, &patch)
        .await
        .map_err(|e| map_unique_violation(rid, &e))?;
    if affected == 0 {
        return Err(ApiError::new(
            "bad_request",
            "Game not found or no changes made.",
        ));
    }

    let message = format!("Game updated with ID: {id}");
    tracing::info!(request_id = %rid, id, "game updated");
    Ok(Json(MessageResponse { message }))
}

/// Validates each supplied field and assembles the tagged patch.
fn build_patch(body: UpdateGameRequest) -> Result<GamePatch, ValidationError> {
    let mut patch = GamePatch::default();

    if let Some(title) = body.title {
        validate_title(Some(&title))?;
        patch.title = Some(title);
    }
    if let Some(thumb) = body.thumb {
        validate_thumb(Some(&thumb))?;
        patch.thumb = Some(thumb);
    }
    if let Some(price) = body.cheapest_price {
        patch.cheapest_price = Some(validate_price(Some(&price), PriceField::CheapestPrice)?);
    }
    if let Some(deals) = body.deals {
        patch.deals = Some(validate_deals(Some(&deals))?);
    }
    if let Some(game_id) = body.game_id {
        patch.game_id = Some(game_id.filter(|s| !s.is_empty()));
    }

    Ok(patch)
}

/// DELETE /games/{id} — remove one game.
pub(in crate::api) async fn delete_game(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let rid = &req_id.0;

    let affected = gamedb_db::delete_game(&state.pool, id)
        .await
        .map_err(|e| map_db_error(rid, &e))?;
    if affected == 0 {
        return Err(ApiError::new("not_found", "Game not found"));
    }

    tracing::info!(request_id = %rid, id, "game deleted");
    Ok(Json(MessageResponse {
        message: "Game deleted successfully".to_string(),
    }))
}

/// DELETE /games — unconditional, irreversible bulk delete.
pub(in crate::api) async fn delete_all_games(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<DeleteAllResponse>, ApiError> {
    let rid = &req_id.0;

    let count = gamedb_db::delete_all_games(&state.pool)
        .await
        .map_err(|e| map_db_error(rid, &e))?;
    if count == 0 {
        return Err(ApiError::new("not_found", "No games found to delete"));
    }

    tracing::info!(request_id = %rid, count, "all games deleted");
    Ok(Json(DeleteAllResponse {
        message: format!("{count} games deleted successfully"),
        count,
    }))
}
