//! Database operations for the `games` table.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::PgPool;

use gamedb_core::{Deal, Game, GamePatch, NewGame};

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `games` table. Deals are stored as a JSONB array.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GameRow {
    pub id: i64,
    pub game_id: Option<String>,
    pub title: String,
    pub thumb: Option<String>,
    pub cheapest_price: Decimal,
    pub deals: Json<Vec<Deal>>,
    pub created_at: DateTime<Utc>,
}

impl From<GameRow> for Game {
    fn from(row: GameRow) -> Self {
        Self {
            id: row.id,
            game_id: row.game_id,
            title: row.title,
            thumb: row.thumb,
            cheapest_price: row.cheapest_price,
            deals: row.deals.0,
            created_at: row.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns all games, oldest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_games(pool: &PgPool) -> Result<Vec<GameRow>, DbError> {
    let rows = sqlx::query_as::<_, GameRow>(
        "SELECT id, game_id, title, thumb, cheapest_price, deals, created_at \
         FROM games \
         ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns a single game by id, or `None` if not found.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_game(pool: &PgPool, id: i64) -> Result<Option<GameRow>, DbError> {
    let row = sqlx::query_as::<_, GameRow>(
        "SELECT id, game_id, title, thumb, cheapest_price, deals, created_at \
         FROM games \
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Inserts a validated game and returns the full row, `created_at` included.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails (including unique constraint
/// violations on `title` or `game_id`).
pub async fn insert_game(pool: &PgPool, game: &NewGame) -> Result<GameRow, DbError> {
    let row = sqlx::query_as::<_, GameRow>(
        "INSERT INTO games (game_id, title, thumb, cheapest_price, deals) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING id, game_id, title, thumb, cheapest_price, deals, created_at",
    )
    .bind(game.game_id.as_deref())
    .bind(&game.title)
    .bind(game.thumb.as_deref())
    .bind(game.cheapest_price)
    .bind(Json(&game.deals))
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Finds a game colliding with the candidate title or non-null `game_id`.
///
/// Each side of the OR participates only when the corresponding candidate
/// value is supplied; `exclude_id` removes the record itself from
/// consideration on the update path.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_conflicting_game(
    pool: &PgPool,
    title: Option<&str>,
    game_id: Option<&str>,
    exclude_id: Option<i64>,
) -> Result<Option<GameRow>, DbError> {
    let row = sqlx::query_as::<_, GameRow>(
        "SELECT id, game_id, title, thumb, cheapest_price, deals, created_at \
         FROM games \
         WHERE (($1::TEXT IS NOT NULL AND title = $1) \
             OR ($2::TEXT IS NOT NULL AND game_id = $2)) \
           AND ($3::BIGINT IS NULL OR id <> $3) \
         LIMIT 1",
    )
    .bind(title)
    .bind(game_id)
    .bind(exclude_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Applies a partial update in a single statement.
///
/// `Some` fields overwrite, outer-`None` fields keep the stored value, and
/// `game_id: Some(None)` clears the column. Returns the number of rows
/// affected (0 when the id does not exist).
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails (including unique constraint
/// violations on `title` or `game_id`).
pub async fn update_game(pool: &PgPool, id: i64, patch: &GamePatch) -> Result<u64, DbError> {
    // game_id is nullable, so a COALESCE cannot express "set to NULL"; a
    // supplied flag plus the value covers all three cases.
    let game_id_supplied = patch.game_id.is_some();
    let game_id_val = patch.game_id.clone().flatten();

    let result = sqlx::query(
        "UPDATE games \
         SET title          = COALESCE($2, title), \
             thumb          = COALESCE($3, thumb), \
             cheapest_price = COALESCE($4, cheapest_price), \
             deals          = COALESCE($5, deals), \
             game_id        = CASE WHEN $6::BOOL THEN $7 ELSE game_id END \
         WHERE id = $1",
    )
    .bind(id)
    .bind(patch.title.as_deref())
    .bind(patch.thumb.as_deref())
    .bind(patch.cheapest_price)
    .bind(patch.deals.as_ref().map(Json))
    .bind(game_id_supplied)
    .bind(game_id_val)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Deletes a game by id. Returns the number of rows removed (0 or 1).
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn delete_game(pool: &PgPool, id: i64) -> Result<u64, DbError> {
    let result = sqlx::query("DELETE FROM games WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Deletes every game. Returns the number of rows removed.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn delete_all_games(pool: &PgPool) -> Result<u64, DbError> {
    let result = sqlx::query("DELETE FROM games").execute(pool).await?;

    Ok(result.rows_affected())
}
