//! Game and deal domain types, plus the raw wire shapes that feed the
//! validation pipeline.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price offer from one store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deal {
    #[serde(rename = "storeID")]
    pub store_id: String,
    pub price: Decimal,
}

/// A persisted game record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: i64,
    #[serde(rename = "gameID")]
    pub game_id: Option<String>,
    pub title: String,
    pub thumb: Option<String>,
    #[serde(rename = "cheapestPrice")]
    pub cheapest_price: Decimal,
    pub deals: Vec<Deal>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// A price as supplied on the wire: JSON number or string.
///
/// Validation runs on the canonical string form either way, so `9.99` and
/// `"9.99"` are treated identically.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(f64),
    Text(String),
}

impl PriceInput {
    /// The string form the format check operates on.
    #[must_use]
    pub fn canonical(&self) -> String {
        match self {
            PriceInput::Number(n) => n.to_string(),
            PriceInput::Text(s) => s.clone(),
        }
    }
}

/// Raw deal element before invariant checks run.
#[derive(Debug, Clone, Deserialize)]
pub struct DealInput {
    #[serde(rename = "storeID")]
    pub store_id: Option<String>,
    pub price: Option<PriceInput>,
}

/// Unvalidated game fields, as assembled from a create request or the
/// upstream ingestion path.
#[derive(Debug, Clone, Default)]
pub struct GameDraft {
    pub title: Option<String>,
    pub game_id: Option<String>,
    pub thumb: Option<String>,
    pub cheapest_price: Option<PriceInput>,
    pub deals: Option<Vec<DealInput>>,
}

/// A validated game ready for insertion. `created_at` is stamped by the
/// database at insert time.
#[derive(Debug, Clone)]
pub struct NewGame {
    pub game_id: Option<String>,
    pub title: String,
    pub thumb: Option<String>,
    pub cheapest_price: Decimal,
    pub deals: Vec<Deal>,
}

/// A validated partial update.
///
/// Outer `None` means "field not in the request, keep the stored value".
/// For `game_id` the inner option is meaningful too: `Some(None)` clears the
/// column, `Some(Some(v))` sets it.
#[allow(clippy::option_option)]
#[derive(Debug, Clone, Default)]
pub struct GamePatch {
    pub title: Option<String>,
    pub thumb: Option<String>,
    pub cheapest_price: Option<Decimal>,
    pub deals: Option<Vec<Deal>>,
    pub game_id: Option<Option<String>>,
}

impl GamePatch {
    /// True when no field was supplied at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.thumb.is_none()
            && self.cheapest_price.is_none()
            && self.deals.is_none()
            && self.game_id.is_none()
    }
}
