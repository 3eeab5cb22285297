//! Wire types for the CheapShark game lookup endpoint.
//!
//! CheapShark serializes every monetary amount as a string; the fields stay
//! strings here and go through the core price validation downstream.

use serde::Deserialize;

/// Response envelope of `GET /api/1.0/games?id=...`.
///
/// An unknown game id yields an empty JSON object, which deserializes to a
/// lookup with every field absent — see [`GameLookup::is_empty`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GameLookup {
    #[serde(default)]
    pub info: Option<GameInfo>,
    #[serde(rename = "cheapestPriceEver", default)]
    pub cheapest_price_ever: Option<CheapestPriceEver>,
    #[serde(default)]
    pub deals: Option<Vec<DealOffer>>,
}

impl GameLookup {
    /// True when the upstream returned no usable payload.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.info.is_none() && self.cheapest_price_ever.is_none() && self.deals.is_none()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameInfo {
    #[serde(rename = "gameID", default)]
    pub game_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub thumb: Option<String>,
}

/// The lowest price ever recorded for the game.
#[derive(Debug, Clone, Deserialize)]
pub struct CheapestPriceEver {
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub date: Option<i64>,
}

/// One store offer from the lookup response.
#[derive(Debug, Clone, Deserialize)]
pub struct DealOffer {
    #[serde(rename = "storeID", default)]
    pub store_id: Option<String>,
    #[serde(rename = "dealID", default)]
    pub deal_id: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(rename = "retailPrice", default)]
    pub retail_price: Option<String>,
    #[serde(default)]
    pub savings: Option<String>,
}
