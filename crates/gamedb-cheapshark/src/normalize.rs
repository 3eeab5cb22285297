//! Maps the upstream lookup shape into the core draft type.

use gamedb_core::{DealInput, GameDraft, PriceInput};

use crate::types::GameLookup;

/// Builds a [`GameDraft`] from a lookup response.
///
/// Upstream deals missing either `storeID` or `price` are dropped here; the
/// full validation pipeline still runs on the result before persistence.
#[must_use]
pub fn to_game_draft(lookup: &GameLookup) -> GameDraft {
    let info = lookup.info.as_ref();

    let deals = lookup.deals.as_ref().map(|deals| {
        deals
            .iter()
            .filter(|d| d.store_id.is_some() && d.price.is_some())
            .map(|d| DealInput {
                store_id: d.store_id.clone(),
                price: d.price.clone().map(PriceInput::Text),
            })
            .collect()
    });

    GameDraft {
        title: info.and_then(|i| i.title.clone()),
        game_id: info.and_then(|i| i.game_id.clone()),
        thumb: info.and_then(|i| i.thumb.clone()),
        cheapest_price: lookup
            .cheapest_price_ever
            .as_ref()
            .and_then(|c| c.price.clone())
            .map(PriceInput::Text),
        deals,
    }
}
