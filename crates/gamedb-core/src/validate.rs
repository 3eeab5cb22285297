//! Field validators and the deal invariant checker.
//!
//! Each validator either returns normally or fails with a [`ValidationError`]
//! whose `Display` form is the client-facing message. Validation stops at the
//! first failure; nothing is partially applied.

use std::collections::HashMap;
use std::str::FromStr;

use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::game::{Deal, DealInput, GameDraft, NewGame, PriceInput};

/// Maximum number of deals a single game may hold.
pub const MAX_DEALS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title is required and must be a non-empty string")]
    TitleRequired,
    #[error("Thumb must be a valid URL")]
    ThumbNotAUrl,
    #[error("Cheapest price is required.")]
    CheapestPriceRequired,
    #[error("Cheapest price must be a valid dollar amount (e.g., 12.50).")]
    CheapestPriceFormat,
    #[error("Cheapest price cannot be negative.")]
    CheapestPriceNegative,
    #[error("Price is required at index {0}")]
    DealPriceRequired(usize),
    #[error("Price must be a valid amount at index {0} (e.g., 12.50)")]
    DealPriceFormat(usize),
    #[error("Price at index {0} cannot be negative")]
    DealPriceNegative(usize),
    #[error("Deals are required for adding a game.")]
    DealsRequired,
    #[error("Deals array cannot be empty")]
    DealsEmpty,
    #[error("Deals array exceeds the limit of 10")]
    TooManyDeals,
    #[error("Deal at index {index} is missing storeID")]
    DealMissingStoreId { index: usize },
    #[error("Deal at index {index} has a duplicate storeID at index {original}")]
    DealDuplicateStoreId { index: usize, original: usize },
    #[error("No changes detected. Provide at least one unique update.")]
    EmptyUpdate,
}

/// Identifies which price field failed, for error message selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceField {
    CheapestPrice,
    Deal(usize),
}

/// Title must be present and non-empty after trimming.
///
/// # Errors
///
/// Returns [`ValidationError::TitleRequired`] otherwise.
pub fn validate_title(title: Option<&str>) -> Result<(), ValidationError> {
    match title {
        Some(t) if !t.trim().is_empty() => Ok(()),
        _ => Err(ValidationError::TitleRequired),
    }
}

/// Thumb is optional; when present it must parse as a URL.
///
/// # Errors
///
/// Returns [`ValidationError::ThumbNotAUrl`] when the value does not parse.
pub fn validate_thumb(thumb: Option<&str>) -> Result<(), ValidationError> {
    match thumb {
        None => Ok(()),
        Some(t) => url::Url::parse(t)
            .map(|_| ())
            .map_err(|_| ValidationError::ThumbNotAUrl),
    }
}

/// Validates a monetary amount and returns it as a [`Decimal`].
///
/// Three checks run in order, each failing independently with a message keyed
/// by `field`: presence, string-form format (digits with an optional 1–2
/// digit fraction), and non-negativity. The format pattern admits a leading
/// sign; the sign check below owns the negative-value message.
///
/// # Errors
///
/// Returns the `*Required`, `*Format`, or `*Negative` variant matching the
/// first failed check.
pub fn validate_price(
    value: Option<&PriceInput>,
    field: PriceField,
) -> Result<Decimal, ValidationError> {
    let Some(value) = value else {
        return Err(match field {
            PriceField::CheapestPrice => ValidationError::CheapestPriceRequired,
            PriceField::Deal(i) => ValidationError::DealPriceRequired(i),
        });
    };

    let raw = value.canonical();

    let format = Regex::new(r"^-?\d+(\.\d{1,2})?$").expect("valid price regex");
    if !format.is_match(&raw) {
        return Err(format_error(field));
    }

    let parsed = Decimal::from_str(&raw).map_err(|_| format_error(field))?;

    if parsed < Decimal::ZERO {
        return Err(match field {
            PriceField::CheapestPrice => ValidationError::CheapestPriceNegative,
            PriceField::Deal(i) => ValidationError::DealPriceNegative(i),
        });
    }

    Ok(parsed)
}

fn format_error(field: PriceField) -> ValidationError {
    match field {
        PriceField::CheapestPrice => ValidationError::CheapestPriceFormat,
        PriceField::Deal(i) => ValidationError::DealPriceFormat(i),
    }
}

/// Checks the deal-array invariants and returns the validated deals.
///
/// The collection must be present, non-empty, and hold at most [`MAX_DEALS`]
/// elements. Elements are checked in order — storeID presence, then storeID
/// uniqueness against earlier elements, then price — and the first failure
/// wins. A duplicate is reported at the later index, naming the index of the
/// original occurrence.
///
/// # Errors
///
/// Returns the variant matching the first violated invariant.
pub fn validate_deals(deals: Option<&[DealInput]>) -> Result<Vec<Deal>, ValidationError> {
    let Some(deals) = deals else {
        return Err(ValidationError::DealsRequired);
    };
    if deals.is_empty() {
        return Err(ValidationError::DealsEmpty);
    }
    if deals.len() > MAX_DEALS {
        return Err(ValidationError::TooManyDeals);
    }

    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(deals.len());
    let mut validated = Vec::with_capacity(deals.len());

    for (index, deal) in deals.iter().enumerate() {
        let store_id = match deal.store_id.as_deref() {
            Some(id) if !id.is_empty() => id,
            _ => return Err(ValidationError::DealMissingStoreId { index }),
        };
        if let Some(&original) = seen.get(store_id) {
            return Err(ValidationError::DealDuplicateStoreId { index, original });
        }
        seen.insert(store_id, index);

        let price = validate_price(deal.price.as_ref(), PriceField::Deal(index))?;
        validated.push(Deal {
            store_id: store_id.to_owned(),
            price,
        });
    }

    Ok(validated)
}

/// Validates a full draft and assembles the insert payload.
///
/// Empty-string optional fields are treated as absent before validation, so
/// an empty `thumb` or `gameID` coalesces to null rather than failing.
///
/// # Errors
///
/// Returns the first validator failure, in field order: title, thumb,
/// cheapest price, deals.
pub fn validate_game_draft(draft: GameDraft) -> Result<NewGame, ValidationError> {
    let GameDraft {
        title,
        game_id,
        thumb,
        cheapest_price,
        deals,
    } = draft;

    let game_id = game_id.filter(|s| !s.is_empty());
    let thumb = thumb.filter(|s| !s.is_empty());

    validate_title(title.as_deref())?;
    validate_thumb(thumb.as_deref())?;
    let cheapest_price = validate_price(cheapest_price.as_ref(), PriceField::CheapestPrice)?;
    let deals = validate_deals(deals.as_deref())?;

    // validate_title guarantees presence.
    let title = title.unwrap_or_default();

    Ok(NewGame {
        game_id,
        title,
        thumb,
        cheapest_price,
        deals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deal(store_id: &str, price: f64) -> DealInput {
        DealInput {
            store_id: Some(store_id.to_string()),
            price: Some(PriceInput::Number(price)),
        }
    }

    fn draft() -> GameDraft {
        GameDraft {
            title: Some("Portal".to_string()),
            game_id: Some("612".to_string()),
            thumb: Some("https://example.com/thumb.jpg".to_string()),
            cheapest_price: Some(PriceInput::Number(9.99)),
            deals: Some(vec![deal("1", 9.99)]),
        }
    }

    #[test]
    fn title_rejects_missing_empty_and_whitespace() {
        assert_eq!(validate_title(None), Err(ValidationError::TitleRequired));
        assert_eq!(
            validate_title(Some("")),
            Err(ValidationError::TitleRequired)
        );
        assert_eq!(
            validate_title(Some("   ")),
            Err(ValidationError::TitleRequired)
        );
        assert_eq!(validate_title(Some("Portal")), Ok(()));
    }

    #[test]
    fn thumb_is_optional_but_must_parse_when_present() {
        assert_eq!(validate_thumb(None), Ok(()));
        assert_eq!(
            validate_thumb(Some("https://example.com/t.jpg")),
            Ok(())
        );
        assert_eq!(
            validate_thumb(Some("not a url")),
            Err(ValidationError::ThumbNotAUrl)
        );
    }

    #[test]
    fn price_format_accepts_up_to_two_decimals() {
        for ok in ["12", "12.5", "12.50", "0", "0.01"] {
            let input = PriceInput::Text(ok.to_string());
            assert!(
                validate_price(Some(&input), PriceField::CheapestPrice).is_ok(),
                "{ok} should pass format"
            );
        }
    }

    #[test]
    fn price_format_rejects_bad_strings() {
        for bad in ["12.500", ".5", "abc", "12.", "1,50", ""] {
            let input = PriceInput::Text(bad.to_string());
            assert_eq!(
                validate_price(Some(&input), PriceField::CheapestPrice),
                Err(ValidationError::CheapestPriceFormat),
                "{bad:?} should fail format"
            );
        }
    }

    #[test]
    fn price_missing_is_a_presence_failure() {
        assert_eq!(
            validate_price(None, PriceField::CheapestPrice),
            Err(ValidationError::CheapestPriceRequired)
        );
        assert_eq!(
            validate_price(None, PriceField::Deal(3)),
            Err(ValidationError::DealPriceRequired(3))
        );
    }

    #[test]
    fn negative_price_fails_with_the_negativity_message_not_format() {
        let as_number = PriceInput::Number(-5.0);
        assert_eq!(
            validate_price(Some(&as_number), PriceField::CheapestPrice),
            Err(ValidationError::CheapestPriceNegative)
        );
        let as_string = PriceInput::Text("-5".to_string());
        assert_eq!(
            validate_price(Some(&as_string), PriceField::Deal(0)),
            Err(ValidationError::DealPriceNegative(0))
        );
    }

    #[test]
    fn price_messages_are_keyed_by_field() {
        assert_eq!(
            ValidationError::CheapestPriceRequired.to_string(),
            "Cheapest price is required."
        );
        assert_eq!(
            ValidationError::DealPriceFormat(2).to_string(),
            "Price must be a valid amount at index 2 (e.g., 12.50)"
        );
        assert_eq!(
            ValidationError::DealPriceNegative(1).to_string(),
            "Price at index 1 cannot be negative"
        );
    }

    #[test]
    fn deals_must_be_present_and_non_empty() {
        assert_eq!(validate_deals(None), Err(ValidationError::DealsRequired));
        assert_eq!(
            validate_deals(Some(&[])),
            Err(ValidationError::DealsEmpty)
        );
    }

    #[test]
    fn deals_are_capped_at_ten() {
        let eleven: Vec<DealInput> = (0..11).map(|i| deal(&i.to_string(), 1.0)).collect();
        assert_eq!(
            validate_deals(Some(&eleven)),
            Err(ValidationError::TooManyDeals)
        );

        let ten: Vec<DealInput> = (0..10).map(|i| deal(&i.to_string(), 1.0)).collect();
        assert!(validate_deals(Some(&ten)).is_ok());
    }

    #[test]
    fn missing_store_id_names_the_element() {
        let deals = vec![
            deal("1", 1.0),
            DealInput {
                store_id: None,
                price: Some(PriceInput::Number(1.0)),
            },
        ];
        assert_eq!(
            validate_deals(Some(&deals)),
            Err(ValidationError::DealMissingStoreId { index: 1 })
        );
    }

    #[test]
    fn duplicate_store_id_is_reported_at_the_later_index() {
        let deals = vec![deal("s1", 1.0), deal("s2", 2.0), deal("s1", 3.0)];
        let err = validate_deals(Some(&deals)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::DealDuplicateStoreId {
                index: 2,
                original: 0
            }
        );
        assert_eq!(
            err.to_string(),
            "Deal at index 2 has a duplicate storeID at index 0"
        );
    }

    #[test]
    fn element_checks_run_store_id_first_then_price() {
        // Element 1 both lacks a storeID and has a bad price; storeID wins.
        let deals = vec![
            deal("1", 1.0),
            DealInput {
                store_id: None,
                price: None,
            },
        ];
        assert_eq!(
            validate_deals(Some(&deals)),
            Err(ValidationError::DealMissingStoreId { index: 1 })
        );
    }

    #[test]
    fn deal_price_errors_carry_the_element_index() {
        let deals = vec![
            deal("1", 1.0),
            DealInput {
                store_id: Some("2".to_string()),
                price: Some(PriceInput::Text("1.999".to_string())),
            },
        ];
        assert_eq!(
            validate_deals(Some(&deals)),
            Err(ValidationError::DealPriceFormat(1))
        );
    }

    #[test]
    fn draft_happy_path_assembles_the_insert_payload() {
        let game = validate_game_draft(draft()).expect("valid draft");
        assert_eq!(game.title, "Portal");
        assert_eq!(game.game_id.as_deref(), Some("612"));
        assert_eq!(game.cheapest_price, Decimal::new(999, 2));
        assert_eq!(game.deals.len(), 1);
        assert_eq!(game.deals[0].store_id, "1");
    }

    #[test]
    fn draft_empty_optional_strings_coalesce_to_none() {
        let mut d = draft();
        d.game_id = Some(String::new());
        d.thumb = Some(String::new());
        let game = validate_game_draft(d).expect("valid draft");
        assert_eq!(game.game_id, None);
        assert_eq!(game.thumb, None);
    }

    #[test]
    fn draft_fails_on_first_invalid_field() {
        let mut d = draft();
        d.title = None;
        d.cheapest_price = None;
        assert_eq!(
            validate_game_draft(d).unwrap_err(),
            ValidationError::TitleRequired
        );
    }
}
