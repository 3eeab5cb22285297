//! Typed client for the CheapShark pricing API, plus normalization of the
//! upstream response shape into the core game draft.

mod client;
mod error;
pub mod normalize;
mod types;

pub use client::CheapsharkClient;
pub use error::CheapsharkError;
pub use types::{CheapestPriceEver, DealOffer, GameInfo, GameLookup};
