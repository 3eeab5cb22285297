pub mod app_config;
pub mod config;
pub mod game;
pub mod validate;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use game::{Deal, DealInput, Game, GameDraft, GamePatch, NewGame, PriceInput};
pub use validate::{
    validate_deals, validate_game_draft, validate_price, validate_thumb, validate_title,
    PriceField, ValidationError, MAX_DEALS,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
