//! # Bot Configuration Module
//!
//! This module defines configuration structures for the bot: recipe API endpoints,
//! outbound delivery pacing, and conversation session settings. Everything is read
//! once at startup from the environment (optionally populated from a `.env` file).

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::recipe_model::QueryKind;

// Constants for bot configuration
pub const DEFAULT_RANDOM_URL: &str = "www.thecocktaildb.com/api/json/v1/1/random.php";
pub const DEFAULT_SEARCH_URL: &str = "www.thecocktaildb.com/api/json/v1/1/search.php?s={query}";
pub const DEFAULT_LETTER_SEARCH_URL: &str =
    "www.thecocktaildb.com/api/json/v1/1/search.php?f={letter}";
pub const DEFAULT_INGREDIENT_SEARCH_URL: &str =
    "www.thecocktaildb.com/api/json/v1/1/search.php?i={ingredient}";
pub const DEFAULT_DRINKS_BY_INGREDIENT_URL: &str =
    "www.thecocktaildb.com/api/json/v1/1/filter.php?i={ingredient}";
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
pub const BATCH_SIZE: usize = 5;
pub const BATCH_DELAY_MS: u64 = 1000;
pub const MESSAGE_CHUNK_LIMIT: usize = 4000; // Telegram hard limit is 4096
pub const CAPTION_LIMIT: usize = 1024;
pub const SESSION_TTL_SECS: u64 = 30 * 60;

/// URL templates for the five recipe endpoints
#[derive(Debug, Clone)]
pub struct EndpointTemplates {
    pub random: String,
    pub search_by_name: String,
    pub search_by_letter: String,
    pub search_ingredient: String,
    pub drinks_by_ingredient: String,
}

impl EndpointTemplates {
    /// Template for a query kind, with `https://` prepended when no scheme is given
    pub fn resolve(&self, kind: QueryKind) -> String {
        let template = match kind {
            QueryKind::RandomDrink => &self.random,
            QueryKind::SearchByName => &self.search_by_name,
            QueryKind::SearchByLetter => &self.search_by_letter,
            QueryKind::SearchByIngredient => &self.search_ingredient,
            QueryKind::DrinksByIngredient => &self.drinks_by_ingredient,
        };

        if template.contains("://") {
            template.clone()
        } else {
            format!("https://{template}")
        }
    }
}

impl Default for EndpointTemplates {
    fn default() -> Self {
        Self {
            random: DEFAULT_RANDOM_URL.to_string(),
            search_by_name: DEFAULT_SEARCH_URL.to_string(),
            search_by_letter: DEFAULT_LETTER_SEARCH_URL.to_string(),
            search_ingredient: DEFAULT_INGREDIENT_SEARCH_URL.to_string(),
            drinks_by_ingredient: DEFAULT_DRINKS_BY_INGREDIENT_URL.to_string(),
        }
    }
}

/// Recipe API client configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub endpoints: EndpointTemplates,
    /// Timeout for every API call in seconds
    pub request_timeout_secs: u64,
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoints: EndpointTemplates::default(),
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Outbound message pacing and size limits
#[derive(Debug, Clone)]
pub struct DeliveryConfig {
    /// Messages per batch for multi-result replies
    pub batch_size: usize,
    /// Pause between batches in milliseconds
    pub batch_delay_ms: u64,
    /// Maximum characters in one plain text message
    pub message_chunk_limit: usize,
    /// Maximum characters in a photo caption
    pub caption_limit: usize,
}

impl DeliveryConfig {
    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            batch_size: BATCH_SIZE,
            batch_delay_ms: BATCH_DELAY_MS,
            message_chunk_limit: MESSAGE_CHUNK_LIMIT,
            caption_limit: CAPTION_LIMIT,
        }
    }
}

/// Conversation session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Seconds an awaiting state stays valid; 0 disables expiry
    pub ttl_secs: u64,
}

impl SessionConfig {
    /// Build a session config, rejecting TTLs chrono cannot represent
    pub fn from_secs(ttl_secs: u64) -> Result<Self> {
        let config = Self { ttl_secs };
        config.checked_ttl()?;
        Ok(config)
    }

    fn checked_ttl(&self) -> Result<Option<chrono::Duration>> {
        if self.ttl_secs == 0 {
            return Ok(None);
        }

        let secs = i64::try_from(self.ttl_secs)
            .with_context(|| format!("SESSION_TTL_SECS is out of range: {}", self.ttl_secs))?;
        chrono::Duration::try_seconds(secs)
            .map(Some)
            .with_context(|| format!("SESSION_TTL_SECS is out of range: {}", self.ttl_secs))
    }

    /// Expiry for awaiting states, `None` when disabled
    pub fn ttl(&self) -> Option<chrono::Duration> {
        self.checked_ttl().ok().flatten()
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: SESSION_TTL_SECS,
        }
    }
}

/// Everything the conversation layer needs at runtime
#[derive(Debug, Clone, Default)]
pub struct BotConfig {
    pub api: ApiConfig,
    pub delivery: DeliveryConfig,
    pub session: SessionConfig,
}

/// Process-wide settings, read once at startup
#[derive(Clone)]
pub struct Settings {
    pub bot_token: String,
    pub debug_mode: bool,
    pub bot: BotConfig,
}

// Keeps the token out of logs
impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("bot_token", &"<redacted>")
            .field("debug_mode", &self.debug_mode)
            .field("bot", &self.bot)
            .finish()
    }
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let bot_token = env::var("TELEGRAM_BOT_TOKEN")
            .or_else(|_| env::var("BOT_TOKEN"))
            .context("TELEGRAM_BOT_TOKEN must be set")?;

        let defaults = EndpointTemplates::default();
        let endpoints = EndpointTemplates {
            random: env::var("COCKTAIL_API_URL").unwrap_or(defaults.random),
            search_by_name: env::var("COCKTAIL_SEARCH_API_URL").unwrap_or(defaults.search_by_name),
            search_by_letter: env::var("COCKTAIL_LETTER_SEARCH_API_URL")
                .unwrap_or(defaults.search_by_letter),
            search_ingredient: env::var("INGREDIENT_SEARCH_API_URL")
                .unwrap_or(defaults.search_ingredient),
            drinks_by_ingredient: env::var("DRINKS_BY_INGREDIENT_API_URL")
                .unwrap_or(defaults.drinks_by_ingredient),
        };

        let bot = BotConfig {
            api: ApiConfig {
                endpoints,
                request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", REQUEST_TIMEOUT_SECS)?,
            },
            delivery: DeliveryConfig {
                batch_size: env_or("BATCH_SIZE", BATCH_SIZE)?.max(1),
                batch_delay_ms: env_or("BATCH_DELAY_MS", BATCH_DELAY_MS)?,
                message_chunk_limit: env_or("MESSAGE_CHUNK_LIMIT", MESSAGE_CHUNK_LIMIT)?,
                caption_limit: env_or("CAPTION_LIMIT", CAPTION_LIMIT)?,
            },
            session: SessionConfig::from_secs(env_or("SESSION_TTL_SECS", SESSION_TTL_SECS)?)?,
        };

        let debug_mode = env::var("DEBUG_MODE")
            .map(|value| parse_flag(&value))
            .unwrap_or(false);

        Ok(Self {
            bot_token,
            debug_mode,
            bot,
        })
    }
}

/// Read an optional numeric variable, falling back to `default` when unset
fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

/// `true`, `1` and `t` (any case) enable a flag
pub fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "true" | "1" | "t")
}
