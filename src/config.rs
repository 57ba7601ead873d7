use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use zeroize::Zeroizing;

use crate::error::ConfigError;

pub const DEFAULT_BIRD_EYE_URL: &str = "https://public-api.birdeye.so/defi";
pub const DEFAULT_DEXSCREENER_URL: &str = "https://api.dexscreener.com/latest/dex";
pub const DEFAULT_CHAIN: &str = "solana";

/// Runtime settings, read from the process environment (and `.env`).
#[derive(Clone)]
pub struct Config {
    pub bird_eye_token: Option<Zeroizing<String>>,
    pub bird_eye_url: String,
    pub bird_eye_chain: String,
    pub dexscreener_url: String,
    pub request_timeout: Duration,
    pub max_retries: u32,
    pub requests_per_minute: u32,
    pub price_cache_ttl: Duration,
    pub price_cache_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bird_eye_token: None,
            bird_eye_url: DEFAULT_BIRD_EYE_URL.to_string(),
            bird_eye_chain: DEFAULT_CHAIN.to_string(),
            dexscreener_url: DEFAULT_DEXSCREENER_URL.to_string(),
            request_timeout: Duration::from_secs(10),
            max_retries: 3,
            requests_per_minute: 300,
            price_cache_ttl: Duration::from_secs(30),
            price_cache_capacity: 1000,
        }
    }
}

impl Config {
    pub fn load_from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset or blank keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            bird_eye_token: get("BIRD_EYE_TOKEN").map(Zeroizing::new),
            bird_eye_url: get("BIRD_EYE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.bird_eye_url),
            bird_eye_chain: get("BIRD_EYE_CHAIN").unwrap_or(defaults.bird_eye_chain),
            dexscreener_url: get("DEXSCREENER_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.dexscreener_url),
            request_timeout: parse_var(get("REQUEST_TIMEOUT_SECS"), "REQUEST_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            max_retries: parse_var(get("MAX_RETRIES"), "MAX_RETRIES")?
                .unwrap_or(defaults.max_retries),
            requests_per_minute: parse_var(get("REQUESTS_PER_MINUTE"), "REQUESTS_PER_MINUTE")?
                .unwrap_or(defaults.requests_per_minute),
            price_cache_ttl: parse_var(get("PRICE_CACHE_TTL_SECS"), "PRICE_CACHE_TTL_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.price_cache_ttl),
            price_cache_capacity: parse_var(get("PRICE_CACHE_CAPACITY"), "PRICE_CACHE_CAPACITY")?
                .unwrap_or(defaults.price_cache_capacity),
        })
    }

    pub fn require_bird_eye_token(&self) -> Result<Zeroizing<String>, ConfigError> {
        self.bird_eye_token
            .clone()
            .ok_or(ConfigError::MissingVar("BIRD_EYE_TOKEN"))
    }
}

fn parse_var<T>(raw: Option<String>, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.map(|value| {
        value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidValue {
                key,
                reason: e.to_string(),
                value,
            })
    })
    .transpose()
}

// Keeps the API key out of logs
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field(
                "bird_eye_token",
                &self.bird_eye_token.as_ref().map(|_| "<redacted>"),
            )
            .field("bird_eye_url", &self.bird_eye_url)
            .field("bird_eye_chain", &self.bird_eye_chain)
            .field("dexscreener_url", &self.dexscreener_url)
            .field("request_timeout", &self.request_timeout)
            .field("max_retries", &self.max_retries)
            .field("requests_per_minute", &self.requests_per_minute)
            .field("price_cache_ttl", &self.price_cache_ttl)
            .field("price_cache_capacity", &self.price_cache_capacity)
            .finish()
    }
}
