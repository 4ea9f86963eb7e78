use std::env;
use std::time::Duration;

use crate::cache::DEFAULT_CAPACITY;
use crate::providers::{anthropic, gemini};
use crate::vision::DEFAULT_VISION_MODEL;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub gemini_api_key: Option<String>,
    pub gemini_api_base: String,
    pub gemini_model: String,
    pub vision_model: String,
    pub anthropic_api_key: Option<String>,
    pub anthropic_api_base: String,
    pub anthropic_model: String,
    pub rate_limit_max_tokens: u32,
    pub rate_limit_refill_rate: u32,
    pub rate_limit_refill_interval: Duration,
    pub cache_capacity: usize,
}

impl Config {
    /// Reads the process environment. Call `dotenv` first to pick up `.env`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let string = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());
        let secret = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let number = |name: &str, default: u64| {
            lookup(name).and_then(|v| v.trim().parse::<u64>().ok()).unwrap_or(default)
        };

        Self {
            port: lookup("PORT").and_then(|v| v.trim().parse().ok()).unwrap_or(8080),
            gemini_api_key: secret("GEMINI_API_KEY"),
            gemini_api_base: string("GEMINI_API_BASE", gemini::DEFAULT_API_BASE),
            gemini_model: string("GEMINI_MODEL", gemini::DEFAULT_MODEL),
            vision_model: string("GEMINI_VISION_MODEL", DEFAULT_VISION_MODEL),
            anthropic_api_key: secret("ANTHROPIC_API_KEY"),
            anthropic_api_base: string("ANTHROPIC_API_BASE", anthropic::DEFAULT_API_BASE),
            anthropic_model: string("ANTHROPIC_MODEL", anthropic::DEFAULT_MODEL),
            rate_limit_max_tokens: number("RATE_LIMIT_MAX_TOKENS", 20) as u32,
            rate_limit_refill_rate: number("RATE_LIMIT_REFILL_RATE", 2) as u32,
            rate_limit_refill_interval: Duration::from_millis(number("RATE_LIMIT_REFILL_INTERVAL_MS", 1000)),
            cache_capacity: number("CACHE_CAPACITY", DEFAULT_CAPACITY as u64) as usize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = config_from(&[]);
        assert_eq!(config.port, 8080);
        assert!(config.gemini_api_key.is_none());
        assert!(config.anthropic_api_key.is_none());
        assert_eq!(config.gemini_model, "gemini-2.0-flash");
        assert_eq!(config.anthropic_api_base, "https://api.anthropic.com/v1");
        assert_eq!(config.rate_limit_max_tokens, 20);
        assert_eq!(config.rate_limit_refill_rate, 2);
        assert_eq!(config.rate_limit_refill_interval, Duration::from_millis(1000));
        assert_eq!(config.cache_capacity, 100);
    }

    #[test]
    fn blank_keys_count_as_unset() {
        let config = config_from(&[("GEMINI_API_KEY", "  "), ("ANTHROPIC_API_KEY", "sk-ant")]);
        assert!(config.gemini_api_key.is_none());
        assert_eq!(config.anthropic_api_key.as_deref(), Some("sk-ant"));
    }

    #[test]
    fn unparseable_numbers_keep_defaults() {
        let config = config_from(&[("PORT", "http"), ("CACHE_CAPACITY", "7")]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.cache_capacity, 7);
    }
}
