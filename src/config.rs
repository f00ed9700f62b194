// src/config.rs
use anyhow::{Context, Result};
use log::warn;
use std::env;

pub const DEFAULT_PORT: u16 = 3030;

#[derive(Debug, Clone, PartialEq)]
pub struct HostedStoreConfig {
    pub url: String,
    pub anon_key: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    pub feed_seed: Option<u64>,
    pub feed_live: bool,
    pub hosted_store: Option<HostedStoreConfig>,
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>()
                .with_context(|| format!("PORT must be a number, got '{}'", raw))?,
            None => {
                warn!("$PORT not set, defaulting to {}", DEFAULT_PORT);
                DEFAULT_PORT
            }
        };

        let feed_seed = lookup("FEED_SEED")
            .map(|raw| raw.trim().parse::<u64>()
                .with_context(|| format!("FEED_SEED must be an unsigned integer, got '{}'", raw)))
            .transpose()?;

        let feed_live = match lookup("FEED_LIVE") {
            Some(raw) => parse_bool(&raw)
                .with_context(|| format!("FEED_LIVE must be true or false, got '{}'", raw))?,
            None => true,
        };

        let url = lookup("SUPABASE_URL").filter(|v| !v.trim().is_empty());
        let anon_key = lookup("SUPABASE_ANON_KEY").filter(|v| !v.trim().is_empty());
        let hosted_store = match (url, anon_key) {
            (Some(url), Some(anon_key)) => Some(HostedStoreConfig {
                url: url.trim().trim_end_matches('/').to_string(),
                anon_key: anon_key.trim().to_string(),
            }),
            (None, None) => None,
            _ => {
                warn!("Only one of SUPABASE_URL / SUPABASE_ANON_KEY is set, using static data");
                None
            }
        };

        Ok(AppConfig {
            port,
            feed_seed,
            feed_live,
            hosted_store,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.feed_seed, None);
        assert!(cfg.feed_live);
        assert!(cfg.hosted_store.is_none());
    }

    #[test]
    fn reads_feed_and_store_settings() {
        let cfg = config(&[
            ("PORT", "8080"),
            ("FEED_SEED", "42"),
            ("FEED_LIVE", "off"),
            ("SUPABASE_URL", "https://example.supabase.co/"),
            ("SUPABASE_ANON_KEY", "anon"),
        ])
        .unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.feed_seed, Some(42));
        assert!(!cfg.feed_live);
        let store = cfg.hosted_store.unwrap();
        assert_eq!(store.url, "https://example.supabase.co");
        assert_eq!(store.anon_key, "anon");
    }

    #[test]
    fn half_configured_store_is_ignored() {
        let cfg = config(&[("SUPABASE_URL", "https://example.supabase.co")]).unwrap();
        assert!(cfg.hosted_store.is_none());
    }

    #[test]
    fn rejects_bad_numbers() {
        assert!(config(&[("PORT", "eighty")]).is_err());
        assert!(config(&[("FEED_SEED", "-1")]).is_err());
        assert!(config(&[("FEED_LIVE", "maybe")]).is_err());
    }
}
