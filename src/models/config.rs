//! Application configuration structures.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Shared HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Quran provider endpoint and cache hints
    #[serde(default)]
    pub quran: QuranConfig,

    /// Hadith provider endpoint, credential and cache hints
    #[serde(default)]
    pub hadith: HadithConfig,

    /// Aggregation and pagination settings
    #[serde(default)]
    pub search: SearchConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        Url::parse(&self.quran.base_url)
            .map_err(|e| AppError::validation(format!("quran.base_url: {e}")))?;
        Url::parse(&self.hadith.base_url)
            .map_err(|e| AppError::validation(format!("hadith.base_url: {e}")))?;
        if self.quran.default_translation.trim().is_empty() {
            return Err(AppError::validation("quran.default_translation is empty"));
        }
        if self.hadith.search_limit == 0 {
            return Err(AppError::validation("hadith.search_limit must be > 0"));
        }
        if self.search.page_size == 0 {
            return Err(AppError::validation("search.page_size must be > 0"));
        }
        if self.search.max_quran_matches == 0 {
            return Err(AppError::validation("search.max_quran_matches must be > 0"));
        }
        if self.search.max_concurrent_lookups == 0 {
            return Err(AppError::validation(
                "search.max_concurrent_lookups must be > 0",
            ));
        }
        if self.search.source_timeout_secs == 0 {
            return Err(AppError::validation(
                "search.source_timeout_secs must be > 0",
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            quran: QuranConfig::default(),
            hadith: HadithConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

/// HTTP client settings shared by both providers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Transport timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Quran provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuranConfig {
    /// Base URL of the Quran text/translation API
    #[serde(default = "defaults::quran_base_url")]
    pub base_url: String,

    /// Translation used when the caller does not pick one
    #[serde(default = "defaults::default_translation")]
    pub default_translation: String,

    /// Cache hint for verse and chapter lookups
    #[serde(default = "defaults::day")]
    pub detail_cache_secs: u64,

    /// Cache hint for free-text search
    #[serde(default = "defaults::five_minutes")]
    pub search_cache_secs: u64,
}

impl Default for QuranConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::quran_base_url(),
            default_translation: defaults::default_translation(),
            detail_cache_secs: defaults::day(),
            search_cache_secs: defaults::five_minutes(),
        }
    }
}

/// Hadith provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HadithConfig {
    /// Base URL of the Hadith API
    #[serde(default = "defaults::hadith_base_url")]
    pub base_url: String,

    /// API key sent as the `apiKey` query parameter
    #[serde(default)]
    pub api_key: String,

    /// Maximum records requested per search
    #[serde(default = "defaults::search_limit")]
    pub search_limit: usize,

    /// Cache hint for single hadith lookups
    #[serde(default = "defaults::hour")]
    pub detail_cache_secs: u64,

    /// Cache hint for free-text search
    #[serde(default = "defaults::five_minutes")]
    pub search_cache_secs: u64,
}

impl Default for HadithConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::hadith_base_url(),
            api_key: String::new(),
            search_limit: defaults::search_limit(),
            detail_cache_secs: defaults::hour(),
            search_cache_secs: defaults::five_minutes(),
        }
    }
}

/// Aggregation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Results per page
    #[serde(default = "defaults::page_size")]
    pub page_size: usize,

    /// Upper bound on Quran matches expanded per search
    #[serde(default = "defaults::max_quran_matches")]
    pub max_quran_matches: usize,

    /// Verse fetches in flight at once while expanding matches
    #[serde(default = "defaults::max_concurrent_lookups")]
    pub max_concurrent_lookups: usize,

    /// Deadline for each source lookup of one aggregate call
    #[serde(default = "defaults::source_timeout")]
    pub source_timeout_secs: u64,
}

impl SearchConfig {
    pub fn source_timeout(&self) -> Duration {
        Duration::from_secs(self.source_timeout_secs)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: defaults::page_size(),
            max_quran_matches: defaults::max_quran_matches(),
            max_concurrent_lookups: defaults::max_concurrent_lookups(),
            source_timeout_secs: defaults::source_timeout(),
        }
    }
}

mod defaults {
    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; zee/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Provider defaults
    pub fn quran_base_url() -> String {
        "http://localhost:8000".into()
    }
    pub fn hadith_base_url() -> String {
        "https://api.sunnah.com/v1/".into()
    }
    pub fn default_translation() -> String {
        "en.sahih".into()
    }
    pub fn search_limit() -> usize {
        20
    }

    // Cache hints
    pub fn day() -> u64 {
        86_400
    }
    pub fn hour() -> u64 {
        3_600
    }
    pub fn five_minutes() -> u64 {
        300
    }

    // Search defaults
    pub fn page_size() -> usize {
        10
    }
    pub fn max_quran_matches() -> usize {
        20
    }
    pub fn max_concurrent_lookups() -> usize {
        5
    }
    pub fn source_timeout() -> u64 {
        15
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.http.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_page_size() {
        let mut config = Config::default();
        config.search.page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_base_url() {
        let mut config = Config::default();
        config.quran.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [hadith]
            api_key = "secret"

            [search]
            page_size = 25
            "#,
        )
        .unwrap();

        assert_eq!(config.hadith.api_key, "secret");
        assert_eq!(config.hadith.search_limit, 20);
        assert_eq!(config.search.page_size, 25);
        assert_eq!(config.search.max_quran_matches, 20);
        assert_eq!(config.quran.default_translation, "en.sahih");
        assert_eq!(config.quran.search_cache_secs, 300);
    }

    #[test]
    fn validate_rejects_zero_concurrency() {
        let mut config = Config::default();
        config.search.max_concurrent_lookups = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn example_file_matches_defaults() {
        let config: Config = toml::from_str(include_str!("../../zee.example.toml")).unwrap();
        let defaults = Config::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.http.user_agent, defaults.http.user_agent);
        assert_eq!(config.quran.base_url, defaults.quran.base_url);
        assert_eq!(config.hadith.base_url, defaults.hadith.base_url);
        assert_eq!(config.hadith.detail_cache_secs, defaults.hadith.detail_cache_secs);
        assert_eq!(
            config.search.max_concurrent_lookups,
            defaults.search.max_concurrent_lookups
        );
        assert_eq!(
            config.search.source_timeout_secs,
            defaults.search.source_timeout_secs
        );
    }

    #[test]
    fn load_or_default_falls_back_on_missing_file() {
        let config = Config::load_or_default("/definitely/not/here/zee.toml");
        assert_eq!(config.search.page_size, 10);
    }
}
