// src/config.rs

//! Configuration loading utilities.
//!
//! Reads the TOML file, then lets the environment override the provider
//! endpoint and credential, then validates the result.

use std::path::Path;

use crate::error::Result;
use crate::models::Config;

/// Overrides the Quran provider base URL.
pub const QURAN_URL_ENV: &str = "ZEE_API_URL";

/// Overrides the Hadith provider API key.
pub const HADITH_KEY_ENV: &str = "HADITH_API_KEY";

/// Apply environment overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(QURAN_URL_ENV).filter(|v| !v.trim().is_empty()) {
        log::debug!("Quran base URL overridden by {}", QURAN_URL_ENV);
        config.quran.base_url = url;
    }
    if let Some(key) = lookup(HADITH_KEY_ENV).filter(|v| !v.trim().is_empty()) {
        log::debug!("Hadith API key taken from {}", HADITH_KEY_ENV);
        config.hadith.api_key = key;
    }
}

/// Load configuration from `path`, apply the process environment and validate.
///
/// A missing or unreadable file falls back to defaults.
pub fn load_config(path: &Path) -> Result<Config> {
    let mut config = Config::load_or_default(path);
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    #[test]
    fn env_overrides_endpoint_and_key() {
        let env: HashMap<&str, &str> = HashMap::from([
            (QURAN_URL_ENV, "https://quran.example.org"),
            (HADITH_KEY_ENV, "k-123"),
        ]);
        let mut config = Config::default();
        apply_env_overrides(&mut config, |name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.quran.base_url, "https://quran.example.org");
        assert_eq!(config.hadith.api_key, "k-123");
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let mut config = Config::default();
        apply_env_overrides(&mut config, |_| Some("  ".to_string()));
        assert_eq!(config.quran.base_url, "http://localhost:8000");
        assert!(config.hadith.api_key.is_empty());
    }

    #[test]
    fn load_reads_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[quran]\ndefault_translation = \"en.asad\"\n\n[search]\nsource_timeout_secs = 5"
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.quran.default_translation, "en.asad");
        assert_eq!(config.search.source_timeout_secs, 5);
    }

    #[test]
    fn load_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[search]\npage_size = 0").unwrap();
        assert!(load_config(file.path()).is_err());
    }
}
