// src/services/hadith.rs

//! Hadith lookup service.
//!
//! Lookups come in two flavours. `try_search` / `try_get` report upstream
//! failures; `search_hadiths` / `get_hadith` absorb them into "empty" and
//! "absent" for callers that must render a plain not-found state.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::search::HadithSource;
use super::wire::{null_as_default, optional_text, string_or_number};
use crate::error::Result;
use crate::gateway::ContentGateway;
use crate::models::{Config, Grade, HadithChapter, HadithConfig, HadithResult};

/// Query parameter carrying the API key.
const API_KEY_PARAM: &str = "apiKey";

// --- Upstream wire types ---

#[derive(Debug, Deserialize)]
struct HadithEnvelope {
    #[serde(default)]
    hadiths: Option<HadithListing>,
    #[serde(default)]
    hadith: Option<WireHadith>,
}

impl HadithEnvelope {
    fn into_records(self) -> Vec<WireHadith> {
        match (self.hadiths, self.hadith) {
            (Some(listing), _) => listing.data,
            (None, Some(single)) => vec![single],
            (None, None) => Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct HadithListing {
    #[serde(default, deserialize_with = "null_as_default")]
    data: Vec<WireHadith>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireHadith {
    #[serde(deserialize_with = "string_or_number")]
    hadith_number: String,
    #[serde(default, deserialize_with = "optional_text")]
    english_narrator: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    hadith_english: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    hadith_arabic: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    book_slug: Option<String>,
    #[serde(default)]
    book: Option<WireBook>,
    #[serde(default)]
    chapter: Option<WireChapter>,
    #[serde(default, deserialize_with = "null_as_default")]
    grades: Vec<WireGrade>,
}

#[derive(Debug, Deserialize)]
struct WireBook {
    #[serde(default, deserialize_with = "optional_text")]
    slug: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireChapter {
    #[serde(default, deserialize_with = "string_or_number")]
    chapter_number: String,
    #[serde(default, deserialize_with = "optional_text")]
    chapter_english: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    chapter_arabic: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    book_slug: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireGrade {
    #[serde(default, deserialize_with = "optional_text")]
    grade: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    graded_by: Option<String>,
}

impl WireHadith {
    /// Normalize into a [`HadithResult`].
    ///
    /// The collection comes from `bookSlug`, then the chapter's or book's
    /// slug, then `fallback_slug`.
    fn normalize(self, fallback_slug: &str) -> HadithResult {
        // The first grade entry is authoritative.
        let first_grade = self.grades.into_iter().next();
        let raw_grade = first_grade
            .as_ref()
            .and_then(|g| g.grade.as_deref())
            .map(|g| g.trim().to_string());
        let grade = Grade::classify(raw_grade.as_deref());

        let collection_slug = self
            .book_slug
            .or_else(|| self.chapter.as_ref().and_then(|c| c.book_slug.clone()))
            .or_else(|| self.book.and_then(|b| b.slug))
            .unwrap_or_else(|| fallback_slug.to_string());

        HadithResult {
            collection_slug,
            hadith_number: self.hadith_number,
            arabic_text: self.hadith_arabic,
            english_text: self.hadith_english.unwrap_or_default(),
            narrator: self.english_narrator.map(|n| n.trim().to_string()),
            grade,
            raw_grade,
            graded_by: first_grade.and_then(|g| g.graded_by),
            chapter: self.chapter.map(|c| HadithChapter {
                number: c.chapter_number,
                title_english: c.chapter_english.unwrap_or_default(),
                title_arabic: c.chapter_arabic,
            }),
        }
    }
}

// --- Service ---

/// Service for hadith record and search lookups.
pub struct HadithService {
    gateway: ContentGateway,
    config: HadithConfig,
}

impl HadithService {
    /// Create a new hadith service over an existing gateway.
    pub fn new(gateway: ContentGateway, config: &HadithConfig) -> Self {
        Self {
            gateway,
            config: config.clone(),
        }
    }

    /// Build the service and its credentialed gateway from application configuration.
    pub fn from_config(client: Client, config: &Config) -> Result<Self> {
        let mut gateway = ContentGateway::new(client, &config.hadith.base_url)?;
        if config.hadith.api_key.is_empty() {
            log::warn!("No Hadith API key configured; upstream will likely reject requests");
        } else {
            gateway = gateway.with_query_credential(API_KEY_PARAM, &config.hadith.api_key);
        }
        Ok(Self::new(gateway, &config.hadith))
    }

    /// Search hadith by English text, reporting upstream failures.
    pub async fn try_search(&self, query: &str) -> Result<Vec<HadithResult>> {
        let limit = self.config.search_limit.to_string();
        let envelope: HadithEnvelope = self
            .gateway
            .fetch(
                "hadiths",
                &[("hadithEnglish", query), ("limit", limit.as_str())],
                self.config.search_cache_secs,
            )
            .await?;

        let records = envelope.into_records();
        log::debug!("Hadith search '{}' returned {} record(s)", query, records.len());
        Ok(records.into_iter().map(|r| r.normalize("")).collect())
    }

    /// Search hadith by English text; any failure yields an empty list.
    pub async fn search_hadiths(&self, query: &str) -> Vec<HadithResult> {
        self.try_search(query).await.unwrap_or_else(|error| {
            log::warn!("Hadith search error: {}", error);
            Vec::new()
        })
    }

    /// Fetch one hadith by collection and number, reporting upstream failures.
    ///
    /// `Ok(None)` means upstream answered but holds no such record.
    pub async fn try_get(&self, collection: &str, number: &str) -> Result<Option<HadithResult>> {
        let path = format!("{collection}/hadiths");
        let envelope: HadithEnvelope = self
            .gateway
            .fetch(
                &path,
                &[("hadithNumber", number)],
                self.config.detail_cache_secs,
            )
            .await?;

        Ok(envelope
            .into_records()
            .into_iter()
            .next()
            .map(|r| r.normalize(collection)))
    }

    /// Fetch one hadith; any failure is treated as absent.
    pub async fn get_hadith(&self, collection: &str, number: &str) -> Option<HadithResult> {
        self.try_get(collection, number).await.unwrap_or_else(|error| {
            log::warn!("Get hadith {}:{} error: {}", collection, number, error);
            None
        })
    }
}

#[async_trait]
impl HadithSource for HadithService {
    async fn search(&self, query: &str) -> Result<Vec<HadithResult>> {
        self.try_search(query).await
    }
}
