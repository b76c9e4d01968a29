// src/services/quran.rs

//! Quran lookup service.
//!
//! Fetches verses, whole surahs and free-text matches from the Quran
//! provider and assembles them into [`VerseResult`] / [`ChapterView`].

use async_trait::async_trait;
use futures::{StreamExt, stream};
use reqwest::Client;
use serde::Deserialize;

use super::search::QuranSource;
use super::wire::optional_text;
use crate::error::{AppError, Result};
use crate::gateway::ContentGateway;
use crate::models::{
    Chapter, ChapterVerse, ChapterView, Config, QuranConfig, SURAH_COUNT, SearchConfig, SurahMeta,
    Translation, VerseResult, verse_count,
};
use crate::utils::format_verse_ref;

// --- Upstream wire types ---

#[derive(Debug, Deserialize)]
struct WireSurah {
    number: u16,
    name_arabic: String,
    name_english: String,
    #[serde(default)]
    name_english_translation: Option<String>,
    #[serde(default)]
    ayah_count: u16,
    #[serde(default)]
    revelation_type: String,
}

impl From<WireSurah> for SurahMeta {
    fn from(wire: WireSurah) -> Self {
        let verse_count = match wire.ayah_count {
            0 => verse_count(wire.number).unwrap_or(0),
            n => n,
        };
        SurahMeta {
            number: wire.number,
            name_arabic: wire.name_arabic,
            name_english: wire.name_english,
            name_translation: wire.name_english_translation.unwrap_or_default(),
            revelation_type: wire.revelation_type,
            verse_count,
        }
    }
}

#[derive(Debug, Deserialize)]
struct VerseEnvelope {
    surah: WireSurah,
    verse: WireVerse,
}

#[derive(Debug, Deserialize)]
struct WireVerse {
    number_in_surah: u16,
    arabic: String,
    #[serde(default, deserialize_with = "optional_text")]
    translation: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    transliteration: Option<String>,
    #[serde(default)]
    juz: u16,
    #[serde(default)]
    page: u16,
}

#[derive(Debug, Deserialize)]
struct ChapterEnvelope {
    surah: WireSurah,
    #[serde(default)]
    verses: Vec<WireChapterVerse>,
}

#[derive(Debug, Deserialize)]
struct WireChapterVerse {
    number: u16,
    arabic: String,
    #[serde(default, deserialize_with = "optional_text")]
    translation: Option<String>,
    #[serde(default)]
    juz: u16,
    #[serde(default)]
    page: u16,
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    results: SearchMatches,
}

#[derive(Debug, Default, Deserialize)]
struct SearchMatches {
    #[serde(default)]
    verses: Vec<WireMatch>,
}

#[derive(Debug, Deserialize)]
struct WireMatch {
    surah_number: u16,
    verse_number: u16,
}

#[derive(Debug, Deserialize)]
struct TranslationsEnvelope {
    #[serde(default)]
    translations: Vec<WireTranslation>,
}

#[derive(Debug, Deserialize)]
struct WireTranslation {
    identifier: String,
    name: String,
    #[serde(default)]
    author: Option<String>,
    language: String,
}

// --- Service ---

/// Service for Quran verse, chapter and search lookups.
pub struct QuranService {
    gateway: ContentGateway,
    config: QuranConfig,
    max_matches: usize,
    max_concurrent: usize,
}

impl QuranService {
    /// Create a new Quran service over an existing gateway.
    ///
    /// `search` bounds how many matches a text search expands and how many
    /// verse fetches run at once.
    pub fn new(gateway: ContentGateway, config: &QuranConfig, search: &SearchConfig) -> Self {
        Self {
            gateway,
            config: config.clone(),
            max_matches: search.max_quran_matches,
            max_concurrent: search.max_concurrent_lookups.max(1),
        }
    }

    /// Build the service and its gateway from application configuration.
    pub fn from_config(client: Client, config: &Config) -> Result<Self> {
        let gateway = ContentGateway::new(client, &config.quran.base_url)?;
        Ok(Self::new(gateway, &config.quran, &config.search))
    }

    pub fn default_translation(&self) -> &str {
        &self.config.default_translation
    }

    /// Fetch one verse in Arabic with the requested translation.
    ///
    /// Transliteration is best-effort: when upstream omits it or sends
    /// something unusable the field is left empty and no error is raised.
    pub async fn get_verse(
        &self,
        surah: u16,
        verse: u16,
        translation: &str,
    ) -> Result<VerseResult> {
        check_reference(surah, verse)?;

        let path = format!("api/quran/{surah}/{verse}");
        let envelope: VerseEnvelope = self
            .gateway
            .fetch(
                &path,
                &[("translation", translation), ("transliteration", "true")],
                self.config.detail_cache_secs,
            )
            .await
            .map_err(|e| e.not_found_on_404(format!("verse {}", format_verse_ref(surah, verse))))?;

        let VerseEnvelope { surah: meta, verse: wire } = envelope;
        Ok(VerseResult {
            surah_number: surah,
            verse_number: wire.number_in_surah,
            arabic_text: wire.arabic,
            translation_text: wire.translation,
            transliteration_text: wire.transliteration,
            surah: meta.into(),
            juz: wire.juz,
            page: wire.page,
        })
    }

    /// Fetch a whole surah as parallel Arabic and translation chapters.
    pub async fn get_chapter(&self, surah: u16, translation: &str) -> Result<ChapterView> {
        if verse_count(surah).is_none() {
            return Err(AppError::not_found(format!("surah {surah}")));
        }

        let path = format!("api/quran/{surah}");
        let envelope: ChapterEnvelope = self
            .gateway
            .fetch(
                &path,
                &[("translation", translation)],
                self.config.detail_cache_secs,
            )
            .await
            .map_err(|e| e.not_found_on_404(format!("surah {surah}")))?;

        let meta: SurahMeta = envelope.surah.into();
        let mut arabic = Vec::with_capacity(envelope.verses.len());
        let mut translated = Vec::with_capacity(envelope.verses.len());
        for verse in envelope.verses {
            arabic.push(ChapterVerse {
                number: verse.number,
                text: verse.arabic,
                juz: verse.juz,
                page: verse.page,
            });
            translated.push(ChapterVerse {
                number: verse.number,
                text: verse.translation.unwrap_or_default(),
                juz: verse.juz,
                page: verse.page,
            });
        }

        Ok(ChapterView {
            arabic: Chapter {
                surah: meta.clone(),
                verses: arabic,
            },
            translation: Chapter {
                surah: meta,
                verses: translated,
            },
        })
    }

    /// Free-text search, expanded into full verses.
    ///
    /// At most `max_matches` matches are expanded, `max_concurrent` at a time,
    /// and results keep the upstream match order. A match whose verse fetch
    /// fails is dropped; a failure of the search call itself is returned to
    /// the caller.
    pub async fn search_verses(&self, query: &str, translation: &str) -> Result<Vec<VerseResult>> {
        let envelope: SearchEnvelope = self
            .gateway
            .fetch(
                "api/search",
                &[("q", query), ("type", "quran"), ("translation", translation)],
                self.config.search_cache_secs,
            )
            .await?;

        let matches: Vec<WireMatch> = envelope
            .results
            .verses
            .into_iter()
            .take(self.max_matches)
            .collect();
        log::debug!("Quran search '{}' matched {} verse(s)", query, matches.len());

        let verses: Vec<VerseResult> = stream::iter(matches)
            .map(|m| async move {
                let result = self
                    .get_verse(m.surah_number, m.verse_number, translation)
                    .await;
                (m, result)
            })
            .buffered(self.max_concurrent)
            .filter_map(|(m, result)| async move {
                match result {
                    Ok(verse) => Some(verse),
                    Err(error) => {
                        log::warn!(
                            "Dropping verse {} from search results: {}",
                            format_verse_ref(m.surah_number, m.verse_number),
                            error
                        );
                        None
                    }
                }
            })
            .collect()
            .await;

        Ok(verses)
    }

    /// List translations offered by the provider.
    pub async fn available_translations(&self) -> Result<Vec<Translation>> {
        let envelope: TranslationsEnvelope = self
            .gateway
            .fetch("api/quran/translations", &[], self.config.detail_cache_secs)
            .await?;

        Ok(envelope
            .translations
            .into_iter()
            .map(|t| Translation {
                identifier: t.identifier,
                name: t.name,
                language: t.language,
                author: t.author,
            })
            .collect())
    }
}

#[async_trait]
impl QuranSource for QuranService {
    async fn search(&self, query: &str, translation: &str) -> Result<Vec<VerseResult>> {
        self.search_verses(query, translation).await
    }
}

/// Reject references outside the Quran before any network call.
fn check_reference(surah: u16, verse: u16) -> Result<()> {
    let count = verse_count(surah).ok_or_else(|| {
        AppError::not_found(format!("surah {surah} (expected 1-{SURAH_COUNT})"))
    })?;
    if verse == 0 || verse > count {
        return Err(AppError::not_found(format!(
            "verse {} (surah {} has {} verses)",
            format_verse_ref(surah, verse),
            surah,
            count
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_reference_bounds() {
        assert!(check_reference(1, 1).is_ok());
        assert!(check_reference(1, 7).is_ok());
        assert!(check_reference(114, 6).is_ok());
        assert!(matches!(check_reference(0, 1), Err(AppError::NotFound(_))));
        assert!(matches!(check_reference(115, 1), Err(AppError::NotFound(_))));
        assert!(matches!(check_reference(1, 0), Err(AppError::NotFound(_))));
        assert!(matches!(check_reference(1, 8), Err(AppError::NotFound(_))));
    }

    #[test]
    fn surah_meta_falls_back_to_known_verse_count() {
        let wire: WireSurah = serde_json::from_str(
            r#"{"number": 2, "name_arabic": "البقرة", "name_english": "Al-Baqara"}"#,
        )
        .unwrap();
        let meta: SurahMeta = wire.into();
        assert_eq!(meta.verse_count, 286);
        assert_eq!(meta.name_translation, "");
    }

    #[test]
    fn verse_envelope_tolerates_missing_transliteration() {
        let envelope: VerseEnvelope = serde_json::from_str(
            r#"{
                "surah": {"number": 1, "name_arabic": "الفاتحة", "name_english": "Al-Faatiha",
                          "name_english_translation": "The Opening", "ayah_count": 7,
                          "revelation_type": "Meccan"},
                "verse": {"number": 1, "number_in_surah": 1, "arabic": "بِسْمِ ٱللَّهِ",
                          "translation": "In the name of Allah", "transliteration": null,
                          "juz": 1, "page": 1}
            }"#,
        )
        .unwrap();
        assert_eq!(envelope.verse.transliteration, None);
        assert_eq!(
            envelope.verse.translation.as_deref(),
            Some("In the name of Allah")
        );
    }
}
