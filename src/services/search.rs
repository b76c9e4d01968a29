// src/services/search.rs

//! Search aggregation across the Quran and Hadith sources.
//!
//! Both sources are queried concurrently and each outcome is inspected on its
//! own, so one source failing never hides the other's results. Results are
//! merged Quran first, Hadith second, each in upstream order, then sliced into
//! a page.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::{
    Config, HadithResult, SearchPage, Source, TaggedResult, TypeFilter, VerseResult,
};
use crate::pagination::page_window;

/// Free-text Quran search as seen by the aggregator.
#[async_trait]
pub trait QuranSource: Send + Sync {
    async fn search(&self, query: &str, translation: &str) -> Result<Vec<VerseResult>>;
}

/// Free-text Hadith search as seen by the aggregator.
///
/// Implementations must report upstream failures rather than absorb them.
#[async_trait]
pub trait HadithSource: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<HadithResult>>;
}

/// Deadline applied to each source when none is configured.
const DEFAULT_SOURCE_TIMEOUT: Duration = Duration::from_secs(15);

/// Aggregates both sources into paginated [`SearchPage`]s.
pub struct SearchAggregator {
    quran: Arc<dyn QuranSource>,
    hadith: Arc<dyn HadithSource>,
    translation: String,
    source_timeout: Duration,
}

impl SearchAggregator {
    /// Create an aggregator searching Quran matches in `translation`.
    pub fn new(
        quran: Arc<dyn QuranSource>,
        hadith: Arc<dyn HadithSource>,
        translation: impl Into<String>,
    ) -> Self {
        Self {
            quran,
            hadith,
            translation: translation.into(),
            source_timeout: DEFAULT_SOURCE_TIMEOUT,
        }
    }

    /// Create an aggregator using the configured translation and deadline.
    pub fn from_config(
        quran: Arc<dyn QuranSource>,
        hadith: Arc<dyn HadithSource>,
        config: &Config,
    ) -> Self {
        Self::new(quran, hadith, &config.quran.default_translation)
            .with_timeout(config.search.source_timeout())
    }

    /// Use a different Quran translation.
    pub fn with_translation(mut self, translation: impl Into<String>) -> Self {
        self.translation = translation.into();
        self
    }

    /// Bound each source lookup by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.source_timeout = timeout;
        self
    }

    pub fn translation(&self) -> &str {
        &self.translation
    }

    /// Search both sources (subject to `filter`) and return page `page`.
    ///
    /// A source excluded by `filter` is not called and counts as an empty
    /// success. When exactly one called source fails its error is kept on the
    /// page; when both fail the call returns
    /// [`AppError::DualSourceFailure`] carrying both reasons.
    pub async fn aggregate(
        &self,
        query: &str,
        filter: TypeFilter,
        page: usize,
        page_size: usize,
    ) -> Result<SearchPage> {
        if page_size == 0 {
            return Err(AppError::validation("page_size must be > 0"));
        }

        let quran_call = async {
            if filter.includes(Source::Quran) {
                self.settle(Source::Quran, self.quran.search(query, &self.translation))
                    .await
            } else {
                Ok(Vec::new())
            }
        };
        let hadith_call = async {
            if filter.includes(Source::Hadith) {
                self.settle(Source::Hadith, self.hadith.search(query)).await
            } else {
                Ok(Vec::new())
            }
        };

        // Both run to completion; neither outcome short-circuits the other.
        let (quran_outcome, hadith_outcome) = futures::join!(quran_call, hadith_call);

        let (verses, quran_error) = split_outcome(Source::Quran, quran_outcome);
        let (hadiths, hadith_error) = split_outcome(Source::Hadith, hadith_outcome);

        let (quran_error, hadith_error) = match (quran_error, hadith_error) {
            (Some(quran), Some(hadith)) => return Err(AppError::dual(quran, hadith)),
            errors => errors,
        };

        let quran_count = verses.len();
        let hadith_count = hadiths.len();
        let merged: Vec<TaggedResult> = verses
            .into_iter()
            .map(TaggedResult::Quran)
            .chain(hadiths.into_iter().map(TaggedResult::Hadith))
            .collect();

        let total_count = merged.len();
        let window = page_window(total_count, page, page_size);
        let items: Vec<TaggedResult> = merged
            .into_iter()
            .skip(window.start)
            .take(window.end - window.start)
            .collect();

        log::info!(
            "Search '{}' ({}): {} quran + {} hadith, page {}/{}",
            query,
            filter,
            quran_count,
            hadith_count,
            window.resolved_page,
            window.total_pages
        );

        Ok(SearchPage {
            items,
            total_count,
            total_pages: window.total_pages,
            resolved_page: window.resolved_page,
            quran_count,
            hadith_count,
            quran_error,
            hadith_error,
        })
    }

    /// Await one source under the deadline.
    async fn settle<T, F>(&self, source: Source, lookup: F) -> Result<Vec<T>>
    where
        F: Future<Output = Result<Vec<T>>>,
    {
        match tokio::time::timeout(self.source_timeout, lookup).await {
            Ok(outcome) => outcome,
            Err(_) => Err(AppError::Timeout {
                lookup: source,
                after: self.source_timeout,
            }),
        }
    }
}

fn split_outcome<T>(source: Source, outcome: Result<Vec<T>>) -> (Vec<T>, Option<AppError>) {
    match outcome {
        Ok(items) => (items, None),
        Err(error) => {
            log::warn!("{} search failed: {}", source, error);
            (Vec::new(), Some(error))
        }
    }
}
