//! Search filter, merged result and page types.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::{HadithResult, VerseResult};
use crate::error::AppError;

/// One of the two upstream content sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Quran,
    Hadith,
}

impl Source {
    pub fn label(&self) -> &'static str {
        match self {
            Source::Quran => "Quran",
            Source::Hadith => "Hadith",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which sources a search should query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeFilter {
    #[default]
    All,
    Quran,
    Hadith,
}

impl TypeFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeFilter::All => "all",
            TypeFilter::Quran => "quran",
            TypeFilter::Hadith => "hadith",
        }
    }

    /// Whether `source` is queried under this filter.
    pub fn includes(&self, source: Source) -> bool {
        match (self, source) {
            (TypeFilter::All, _) => true,
            (TypeFilter::Quran, Source::Quran) => true,
            (TypeFilter::Hadith, Source::Hadith) => true,
            _ => false,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(TypeFilter::All),
            "quran" => Ok(TypeFilter::Quran),
            "hadith" => Ok(TypeFilter::Hadith),
            other => Err(AppError::validation(format!(
                "unknown type filter '{other}' (expected all, quran or hadith)"
            ))),
        }
    }
}

/// A merged search result that keeps its source type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "item", rename_all = "lowercase")]
pub enum TaggedResult {
    Quran(VerseResult),
    Hadith(HadithResult),
}

impl TaggedResult {
    pub fn source(&self) -> Source {
        match self {
            TaggedResult::Quran(_) => Source::Quran,
            TaggedResult::Hadith(_) => Source::Hadith,
        }
    }
}

/// One page of an aggregated search.
///
/// Built fresh per request. A failed source leaves its error in
/// `quran_error` / `hadith_error` while the other source's results are kept.
#[derive(Debug)]
pub struct SearchPage {
    /// Results on this page, Quran before Hadith
    pub items: Vec<TaggedResult>,

    /// Results across all pages
    pub total_count: usize,

    /// Always at least 1
    pub total_pages: usize,

    /// Requested page clamped into `1..=total_pages`
    pub resolved_page: usize,

    /// Quran results across all pages
    pub quran_count: usize,

    /// Hadith results across all pages
    pub hadith_count: usize,

    pub quran_error: Option<AppError>,
    pub hadith_error: Option<AppError>,
}

impl SearchPage {
    pub fn quran_failed(&self) -> bool {
        self.quran_error.is_some()
    }

    pub fn hadith_failed(&self) -> bool {
        self.hadith_error.is_some()
    }

    /// No results from any queried source. Not an error.
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    /// Quran results on this page.
    pub fn verses(&self) -> impl Iterator<Item = &VerseResult> {
        self.items.iter().filter_map(|item| match item {
            TaggedResult::Quran(verse) => Some(verse),
            TaggedResult::Hadith(_) => None,
        })
    }

    /// Hadith results on this page.
    pub fn hadiths(&self) -> impl Iterator<Item = &HadithResult> {
        self.items.iter().filter_map(|item| match item {
            TaggedResult::Quran(_) => None,
            TaggedResult::Hadith(hadith) => Some(hadith),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_includes_sources() {
        assert!(TypeFilter::All.includes(Source::Quran));
        assert!(TypeFilter::All.includes(Source::Hadith));
        assert!(TypeFilter::Quran.includes(Source::Quran));
        assert!(!TypeFilter::Quran.includes(Source::Hadith));
        assert!(!TypeFilter::Hadith.includes(Source::Quran));
    }

    #[test]
    fn parse_filter() {
        assert_eq!("Hadith".parse::<TypeFilter>().unwrap(), TypeFilter::Hadith);
        assert!("tafsir".parse::<TypeFilter>().is_err());
    }

    #[test]
    fn tagged_result_serializes_with_kind() {
        let item = TaggedResult::Hadith(HadithResult {
            collection_slug: "bukhari".into(),
            hadith_number: "1".into(),
            arabic_text: None,
            english_text: "Actions are by intentions".into(),
            narrator: None,
            grade: crate::models::Grade::Sahih,
            raw_grade: None,
            graded_by: None,
            chapter: None,
        });

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["kind"], "hadith");
        assert_eq!(json["item"]["collection_slug"], "bukhari");
        assert_eq!(item.source(), Source::Hadith);
    }
}
