// src/models/mod.rs

//! Domain models for the search application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod hadith;
mod locale;
mod search;
mod verse;

// Re-export all public types
pub use config::{Config, HadithConfig, HttpConfig, QuranConfig, SearchConfig};
pub use hadith::{COLLECTIONS, Grade, HadithChapter, HadithCollection, HadithResult};
pub use locale::Locale;
pub use search::{SearchPage, Source, TaggedResult, TypeFilter};
pub use verse::{
    Chapter, ChapterVerse, ChapterView, KNOWN_TRANSLATIONS, SURAH_COUNT, SurahMeta, Translation,
    VerseResult, verse_count,
};
