//! Service layer for the search application.
//!
//! This module contains the business logic for:
//! - Quran verse, chapter and text search lookups (`QuranService`)
//! - Hadith record and text search lookups (`HadithService`)
//! - Concurrent multi-source search with pagination (`SearchAggregator`)

mod hadith;
mod quran;
mod search;
mod wire;

pub use hadith::HadithService;
pub use quran::QuranService;
pub use search::{HadithSource, QuranSource, SearchAggregator};
