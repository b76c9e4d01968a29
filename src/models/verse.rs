//! Quran verse and chapter data structures.

use serde::{Deserialize, Serialize};

/// Number of surahs in the Quran.
pub const SURAH_COUNT: u16 = 114;

/// Verse count of each surah, indexed by `surah - 1`.
const VERSE_COUNTS: [u16; SURAH_COUNT as usize] = [
    7, 286, 200, 176, 120, 165, 206, 75, 129, 109, 123, 111, 43, 52, 99, 128, 111, 110, 98, 135,
    112, 78, 118, 64, 77, 227, 93, 88, 69, 60, 34, 30, 73, 54, 45, 83, 182, 88, 75, 85, 54, 53,
    89, 59, 37, 35, 38, 29, 18, 45, 60, 49, 62, 55, 78, 96, 29, 22, 24, 13, 14, 11, 11, 18, 12,
    12, 30, 52, 52, 44, 28, 28, 20, 56, 40, 31, 50, 40, 46, 42, 29, 19, 36, 25, 22, 17, 19, 26,
    30, 20, 15, 21, 11, 8, 8, 19, 5, 8, 8, 11, 11, 8, 3, 9, 5, 4, 7, 3, 6, 3, 5, 4, 5, 6,
];

/// Number of verses in `surah`, or `None` outside `1..=114`.
pub fn verse_count(surah: u16) -> Option<u16> {
    if surah == 0 {
        return None;
    }
    VERSE_COUNTS.get(usize::from(surah) - 1).copied()
}

/// Descriptive metadata of a surah.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SurahMeta {
    /// Surah number (1-114)
    pub number: u16,

    /// Arabic name
    pub name_arabic: String,

    /// Transliterated English name
    pub name_english: String,

    /// Meaning of the name in English (empty when upstream omits it)
    pub name_translation: String,

    /// "Meccan" or "Medinan" (empty when upstream omits it)
    pub revelation_type: String,

    /// Total verses in the surah
    pub verse_count: u16,
}

/// One Quranic verse matched by a query or lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerseResult {
    pub surah_number: u16,
    pub verse_number: u16,
    pub arabic_text: String,

    /// Present on every successful translation fetch
    pub translation_text: Option<String>,

    /// Best-effort; omitted whenever upstream does not deliver it
    pub transliteration_text: Option<String>,

    pub surah: SurahMeta,
    pub juz: u16,
    pub page: u16,
}

impl VerseResult {
    /// `surah:verse` reference.
    pub fn reference(&self) -> String {
        crate::utils::format_verse_ref(self.surah_number, self.verse_number)
    }
}

/// A single verse inside a chapter listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChapterVerse {
    pub number: u16,
    pub text: String,
    pub juz: u16,
    pub page: u16,
}

/// All verses of a surah in one text layer (Arabic or a translation).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chapter {
    pub surah: SurahMeta,
    pub verses: Vec<ChapterVerse>,
}

/// A surah in Arabic alongside a translation.
///
/// Both `verses` vectors have the same length; index `i` of one corresponds
/// to index `i` of the other.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChapterView {
    pub arabic: Chapter,
    pub translation: Chapter,
}

impl ChapterView {
    /// Iterate `(arabic, translation)` verse pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (&ChapterVerse, &ChapterVerse)> {
        self.arabic.verses.iter().zip(self.translation.verses.iter())
    }
}

/// A translation offered by the Quran provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Translation {
    pub identifier: String,
    pub name: String,
    pub language: String,
    pub author: Option<String>,
}

/// Translations with known display names: `(identifier, name)`.
pub const KNOWN_TRANSLATIONS: &[(&str, &str)] = &[
    ("en.sahih", "Sahih International"),
    ("en.pickthall", "Pickthall"),
    ("en.yusufali", "Yusuf Ali"),
    ("en.asad", "Muhammad Asad"),
];

impl Translation {
    /// Display name for a translation identifier, falling back to the identifier.
    pub fn display_name(identifier: &str) -> &str {
        KNOWN_TRANSLATIONS
            .iter()
            .find(|(id, _)| *id == identifier)
            .map(|(_, name)| *name)
            .unwrap_or(identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verse_counts_cover_the_whole_quran() {
        let total: u32 = VERSE_COUNTS.iter().map(|&n| u32::from(n)).sum();
        assert_eq!(total, 6236);
    }

    #[test]
    fn verse_count_bounds() {
        assert_eq!(verse_count(0), None);
        assert_eq!(verse_count(1), Some(7));
        assert_eq!(verse_count(2), Some(286));
        assert_eq!(verse_count(114), Some(6));
        assert_eq!(verse_count(115), None);
    }

    #[test]
    fn translation_display_name_falls_back() {
        assert_eq!(Translation::display_name("en.asad"), "Muhammad Asad");
        assert_eq!(Translation::display_name("fr.hamidullah"), "fr.hamidullah");
    }
}
