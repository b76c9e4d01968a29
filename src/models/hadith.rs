//! Hadith data structures and grade classification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Authenticity grade of a hadith.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    Sahih,
    Hasan,
    #[serde(rename = "Da'if")]
    Daif,
    Mawdu,
    Unknown,
}

impl Grade {
    /// Classify a raw upstream grade string.
    ///
    /// Case-insensitive substring match, checked in order: "sahih", "hasan",
    /// then "da'if" / "daif" / "weak". Anything else is `Unknown`.
    pub fn classify(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Grade::Unknown;
        };
        let normalized = raw.to_lowercase();
        if normalized.contains("sahih") {
            Grade::Sahih
        } else if normalized.contains("hasan") {
            Grade::Hasan
        } else if ["da'if", "daif", "weak"]
            .iter()
            .any(|needle| normalized.contains(needle))
        {
            Grade::Daif
        } else {
            Grade::Unknown
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grade::Sahih => "Sahih",
            Grade::Hasan => "Hasan",
            Grade::Daif => "Da'if",
            Grade::Mawdu => "Mawdu",
            Grade::Unknown => "Unknown",
        }
    }

    pub fn label_ar(&self) -> &'static str {
        match self {
            Grade::Sahih => "صحيح",
            Grade::Hasan => "حسن",
            Grade::Daif => "ضعيف",
            Grade::Mawdu => "موضوع",
            Grade::Unknown => "غير مصنف",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Grade {
    type Err = AppError;

    /// Parse an exact grade label (`sahih`, `hasan`, `daif`/`da'if`, `mawdu`, `unknown`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sahih" => Ok(Grade::Sahih),
            "hasan" => Ok(Grade::Hasan),
            "daif" | "da'if" => Ok(Grade::Daif),
            "mawdu" => Ok(Grade::Mawdu),
            "unknown" => Ok(Grade::Unknown),
            other => Err(AppError::validation(format!("unknown grade '{other}'"))),
        }
    }
}

/// Chapter a hadith belongs to within its collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HadithChapter {
    pub number: String,
    pub title_english: String,
    pub title_arabic: Option<String>,
}

/// One normalized hadith record.
///
/// `(collection_slug, hadith_number)` identifies the record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HadithResult {
    pub collection_slug: String,

    /// Not always numeric in every collection
    pub hadith_number: String,

    pub arabic_text: Option<String>,
    pub english_text: String,
    pub narrator: Option<String>,
    pub grade: Grade,

    /// Raw grade string the classification was derived from
    pub raw_grade: Option<String>,
    pub graded_by: Option<String>,
    pub chapter: Option<HadithChapter>,
}

impl HadithResult {
    /// `collection:number` key.
    pub fn key(&self) -> String {
        format!("{}:{}", self.collection_slug, self.hadith_number)
    }
}

/// A named hadith compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HadithCollection {
    pub slug: &'static str,
    pub name: &'static str,
    pub grade: Grade,
}

/// The six canonical collections.
pub const COLLECTIONS: &[HadithCollection] = &[
    HadithCollection {
        slug: "bukhari",
        name: "Sahih al-Bukhari",
        grade: Grade::Sahih,
    },
    HadithCollection {
        slug: "muslim",
        name: "Sahih Muslim",
        grade: Grade::Sahih,
    },
    HadithCollection {
        slug: "abu-dawud",
        name: "Sunan Abu Dawud",
        grade: Grade::Hasan,
    },
    HadithCollection {
        slug: "tirmidhi",
        name: "Jami at-Tirmidhi",
        grade: Grade::Hasan,
    },
    HadithCollection {
        slug: "nasai",
        name: "Sunan an-Nasa'i",
        grade: Grade::Hasan,
    },
    HadithCollection {
        slug: "ibn-e-majah",
        name: "Sunan Ibn Majah",
        grade: Grade::Hasan,
    },
];

impl HadithCollection {
    pub fn find(slug: &str) -> Option<&'static HadithCollection> {
        COLLECTIONS.iter().find(|c| c.slug == slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_known_grades() {
        assert_eq!(Grade::classify(Some("Da'if (weak) per Al-Albani")), Grade::Daif);
        assert_eq!(Grade::classify(Some("")), Grade::Unknown);
        assert_eq!(Grade::classify(Some("Sahih — agreed upon")), Grade::Sahih);
        assert_eq!(Grade::classify(Some("HASAN")), Grade::Hasan);
        assert_eq!(Grade::classify(Some("Daif")), Grade::Daif);
        assert_eq!(Grade::classify(Some("Weak chain")), Grade::Daif);
    }

    #[test]
    fn classify_falls_back_to_unknown() {
        assert_eq!(Grade::classify(None), Grade::Unknown);
        assert_eq!(Grade::classify(Some("Munkar")), Grade::Unknown);
        assert_eq!(Grade::classify(Some("Mawdu")), Grade::Unknown);
    }

    #[test]
    fn sahih_wins_over_hasan() {
        assert_eq!(Grade::classify(Some("Hasan Sahih")), Grade::Sahih);
    }

    #[test]
    fn parse_grade_labels() {
        assert_eq!("da'if".parse::<Grade>().unwrap(), Grade::Daif);
        assert_eq!(" Sahih ".parse::<Grade>().unwrap(), Grade::Sahih);
        assert!("authentic".parse::<Grade>().is_err());
    }

    #[test]
    fn grade_serializes_with_apostrophe() {
        assert_eq!(serde_json::to_string(&Grade::Daif).unwrap(), "\"Da'if\"");
    }

    #[test]
    fn find_collection_by_slug() {
        assert_eq!(HadithCollection::find("muslim").unwrap().name, "Sahih Muslim");
        assert!(HadithCollection::find("unknown").is_none());
    }
}
