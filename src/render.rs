// src/render.rs

//! Plain-text rendering of lookups and search pages in English or Arabic.

use crate::error::AppError;
use crate::models::{
    ChapterView, HadithResult, Locale, SearchPage, Source, Translation, VerseResult,
};
use crate::pagination::{PageToken, page_links};
use crate::utils::truncate;

/// Longest hadith excerpt shown in search listings.
const EXCERPT_CHARS: usize = 300;

/// User-facing description of a failed source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureNotice {
    /// Upstream status worth showing (never 0)
    pub code: Option<u16>,
    pub message: &'static str,
    pub hint: String,
}

/// Describe why a source failed, in the given locale.
pub fn describe_failure(error: &AppError, locale: Locale) -> FailureNotice {
    let ar = locale == Locale::Ar;
    let pick = |en: &'static str, ar_text: &'static str| if ar { ar_text } else { en };

    match error {
        AppError::Gateway(gateway) => {
            let path = gateway.path.clone();
            match gateway.status {
                0 => FailureNotice {
                    code: None,
                    message: pick("Could not connect to server", "تعذّر الاتصال بالخادم"),
                    hint: if ar {
                        "تحقق من اتصالك بالإنترنت.".to_string()
                    } else {
                        format!("Network error — {path}")
                    },
                },
                404 => FailureNotice {
                    code: Some(404),
                    message: pick("Content not found", "لم يُعثر على هذا المحتوى"),
                    hint: path,
                },
                429 => FailureNotice {
                    code: Some(429),
                    message: pick("Too many requests", "طلبات كثيرة جداً"),
                    hint: pick("Wait a moment and try again.", "انتظر لحظة وأعد المحاولة.")
                        .to_string(),
                },
                503 => FailureNotice {
                    code: Some(503),
                    message: pick("Service temporarily unavailable", "الخدمة غير متاحة مؤقتاً"),
                    hint: path,
                },
                status if status >= 500 => FailureNotice {
                    code: Some(status),
                    message: pick("Server error", "خطأ في الخادم"),
                    hint: path,
                },
                status => FailureNotice {
                    code: Some(status),
                    message: pick("Unexpected error", "خطأ غير متوقع"),
                    hint: path,
                },
            }
        }
        AppError::Timeout { lookup, after } => FailureNotice {
            code: None,
            message: pick("Request timed out", "انتهت مهلة الطلب"),
            hint: if ar {
                format!("لم يستجب مصدر {} خلال {:?}.", source_name(*lookup, locale), after)
            } else {
                format!("{lookup} did not answer within {after:?}.")
            },
        },
        AppError::Decode { path, .. } => FailureNotice {
            code: None,
            message: pick("Unexpected response", "استجابة غير متوقعة"),
            hint: path.clone(),
        },
        _ => FailureNotice {
            code: None,
            message: pick("Connection error", "خطأ في الاتصال"),
            hint: pick(
                "Check your connection and try again.",
                "تحقق من اتصالك وحاول مرة أخرى.",
            )
            .to_string(),
        },
    }
}

fn source_name(source: Source, locale: Locale) -> &'static str {
    match source {
        Source::Quran => locale.pick("Quran", "القرآن"),
        Source::Hadith => locale.pick("Hadith", "الحديث"),
    }
}

fn code_suffix(code: Option<u16>) -> String {
    code.map(|c| format!(" [{c}]")).unwrap_or_default()
}

/// Inline notice for one failed source next to the other source's results.
pub fn render_source_failure(source: Source, error: &AppError, locale: Locale) -> String {
    let notice = describe_failure(error, locale);
    let title = match locale {
        Locale::En => format!("Could not load {} results", source_name(source, locale)),
        Locale::Ar => format!("تعذّر تحميل نتائج {}", source_name(source, locale)),
    };
    [
        format!("⚠ {title}{}", code_suffix(notice.code)),
        format!("  {}", notice.message),
        format!("  {}", notice.hint),
    ]
    .join("\n")
}

/// Dedicated failure state naming the reason of each source.
///
/// Errors other than [`AppError::DualSourceFailure`] are shown as a single reason.
pub fn render_search_failure(error: &AppError, locale: Locale) -> String {
    let mut lines = vec![format!(
        "⚠ {}",
        locale.pick("Could not load results", "تعذّر تحميل النتائج")
    )];

    match error {
        AppError::DualSourceFailure { quran, hadith } => {
            for (source, reason) in [(Source::Quran, quran), (Source::Hadith, hadith)] {
                let notice = describe_failure(reason, locale);
                lines.push(format!(
                    "  {}{}: {}",
                    source.label(),
                    code_suffix(notice.code),
                    notice.message
                ));
            }
        }
        other => {
            let notice = describe_failure(other, locale);
            lines.push(format!("  {}{}", notice.message, code_suffix(notice.code)));
        }
    }

    lines.join("\n")
}

/// Render one page of search results, including failures and page links.
pub fn render_search_page<F>(
    page: &SearchPage,
    query: &str,
    locale: Locale,
    build_href: F,
) -> String
where
    F: Fn(usize) -> String,
{
    let mut blocks = Vec::new();

    if page.is_empty() {
        blocks.extend(failure_blocks(page, locale));
        blocks.push(match locale {
            Locale::En => format!("No results found\n  We couldn't find results for \"{query}\""),
            Locale::Ar => format!("لا توجد نتائج\n  لم نجد نتائج لـ \"{query}\""),
        });
        return blocks.join("\n\n");
    }

    blocks.push(match locale {
        Locale::En => format!(
            "{} results — page {} of {}",
            page.total_count, page.resolved_page, page.total_pages
        ),
        Locale::Ar => format!(
            "{} نتيجة — الصفحة {} من {}",
            page.total_count, page.resolved_page, page.total_pages
        ),
    });

    match &page.quran_error {
        Some(error) => blocks.push(render_source_failure(Source::Quran, error, locale)),
        None => {
            let verses: Vec<_> = page.verses().collect();
            if !verses.is_empty() {
                let mut lines = vec![format!(
                    "{} ({})",
                    locale.pick("Quranic Verses", "آيات قرآنية"),
                    page.quran_count
                )];
                lines.extend(verses.iter().map(|v| render_verse_entry(v, locale)));
                blocks.push(lines.join("\n"));
            }
        }
    }

    match &page.hadith_error {
        Some(error) => blocks.push(render_source_failure(Source::Hadith, error, locale)),
        None => {
            let hadiths: Vec<_> = page.hadiths().collect();
            if !hadiths.is_empty() {
                let mut lines = vec![format!(
                    "{} ({})",
                    locale.pick("Hadiths", "أحاديث"),
                    page.hadith_count
                )];
                lines.extend(hadiths.iter().map(|h| render_hadith_entry(h, locale)));
                blocks.push(lines.join("\n"));
            }
        }
    }

    if let Some(bar) = render_pagination(page.resolved_page, page.total_pages, locale, build_href) {
        blocks.push(bar);
    }

    blocks.join("\n\n")
}

fn failure_blocks(page: &SearchPage, locale: Locale) -> Vec<String> {
    [
        (Source::Quran, page.quran_error.as_ref()),
        (Source::Hadith, page.hadith_error.as_ref()),
    ]
    .into_iter()
    .filter_map(|(source, error)| error.map(|e| render_source_failure(source, e, locale)))
    .collect()
}

/// Pagination bar; `None` when everything fits on one page.
pub fn render_pagination<F>(
    current: usize,
    total: usize,
    locale: Locale,
    build_href: F,
) -> Option<String>
where
    F: Fn(usize) -> String,
{
    let bar = page_links(current, total, build_href)?;

    let tokens: Vec<String> = bar
        .links
        .iter()
        .map(|link| match link.token {
            PageToken::Page(n) if link.is_current => format!("[{n}]"),
            token => token.to_string(),
        })
        .collect();

    let mut lines = vec![format!("{}: {}", locale.pick("Pages", "الصفحات"), tokens.join(" "))];
    if let Some(href) = bar.previous {
        lines.push(format!("  {}: {href}", locale.pick("Previous", "السابق")));
    }
    if let Some(href) = bar.next {
        lines.push(format!("  {}: {href}", locale.pick("Next", "التالي")));
    }
    Some(lines.join("\n"))
}

fn surah_name(verse: &VerseResult, locale: Locale) -> &str {
    match locale {
        Locale::En => &verse.surah.name_english,
        Locale::Ar => &verse.surah.name_arabic,
    }
}

fn render_verse_entry(verse: &VerseResult, locale: Locale) -> String {
    let mut lines = vec![
        format!("- [{}] {}", verse.reference(), surah_name(verse, locale)),
        format!("  {}", verse.arabic_text),
    ];
    if let Some(translation) = &verse.translation_text {
        lines.push(format!("  {translation}"));
    }
    lines.join("\n")
}

fn render_hadith_entry(hadith: &HadithResult, locale: Locale) -> String {
    let grade = match locale {
        Locale::En => hadith.grade.label(),
        Locale::Ar => hadith.grade.label_ar(),
    };
    let mut lines = vec![format!("- [{}] {}", hadith.key(), grade)];
    if let Some(narrator) = &hadith.narrator {
        lines.push(format!("  {narrator}"));
    }
    lines.push(format!("  {}", truncate(&hadith.english_text, EXCERPT_CHARS)));
    lines.join("\n")
}

/// Full rendering of a single verse.
pub fn render_verse(verse: &VerseResult, translation: &str, locale: Locale) -> String {
    let mut lines = vec![
        format!(
            "{} — {} ({})",
            verse.reference(),
            surah_name(verse, locale),
            verse.surah.name_translation
        ),
        String::new(),
        verse.arabic_text.clone(),
    ];
    if let Some(transliteration) = &verse.transliteration_text {
        lines.push(transliteration.clone());
    }
    if let Some(text) = &verse.translation_text {
        lines.push(String::new());
        lines.push(format!("\"{text}\""));
        lines.push(format!("  — {}", Translation::display_name(translation)));
    }
    lines.push(String::new());
    lines.push(match locale {
        Locale::En => format!("Juz {} · Page {}", verse.juz, verse.page),
        Locale::Ar => format!("الجزء {} · الصفحة {}", verse.juz, verse.page),
    });
    lines.join("\n")
}

/// Full rendering of a surah with its translation.
pub fn render_chapter(view: &ChapterView, locale: Locale) -> String {
    let meta = &view.arabic.surah;
    let mut lines = vec![
        format!(
            "{}. {} — {}",
            meta.number,
            locale.pick(&meta.name_english, &meta.name_arabic),
            meta.name_translation
        ),
        match locale {
            Locale::En => format!("{} · {} verses", meta.revelation_type, meta.verse_count),
            Locale::Ar => format!("{} · {} آية", meta.revelation_type, meta.verse_count),
        },
    ];
    for (arabic, translated) in view.pairs() {
        lines.push(String::new());
        lines.push(format!("({}) {}", arabic.number, arabic.text));
        if !translated.text.is_empty() {
            lines.push(format!("    {}", translated.text));
        }
    }
    lines.join("\n")
}

/// Full rendering of a single hadith.
pub fn render_hadith(hadith: &HadithResult, locale: Locale) -> String {
    let mut lines = vec![format!(
        "{} — {}",
        hadith.key(),
        match locale {
            Locale::En => hadith.grade.label(),
            Locale::Ar => hadith.grade.label_ar(),
        }
    )];
    if let Some(raw) = &hadith.raw_grade {
        let by = hadith
            .graded_by
            .as_deref()
            .map(|g| format!(" ({g})"))
            .unwrap_or_default();
        lines.push(format!("  {raw}{by}"));
    }
    if let Some(chapter) = &hadith.chapter {
        let title = match (locale, &chapter.title_arabic) {
            (Locale::Ar, Some(arabic)) => arabic.as_str(),
            _ => chapter.title_english.as_str(),
        };
        lines.push(format!("  {} {}: {}", locale.pick("Chapter", "باب"), chapter.number, title));
    }
    if let Some(arabic) = &hadith.arabic_text {
        lines.push(String::new());
        lines.push(arabic.clone());
    }
    lines.push(String::new());
    if let Some(narrator) = &hadith.narrator {
        lines.push(narrator.clone());
    }
    lines.push(hadith.english_text.clone());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GatewayError;
    use crate::models::{Grade, SurahMeta, TaggedResult};

    fn gateway(status: u16) -> AppError {
        GatewayError {
            status,
            path: "/api/search?q=x".into(),
        }
        .into()
    }

    fn verse(surah: u16, number: u16) -> VerseResult {
        VerseResult {
            surah_number: surah,
            verse_number: number,
            arabic_text: "وَٱصْبِرْ".into(),
            translation_text: Some("And be patient".into()),
            transliteration_text: None,
            surah: SurahMeta {
                number: surah,
                name_arabic: "البقرة".into(),
                name_english: "Al-Baqara".into(),
                name_translation: "The Cow".into(),
                revelation_type: "Medinan".into(),
                verse_count: 286,
            },
            juz: 2,
            page: 23,
        }
    }

    fn hadith(number: &str) -> HadithResult {
        HadithResult {
            collection_slug: "muslim".into(),
            hadith_number: number.into(),
            arabic_text: None,
            english_text: "Patience is illumination".into(),
            narrator: Some("Abu Malik al-Ash'ari".into()),
            grade: Grade::Sahih,
            raw_grade: Some("Sahih".into()),
            graded_by: None,
            chapter: None,
        }
    }

    fn page_with(items: Vec<TaggedResult>) -> SearchPage {
        let quran_count = items.iter().filter(|i| i.source() == Source::Quran).count();
        SearchPage {
            total_count: items.len(),
            hadith_count: items.len() - quran_count,
            quran_count,
            items,
            total_pages: 1,
            resolved_page: 1,
            quran_error: None,
            hadith_error: None,
        }
    }

    #[test]
    fn describe_status_codes() {
        let unreachable = describe_failure(&gateway(0), Locale::En);
        assert_eq!(unreachable.code, None);
        assert_eq!(unreachable.message, "Could not connect to server");

        assert_eq!(describe_failure(&gateway(404), Locale::En).code, Some(404));
        assert_eq!(
            describe_failure(&gateway(429), Locale::Ar).message,
            "طلبات كثيرة جداً"
        );
        assert_eq!(
            describe_failure(&gateway(503), Locale::En).message,
            "Service temporarily unavailable"
        );
        assert_eq!(describe_failure(&gateway(502), Locale::En).message, "Server error");
        assert_eq!(describe_failure(&gateway(418), Locale::En).message, "Unexpected error");
        assert_eq!(
            describe_failure(&AppError::config("x"), Locale::En).message,
            "Connection error"
        );
    }

    #[test]
    fn timeout_hint_keeps_sub_second_deadline() {
        let notice = describe_failure(
            &AppError::Timeout {
                lookup: Source::Hadith,
                after: std::time::Duration::from_millis(250),
            },
            Locale::En,
        );
        assert_eq!(notice.message, "Request timed out");
        assert_eq!(notice.hint, "Hadith did not answer within 250ms.");
    }

    #[test]
    fn dual_failure_names_both_sources() {
        let text = render_search_failure(&AppError::dual(gateway(0), gateway(429)), Locale::En);
        assert!(text.contains("Quran: Could not connect to server"));
        assert!(text.contains("Hadith [429]: Too many requests"));
    }

    #[test]
    fn partial_failure_is_shown_inline() {
        let mut page = page_with(vec![TaggedResult::Hadith(hadith("2999"))]);
        page.quran_error = Some(gateway(500));

        let text = render_search_page(&page, "patience", Locale::En, |p| p.to_string());
        assert!(text.contains("Could not load Quran results [500]"));
        assert!(text.contains("Hadiths (1)"));
        assert!(text.contains("[muslim:2999] Sahih"));
    }

    #[test]
    fn empty_page_is_neutral() {
        let page = page_with(Vec::new());
        let text = render_search_page(&page, "zzz", Locale::En, |p| p.to_string());
        assert!(text.starts_with("No results found"));
        assert!(!text.contains('⚠'));
    }

    #[test]
    fn page_lists_quran_before_hadith() {
        let page = page_with(vec![
            TaggedResult::Quran(verse(2, 153)),
            TaggedResult::Hadith(hadith("2999")),
        ]);
        let text = render_search_page(&page, "patience", Locale::En, |p| p.to_string());
        let quran_at = text.find("[2:153]").unwrap();
        let hadith_at = text.find("[muslim:2999]").unwrap();
        assert!(quran_at < hadith_at);
        assert!(text.starts_with("2 results — page 1 of 1"));
    }

    #[test]
    fn pagination_marks_current_page() {
        let bar = render_pagination(2, 3, Locale::En, |p| format!("/en/search?q=x&page={p}"))
            .unwrap();
        assert!(bar.starts_with("Pages: 1 [2] 3"));
        assert!(bar.contains("Previous: /en/search?q=x&page=1"));
        assert!(bar.contains("Next: /en/search?q=x&page=3"));
        assert!(render_pagination(1, 1, Locale::En, |p| p.to_string()).is_none());
    }
}
