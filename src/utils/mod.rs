//! Utility functions and helpers.

pub mod http;
pub mod url;

/// `surah:verse` reference string.
pub fn format_verse_ref(surah: u16, verse: u16) -> String {
    format!("{surah}:{verse}")
}

/// Turn a search slug (`patience-in-hardship`) back into a query.
pub fn slug_to_query(slug: &str) -> String {
    slug.replace('-', " ")
}

/// Shorten `text` to at most `max_chars` characters, ending with an ellipsis.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_verse_ref() {
        assert_eq!(format_verse_ref(2, 255), "2:255");
    }

    #[test]
    fn test_slug_to_query() {
        assert_eq!(slug_to_query("patience-in-hardship"), "patience in hardship");
        assert_eq!(slug_to_query("mercy"), "mercy");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("In the name of God", 6), "In the…");
        // Arabic is cut on character boundaries, not bytes
        assert_eq!(truncate("بسم الله الرحمن", 3), "بسم…");
    }
}
