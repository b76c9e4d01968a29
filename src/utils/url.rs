// src/utils/url.rs

//! URL construction for upstream requests and search page links.

use url::Url;
use url::form_urlencoded::Serializer;

use crate::error::Result;
use crate::models::{Locale, TypeFilter};

/// Join an endpoint-relative `path` onto `base`, tolerating stray slashes.
///
/// # Examples
/// ```
/// use zee::utils::url::join_path;
///
/// let url = join_path("https://api.sunnah.com/v1/", "/hadiths").unwrap();
/// assert_eq!(url.as_str(), "https://api.sunnah.com/v1/hadiths");
/// ```
pub fn join_path(base: &str, path: &str) -> Result<Url> {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    Ok(Url::parse(&format!("{base}/{path}"))?)
}

/// Path plus encoded query, as shown in error messages and logs.
pub fn display_path(path: &str, params: &[(&str, &str)]) -> String {
    let mut query = Serializer::new(String::new());
    for (key, value) in params {
        query.append_pair(key, value);
    }
    let query = query.finish();
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

/// Link to a search results page that keeps the current filter state.
///
/// `type` is omitted for [`TypeFilter::All`] and `page` for the first page.
///
/// # Examples
/// ```
/// use zee::models::{Locale, TypeFilter};
/// use zee::utils::url::search_href;
///
/// assert_eq!(
///     search_href(Locale::En, "patience", TypeFilter::Quran, 2),
///     "/en/search?q=patience&type=quran&page=2"
/// );
/// ```
pub fn search_href(locale: Locale, query: &str, filter: TypeFilter, page: usize) -> String {
    let mut params = Serializer::new(String::new());
    if !query.is_empty() {
        params.append_pair("q", query);
    }
    if filter != TypeFilter::All {
        params.append_pair("type", filter.as_str());
    }
    if page > 1 {
        params.append_pair("page", &page.to_string());
    }
    format!("/{}/search?{}", locale.code(), params.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_path() {
        assert_eq!(
            join_path("http://localhost:8000", "api/quran/2/255")
                .unwrap()
                .as_str(),
            "http://localhost:8000/api/quran/2/255"
        );
        assert_eq!(
            join_path("https://api.sunnah.com/v1/", "bukhari/hadiths")
                .unwrap()
                .as_str(),
            "https://api.sunnah.com/v1/bukhari/hadiths"
        );
        assert!(join_path("not a url", "x").is_err());
    }

    #[test]
    fn test_display_path() {
        let shown = display_path(
            "hadiths",
            &[("hadithEnglish", "day of judgment"), ("limit", "20")],
        );
        assert_eq!(shown, "hadiths?hadithEnglish=day+of+judgment&limit=20");
        assert_eq!(display_path("/api/quran/1", &[]), "/api/quran/1");
    }

    #[test]
    fn test_search_href() {
        assert_eq!(
            search_href(Locale::En, "patience", TypeFilter::All, 1),
            "/en/search?q=patience"
        );
        assert_eq!(
            search_href(Locale::Ar, "day of judgment", TypeFilter::Hadith, 3),
            "/ar/search?q=day+of+judgment&type=hadith&page=3"
        );
    }
}
