// src/pagination.rs

//! Page arithmetic and page-link construction.
//!
//! Pure functions: nothing here knows how links are rendered. Callers pass a
//! `build_href` closure that turns a page number into whatever link target
//! they need.

use std::fmt;

/// Most tokens [`page_tokens`] ever emits.
pub const MAX_TOKENS: usize = 7;

/// One entry of a pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken {
    Page(usize),
    Ellipsis,
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageToken::Page(n) => write!(f, "{n}"),
            PageToken::Ellipsis => f.write_str("…"),
        }
    }
}

/// Compressed sequence of page tokens for `current` out of `total` pages.
///
/// Up to seven pages are listed in full. Beyond that the first and last page
/// are always shown together with `current` and its direct neighbours, and
/// ellipses stand in for the gaps.
pub fn page_tokens(current: usize, total: usize) -> Vec<PageToken> {
    if total <= MAX_TOKENS {
        return (1..=total).map(PageToken::Page).collect();
    }

    let mut tokens = vec![PageToken::Page(1)];

    if current > 3 {
        tokens.push(PageToken::Ellipsis);
    }

    let start = current.saturating_sub(1).max(2);
    let end = (current + 1).min(total - 1);
    tokens.extend((start..=end).map(PageToken::Page));

    if current + 2 < total {
        tokens.push(PageToken::Ellipsis);
    }
    tokens.push(PageToken::Page(total));

    tokens
}

/// A page token decorated with its link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink<L> {
    pub token: PageToken,

    /// `None` for ellipses
    pub href: Option<L>,
    pub is_current: bool,
}

/// A complete pagination bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLinks<L> {
    pub previous: Option<L>,
    pub links: Vec<PageLink<L>>,
    pub next: Option<L>,
}

/// Build the pagination bar for `current` out of `total` pages.
///
/// Returns `None` when there is only a single page (nothing to navigate).
pub fn page_links<L, F>(current: usize, total: usize, build_href: F) -> Option<PageLinks<L>>
where
    F: Fn(usize) -> L,
{
    if total <= 1 {
        return None;
    }

    let links = page_tokens(current, total)
        .into_iter()
        .map(|token| match token {
            PageToken::Page(n) => PageLink {
                token,
                href: Some(build_href(n)),
                is_current: n == current,
            },
            PageToken::Ellipsis => PageLink {
                token,
                href: None,
                is_current: false,
            },
        })
        .collect();

    Some(PageLinks {
        previous: (current > 1).then(|| build_href(current - 1)),
        links,
        next: (current < total).then(|| build_href(current + 1)),
    })
}

/// Slice boundaries of one page over a result sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Always at least 1
    pub total_pages: usize,

    /// Requested page clamped into `1..=total_pages`
    pub resolved_page: usize,

    /// Inclusive start index
    pub start: usize,

    /// Exclusive end index
    pub end: usize,
}

/// Locate `page` within `total_count` items split into pages of `page_size`.
///
/// Out-of-range pages resolve to the nearest valid page instead of failing.
/// `page_size` must be positive.
pub fn page_window(total_count: usize, page: usize, page_size: usize) -> PageWindow {
    debug_assert!(page_size > 0, "page_size must be positive");
    let page_size = page_size.max(1);

    let total_pages = total_count.div_ceil(page_size).max(1);
    let resolved_page = page.clamp(1, total_pages);
    let start = ((resolved_page - 1) * page_size).min(total_count);
    let end = (start + page_size).min(total_count);

    PageWindow {
        total_pages,
        resolved_page,
        start,
        end,
    }
}
