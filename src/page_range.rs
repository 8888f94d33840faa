use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// 1-based page number as the user sees it. Parsing does not bound it, so
/// values like 0 can appear and are filtered out at extraction time.
pub type PageNumber = i64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageRangeError {
    #[error("Invalid page number '{token}'")]
    InvalidPage { token: String },

    #[error("Invalid range format '{token}': {reason}")]
    InvalidRange { token: String, reason: String },

    #[error("Invalid range format '{token}': start {start} > end {end}")]
    ReversedRange {
        token: String,
        start: PageNumber,
        end: PageNumber,
    },

    #[error("Invalid range format '{token}': selects more than {limit} pages")]
    TooManyPages { token: String, limit: usize },
}

impl PageRangeError {
    /// The comma-separated token that could not be interpreted
    pub fn token(&self) -> &str {
        match self {
            PageRangeError::InvalidPage { token }
            | PageRangeError::InvalidRange { token, .. }
            | PageRangeError::ReversedRange { token, .. }
            | PageRangeError::TooManyPages { token, .. } => token,
        }
    }
}

/// Strictly increasing, duplicate-free list of requested pages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSet(Vec<PageNumber>);

impl PageSet {
    pub fn as_slice(&self) -> &[PageNumber] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = PageNumber> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<PageNumber> for PageSet {
    fn from_iter<I: IntoIterator<Item = PageNumber>>(iter: I) -> Self {
        let pages: BTreeSet<PageNumber> = iter.into_iter().collect();
        PageSet(pages.into_iter().collect())
    }
}

impl fmt::Display for PageSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_page_list(&self.0))
    }
}

/// Render pages as `[1, 2, 3]`
pub fn format_page_list(pages: &[PageNumber]) -> String {
    let inner: Vec<String> = pages.iter().map(|p| p.to_string()).collect();
    format!("[{}]", inner.join(", "))
}

/// Parse a page range expression like "1-3,5,6-9,11" into a sorted set of pages.
///
/// Whitespace anywhere in the expression is ignored and empty tokens are
/// skipped, so "1, ,3," is the same as "1,3". A range token is split at its
/// first hyphen only, which means "1-2-3" is rejected because "2-3" is not a
/// number.
#[allow(dead_code)]
pub fn parse_page_set(expression: &str) -> Result<PageSet, PageRangeError> {
    parse(expression, None)
}

/// Like [`parse_page_set`], but fails with `TooManyPages` once the set would
/// hold more than `limit` pages. Ranges are checked before they are expanded.
pub fn parse_page_set_limited(expression: &str, limit: usize) -> Result<PageSet, PageRangeError> {
    parse(expression, Some(limit))
}

fn parse(expression: &str, limit: Option<usize>) -> Result<PageSet, PageRangeError> {
    let compact: String = expression.chars().filter(|c| !c.is_whitespace()).collect();
    let mut pages = BTreeSet::new();

    for token in compact.split(',') {
        if token.is_empty() {
            continue;
        }

        if let Some((start_str, end_str)) = token.split_once('-') {
            let start = parse_range_bound(token, start_str)?;
            let end = parse_range_bound(token, end_str)?;

            if start > end {
                return Err(PageRangeError::ReversedRange {
                    token: token.to_string(),
                    start,
                    end,
                });
            }

            if let Some(limit) = limit {
                let span = i128::from(end) - i128::from(start) + 1;
                if span > limit as i128 {
                    return Err(too_many(token, limit));
                }
            }

            pages.extend(start..=end);
        } else {
            let page = token
                .parse::<PageNumber>()
                .map_err(|_| PageRangeError::InvalidPage {
                    token: token.to_string(),
                })?;
            pages.insert(page);
        }

        if let Some(limit) = limit {
            if pages.len() > limit {
                return Err(too_many(token, limit));
            }
        }
    }

    log::debug!("parsed {:?} into {} page(s)", expression, pages.len());

    Ok(PageSet(pages.into_iter().collect()))
}

fn too_many(token: &str, limit: usize) -> PageRangeError {
    PageRangeError::TooManyPages {
        token: token.to_string(),
        limit,
    }
}

fn parse_range_bound(token: &str, bound: &str) -> Result<PageNumber, PageRangeError> {
    bound
        .parse::<PageNumber>()
        .map_err(|_| PageRangeError::InvalidRange {
            token: token.to_string(),
            reason: format!("'{}' is not a page number", bound),
        })
}
