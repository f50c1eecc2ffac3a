//! Scoping prefixes
//!
//! A top-level token may start with `sh<range>:`, `f<range>:` and
//! `p<range>:` (in that order, case-insensitive). The file and page prefixes
//! select the pool of absolute pages the rest of the token addresses; the
//! sheet prefix is handed on to the sheet writer.
//!
//! ```text
//! f2:p1-4:booklet      pages 1-4 of the second file, as a booklet
//! sh3:1,2              first two pages, placed from sheet 3 onwards
//! ```

use crate::constants::{FILE_PREFIX, LAST_KEYWORD, PAGE_PREFIX, SHEET_PREFIX};
use crate::diagnostics::Diagnostics;
use crate::range::expand_range_with;
use crate::types::SourceFile;

// =============================================================================
// Page Pool
// =============================================================================

/// Ordered absolute page numbers a scoped expression can address
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PagePool {
    pages: Vec<usize>,
}

impl PagePool {
    pub fn new(pages: Vec<usize>) -> Self {
        Self { pages }
    }

    /// Every page of every file, in file order
    pub fn all(files: &[SourceFile]) -> Self {
        let total: usize = files.iter().map(|f| f.page_count).sum();
        Self::new((1..=total).collect())
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Page at a 1-based pool index
    pub fn page(&self, index: usize) -> Option<usize> {
        index
            .checked_sub(1)
            .and_then(|i| self.pages.get(i))
            .copied()
    }

    pub fn pages(&self) -> &[usize] {
        &self.pages
    }
}

// =============================================================================
// Prefix Resolution
// =============================================================================

/// A token with its prefixes resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    /// Pages the remainder addresses
    pub pool: PagePool,
    /// Expression text after the prefixes
    pub remainder: String,
    /// Whether a file or page prefix narrowed the pool
    pub explicit_pool: bool,
    /// Raw range of an `sh` prefix, resolved later against the sheet count
    pub sheet_range: Option<String>,
}

/// Strip the scoping prefixes of one top-level token.
///
/// Malformed prefixes are left in the remainder.
pub fn resolve_prefix(token: &str, files: &[SourceFile]) -> Scope {
    let mut diagnostics = Diagnostics::new();
    resolve_prefix_with(token, files, &mut diagnostics)
}

pub(crate) fn resolve_prefix_with(
    token: &str,
    files: &[SourceFile],
    diagnostics: &mut Diagnostics,
) -> Scope {
    let mut rest = token;

    let sheet_range = take_prefix(rest, SHEET_PREFIX).map(|(range, after)| {
        rest = after;
        range.to_string()
    });
    let file_range = take_prefix(rest, FILE_PREFIX).map(|(range, after)| {
        rest = after;
        range
    });
    let page_range = take_prefix(rest, PAGE_PREFIX).map(|(range, after)| {
        rest = after;
        range
    });

    let explicit_pool = file_range.is_some() || page_range.is_some();
    let pool = if explicit_pool {
        build_pool(files, file_range, page_range, diagnostics)
    } else {
        PagePool::all(files)
    };

    Scope {
        pool,
        remainder: rest.to_string(),
        explicit_pool,
        sheet_range,
    }
}

fn build_pool(
    files: &[SourceFile],
    file_range: Option<&str>,
    page_range: Option<&str>,
    diagnostics: &mut Diagnostics,
) -> PagePool {
    let mut selected: Vec<usize> = match file_range {
        Some(range) => expand_range_with(range, files.len(), diagnostics)
            .into_iter()
            .filter(|&index| (1..=files.len()).contains(&index))
            .map(|index| index - 1)
            .collect(),
        None => (0..files.len()).collect(),
    };
    selected.sort_unstable();
    selected.dedup();

    let mut pages = Vec::new();
    for file_index in selected {
        let offset: usize = files[..file_index].iter().map(|f| f.page_count).sum();
        let count = files[file_index].page_count;
        match page_range {
            Some(range) => pages.extend(
                expand_range_with(range, count, diagnostics)
                    .into_iter()
                    .filter(|&page| (1..=count).contains(&page))
                    .map(|page| offset + page),
            ),
            None => pages.extend(offset + 1..=offset + count),
        }
    }

    PagePool::new(pages)
}

/// Match `<tag><range>:` at the start of `text`, returning the range and the rest
fn take_prefix<'a>(text: &'a str, tag: &str) -> Option<(&'a str, &'a str)> {
    let after_tag = strip_tag(text, tag)?;
    let (range, rest) = after_tag.split_once(':')?;
    if range.is_empty() || !is_range_text(range) {
        return None;
    }
    Some((range, rest))
}

fn strip_tag<'a>(text: &'a str, tag: &str) -> Option<&'a str> {
    let head = text.get(..tag.len())?;
    if head.eq_ignore_ascii_case(tag) {
        text.get(tag.len()..)
    } else {
        None
    }
}

/// Digits, dashes, commas and the `last` keyword only
fn is_range_text(text: &str) -> bool {
    text.to_ascii_lowercase()
        .replace(LAST_KEYWORD, "")
        .chars()
        .all(|c| c.is_ascii_digit() || c == '-' || c == ',')
}

// =============================================================================
// Top-level Tokens
// =============================================================================

/// Split an input into top-level tokens.
///
/// Commas and whitespace separate tokens outside parentheses, except a comma
/// inside a prefix range (`f1,3:2-5`).
pub fn split_scoped_tokens(input: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut start: Option<usize> = None;

    for (i, c) in input.char_indices() {
        match c {
            '(' => {
                depth += 1;
                start.get_or_insert(i);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                start.get_or_insert(i);
            }
            c if depth == 0 && (c.is_whitespace() || c == ',') => {
                if c == ','
                    && start.is_some_and(|s| continues_prefix(&input[s..i], &input[i + 1..]))
                {
                    continue;
                }
                if let Some(s) = start.take() {
                    tokens.push(&input[s..i]);
                }
            }
            _ => {
                start.get_or_insert(i);
            }
        }
    }
    if let Some(s) = start {
        tokens.push(&input[s..]);
    }

    tokens
}

/// Whether a comma after `so_far` sits inside a prefix range closed later by `:`
fn continues_prefix(so_far: &str, rest: &str) -> bool {
    let open = so_far.rsplit(':').next().unwrap_or(so_far);
    let in_prefix = [SHEET_PREFIX, FILE_PREFIX, PAGE_PREFIX]
        .iter()
        .filter_map(|tag| strip_tag(open, tag))
        .any(|range| !range.is_empty() && is_range_text(range));
    if !in_prefix {
        return false;
    }

    let tail = rest
        .split(|c: char| c.is_whitespace() || c == '(')
        .next()
        .unwrap_or("");
    match tail.split_once(':') {
        Some((more, _)) => is_range_text(more),
        None => false,
    }
}
