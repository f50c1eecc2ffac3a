//! Range expansion
//!
//! Turns range text such as `1-5`, `5-1`, `3-`, `-4` or `2,last` into a
//! sequence of 1-based indices. The indices address a pool (pages, files or
//! sheets); mapping them to actual pages is up to the caller.

use crate::constants::{LAST_KEYWORD, MAX_RANGE_SPAN};
use crate::diagnostics::{Diagnostic, Diagnostics};

/// One comma- or whitespace-separated piece of a range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RangeSegment {
    Single(usize),
    Span { start: usize, end: usize },
}

/// Expand range text against a `max` bound (the value of `last`).
///
/// Unparseable segments contribute nothing.
pub fn expand_range(range: &str, max: usize) -> Vec<usize> {
    let mut diagnostics = Diagnostics::new();
    expand_range_with(range, max, &mut diagnostics)
}

pub(crate) fn expand_range_with(
    range: &str,
    max: usize,
    diagnostics: &mut Diagnostics,
) -> Vec<usize> {
    let lowered = range.to_ascii_lowercase();
    let mut indices = Vec::new();

    for segment in lowered
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
    {
        // `last` of an empty scope names nothing
        if max == 0 && segment.contains(LAST_KEYWORD) {
            continue;
        }
        let substituted = segment.replace(LAST_KEYWORD, &max.to_string());

        match parse_segment(&substituted, max) {
            Some(RangeSegment::Single(index)) => indices.push(index),
            Some(RangeSegment::Span { start, end }) => {
                push_span(&mut indices, start, end, segment, diagnostics)
            }
            None if is_open_ended(&substituted) => {}
            None => diagnostics.push(Diagnostic::UnparseableSegment {
                segment: segment.to_string(),
            }),
        }
    }

    indices
}

fn parse_segment(segment: &str, max: usize) -> Option<RangeSegment> {
    // `-3-5` keeps the dash for the caller's reversal; here it is only `3-5`
    let body = match segment.strip_prefix('-') {
        Some(rest) if rest.contains('-') => rest,
        _ => segment,
    };

    let Some((start, end)) = body.split_once('-') else {
        return body.parse().ok().map(RangeSegment::Single);
    };

    let start = if start.is_empty() { 1 } else { start.parse().ok()? };
    let end = if end.is_empty() {
        if max == 0 {
            return None;
        }
        max
    } else {
        end.parse().ok()?
    };

    Some(RangeSegment::Span { start, end })
}

/// `3-` against an empty scope: nothing to enumerate, and nothing to report
fn is_open_ended(segment: &str) -> bool {
    segment.ends_with('-')
        && segment
            .trim_end_matches('-')
            .trim_start_matches('-')
            .chars()
            .all(|c| c.is_ascii_digit())
}

fn push_span(
    indices: &mut Vec<usize>,
    start: usize,
    end: usize,
    segment: &str,
    diagnostics: &mut Diagnostics,
) {
    let span = start.abs_diff(end).saturating_add(1);
    if span > MAX_RANGE_SPAN {
        diagnostics.push(Diagnostic::RangeTruncated {
            segment: segment.to_string(),
            limit: MAX_RANGE_SPAN,
        });
    }

    if start <= end {
        indices.extend((start..=end).take(MAX_RANGE_SPAN));
    } else {
        indices.extend((end..=start).rev().take(MAX_RANGE_SPAN));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascending_range() {
        assert_eq!(expand_range("1-5", 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(expand_range("3-3", 10), vec![3]);
    }

    #[test]
    fn test_descending_range() {
        assert_eq!(expand_range("5-1", 10), vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_open_ends() {
        assert_eq!(expand_range("8-", 10), vec![8, 9, 10]);
        assert_eq!(expand_range("-3", 10), vec![1, 2, 3]);
        assert_eq!(expand_range("-", 3), vec![1, 2, 3]);
    }

    #[test]
    fn test_last_keyword() {
        assert_eq!(expand_range("last", 7), vec![7]);
        assert_eq!(expand_range("LAST-5", 7), vec![7, 6, 5]);
        assert_eq!(expand_range("1-Last", 3), vec![1, 2, 3]);
    }

    #[test]
    fn test_last_of_empty_scope() {
        let mut diagnostics = Diagnostics::new();
        assert!(expand_range_with("last", 0, &mut diagnostics).is_empty());
        assert!(expand_range_with("1-last", 0, &mut diagnostics).is_empty());
        assert!(expand_range_with("2-", 0, &mut diagnostics).is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_lists_and_separators() {
        assert_eq!(expand_range("1,3, 5  7", 10), vec![1, 3, 5, 7]);
        assert_eq!(expand_range(",,2,,", 10), vec![2]);
    }

    #[test]
    fn test_leading_dash_is_stripped_from_ranges() {
        assert_eq!(expand_range("-2-4", 10), vec![2, 3, 4]);
    }

    #[test]
    fn test_unparseable_segments_are_dropped() {
        let mut diagnostics = Diagnostics::new();
        let indices = expand_range_with("1,x,2-y,3", 10, &mut diagnostics);
        assert_eq!(indices, vec![1, 3]);
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn test_extreme_bounds() {
        let top = usize::MAX.to_string();
        assert_eq!(expand_range(&top, 3), vec![usize::MAX]);

        let mut diagnostics = Diagnostics::new();
        let expanded = expand_range_with(&format!("0-{}", top), 3, &mut diagnostics);
        assert_eq!(expanded.len(), MAX_RANGE_SPAN);
        assert_eq!(expanded[..3].to_vec(), vec![0, 1, 2]);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_span_is_capped() {
        let mut diagnostics = Diagnostics::new();
        let indices = expand_range_with("1-999999999", 10, &mut diagnostics);
        assert_eq!(indices.len(), MAX_RANGE_SPAN);
        assert!(matches!(
            diagnostics.iter().next(),
            Some(Diagnostic::RangeTruncated { .. })
        ));
    }
}
