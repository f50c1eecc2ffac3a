//! Layout hints
//!
//! A best-effort reading of an expression's folding layouts, for front ends
//! that want to pre-fill a grid. The evaluator never consults it.

use crate::constants::MAX_SIGNATURE_PAGES;
use crate::layout::Layout;
use crate::parse::{Token, tokenize};

/// Grid and signature an expression most likely wants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutHint {
    /// Pages per folded signature, when an n-up layout names one
    pub signature_size: Option<usize>,
    pub rows: usize,
    pub cols: usize,
    /// Whether the result is meant for duplex printing
    pub duplex: bool,
}

impl Default for LayoutHint {
    fn default() -> Self {
        Self {
            signature_size: None,
            rows: 1,
            cols: 1,
            duplex: false,
        }
    }
}

/// Suggest a layout from the first folding layout named in `input`.
///
/// An `N-up` signature puts `N / 2` slots on each side, arranged as close to
/// square as possible with no more rows than columns. A booklet gets two
/// slots per side. Sizes the fold would not accept are ignored.
pub fn suggest_layout(input: &str) -> LayoutHint {
    let lowered = input.to_ascii_lowercase();
    let mut hint = LayoutHint::default();

    for token in tokenize(&lowered) {
        let Token::Word(word) = token else {
            continue;
        };
        let name = word.rsplit(':').next().unwrap_or(word);

        match Layout::from_name(name) {
            Some(Layout::NUp(size))
                if hint.signature_size.is_none() && (1..=MAX_SIGNATURE_PAGES).contains(&size) =>
            {
                let (rows, cols) = squarest_factors((size / 2).max(1));
                hint = LayoutHint {
                    signature_size: Some(size),
                    rows,
                    cols,
                    duplex: true,
                };
            }
            Some(Layout::Booklet) if hint.signature_size.is_none() => {
                hint.rows = 1;
                hint.cols = 2;
                hint.duplex = true;
            }
            Some(Layout::TwoSided) => hint.duplex = true,
            _ => {}
        }
    }

    hint
}

/// `rows * cols == n` with `rows <= cols` and the two as close as possible
fn squarest_factors(n: usize) -> (usize, usize) {
    let rows = (1..=n)
        .take_while(|r| r * r <= n)
        .filter(|r| n % r == 0)
        .last()
        .unwrap_or(1);
    (rows, n / rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squarest_factors() {
        assert_eq!(squarest_factors(2), (1, 2));
        assert_eq!(squarest_factors(4), (2, 2));
        assert_eq!(squarest_factors(8), (2, 4));
        assert_eq!(squarest_factors(16), (4, 4));
    }

    #[test]
    fn test_n_up_hint() {
        assert_eq!(
            suggest_layout("f1:8-up(1-last)"),
            LayoutHint {
                signature_size: Some(8),
                rows: 2,
                cols: 2,
                duplex: true,
            }
        );
    }

    #[test]
    fn test_signature_size_is_taken_literally() {
        let hint = suggest_layout("6up");
        assert_eq!(hint.signature_size, Some(6));
        assert_eq!((hint.rows, hint.cols), (1, 3));
        assert_eq!(suggest_layout("2-up").signature_size, Some(2));
    }

    #[test]
    fn test_unusable_signature_sizes_are_ignored() {
        assert_eq!(suggest_layout("0up"), LayoutHint::default());
        assert_eq!(suggest_layout("18446744073709551615up"), LayoutHint::default());
        assert_eq!(suggest_layout("1025-up"), LayoutHint::default());
    }

    #[test]
    fn test_booklet_hint() {
        let hint = suggest_layout("BOOKLET");
        assert_eq!((hint.rows, hint.cols, hint.duplex), (1, 2, true));
        assert_eq!(hint.signature_size, None);
    }

    #[test]
    fn test_plain_expression_has_default_hint() {
        assert_eq!(suggest_layout("1-5 snake(6-9)"), LayoutHint::default());
        assert!(suggest_layout("2sided(1-4)").duplex);
    }
}
