//! Signature folds
//!
//! Saddle-stitch ordering: each folded sheet carries four pages, taken from
//! the outside of the signature inwards.
//!
//! **Folio (4 pages):** `[4, 1, 2, 3]`
//!
//! **8 pages:** `[8, 1, 2, 7, 6, 3, 4, 5]`

use crate::constants::{MAX_SIGNATURE_PAGES, PAGES_PER_FOLDED_SHEET};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::types::SlotValue;

// =============================================================================
// Page Ordering
// =============================================================================

/// Slot order of a saddle-stitched signature of `pages_per_signature` pages.
///
/// Returns 0-based positions within the signature, four per step of two
/// pages from each end. Sizes that are not a multiple of 4 repeat positions
/// from the middle; a size of 1 yields nothing.
pub fn saddle_stitch_order(pages_per_signature: usize) -> Vec<usize> {
    let n = pages_per_signature;
    let mut order = Vec::with_capacity(n.next_multiple_of(PAGES_PER_FOLDED_SHEET));
    for first in (0..n / 2).step_by(2) {
        let last = n - 1 - first;
        order.push(last);
        order.push(first);
        order.push(first + 1);
        order.push(last - 1);
    }
    order
}

fn fold_signature(signature: &[SlotValue]) -> Vec<SlotValue> {
    saddle_stitch_order(signature.len())
        .into_iter()
        .map(|position| signature.get(position).cloned().unwrap_or(SlotValue::Empty))
        .collect()
}

// =============================================================================
// N-up
// =============================================================================

/// Fold the items into consecutive signatures of `pages_per_signature`.
///
/// The last signature is padded with empty slots. A size of 0 or above
/// [`MAX_SIGNATURE_PAGES`] leaves the items unchanged.
pub fn n_up(
    items: &[SlotValue],
    pages_per_signature: usize,
    diagnostics: &mut Diagnostics,
) -> Vec<SlotValue> {
    let size = pages_per_signature;
    if !(1..=MAX_SIGNATURE_PAGES).contains(&size) {
        diagnostics.push(Diagnostic::SignatureOutOfRange {
            size,
            limit: MAX_SIGNATURE_PAGES,
        });
        return items.to_vec();
    }

    let mut out = Vec::with_capacity(items.len().next_multiple_of(size));
    for signature in items.chunks(size) {
        let mut signature = signature.to_vec();
        signature.resize(size, SlotValue::Empty);
        out.extend(fold_signature(&signature));
    }

    out
}

// =============================================================================
// Booklet
// =============================================================================

/// Fold everything into one signature, padded to a multiple of 4
pub fn booklet(items: &[SlotValue]) -> Vec<SlotValue> {
    let mut signature = items.to_vec();
    signature.resize(
        items.len().next_multiple_of(PAGES_PER_FOLDED_SHEET),
        SlotValue::Empty,
    );
    fold_signature(&signature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use SlotValue::{Empty, Page};

    fn pages(range: std::ops::RangeInclusive<usize>) -> Vec<SlotValue> {
        range.map(Page).collect()
    }

    #[test]
    fn test_folio_order() {
        assert_eq!(saddle_stitch_order(4), vec![3, 0, 1, 2]);
    }

    #[test]
    fn test_sixteen_page_order() {
        assert_eq!(
            saddle_stitch_order(16),
            vec![15, 0, 1, 14, 13, 2, 3, 12, 11, 4, 5, 10, 9, 6, 7, 8]
        );
    }

    #[test]
    fn test_n_up_multiple_signatures() {
        let mut diagnostics = Diagnostics::new();
        assert_eq!(
            n_up(&pages(1..=8), 4, &mut diagnostics),
            vec![
                Page(4),
                Page(1),
                Page(2),
                Page(3),
                Page(8),
                Page(5),
                Page(6),
                Page(7)
            ]
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_n_up_pads_last_signature() {
        let mut diagnostics = Diagnostics::new();
        assert_eq!(
            n_up(&pages(1..=6), 4, &mut diagnostics),
            vec![
                Page(4),
                Page(1),
                Page(2),
                Page(3),
                Empty,
                Page(5),
                Page(6),
                Empty
            ]
        );
    }

    #[test]
    fn test_n_up_two_pages() {
        let mut diagnostics = Diagnostics::new();
        assert_eq!(
            n_up(&pages(1..=2), 2, &mut diagnostics),
            vec![Page(2), Page(1), Page(2), Page(1)]
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_n_up_size_not_multiple_of_four() {
        let mut diagnostics = Diagnostics::new();
        assert_eq!(
            n_up(&pages(1..=6), 6, &mut diagnostics),
            vec![
                Page(6),
                Page(1),
                Page(2),
                Page(5),
                Page(4),
                Page(3),
                Page(4),
                Page(3)
            ]
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_n_up_rejects_unusable_sizes() {
        for size in [0, MAX_SIGNATURE_PAGES + 1, usize::MAX] {
            let mut diagnostics = Diagnostics::new();
            assert_eq!(n_up(&pages(1..=3), size, &mut diagnostics), pages(1..=3));
            assert_eq!(
                diagnostics.into_vec(),
                vec![Diagnostic::SignatureOutOfRange {
                    size,
                    limit: MAX_SIGNATURE_PAGES
                }]
            );
        }
    }

    #[test]
    fn test_booklet() {
        assert_eq!(
            booklet(&pages(1..=4)),
            vec![Page(4), Page(1), Page(2), Page(3)]
        );
        assert_eq!(
            booklet(&pages(1..=8)),
            vec![
                Page(8),
                Page(1),
                Page(2),
                Page(7),
                Page(6),
                Page(3),
                Page(4),
                Page(5)
            ]
        );
    }

    #[test]
    fn test_booklet_pads_to_four() {
        assert_eq!(
            booklet(&pages(1..=5)),
            vec![
                Empty,
                Page(1),
                Page(2),
                Empty,
                Empty,
                Page(3),
                Page(4),
                Page(5)
            ]
        );
        assert!(booklet(&[]).is_empty());
    }
}
