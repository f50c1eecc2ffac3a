//! 2-sided units and the front/back sheet codec
//!
//! A `2sided(...)` unit is not laid out where it appears. It becomes a single
//! `DuplexPending` slot holding its fronts and backs, and the final pass
//! merges it with whatever duplex content is already on the current sheets.
//!
//! Backs are printed mirrored so that, after the sheet is turned over along
//! its long edge, each back slot sits behind its front slot:
//!
//! ```text
//! front: [1, 3]      back as printed: [4, 2]
//!        [5, 7]                       [8, 6]
//! ```

use super::grid::mirror_rows;
use crate::types::{GridShape, SlotValue, SourceFile};

// =============================================================================
// 2-sided Units
// =============================================================================

/// Build the pending duplex unit for `items`.
///
/// Each file's run of pages starts on a front: a blank is inserted when a
/// file boundary would otherwise fall on a back. An odd total gets one
/// trailing blank.
pub fn two_sided(items: &[SlotValue], files: &[SourceFile]) -> SlotValue {
    let aligned = align_file_runs(items, files);
    let (odds, evens) = split_sides(aligned);
    SlotValue::DuplexPending { odds, evens }
}

fn align_file_runs(items: &[SlotValue], files: &[SourceFile]) -> Vec<SlotValue> {
    let mut aligned = Vec::with_capacity(items.len() + 2);
    let mut current_file: Option<usize> = None;

    for item in items {
        if let SlotValue::Page(page) = item {
            let file = file_index_of(*page, files);
            if current_file.is_some() && file != current_file && aligned.len() % 2 == 1 {
                aligned.push(SlotValue::Blank);
            }
            current_file = file;
        }
        aligned.push(item.clone());
    }

    if aligned.len() % 2 == 1 {
        aligned.push(SlotValue::Blank);
    }
    aligned
}

/// Fronts are the 1st, 3rd, 5th... items; backs the 2nd, 4th, 6th...
fn split_sides(items: Vec<SlotValue>) -> (Vec<SlotValue>, Vec<SlotValue>) {
    let mut odds = Vec::with_capacity(items.len() / 2);
    let mut evens = Vec::with_capacity(items.len() / 2);
    for (index, item) in items.into_iter().enumerate() {
        if index % 2 == 0 {
            odds.push(item);
        } else {
            evens.push(item);
        }
    }
    (odds, evens)
}

/// Zero-based index of the file holding an absolute page
pub fn file_index_of(page: usize, files: &[SourceFile]) -> Option<usize> {
    let mut offset = 0;
    for (index, file) in files.iter().enumerate() {
        if page > offset && page <= offset + file.page_count {
            return Some(index);
        }
        offset += file.page_count;
    }
    None
}

/// Front and back read alternately, for layouts that need a flat sequence
pub fn interleave_sides(odds: &[SlotValue], evens: &[SlotValue]) -> Vec<SlotValue> {
    let mut out = Vec::with_capacity(odds.len() + evens.len());
    for index in 0..odds.len().max(evens.len()) {
        out.extend(odds.get(index).cloned());
        out.extend(evens.get(index).cloned());
    }
    out
}

// =============================================================================
// Sheet Codec
// =============================================================================

/// Lay fronts and backs out as alternating front/back sheets.
///
/// Every sheet is emitted at full size; backs have their rows mirrored.
pub fn lay_out_sides(odds: &[SlotValue], evens: &[SlotValue], grid: GridShape) -> Vec<SlotValue> {
    let per_sheet = grid.slots_per_sheet();
    let sheet_pairs = odds
        .len()
        .div_ceil(per_sheet)
        .max(evens.len().div_ceil(per_sheet));
    let mut out = Vec::with_capacity(sheet_pairs * per_sheet * 2);

    for pair in 0..sheet_pairs {
        out.extend(padded_chunk(odds, pair, per_sheet));

        let mut back = padded_chunk(evens, pair, per_sheet);
        mirror_rows(&mut back, grid.cols());
        out.extend(back);
    }

    out
}

fn padded_chunk(items: &[SlotValue], index: usize, size: usize) -> Vec<SlotValue> {
    let mut chunk: Vec<SlotValue> = items.iter().skip(index * size).take(size).cloned().collect();
    chunk.resize(size, SlotValue::Empty);
    chunk
}

/// Content of a written sheet side read back in placement order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSheet {
    /// Occupied slots before the first empty one
    pub slots: Vec<SlotValue>,
    /// Whether occupied slots followed the first empty one (they are lost)
    pub truncated: bool,
}

/// Read a front sheet back: its occupied prefix, as placed
pub fn decode_front(sheet: &[SlotValue]) -> DecodedSheet {
    occupied_prefix(sheet)
}

/// Read a back sheet back: undo the row mirroring, then take the occupied prefix
pub fn decode_back(sheet: &[SlotValue], grid: GridShape) -> DecodedSheet {
    let mut unmirrored = sheet.to_vec();
    unmirrored.resize(grid.slots_per_sheet(), SlotValue::Empty);
    mirror_rows(&mut unmirrored, grid.cols());
    occupied_prefix(&unmirrored)
}

fn occupied_prefix(sheet: &[SlotValue]) -> DecodedSheet {
    let len = sheet.iter().position(SlotValue::is_empty).unwrap_or(sheet.len());
    DecodedSheet {
        slots: sheet[..len].to_vec(),
        truncated: sheet[len..].iter().any(|slot| !slot.is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SlotValue::{Blank, Empty, Page};

    fn one_file(pages: usize) -> Vec<SourceFile> {
        vec![SourceFile::new("a.pdf", pages)]
    }

    #[test]
    fn test_two_sided_splits_by_parity() {
        let unit = two_sided(&[Page(1), Page(2), Page(3), Page(4)], &one_file(4));
        assert_eq!(
            unit,
            SlotValue::DuplexPending {
                odds: vec![Page(1), Page(3)],
                evens: vec![Page(2), Page(4)],
            }
        );
    }

    #[test]
    fn test_two_sided_pads_odd_count() {
        let unit = two_sided(&[Page(1), Page(2), Page(3)], &one_file(3));
        assert_eq!(
            unit,
            SlotValue::DuplexPending {
                odds: vec![Page(1), Page(3)],
                evens: vec![Page(2), Blank],
            }
        );
    }

    #[test]
    fn test_two_sided_starts_each_file_on_a_front() {
        let files = vec![SourceFile::new("a.pdf", 3), SourceFile::new("b.pdf", 2)];
        let items: Vec<_> = (1..=5).map(Page).collect();
        let unit = two_sided(&items, &files);
        assert_eq!(
            unit,
            SlotValue::DuplexPending {
                odds: vec![Page(1), Page(3), Page(4)],
                evens: vec![Page(2), Blank, Page(5)],
            }
        );
    }

    #[test]
    fn test_file_index_of() {
        let files = vec![SourceFile::new("a.pdf", 3), SourceFile::new("b.pdf", 2)];
        assert_eq!(file_index_of(1, &files), Some(0));
        assert_eq!(file_index_of(3, &files), Some(0));
        assert_eq!(file_index_of(4, &files), Some(1));
        assert_eq!(file_index_of(6, &files), None);
        assert_eq!(file_index_of(0, &files), None);
    }

    #[test]
    fn test_interleave_sides() {
        assert_eq!(
            interleave_sides(&[Page(1), Page(3)], &[Page(2), Page(4)]),
            vec![Page(1), Page(2), Page(3), Page(4)]
        );
    }

    #[test]
    fn test_lay_out_sides_mirrors_backs() {
        let grid = GridShape::new(1, 2);
        let sheets = lay_out_sides(&[Page(1), Page(3)], &[Page(2), Page(4)], grid);
        assert_eq!(sheets, vec![Page(1), Page(3), Page(4), Page(2)]);
    }

    #[test]
    fn test_lay_out_sides_pads_sheets() {
        let grid = GridShape::new(2, 2);
        let sheets = lay_out_sides(&[Page(1)], &[Page(2)], grid);
        assert_eq!(
            sheets,
            vec![Page(1), Empty, Empty, Empty, Empty, Page(2), Empty, Empty]
        );
    }

    #[test]
    fn test_decode_round_trips_layout() {
        let grid = GridShape::new(2, 2);
        let sheets = lay_out_sides(&[Page(1), Page(3)], &[Page(2), Page(4)], grid);
        let front = decode_front(&sheets[..4]);
        let back = decode_back(&sheets[4..], grid);
        assert_eq!(front.slots, vec![Page(1), Page(3)]);
        assert_eq!(back.slots, vec![Page(2), Page(4)]);
        assert!(!front.truncated && !back.truncated);
    }

    #[test]
    fn test_decode_reports_content_after_gap() {
        let decoded = decode_front(&[Empty, Empty, Page(1), Page(2)]);
        assert!(decoded.slots.is_empty());
        assert!(decoded.truncated);
    }
}
