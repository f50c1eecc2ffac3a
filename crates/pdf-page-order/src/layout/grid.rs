//! Grid transforms
//!
//! Each transform works one sheet-sized chunk at a time and never moves a
//! slot into another sheet. Rows are `cols` slots wide, row 0 is the top.

use crate::types::{GridShape, SlotValue};

// =============================================================================
// Right-to-left
// =============================================================================

/// Mirror every row of every sheet.
///
/// Short rows are padded with empty slots first, so a lone page in a
/// two-column row lands on the right.
pub fn right_to_left(items: &[SlotValue], grid: GridShape) -> Vec<SlotValue> {
    let cols = grid.cols();
    let mut out = Vec::with_capacity(items.len());

    for sheet in items.chunks(grid.slots_per_sheet()) {
        for row in sheet.chunks(cols) {
            out.extend(mirrored_row(row, cols));
        }
    }

    out
}

// =============================================================================
// Bottom-up
// =============================================================================

/// Fill each sheet from the bottom row upwards, left to right within a row.
///
/// Every sheet is emitted at full size; cells with no item stay empty.
pub fn bottom_up(items: &[SlotValue], grid: GridShape) -> Vec<SlotValue> {
    let (rows, cols) = (grid.rows(), grid.cols());
    let mut out = Vec::with_capacity(items.len());

    for sheet in items.chunks(grid.slots_per_sheet()) {
        let mut cells = vec![SlotValue::Empty; rows * cols];
        let mut values = sheet.iter().cloned();

        'fill: for row in (0..rows).rev() {
            for col in 0..cols {
                match values.next() {
                    Some(value) => cells[row * cols + col] = value,
                    None => break 'fill,
                }
            }
        }

        out.extend(cells);
    }

    out
}

// =============================================================================
// Snake
// =============================================================================

/// Mirror every second row (boustrophedon order) within each sheet.
///
/// A short last row is reversed as it stands, without padding.
pub fn snake(items: &[SlotValue], grid: GridShape) -> Vec<SlotValue> {
    let cols = grid.cols();
    let mut out = Vec::with_capacity(items.len());

    for sheet in items.chunks(grid.slots_per_sheet()) {
        for (index, row) in sheet.chunks(cols).enumerate() {
            if index % 2 == 1 {
                out.extend(row.iter().rev().cloned());
            } else {
                out.extend_from_slice(row);
            }
        }
    }

    out
}

/// Pad a row to `cols` with empty slots and reverse it
fn mirrored_row(row: &[SlotValue], cols: usize) -> Vec<SlotValue> {
    let mut row = row.to_vec();
    row.resize(cols, SlotValue::Empty);
    row.reverse();
    row
}

/// Reverse each `cols`-wide row of a sheet in place
pub fn mirror_rows(sheet: &mut [SlotValue], cols: usize) {
    for row in sheet.chunks_mut(cols.max(1)) {
        row.reverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SlotValue::{Empty, Page};

    fn pages(range: std::ops::RangeInclusive<usize>) -> Vec<SlotValue> {
        range.map(Page).collect()
    }

    #[test]
    fn test_right_to_left() {
        let grid = GridShape::new(2, 2);
        assert_eq!(
            right_to_left(&pages(1..=4), grid),
            vec![Page(2), Page(1), Page(4), Page(3)]
        );
    }

    #[test]
    fn test_right_to_left_pads_short_rows() {
        let grid = GridShape::new(2, 2);
        assert_eq!(
            right_to_left(&pages(1..=3), grid),
            vec![Page(2), Page(1), Empty, Page(3)]
        );
    }

    #[test]
    fn test_right_to_left_single_column_is_identity() {
        let grid = GridShape::new(3, 1);
        assert_eq!(right_to_left(&pages(1..=5), grid), pages(1..=5));
    }

    #[test]
    fn test_bottom_up() {
        let grid = GridShape::new(2, 2);
        assert_eq!(
            bottom_up(&pages(1..=4), grid),
            vec![Page(3), Page(4), Page(1), Page(2)]
        );
    }

    #[test]
    fn test_bottom_up_partial_sheet() {
        let grid = GridShape::new(2, 2);
        assert_eq!(
            bottom_up(&pages(1..=5), grid),
            vec![
                Page(3),
                Page(4),
                Page(1),
                Page(2),
                Empty,
                Empty,
                Page(5),
                Empty
            ]
        );
    }

    #[test]
    fn test_snake() {
        let grid = GridShape::new(3, 2);
        assert_eq!(
            snake(&pages(1..=6), grid),
            vec![Page(1), Page(2), Page(4), Page(3), Page(5), Page(6)]
        );
    }

    #[test]
    fn test_snake_restarts_each_sheet() {
        let grid = GridShape::new(2, 2);
        assert_eq!(
            snake(&pages(1..=7), grid),
            vec![
                Page(1),
                Page(2),
                Page(4),
                Page(3),
                Page(5),
                Page(6),
                Page(7)
            ]
        );
    }

    #[test]
    fn test_snake_short_odd_row_is_not_padded() {
        let grid = GridShape::new(2, 3);
        assert_eq!(
            snake(&pages(1..=5), grid),
            vec![Page(1), Page(2), Page(3), Page(5), Page(4)]
        );
    }

    #[test]
    fn test_mirror_rows() {
        let mut sheet = pages(1..=6);
        mirror_rows(&mut sheet, 3);
        assert_eq!(
            sheet,
            vec![Page(3), Page(2), Page(1), Page(6), Page(5), Page(4)]
        );
    }
}
