//! Sheet assembly
//!
//! The sheet writer accumulates the raw slot streams of all top-level tokens,
//! honouring `sh` prefixes. The final pass then expands the deferred slots
//! (`Fill`, `Repeat`, `DuplexPending`) in order, each seeing the sheets
//! written before it.

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::layout::{decode_back, decode_front, lay_out_sides};
use crate::types::{GridShape, SlotValue};

// =============================================================================
// Sheet Writer
// =============================================================================

/// Accumulating output of one evaluation
#[derive(Debug)]
pub(crate) struct SheetWriter {
    slots: Vec<SlotValue>,
    grid: GridShape,
}

impl SheetWriter {
    pub fn new(grid: GridShape) -> Self {
        Self {
            slots: Vec::new(),
            grid,
        }
    }

    /// Sheets touched so far, including a partly filled last one
    pub fn sheet_count(&self) -> usize {
        self.slots.len().div_ceil(self.grid.slots_per_sheet())
    }

    pub fn append(&mut self, items: Vec<SlotValue>) {
        self.slots.extend(items);
    }

    /// Write `items` from the first free slot at or after the start of `sheet` (1-based).
    ///
    /// Free slots there are overwritten; items beyond the free run are
    /// inserted before the next occupied slot.
    pub fn insert_at_sheet(&mut self, sheet: usize, items: Vec<SlotValue>) {
        let target = sheet
            .saturating_sub(1)
            .saturating_mul(self.grid.slots_per_sheet());
        if self.slots.len() < target {
            self.slots.resize(target, SlotValue::Empty);
        }

        let mut cursor = target;
        while self.slots.get(cursor).is_some_and(|slot| !slot.is_empty()) {
            cursor += 1;
        }

        let free = self.slots[cursor..]
            .iter()
            .take_while(|slot| slot.is_empty())
            .count();
        let overwrite = free.min(items.len());
        self.slots.splice(cursor..cursor + overwrite, items);
    }

    pub fn into_slots(self) -> Vec<SlotValue> {
        self.slots
    }
}

// =============================================================================
// Deferred Slots
// =============================================================================

/// Expand `Fill`, `Repeat` and `DuplexPending`, then trim trailing empty slots
pub(crate) fn resolve_deferred(
    slots: Vec<SlotValue>,
    grid: GridShape,
    diagnostics: &mut Diagnostics,
) -> Vec<SlotValue> {
    let per_sheet = grid.slots_per_sheet();
    let mut out = Vec::with_capacity(slots.len());

    for slot in slots {
        match slot {
            SlotValue::Fill => fill_remainder(&mut out, per_sheet),
            SlotValue::Repeat(page) => repeat_page(&mut out, page, per_sheet),
            SlotValue::DuplexPending { odds, evens } => {
                merge_duplex(&mut out, odds, evens, grid, diagnostics)
            }
            other => out.push(other),
        }
    }

    trim_trailing_empty(&mut out);
    out
}

/// Complete the current sheet by cycling through its placed slots.
///
/// At a sheet boundary there is nothing to cycle, so a whole sheet of blanks
/// is written.
fn fill_remainder(out: &mut Vec<SlotValue>, per_sheet: usize) {
    let placed = out.len() % per_sheet;
    if placed == 0 {
        out.extend(std::iter::repeat_n(SlotValue::Blank, per_sheet));
        return;
    }

    let current = out[out.len() - placed..].to_vec();
    out.extend(current.iter().cycle().take(per_sheet - placed).cloned());
}

/// Complete the current sheet (or a whole new one) with a single page
fn repeat_page(out: &mut Vec<SlotValue>, page: usize, per_sheet: usize) {
    let remaining = per_sheet - out.len() % per_sheet;
    out.extend(std::iter::repeat_n(SlotValue::Page(page), remaining));
}

/// Merge a 2-sided unit with the duplex sheets it continues.
///
/// With an even number of complete sheets the open front sheet is absorbed;
/// with an odd number the last front/back pair is. The absorbed content and
/// the unit are laid out again as front/back sheets in their place.
fn merge_duplex(
    out: &mut Vec<SlotValue>,
    odds: Vec<SlotValue>,
    evens: Vec<SlotValue>,
    grid: GridShape,
    diagnostics: &mut Diagnostics,
) {
    let per_sheet = grid.slots_per_sheet();
    let occupied = out
        .iter()
        .rposition(|slot| !slot.is_empty())
        .map_or(0, |last| last + 1);
    let complete_sheets = occupied / per_sheet;

    let (first_sheet, absorbs_back) = if complete_sheets % 2 == 0 {
        (complete_sheets, false)
    } else {
        (complete_sheets - 1, true)
    };

    let front = decode_front(sheet_at(out, first_sheet, per_sheet));
    let back = if absorbs_back {
        decode_back(sheet_at(out, first_sheet + 1, per_sheet), grid)
    } else {
        decode_front(&[])
    };

    if front.truncated {
        diagnostics.push(Diagnostic::DuplexContentDropped {
            sheet: first_sheet + 1,
        });
    }
    if back.truncated {
        diagnostics.push(Diagnostic::DuplexContentDropped {
            sheet: first_sheet + 2,
        });
    }
    if front.slots.len() != back.slots.len() {
        diagnostics.push(Diagnostic::DuplexMisaligned {
            fronts: front.slots.len(),
            backs: back.slots.len(),
        });
    }

    let mut fronts = front.slots;
    fronts.extend(odds);
    let mut backs = back.slots;
    backs.extend(evens);
    settle_nested(&mut fronts, diagnostics);
    settle_nested(&mut backs, diagnostics);

    out.truncate(first_sheet * per_sheet);
    out.extend(lay_out_sides(&fronts, &backs, grid));
}

fn sheet_at(slots: &[SlotValue], index: usize, per_sheet: usize) -> &[SlotValue] {
    let start = (index * per_sheet).min(slots.len());
    let end = ((index + 1) * per_sheet).min(slots.len());
    &slots[start..end]
}

/// Deferred slots cannot be expanded inside a duplex unit; they print nothing
fn settle_nested(slots: &mut [SlotValue], diagnostics: &mut Diagnostics) {
    for slot in slots.iter_mut() {
        if matches!(
            slot,
            SlotValue::Fill | SlotValue::Repeat(_) | SlotValue::DuplexPending { .. }
        ) {
            diagnostics.push(Diagnostic::SentinelInDuplex {
                kind: slot.kind_name(),
            });
            *slot = SlotValue::Blank;
        }
    }
}

fn trim_trailing_empty(slots: &mut Vec<SlotValue>) {
    while slots.last().is_some_and(SlotValue::is_empty) {
        slots.pop();
    }
}
