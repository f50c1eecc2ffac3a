use crate::options::PageOrderContext;
use crate::types::*;
use std::collections::BTreeSet;

/// Calculate statistics for an evaluated order
pub fn calculate_statistics(order: &PageOrder, context: &PageOrderContext) -> OrderStatistics {
    let source_pages = context.total_pages();
    let slots_per_sheet = order.slots_per_sheet();
    let sheets = order.sheet_count();

    let placed: Vec<usize> = order.slots.iter().copied().filter(|&page| page > 0).collect();
    let distinct: BTreeSet<usize> = placed
        .iter()
        .copied()
        .filter(|&page| page <= source_pages)
        .collect();

    // Count the unfilled tail of the last sheet too
    let blank_slots = sheets * slots_per_sheet - placed.len();

    OrderStatistics {
        source_pages,
        slots_per_sheet,
        sheets,
        placed_pages: placed.len(),
        distinct_pages: distinct.len(),
        blank_slots,
        unused_pages: source_pages - distinct.len(),
    }
}
