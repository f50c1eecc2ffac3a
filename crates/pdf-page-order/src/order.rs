//! Page-order entry point
//!
//! ```text
//! input ─► top-level tokens ─► prefixes ─► parse ─► evaluate ─► sheet writer
//!                                                                   │
//!                        slots (0 = empty) ◄─ lower ◄─ final pass ◄─┘
//! ```

use crate::constants::{MAX_SHEETS, WHOLE_POOL};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::eval::{EvalEnv, evaluate};
use crate::options::PageOrderContext;
use crate::parse::parse_expression_with;
use crate::prefix::{resolve_prefix_with, split_scoped_tokens};
use crate::range::expand_range_with;
use crate::sheet::{SheetWriter, resolve_deferred};
use crate::types::{PageOrder, SlotValue};

/// Evaluate a page-order expression against the files and grid of `context`.
///
/// `cols_override` replaces the context's column count for this call only.
/// Never fails: anything that degrades the result is reported in
/// [`PageOrder::diagnostics`].
pub fn parse_page_order(
    input: &str,
    context: &PageOrderContext,
    cols_override: Option<usize>,
) -> PageOrder {
    let mut diagnostics = Diagnostics::new();
    let grid = context
        .grid
        .with_cols(cols_override)
        .normalized(&mut diagnostics);
    let env = EvalEnv {
        grid,
        files: &context.files,
    };

    let tokens = split_scoped_tokens(input);
    let mut writer = SheetWriter::new(grid);

    for token in &tokens {
        let scope = resolve_prefix_with(token, &context.files, &mut diagnostics);
        let text = if scope.remainder.is_empty() && scope.explicit_pool {
            WHOLE_POOL
        } else {
            scope.remainder.as_str()
        };

        let expr = parse_expression_with(text, &mut diagnostics);
        let items = evaluate(&expr, &scope.pool, &env, &mut diagnostics);

        let target = scope
            .sheet_range
            .as_deref()
            .and_then(|range| first_sheet(range, writer.sheet_count(), &mut diagnostics));
        match target {
            Some(sheet) => writer.insert_at_sheet(sheet, items),
            None => writer.append(items),
        }
    }

    let slots: Vec<usize> = resolve_deferred(writer.into_slots(), grid, &mut diagnostics)
        .iter()
        .map(SlotValue::lower)
        .collect();

    log::trace!(
        "page order `{}`: {} token(s), {} slot(s), {} diagnostic(s)",
        input,
        tokens.len(),
        slots.len(),
        diagnostics.len()
    );

    PageOrder {
        slots,
        diagnostics: diagnostics.into_vec(),
        grid,
    }
}

/// First sheet (1-based) an `sh` range selects, `last` being the current sheet count.
///
/// Sheets past [`MAX_SHEETS`] (or the sheet after the last written one, if
/// that is further) are clamped to it.
fn first_sheet(range: &str, sheet_count: usize, diagnostics: &mut Diagnostics) -> Option<usize> {
    let first = expand_range_with(range, sheet_count.max(1), diagnostics)
        .into_iter()
        .next()
        .filter(|&sheet| sheet >= 1);
    let Some(sheet) = first else {
        diagnostics.push(Diagnostic::InvalidSheetRange {
            range: range.to_string(),
        });
        return None;
    };

    let limit = MAX_SHEETS.max(sheet_count.saturating_add(1));
    if sheet > limit {
        diagnostics.push(Diagnostic::SheetClamped {
            requested: sheet,
            limit,
        });
        return Some(limit);
    }
    Some(sheet)
}
