//! Expression evaluation
//!
//! Walks a parsed expression against a page pool and produces the raw slot
//! stream for one top-level token. Deferred slots (`Fill`, `Repeat`,
//! `DuplexPending`) are passed through untouched for the final pass.

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::layout::{
    Layout, booklet, bottom_up, interleave_sides, n_up, right_to_left, snake, two_sided,
};
use crate::parse::Expr;
use crate::prefix::PagePool;
use crate::range::expand_range_with;
use crate::types::{GridShape, SlotValue, SourceFile};

/// Read-only inputs shared by every node of one evaluation
#[derive(Debug, Clone, Copy)]
pub struct EvalEnv<'a> {
    pub grid: GridShape,
    pub files: &'a [SourceFile],
}

/// Evaluate an expression against a pool. Never fails.
pub fn evaluate(
    expr: &Expr,
    pool: &PagePool,
    env: &EvalEnv<'_>,
    diagnostics: &mut Diagnostics,
) -> Vec<SlotValue> {
    match expr {
        Expr::List(items) => items
            .iter()
            .flat_map(|item| evaluate(item, pool, env, diagnostics))
            .collect(),
        Expr::Group(inner) => evaluate(inner, pool, env, diagnostics),
        Expr::Keyword(keyword) => vec![(*keyword).into()],
        Expr::Range(text) => evaluate_range(text, pool, diagnostics),
        Expr::Malformed(_) => Vec::new(),
        Expr::Wrapper { name, arg } => {
            let inner = evaluate(arg, pool, env, diagnostics);
            match Layout::from_name(name) {
                Some(layout) => apply_layout(layout, flatten_duplex(inner), env, diagnostics),
                None => {
                    diagnostics.push(Diagnostic::UnknownWrapper { name: name.clone() });
                    inner
                }
            }
        }
    }
}

/// Expand range text and map the 1-based indices into the pool
fn evaluate_range(text: &str, pool: &PagePool, diagnostics: &mut Diagnostics) -> Vec<SlotValue> {
    let indices = expand_range_with(text, pool.len(), diagnostics);
    let mut out_of_range = 0;

    let slots: Vec<SlotValue> = indices
        .into_iter()
        .map(|index| match pool.page(index) {
            Some(page) => SlotValue::Page(page),
            None => {
                out_of_range += 1;
                SlotValue::Blank
            }
        })
        .collect();

    if out_of_range > 0 {
        diagnostics.push(Diagnostic::IndexOutOfRange {
            range: text.to_string(),
            count: out_of_range,
            pool_len: pool.len(),
        });
    }
    slots
}

/// A 2-sided unit nested inside another layout is read as front, back, front...
fn flatten_duplex(items: Vec<SlotValue>) -> Vec<SlotValue> {
    if !items
        .iter()
        .any(|item| matches!(item, SlotValue::DuplexPending { .. }))
    {
        return items;
    }

    items
        .into_iter()
        .flat_map(|item| match item {
            SlotValue::DuplexPending { odds, evens } => interleave_sides(&odds, &evens),
            other => vec![other],
        })
        .collect()
}

fn apply_layout(
    layout: Layout,
    items: Vec<SlotValue>,
    env: &EvalEnv<'_>,
    diagnostics: &mut Diagnostics,
) -> Vec<SlotValue> {
    match layout {
        Layout::RightToLeft => right_to_left(&items, env.grid),
        Layout::BottomUp => bottom_up(&items, env.grid),
        Layout::Snake => snake(&items, env.grid),
        Layout::Odd => items.into_iter().step_by(2).collect(),
        Layout::Even => items.into_iter().skip(1).step_by(2).collect(),
        Layout::Repeat => items
            .into_iter()
            .map(|item| match item {
                SlotValue::Page(page) => SlotValue::Repeat(page),
                other => other,
            })
            .collect(),
        Layout::NUp(size) => n_up(&items, size, diagnostics),
        Layout::Booklet => booklet(&items),
        Layout::TwoSided => vec![two_sided(&items, env.files)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_expression;
    use SlotValue::{Blank, Empty, Fill, Page};

    fn run(text: &str, pool_size: usize, grid: GridShape) -> Vec<SlotValue> {
        let files = vec![SourceFile::new("a.pdf", pool_size)];
        let env = EvalEnv {
            grid,
            files: &files,
        };
        let pool = PagePool::all(&files);
        let mut diagnostics = Diagnostics::new();
        evaluate(&parse_expression(text), &pool, &env, &mut diagnostics)
    }

    #[test]
    fn test_range_maps_into_pool() {
        let files = vec![SourceFile::new("a.pdf", 10)];
        let env = EvalEnv {
            grid: GridShape::default(),
            files: &files,
        };
        let pool = PagePool::new(vec![4, 5, 6]);
        let mut diagnostics = Diagnostics::new();
        let slots = evaluate(&parse_expression("3-1 5"), &pool, &env, &mut diagnostics);
        assert_eq!(slots, vec![Page(6), Page(5), Page(4), Blank]);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            run("1 0 empty -1 fill", 3, GridShape::default()),
            vec![Page(1), Blank, Empty, Blank, Fill]
        );
    }

    #[test]
    fn test_odd_and_even() {
        assert_eq!(
            run("odd", 5, GridShape::default()),
            vec![Page(1), Page(3), Page(5)]
        );
        assert_eq!(
            run("even(1-5)", 5, GridShape::default()),
            vec![Page(2), Page(4)]
        );
    }

    #[test]
    fn test_repeat() {
        assert_eq!(
            run("repeat(2 0)", 3, GridShape::default()),
            vec![SlotValue::Repeat(2), Blank]
        );
    }

    #[test]
    fn test_reverse_sugar_matches_wrapper() {
        let grid = GridShape::new(2, 3);
        assert_eq!(run("-1-5", 5, grid), run("-(1-5)", 5, grid));
        assert_eq!(run("(-1-5)", 5, grid), run("-(1-5)", 5, grid));
    }

    #[test]
    fn test_unknown_wrapper_passes_through() {
        assert_eq!(
            run("spiral(1-3)", 3, GridShape::default()),
            vec![Page(1), Page(2), Page(3)]
        );
    }

    #[test]
    fn test_two_sided_is_deferred() {
        let slots = run("2sided(1-3)", 3, GridShape::default());
        assert_eq!(
            slots,
            vec![SlotValue::DuplexPending {
                odds: vec![Page(1), Page(3)],
                evens: vec![Page(2), Blank],
            }]
        );
    }

    #[test]
    fn test_nested_two_sided_is_flattened() {
        assert_eq!(
            run("b(2sided(1-2))", 2, GridShape::new(2, 1)),
            vec![Page(2), Page(1)]
        );
    }

    #[test]
    fn test_grouping_keeps_pool() {
        assert_eq!(
            run("((1) (last))", 4, GridShape::default()),
            vec![Page(1), Page(4)]
        );
    }
}
