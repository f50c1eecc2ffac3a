//! Non-fatal diagnostics
//!
//! Evaluation never fails. Anything that degrades the result (dropped
//! segments, out-of-range indices, padded signatures) is recorded here and
//! returned next to the slots, without changing them.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    #[error("unparseable range segment `{segment}`")]
    UnparseableSegment { segment: String },

    #[error("{count} index(es) of `{range}` fall outside a pool of {pool_len} pages")]
    IndexOutOfRange {
        range: String,
        count: usize,
        pool_len: usize,
    },

    #[error("unknown layout `{name}`, contents passed through unchanged")]
    UnknownWrapper { name: String },

    #[error("unbalanced parentheses in `{text}`, read as a plain range")]
    UnbalancedParens { text: String },

    #[error("nesting deeper than {limit} levels, group dropped")]
    DepthLimit { limit: usize },

    #[error("range `{segment}` truncated to {limit} entries")]
    RangeTruncated { segment: String, limit: usize },

    #[error("signature size {size} outside 1..={limit}, contents passed through unchanged")]
    SignatureOutOfRange { size: usize, limit: usize },

    #[error("grid {rows}x{cols} clamped to at least one row and column")]
    InvalidGrid { rows: usize, cols: usize },

    #[error("sheet range `{range}` selects no sheet, appended instead")]
    InvalidSheetRange { range: String },

    #[error("sheet {requested} clamped to sheet {limit}")]
    SheetClamped { requested: usize, limit: usize },

    #[error("`{kind}` inside a 2-sided unit placed as a blank")]
    SentinelInDuplex { kind: &'static str },

    #[error("2-sided merge over {fronts} front and {backs} back slots, backs will not line up")]
    DuplexMisaligned { fronts: usize, backs: usize },

    #[error("slots after the first gap on sheet {sheet} dropped by a 2-sided merge")]
    DuplexContentDropped { sheet: usize },
}

/// Collector threaded through parsing and evaluation
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        log::debug!("page order: {}", diagnostic);
        self.entries.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_collect() {
        let mut diagnostics = Diagnostics::new();
        assert!(diagnostics.is_empty());

        diagnostics.push(Diagnostic::UnknownWrapper {
            name: "spiral".to_string(),
        });
        diagnostics.push(Diagnostic::DepthLimit { limit: 4 });

        assert_eq!(diagnostics.len(), 2);
        let entries = diagnostics.into_vec();
        assert_eq!(
            entries[0],
            Diagnostic::UnknownWrapper {
                name: "spiral".to_string()
            }
        );
    }

    #[test]
    fn test_display() {
        let diagnostic = Diagnostic::SignatureOutOfRange {
            size: 0,
            limit: 1024,
        };
        assert_eq!(
            diagnostic.to_string(),
            "signature size 0 outside 1..=1024, contents passed through unchanged"
        );
    }
}
