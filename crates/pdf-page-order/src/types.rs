use crate::diagnostics::{Diagnostic, Diagnostics};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageOrderError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No source files")]
    NoFiles,
}

pub type Result<T> = std::result::Result<T, PageOrderError>;

/// One source document as seen by the expression language
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceFile {
    /// Display name (usually the file name)
    pub name: String,
    /// Number of pages in the document
    pub page_count: usize,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, page_count: usize) -> Self {
        Self {
            name: name.into(),
            page_count,
        }
    }
}

/// Rows and columns of slots on one sheet side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridShape {
    pub rows: usize,
    pub cols: usize,
}

impl Default for GridShape {
    fn default() -> Self {
        Self { rows: 1, cols: 1 }
    }
}

impl GridShape {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Row count, never less than 1
    pub fn rows(self) -> usize {
        self.rows.max(1)
    }

    /// Column count, never less than 1
    pub fn cols(self) -> usize {
        self.cols.max(1)
    }

    /// Number of slots on one sheet side
    pub fn slots_per_sheet(self) -> usize {
        self.rows().saturating_mul(self.cols())
    }

    /// Replace the column count when the caller supplies one
    pub fn with_cols(self, cols_override: Option<usize>) -> Self {
        match cols_override {
            Some(cols) => Self { cols, ..self },
            None => self,
        }
    }

    /// Clamp zero dimensions to 1, recording a diagnostic when that happens
    pub(crate) fn normalized(self, diagnostics: &mut Diagnostics) -> Self {
        if self.rows == 0 || self.cols == 0 {
            diagnostics.push(Diagnostic::InvalidGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Self {
            rows: self.rows(),
            cols: self.cols(),
        }
    }
}

/// Which physical side of the printed sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetSide {
    /// Front of the sheet (printed first in duplex)
    Front,
    /// Back of the sheet (printed second in duplex)
    Back,
}

impl SheetSide {
    /// Side of the sheet at a zero-based position in the output sequence
    pub fn of_sheet(index: usize) -> Self {
        if index % 2 == 0 {
            SheetSide::Front
        } else {
            SheetSide::Back
        }
    }
}

/// A single slot while an order is being built.
///
/// `Empty` is a free slot: later sheet insertions may write into it and it
/// is trimmed from the end of the result. `Blank` is an occupied slot that
/// prints nothing. The last three variants are deferred until the final pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotValue {
    /// Absolute page number (1-based)
    Page(usize),
    Blank,
    Empty,
    /// Fill the rest of the current sheet
    Fill,
    /// Fill the rest of the current sheet with one page
    Repeat(usize),
    /// One `2sided(...)` unit: fronts and backs, merged in the final pass
    DuplexPending {
        odds: Vec<SlotValue>,
        evens: Vec<SlotValue>,
    },
}

impl SlotValue {
    /// Whether this slot is free for later insertions
    pub fn is_empty(&self) -> bool {
        matches!(self, SlotValue::Empty)
    }

    /// The page placed in this slot, if any
    pub fn page(&self) -> Option<usize> {
        match self {
            SlotValue::Page(page) => Some(*page),
            _ => None,
        }
    }

    /// External encoding: page number, or 0 for anything that prints nothing
    pub fn lower(&self) -> usize {
        self.page().unwrap_or(0)
    }

    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            SlotValue::Page(_) => "page",
            SlotValue::Blank => "blank",
            SlotValue::Empty => "empty",
            SlotValue::Fill => "fill",
            SlotValue::Repeat(_) => "repeat",
            SlotValue::DuplexPending { .. } => "2sided",
        }
    }
}

/// Result of evaluating a page-order expression
#[derive(Debug, Clone, PartialEq)]
pub struct PageOrder {
    /// One entry per slot: 0 = empty, otherwise an absolute page number
    pub slots: Vec<usize>,
    /// Non-fatal anomalies met while evaluating
    pub diagnostics: Vec<Diagnostic>,
    /// Grid the order was laid out for (after any column override)
    pub grid: GridShape,
}

impl PageOrder {
    pub fn slots_per_sheet(&self) -> usize {
        self.grid.slots_per_sheet()
    }

    /// Number of sheet sides the slots span
    pub fn sheet_count(&self) -> usize {
        self.slots.len().div_ceil(self.slots_per_sheet())
    }

    /// Slots of one sheet side (the last one may be short)
    pub fn sheet(&self, index: usize) -> Option<&[usize]> {
        self.sheets().nth(index)
    }

    pub fn sheets(&self) -> std::slice::Chunks<'_, usize> {
        self.slots.chunks(self.slots_per_sheet())
    }

    /// Sheets paired with the physical side they land on in duplex printing
    pub fn sides(&self) -> impl Iterator<Item = (SheetSide, &[usize])> {
        self.sheets()
            .enumerate()
            .map(|(index, sheet)| (SheetSide::of_sheet(index), sheet))
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Statistics about an evaluated order
#[derive(Debug, Clone, PartialEq)]
pub struct OrderStatistics {
    /// Total pages across all source files
    pub source_pages: usize,
    pub slots_per_sheet: usize,
    /// Sheet sides the order spans
    pub sheets: usize,
    /// Slots holding a page
    pub placed_pages: usize,
    /// Different pages placed at least once
    pub distinct_pages: usize,
    /// Slots on the spanned sheets that print nothing
    pub blank_slots: usize,
    /// Source pages never placed
    pub unused_pages: usize,
}
