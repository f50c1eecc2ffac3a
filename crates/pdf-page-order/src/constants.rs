//! Shared constants for the page-order language
//!
//! This module centralizes keywords and limits used by the parser and
//! evaluator.

// =============================================================================
// Keywords
// =============================================================================

/// Placeholder replaced by the size of the innermost scope
pub const LAST_KEYWORD: &str = "last";

/// Range used when a layout keyword appears without arguments
pub const WHOLE_POOL: &str = "1-last";

/// Layout names that may be written without parentheses
pub const BARE_LAYOUTS: [&str; 6] = ["odd", "even", "snake", "2sided", "booklet", "repeat"];

/// Scoping prefixes, in the order they are consumed
pub const SHEET_PREFIX: &str = "sh";
pub const FILE_PREFIX: &str = "f";
pub const PAGE_PREFIX: &str = "p";

// =============================================================================
// Limits
// =============================================================================

/// Deepest nesting of groups and wrappers the parser follows
pub const MAX_NESTING_DEPTH: usize = 64;

/// Most entries a single range segment may enumerate
pub const MAX_RANGE_SPAN: usize = 100_000;

/// Highest sheet an `sh` prefix may target
pub const MAX_SHEETS: usize = 10_000;

/// Largest `N` accepted by `N-up`
pub const MAX_SIGNATURE_PAGES: usize = 1_024;

/// Pages on one folded sheet (both sides)
pub const PAGES_PER_FOLDED_SHEET: usize = 4;
