pub mod constants;
mod diagnostics;
mod eval;
mod hints;
mod io;
pub mod layout;
mod options;
mod order;
pub mod parse;
mod prefix;
mod range;
mod sheet;
mod stats;
mod types;

pub use diagnostics::{Diagnostic, Diagnostics};
pub use eval::{EvalEnv, evaluate};
pub use hints::{LayoutHint, suggest_layout};
pub use io::{load_context, load_pdf_page_count};
pub use options::*;
pub use order::parse_page_order;
pub use parse::{Expr, Keyword, parse_expression};
pub use prefix::{PagePool, Scope, resolve_prefix, split_scoped_tokens};
pub use range::expand_range;
pub use stats::calculate_statistics;
pub use types::*;
