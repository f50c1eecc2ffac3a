//! Expression tree

use crate::types::SlotValue;

/// Parsed page-order expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Comma/whitespace separated items, evaluated in order
    List(Vec<Expr>),
    /// `( ... )`: precedence only, the pool is unchanged
    Group(Box<Expr>),
    /// `name( ... )`; the name `-` is the right-to-left layout
    Wrapper { name: String, arg: Box<Expr> },
    Keyword(Keyword),
    /// Range text expanded against the pool
    Range(String),
    /// Dropped input (nesting limit); evaluates to nothing
    Malformed(String),
}

/// Single-slot keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    /// `0` or `-1`
    Blank,
    /// `empty`
    Empty,
    /// `fill`
    Fill,
}

impl From<Keyword> for SlotValue {
    fn from(keyword: Keyword) -> Self {
        match keyword {
            Keyword::Blank => SlotValue::Blank,
            Keyword::Empty => SlotValue::Empty,
            Keyword::Fill => SlotValue::Fill,
        }
    }
}

impl Expr {
    pub fn wrapper(name: impl Into<String>, arg: Expr) -> Self {
        Expr::Wrapper {
            name: name.into(),
            arg: Box::new(arg),
        }
    }

    pub fn range(text: impl Into<String>) -> Self {
        Expr::Range(text.into())
    }
}
