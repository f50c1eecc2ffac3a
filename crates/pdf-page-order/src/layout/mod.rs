//! Layout appliers
//!
//! Pure slot-sequence transforms named by expression wrappers:
//! - Grid transforms within each sheet (right-to-left, bottom-up, snake)
//! - Signature folds (n-up, booklet)
//! - 2-sided units and the front/back sheet codec used to merge them

mod duplex;
mod fold;
mod grid;

pub use duplex::*;
pub use fold::*;
pub use grid::*;

use crate::constants::BARE_LAYOUTS;

/// A layout named by a wrapper such as `snake(...)` or `8-up(...)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `-(...)`: mirror each row
    RightToLeft,
    /// `b(...)`: fill rows from the bottom
    BottomUp,
    /// `snake(...)`: mirror every second row
    Snake,
    /// `odd(...)`: first, third, fifth... item
    Odd,
    /// `even(...)`: second, fourth, sixth... item
    Even,
    /// `2sided(...)`: duplex unit merged in the final pass
    TwoSided,
    /// `booklet(...)`: one saddle-stitched signature over everything
    Booklet,
    /// `repeat(...)`: each page fills the rest of its sheet
    Repeat,
    /// `N-up(...)` / `Nup(...)`: saddle-stitched signatures of N pages
    NUp(usize),
}

impl Layout {
    /// Resolve a wrapper name (already lowercase)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "-" => Some(Layout::RightToLeft),
            "b" => Some(Layout::BottomUp),
            "snake" => Some(Layout::Snake),
            "odd" => Some(Layout::Odd),
            "even" => Some(Layout::Even),
            "2sided" => Some(Layout::TwoSided),
            "booklet" => Some(Layout::Booklet),
            "repeat" => Some(Layout::Repeat),
            other => parse_n_up(other).map(Layout::NUp),
        }
    }

    /// Layouts that may be written without parentheses
    pub fn from_bare_word(word: &str) -> Option<Self> {
        if BARE_LAYOUTS.contains(&word) || parse_n_up(word).is_some() {
            Self::from_name(word)
        } else {
            None
        }
    }
}

/// `4-up`, `16up` -> signature size
fn parse_n_up(name: &str) -> Option<usize> {
    let size = name.strip_suffix("up")?;
    let size = size.strip_suffix('-').unwrap_or(size);
    if size.is_empty() || !size.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    size.parse().ok()
}
