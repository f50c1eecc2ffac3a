//! Recursive-descent parser
//!
//! Grammar (informal):
//!
//! ```text
//! list  := item ((',' | WS) item)*
//! item  := '(' list ')' | name '(' list ')' | word
//! word  := keyword | bare-layout | '-' range | range
//! ```
//!
//! Parsing never fails. Unbalanced parentheses make the whole text a plain
//! range (which usually expands to little or nothing) and groups nested past
//! the depth limit are dropped.

use super::ast::{Expr, Keyword};
use super::token::{Token, is_balanced, tokenize};
use crate::constants::{MAX_NESTING_DEPTH, WHOLE_POOL};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::layout::Layout;

/// Parse expression text into a tree
pub fn parse_expression(text: &str) -> Expr {
    let mut diagnostics = Diagnostics::new();
    parse_expression_with(text, &mut diagnostics)
}

pub(crate) fn parse_expression_with(text: &str, diagnostics: &mut Diagnostics) -> Expr {
    let tokens = tokenize(text);
    if !is_balanced(&tokens) {
        diagnostics.push(Diagnostic::UnbalancedParens {
            text: text.to_string(),
        });
        return Expr::range(text);
    }

    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        depth: 0,
        strip_dash_at: None,
        diagnostics,
    };
    parser.parse_list()
}

/// `-1-5` style word: a dash, then a range that is not a bare integer
pub(crate) fn is_reversed_range(word: &str) -> bool {
    let Some(rest) = word.strip_prefix('-') else {
        return false;
    };
    rest.starts_with(|c: char| c.is_ascii_digit()) && !rest.chars().all(|c| c.is_ascii_digit())
}

struct Parser<'t, 'a, 'd> {
    tokens: &'t [Token<'a>],
    pos: usize,
    depth: usize,
    /// Token index of a group's leading `-digit` word, read without its dash
    strip_dash_at: Option<usize>,
    diagnostics: &'d mut Diagnostics,
}

impl<'a> Parser<'_, 'a, '_> {
    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn next_token(&mut self) -> Option<Token<'a>> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_list(&mut self) -> Expr {
        let mut items = Vec::new();
        loop {
            match self.peek() {
                None | Some(Token::Close) => break,
                Some(Token::Separator) => self.pos += 1,
                Some(_) => items.push(self.parse_item()),
            }
        }

        match items.len() {
            1 => items.remove(0),
            _ => Expr::List(items),
        }
    }

    fn parse_item(&mut self) -> Expr {
        match self.next_token() {
            Some(Token::Open) => self.parse_group(),
            Some(Token::Word(word)) if self.peek() == Some(Token::Open) => {
                self.pos += 1;
                match self.parse_enclosed() {
                    Some(arg) => Expr::wrapper(word.to_ascii_lowercase(), arg),
                    None => Expr::Malformed(word.to_string()),
                }
            }
            Some(Token::Word(word)) => {
                let strip_dash = self.strip_dash_at == Some(self.pos - 1);
                self.parse_word(word, strip_dash)
            }
            // Balanced input: lists stop at `)` and skip separators
            _ => Expr::List(Vec::new()),
        }
    }

    /// `( ... )` after its opening paren
    fn parse_group(&mut self) -> Expr {
        let start = self.pos;
        let leading_dash = self.tokens[start..]
            .iter()
            .position(|token| *token != Token::Separator)
            .map(|offset| start + offset)
            .filter(|&i| {
                matches!(self.tokens.get(i), Some(Token::Word(w)) if is_reversed_range(w))
                    && self.tokens.get(i + 1) != Some(&Token::Open)
            });

        let outer = std::mem::replace(&mut self.strip_dash_at, leading_dash);
        let inner = self.parse_enclosed();
        self.strip_dash_at = outer;

        let Some(inner) = inner else {
            return Expr::Malformed("(...)".to_string());
        };
        let group = Expr::Group(Box::new(inner));
        if leading_dash.is_some() {
            Expr::wrapper("-", group)
        } else {
            group
        }
    }

    /// Contents of a parenthesized list; consumes the closing paren
    fn parse_enclosed(&mut self) -> Option<Expr> {
        if self.depth >= MAX_NESTING_DEPTH {
            self.diagnostics.push(Diagnostic::DepthLimit {
                limit: MAX_NESTING_DEPTH,
            });
            self.skip_to_close();
            return None;
        }

        self.depth += 1;
        let inner = self.parse_list();
        self.depth -= 1;

        if self.peek() == Some(Token::Close) {
            self.pos += 1;
        }
        Some(inner)
    }

    fn skip_to_close(&mut self) {
        let mut depth = 1usize;
        while let Some(token) = self.next_token() {
            match token {
                Token::Open => depth += 1,
                Token::Close => {
                    depth -= 1;
                    if depth == 0 {
                        return;
                    }
                }
                _ => {}
            }
        }
    }

    fn parse_word(&mut self, word: &str, strip_dash: bool) -> Expr {
        let word = if strip_dash { &word[1..] } else { word };
        let lower = word.to_ascii_lowercase();

        match lower.as_str() {
            "0" | "-1" => return Expr::Keyword(Keyword::Blank),
            "empty" => return Expr::Keyword(Keyword::Empty),
            "fill" => return Expr::Keyword(Keyword::Fill),
            _ => {}
        }

        if Layout::from_bare_word(&lower).is_some() {
            return Expr::wrapper(lower, Expr::range(WHOLE_POOL));
        }

        if is_reversed_range(word) {
            return Expr::wrapper("-", self.parse_word(&word[1..], false));
        }

        Expr::range(word)
    }
}
