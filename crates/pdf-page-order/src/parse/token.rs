//! Tokenizer for page-order expressions

/// One lexical unit of an expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Run of characters other than parentheses, commas and whitespace
    Word(&'a str),
    Open,
    Close,
    /// One or more commas/whitespace characters
    Separator,
}

pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut word_start: Option<usize> = None;

    for (i, c) in text.char_indices() {
        let token = match c {
            '(' => Token::Open,
            ')' => Token::Close,
            c if c == ',' || c.is_whitespace() => Token::Separator,
            _ => {
                word_start.get_or_insert(i);
                continue;
            }
        };

        if let Some(start) = word_start.take() {
            tokens.push(Token::Word(&text[start..i]));
        }
        if token == Token::Separator && tokens.last() == Some(&Token::Separator) {
            continue;
        }
        tokens.push(token);
    }
    if let Some(start) = word_start {
        tokens.push(Token::Word(&text[start..]));
    }

    tokens
}

/// Whether every `(` has a matching `)` and no `)` comes first
pub fn is_balanced(tokens: &[Token<'_>]) -> bool {
    let mut depth = 0usize;
    for token in tokens {
        match token {
            Token::Open => depth += 1,
            Token::Close => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            _ => {}
        }
    }
    depth == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_wrapper() {
        assert_eq!(
            tokenize("4-up(1-8)"),
            vec![
                Token::Word("4-up"),
                Token::Open,
                Token::Word("1-8"),
                Token::Close
            ]
        );
    }

    #[test]
    fn test_separators_collapse() {
        assert_eq!(
            tokenize("1 ,  2"),
            vec![Token::Word("1"), Token::Separator, Token::Word("2")]
        );
    }

    #[test]
    fn test_reverse_group() {
        assert_eq!(
            tokenize("-(1 2)"),
            vec![
                Token::Word("-"),
                Token::Open,
                Token::Word("1"),
                Token::Separator,
                Token::Word("2"),
                Token::Close
            ]
        );
    }

    #[test]
    fn test_balance() {
        assert!(is_balanced(&tokenize("b(1-4) (5 6)")));
        assert!(!is_balanced(&tokenize("booklet(1-4")));
        assert!(!is_balanced(&tokenize(")1(")));
    }
}
