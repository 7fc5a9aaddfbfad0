use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::{ParseError, ParseMachineErrorType};
use crate::parse::token::{Delimiter, Token};

pub(crate) type IndexedToken = (usize, Token);

pub(crate) struct TokenIterator<'a> {
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> TokenIterator<'a> {
    pub fn new(s: &'a str) -> Self {
        Self {
            chars: s.char_indices().peekable(),
        }
    }

    pub fn next_skip_space(&mut self) -> Result<Option<IndexedToken>, ParseError> {
        loop {
            match self.next()? {
                Some((_, Token::Space)) => {}
                next => return Ok(next),
            }
        }
    }

    pub fn next(&mut self) -> Result<Option<IndexedToken>, ParseError> {
        let (idx, c) = match self.chars.next() {
            Some(next) => next,
            None => return Ok(None),
        };
        let token = if c.is_whitespace() {
            while self.chars.peek().map_or(false, |&(_, c)| c.is_whitespace()) {
                self.chars.next();
            }
            Token::Space
        } else if c.is_ascii_digit() {
            let mut s = c.to_string();
            while let Some(&(_, c)) = self.chars.peek() {
                if !c.is_ascii_digit() {
                    break;
                }
                s.push(c);
                self.chars.next();
            }
            match s.parse() {
                Ok(n) => Token::Number(n),
                Err(_) => return Err(ParseError::new(ParseMachineErrorType::InvalidNumber, s, idx)),
            }
        } else if let Some(d) = Delimiter::from_open(c) {
            Token::Open(d)
        } else if let Some(d) = Delimiter::from_close(c) {
            Token::Close(d)
        } else {
            match c {
                ',' => Token::Comma,
                '.' => Token::Light(false),
                '#' => Token::Light(true),
                _ => return Err(ParseError::new(ParseMachineErrorType::InvalidToken, c, idx)),
            }
        };
        Ok(Some((idx, token)))
    }
}

#[cfg(test)]
mod tests {
    use super::TokenIterator;
    use crate::parse::token::{Delimiter, Token};

    #[test]
    fn tokens() {
        let mut s = TokenIterator::new("[#.]  (12,3)");
        let mut tokens = Vec::new();
        while let Some(t) = s.next().unwrap() {
            tokens.push(t);
        }
        assert_eq!(
            tokens,
            vec![
                (0, Token::Open(Delimiter::Bracket)),
                (1, Token::Light(true)),
                (2, Token::Light(false)),
                (3, Token::Close(Delimiter::Bracket)),
                (4, Token::Space),
                (6, Token::Open(Delimiter::Paren)),
                (7, Token::Number(12)),
                (9, Token::Comma),
                (10, Token::Number(3)),
                (11, Token::Close(Delimiter::Paren)),
            ]
        );
    }

    #[test]
    fn number_too_big() {
        let mut s = TokenIterator::new("99999999999999999999999");
        assert!(s.next().is_err());
    }
}
