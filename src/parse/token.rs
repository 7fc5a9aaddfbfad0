use std::fmt;

use crate::machine::Presses;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Token {
    Close(Delimiter),
    Comma,
    /// A cell of the indicator light diagram, `#` is on
    Light(bool),
    Number(Presses),
    Open(Delimiter),
    Space,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Delimiter {
    /// `[...]` indicator light diagram
    Bracket,
    /// `(...)` button wiring
    Paren,
    /// `{...}` joltage targets
    Brace,
}

impl Delimiter {
    pub fn from_open(c: char) -> Option<Self> {
        match c {
            '[' => Some(Delimiter::Bracket),
            '(' => Some(Delimiter::Paren),
            '{' => Some(Delimiter::Brace),
            _ => None,
        }
    }

    pub fn from_close(c: char) -> Option<Self> {
        match c {
            ']' => Some(Delimiter::Bracket),
            ')' => Some(Delimiter::Paren),
            '}' => Some(Delimiter::Brace),
            _ => None,
        }
    }

    fn symbols(self) -> (char, char) {
        match self {
            Delimiter::Bracket => ('[', ']'),
            Delimiter::Paren => ('(', ')'),
            Delimiter::Brace => ('{', '}'),
        }
    }
}

impl Token {
    pub fn number(self) -> Option<Presses> {
        match self {
            Token::Number(n) => Some(n),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Close(d) => write!(f, "{}", d.symbols().1),
            Token::Comma => write!(f, ","),
            Token::Light(on) => write!(f, "{}", if *on { '#' } else { '.' }),
            Token::Number(n) => write!(f, "{}", n),
            Token::Open(d) => write!(f, "{}", d.symbols().0),
            Token::Space => write!(f, " "),
        }
    }
}
