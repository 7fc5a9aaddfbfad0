//! Parse machines from text

use std::convert::TryFrom;
use std::fmt::Display;

use crate::error::{ParseError, ParseMachineError, ParseMachineErrorType, ParseMachineErrorType::*, UNEXPECTED_END};
use crate::machine::{Button, CounterId, Machine, Presses};
use token::Delimiter;
use token_iterator::{IndexedToken, TokenIterator};

pub(crate) use token::Token;

mod token;
mod token_iterator;

pub type Result<T, E = ParseError> = std::result::Result<T, E>;

/// parse a `Machine` from a single line such as `[.##.] (3) (1,3) (2) {3,5,4}`
pub fn parse_machine(s: &str) -> Result<Machine, ParseMachineError> {
    let mut s = TokenIterator::new(s);
    let mut next = s.next_skip_space()?;
    if let Some((_, Token::Open(Delimiter::Bracket))) = next {
        skip_light_diagram(&mut s)?;
        next = s.next_skip_space()?;
    }
    let mut buttons = Vec::new();
    let targets = loop {
        match next {
            Some((_, Token::Open(Delimiter::Paren))) => {
                let counter_ids = read_list(&mut s, Delimiter::Paren)?
                    .into_iter()
                    .map(|(i, n)| CounterId::try_from(n).map_err(|_| ParseError::new(InvalidNumber, n, i)))
                    .collect::<Result<Vec<_>>>()?;
                buttons.push(Button::new(counter_ids));
            }
            Some((_, Token::Open(Delimiter::Brace))) => {
                break read_list(&mut s, Delimiter::Brace)?
                    .into_iter()
                    .map(|(_, n)| n)
                    .collect::<Vec<_>>();
            }
            Some((i, t)) => return Err(ParseError::new(UnexpectedToken, t, i).into()),
            None => return Err(ParseError::from_type(MissingTargets).into()),
        }
        next = s.next_skip_space()?;
    };
    if let Some((i, t)) = s.next_skip_space()? {
        return Err(ParseError::new(UnexpectedToken, t, i).into());
    }
    let machine = Machine::new(buttons, targets)?;
    Ok(machine)
}

/// parse one `Machine` per non-blank line
pub fn parse_machines(s: &str) -> Result<Vec<Machine>, ParseMachineError> {
    s.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| parse_machine(line).map_err(|e| e.at_line(i + 1)))
        .collect()
}

/// The indicator lights do not affect joltage
fn skip_light_diagram(s: &mut TokenIterator<'_>) -> Result<()> {
    loop {
        match s.next()?.expect_token()? {
            (_, Token::Light(_)) => {}
            (_, Token::Close(Delimiter::Bracket)) => return Ok(()),
            (i, t) => return Err(ParseError::new(UnexpectedToken, t, i)),
        }
    }
}

/// read a comma-separated list of numbers up to the closing delimiter
fn read_list(s: &mut TokenIterator<'_>, delimiter: Delimiter) -> Result<Vec<(usize, Presses)>> {
    let mut list = Vec::new();
    let first = s.next_skip_space()?.expect_token()?;
    if first.value() == Token::Close(delimiter) {
        return Ok(list);
    }
    list.push(first.map_or(UnexpectedToken, Token::number)?);
    loop {
        let (i, t) = s.next_skip_space()?.expect_token()?;
        match t {
            Token::Comma => {}
            Token::Close(d) if d == delimiter => return Ok(list),
            _ => return Err(ParseError::new(UnexpectedToken, t, i)),
        }
        let number = s
            .next_skip_space()?
            .expect_token()?
            .map_or(UnexpectedToken, Token::number)?;
        list.push(number);
    }
}

trait TokenOption<T>: Sized {
    fn expect_token(self) -> Result<T>;
}

impl TokenOption<IndexedToken> for Option<IndexedToken> {
    fn expect_token(self) -> Result<IndexedToken> {
        self.ok_or(UNEXPECTED_END)
    }
}

trait IndexedTokenExt<T>: Sized + Into<(usize, T)>
where
    T: Copy + Display,
{
    fn map_or<U>(
        self,
        error_type: ParseMachineErrorType,
        f: impl FnOnce(T) -> Option<U>,
    ) -> Result<(usize, U)> {
        let (index, token) = self.into();
        let n = f(token).ok_or_else(|| ParseError::new(error_type, token, index))?;
        Ok((index, n))
    }

    fn value(self) -> T;
}

impl<T> IndexedTokenExt<T> for (usize, T)
where
    T: Copy + Display,
{
    fn value(self) -> T {
        self.1
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{ParseMachineError, ParseMachineErrorType};
    use crate::machine::{Button, Machine};
    use crate::parse::{parse_machine, parse_machines};

    fn error_type(s: &str) -> ParseMachineErrorType {
        match parse_machine(s) {
            Err(ParseMachineError::Parse(e)) => e.error_type(),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn empty() {
        assert_eq!(error_type(""), ParseMachineErrorType::MissingTargets);
    }

    #[test]
    fn test() {
        let machine = parse_machine("[.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}").unwrap();
        let expected = Machine::new(
            vec![
                Button::new(vec![3]),
                Button::new(vec![1, 3]),
                Button::new(vec![2]),
                Button::new(vec![2, 3]),
                Button::new(vec![0, 2]),
                Button::new(vec![0, 1]),
            ],
            vec![3, 5, 4, 7],
        )
        .unwrap();
        assert_eq!(machine, expected);
    }

    #[test]
    fn without_lights_and_spacing() {
        let machine = parse_machine("( 0 , 1 )() { 2 ,2 }").unwrap();
        assert_eq!(machine.buttons(), &[Button::new(vec![0, 1]), Button::new(vec![])]);
        assert_eq!(machine.targets(), &[2, 2]);
    }

    #[test]
    fn no_buttons() {
        let machine = parse_machine("[#] {2}").unwrap();
        assert_eq!(machine.button_count(), 0);
        assert_eq!(machine.targets(), &[2]);
    }

    #[test]
    fn errors() {
        assert_eq!(error_type("(0) (1)"), ParseMachineErrorType::MissingTargets);
        assert_eq!(error_type("(0,) {1}"), ParseMachineErrorType::UnexpectedToken);
        assert_eq!(error_type("(0 1) {1}"), ParseMachineErrorType::UnexpectedToken);
        assert_eq!(error_type("{1} (0)"), ParseMachineErrorType::UnexpectedToken);
        assert_eq!(error_type("[.#(0) {1}"), ParseMachineErrorType::UnexpectedToken);
        assert_eq!(error_type("(0) {1"), ParseMachineErrorType::UnexpectedEnd);
        assert_eq!(error_type("(a) {1}"), ParseMachineErrorType::InvalidToken);
    }

    #[test]
    fn invalid_machine() {
        let result = parse_machine("(0) (2) {1,1}");
        assert!(matches!(result, Err(ParseMachineError::InvalidMachine(_))));
    }

    #[test]
    fn multiple_lines() {
        let s = "(0) {1}\n\n  \n(0,1) {2,2}\n";
        let machines = parse_machines(s).unwrap();
        assert_eq!(machines.len(), 2);
        assert_eq!(machines[1].targets(), &[2, 2]);
    }

    #[test]
    fn error_line() {
        let s = "(0) {1}\n(0) {1\n";
        match parse_machines(s) {
            Err(ParseMachineError::Parse(e)) => assert_eq!(e.line(), Some(2)),
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
