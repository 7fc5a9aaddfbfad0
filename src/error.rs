//! Error types

use std::fmt::{Display, Formatter};
use std::{fmt, io};

use thiserror::Error;

use crate::machine::CounterId;

/// A machine description that is structurally invalid
#[derive(Error, Debug)]
#[cfg_attr(test, derive(PartialEq))]
#[error("invalid machine: {}", msg)]
pub struct InvalidMachine {
    msg: String,
}

impl InvalidMachine {
    pub(crate) fn new(msg: String) -> Self {
        Self { msg }
    }
}

/// Attempted to divide by a zero fraction
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("division by zero")]
pub struct DivisionByZero;

/// Failure to find a configuration for a machine
#[derive(Error, Debug, PartialEq)]
pub enum SolveError {
    /// An arithmetic step divided by zero. This indicates a malformed pivot.
    #[error(transparent)]
    DivisionByZero(#[from] DivisionByZero),
    /// The counter targets cannot be reached by any combination of buttons
    #[error("target of counter {counter} is not reachable with the given buttons")]
    InfeasibleTarget {
        /// the counter whose constraint reduced to `0 = rhs` with a non-zero rhs
        counter: CounterId,
    },
    /// No non-negative integer press counts satisfy the targets
    #[error("no non-negative integer configuration reaches the targets")]
    Unsolvable,
}

/// Failure to read machines from a file
#[derive(Error, Debug)]
pub enum MachineFromFileError {
    #[error("error reading machine file")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Parse(#[from] ParseMachineError),
}

#[derive(Debug, Error)]
#[cfg_attr(test, derive(PartialEq))]
pub enum ParseMachineError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    InvalidMachine(#[from] InvalidMachine),
}

pub(crate) const UNEXPECTED_END: ParseError = ParseError::from_type(ParseMachineErrorType::UnexpectedEnd);

#[derive(Debug, Error)]
#[cfg_attr(test, derive(PartialEq))]
pub struct ParseError {
    error_type: ParseMachineErrorType,
    token: Option<String>,
    index: Option<usize>,
    line: Option<usize>,
}

impl ParseError {
    pub(crate) fn new(error_type: ParseMachineErrorType, token: impl Display, index: usize) -> Self {
        Self {
            error_type,
            token: Some(token.to_string()),
            index: Some(index),
            line: None,
        }
    }

    pub(crate) const fn from_type(error_type: ParseMachineErrorType) -> Self {
        Self {
            error_type,
            token: None,
            index: None,
            line: None,
        }
    }

    pub(crate) fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn error_type(&self) -> ParseMachineErrorType {
        self.error_type
    }

    /// The 1-based line number, if parsing a multi-line input
    pub fn line(&self) -> Option<usize> {
        self.line
    }
}

impl ParseMachineError {
    pub(crate) fn at_line(self, line: usize) -> Self {
        match self {
            ParseMachineError::Parse(e) => ParseMachineError::Parse(e.at_line(line)),
            ParseMachineError::InvalidMachine(e) => ParseMachineError::InvalidMachine(InvalidMachine::new(
                format!("{} (line {})", e.msg, line),
            )),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseMachineErrorType {
    InvalidNumber,
    InvalidToken,
    MissingTargets,
    UnexpectedEnd,
    UnexpectedToken,
}

impl Display for ParseMachineErrorType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParseMachineErrorType::InvalidNumber => "Invalid number",
            ParseMachineErrorType::InvalidToken => "Invalid token",
            ParseMachineErrorType::MissingTargets => "Missing joltage targets",
            ParseMachineErrorType::UnexpectedEnd => "Unexpected end",
            ParseMachineErrorType::UnexpectedToken => "Unexpected token",
        };
        write!(f, "{}", s)
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error_type)?;
        if let Some(token) = &self.token {
            write!(f, ": \"{}\"", token)?;
        }
        if let Some(index) = &self.index {
            write!(f, " at {}", index)?;
        }
        if let Some(line) = &self.line {
            write!(f, " on line {}", line)?;
        }
        Ok(())
    }
}

