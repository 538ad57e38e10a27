//! Rule parsing and evaluation errors.

use std::fmt;

use thiserror::Error;

/// Result type for rule text parsing.
pub type ParseResult<T> = Result<T, ParseError>;

/// An error that occurred while parsing rule text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Error kind.
    pub kind: ParseErrorKind,
    /// The token that was rejected.
    pub token: String,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(kind: ParseErrorKind, token: impl Into<String>) -> Self {
        Self {
            kind,
            token: token.into(),
        }
    }

    /// Creates an unknown rule kind error.
    #[must_use]
    pub fn unknown_kind(token: &str) -> Self {
        Self::new(ParseErrorKind::UnknownKind, token)
    }

    /// Creates a missing parameter error for the given rule kind.
    #[must_use]
    pub fn missing_parameter(kind: &str) -> Self {
        Self::new(ParseErrorKind::MissingParameter, kind)
    }

    /// Creates a not-a-number error.
    #[must_use]
    pub fn not_a_number(token: &str) -> Self {
        Self::new(ParseErrorKind::NotANumber, token)
    }

    /// Creates an out-of-range error.
    #[must_use]
    pub fn out_of_range(token: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::OutOfRange, token)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:?}", self.kind, self.token)
    }
}

impl std::error::Error for ParseError {}

/// Parse error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// First token is not one of `y`, `d`, `w`, `m`.
    UnknownKind,
    /// A `d`, `w` or `m` rule without its parameter token.
    MissingParameter,
    /// A parameter that is not an integer.
    NotANumber,
    /// An integer outside the range allowed for its position.
    OutOfRange,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKind => write!(f, "unknown rule kind"),
            Self::MissingParameter => write!(f, "missing rule parameter"),
            Self::NotANumber => write!(f, "not a number"),
            Self::OutOfRange => write!(f, "value out of range"),
        }
    }
}

/// Errors produced while evaluating a rule against dates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("invalid repeat rule: {0}")]
    Parse(#[from] ParseError),

    #[error("invalid date {0:?}, expected YYYYMMDD")]
    InvalidDateFormat(String),

    #[error("no matching date within {limit} days")]
    SearchExhausted { limit: u32 },

    #[error("date is outside the supported calendar range")]
    DateOverflow,
}

pub type RuleResult<T> = std::result::Result<T, RuleError>;
