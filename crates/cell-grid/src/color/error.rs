//! Error type for color parsing.

use std::fmt;
use std::num::ParseIntError;

/// Error type for parsing color strings.
///
/// Returned when a hex string (`#rrggbb`, `#rgb`) or a tuple string
/// (`(r, g, b)`) cannot be turned into an [`Rgb`](crate::Rgb).
#[derive(Debug, Clone, PartialEq)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    InvalidLength,
    /// Character in a hex string that is not `0-9`, `a-f` or `A-F`
    InvalidHexDigit(char),
    /// Invalid decimal component in a tuple string
    InvalidDigit(ParseIntError),
    /// Tuple string is not of the form `(r, g, b)`
    InvalidTuple,
}

impl From<ParseIntError> for ParseColorError {
    fn from(err: ParseIntError) -> Self {
        ParseColorError::InvalidDigit(err)
    }
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::InvalidLength => {
                write!(f, "invalid hex color length (expected 3 or 6 characters)")
            }
            ParseColorError::InvalidHexDigit(c) => {
                write!(f, "invalid hex digit '{}'", c)
            }
            ParseColorError::InvalidDigit(err) => {
                write!(f, "invalid color digit: {}", err)
            }
            ParseColorError::InvalidTuple => {
                write!(f, "invalid color tuple (expected \"(r, g, b)\")")
            }
        }
    }
}

impl std::error::Error for ParseColorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseColorError::InvalidDigit(err) => Some(err),
            _ => None,
        }
    }
}
