//! Bounded password length.
//!
//! Lengths travel on the wire as free-form decimal text. The only way to get a
//! [`PasswordLength`] is through [`PasswordLength::parse`] (or [`PasswordLength::new`]),
//! so the generator never sees a value outside `MIN..=MAX`.

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Shortest password the protocol will generate
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Longest password the protocol will generate; also the response buffer size minus the NUL
pub const MAX_PASSWORD_LENGTH: usize = 32;

/// Length used by the client when the user gives only a class
pub const DEFAULT_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PasswordLength(usize);

impl PasswordLength {
    pub const MIN: PasswordLength = PasswordLength(MIN_PASSWORD_LENGTH);
    pub const MAX: PasswordLength = PasswordLength(MAX_PASSWORD_LENGTH);
    pub const DEFAULT: PasswordLength = PasswordLength(DEFAULT_PASSWORD_LENGTH);

    pub fn new(value: usize) -> Option<Self> {
        (MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH)
            .contains(&value)
            .then_some(Self(value))
    }

    /// Parse the textual length carried by a request.
    ///
    /// The text must be non-empty and made only of ASCII digits. Leading zeros
    /// are allowed (`"007"` is 7). Digit strings too large for `usize` are
    /// reported as out of range rather than wrapping.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        if text.is_empty() {
            return Err(ValidationError::EmptyLength);
        }
        if !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::NonDigitLength(text.to_string()));
        }

        let out_of_range = || ValidationError::LengthOutOfRange {
            text: text.to_string(),
            min: MIN_PASSWORD_LENGTH,
            max: MAX_PASSWORD_LENGTH,
        };

        let value = text.parse::<usize>().map_err(|_| out_of_range())?;
        Self::new(value).ok_or_else(out_of_range)
    }

    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for PasswordLength {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for PasswordLength {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<usize> for PasswordLength {
    type Error = ValidationError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(ValidationError::LengthOutOfRange {
            text: value.to_string(),
            min: MIN_PASSWORD_LENGTH,
            max: MAX_PASSWORD_LENGTH,
        })
    }
}

impl From<PasswordLength> for usize {
    fn from(len: PasswordLength) -> usize {
        len.0
    }
}

impl fmt::Display for PasswordLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
