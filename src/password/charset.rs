//! Character sets for each password class.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const DIGITS: &[u8] = b"0123456789";
pub const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
pub const SECURE: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()";
pub const UNAMBIGUOUS: &[u8] = b"abcdefghjkmnpqrtuvwxyACDEFGHJKLMNPQRTUVWXY34679!@#$%^&*()";

/// Characters dropped from the secure alphabet to build the unambiguous one.
pub const AMBIGUOUS: &[u8] = b"0Oo1lIi2Zz5Ss8B";

/// Selector that ends a client session; it is never a password class.
pub const QUIT_SELECTOR: char = 'q';

/// Selector that asks the client for its help text.
pub const HELP_SELECTOR: char = 'h';

/// The kind of password a peer can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordClass {
    /// Digits only
    Numeric,
    /// Lowercase letters only
    Alpha,
    /// Lowercase letters and digits, picked half and half per position
    Mixed,
    /// Both letter cases, digits and `!@#$%^&*()`
    Secure,
    /// [`Secure`](PasswordClass::Secure) without look-alike characters
    Unambiguous,
}

impl PasswordClass {
    pub const ALL: [PasswordClass; 5] = [
        PasswordClass::Numeric,
        PasswordClass::Alpha,
        PasswordClass::Mixed,
        PasswordClass::Secure,
        PasswordClass::Unambiguous,
    ];

    /// Map a wire selector to its class, ignoring ASCII case.
    pub fn from_selector(selector: char) -> Option<Self> {
        match selector.to_ascii_lowercase() {
            'n' => Some(PasswordClass::Numeric),
            'a' => Some(PasswordClass::Alpha),
            'm' => Some(PasswordClass::Mixed),
            's' => Some(PasswordClass::Secure),
            'u' => Some(PasswordClass::Unambiguous),
            _ => None,
        }
    }

    /// Lowercase selector sent on the wire for this class
    pub const fn selector(self) -> char {
        match self {
            PasswordClass::Numeric => 'n',
            PasswordClass::Alpha => 'a',
            PasswordClass::Mixed => 'm',
            PasswordClass::Secure => 's',
            PasswordClass::Unambiguous => 'u',
        }
    }

    /// Every character a password of this class may contain.
    ///
    /// For [`Mixed`](PasswordClass::Mixed) this is the union of letters and
    /// digits; the generator does not draw from it uniformly, see
    /// [`PasswordGenerator`](super::PasswordGenerator).
    pub fn charset(self) -> &'static [u8] {
        match self {
            PasswordClass::Numeric => DIGITS,
            PasswordClass::Alpha => LOWERCASE,
            PasswordClass::Mixed => b"abcdefghijklmnopqrstuvwxyz0123456789",
            PasswordClass::Secure => SECURE,
            PasswordClass::Unambiguous => UNAMBIGUOUS,
        }
    }

    pub fn contains(self, c: char) -> bool {
        c.is_ascii() && self.charset().contains(&(c as u8))
    }

    pub const fn name(self) -> &'static str {
        match self {
            PasswordClass::Numeric => "numeric",
            PasswordClass::Alpha => "alpha",
            PasswordClass::Mixed => "mixed",
            PasswordClass::Secure => "secure",
            PasswordClass::Unambiguous => "unambiguous",
        }
    }

    /// One-line description used in the client help text
    pub const fn describe(self) -> &'static str {
        match self {
            PasswordClass::Numeric => "numeric password (digits only)",
            PasswordClass::Alpha => "alphabetic password (lowercase letters only)",
            PasswordClass::Mixed => "mixed password (lowercase letters and digits)",
            PasswordClass::Secure => {
                "secure password (upper and lowercase letters, digits, symbols)"
            }
            PasswordClass::Unambiguous => "secure password without look-alike characters",
        }
    }
}

impl fmt::Display for PasswordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<char> for PasswordClass {
    type Error = ValidationError;

    fn try_from(selector: char) -> Result<Self, Self::Error> {
        Self::from_selector(selector).ok_or(ValidationError::UnknownClass(selector))
    }
}

impl FromStr for PasswordClass {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => c.try_into(),
            _ => PasswordClass::ALL
                .into_iter()
                .find(|class| class.name().eq_ignore_ascii_case(s))
                .ok_or(ValidationError::UnknownClass(s.chars().next().unwrap_or('\0'))),
        }
    }
}
