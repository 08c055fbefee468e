//! Request validation.
//!
//! Pure predicates over the raw user/wire values, plus `check_*` variants that
//! say why a value was refused. The requesting side runs them before anything
//! is encoded; the serving side runs them again after decoding.

use super::charset::{PasswordClass, QUIT_SELECTOR};
use super::length::PasswordLength;
use crate::error::ValidationError;

/// `true` when `selector` names a password class, ignoring ASCII case.
pub fn validate_class(selector: char) -> bool {
    PasswordClass::from_selector(selector).is_some()
}

/// `true` when `text` is a non-empty run of decimal digits whose value is in `6..=32`.
pub fn validate_length(text: &str) -> bool {
    PasswordLength::parse(text).is_ok()
}

/// `true` for the local stop selector (`q` or `Q`).
pub fn is_quit(selector: char) -> bool {
    selector.eq_ignore_ascii_case(&QUIT_SELECTOR)
}

pub fn check_class(selector: char) -> Result<PasswordClass, ValidationError> {
    if is_quit(selector) {
        return Err(ValidationError::QuitSentinel);
    }
    PasswordClass::try_from(selector)
}

pub fn check_length(text: &str) -> Result<PasswordLength, ValidationError> {
    PasswordLength::parse(text)
}

/// Validate a whole request, class first.
pub fn check_request(
    selector: char,
    length: &str,
) -> Result<(PasswordClass, PasswordLength), ValidationError> {
    let class = check_class(selector)?;
    let length = check_length(length)?;
    Ok((class, length))
}
