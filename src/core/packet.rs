use crate::error::{constants, ProtocolError, Result};
use crate::password::{PasswordClass, PasswordLength};

use super::{LENGTH_FIELD_SIZE, PASSWORD_FIELD_SIZE, REQUEST_SIZE, RESPONSE_SIZE};

/// Password generation request
///
/// # Format
///
/// ```plain
///  0               1                                            1024
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |   Selector    |  Length text (ASCII digits)  |NUL|  padding   |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// The record holds the raw values as they travel; it is not validated.
/// Use [`PasswordRequest::class`] and [`PasswordRequest::length`] to read it
/// as typed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordRequest {
    /// Class selector character (`n`, `a`, `m`, `s`, `u`, any case)
    pub selector: char,
    /// Decimal length text
    pub length: String,
}

impl PasswordRequest {
    pub fn new(selector: char, length: impl Into<String>) -> Self {
        Self {
            selector,
            length: length.into(),
        }
    }

    /// Build a request from already-typed values.
    pub fn typed(class: PasswordClass, length: PasswordLength) -> Self {
        Self::new(class.selector(), length.get().to_string())
    }

    pub fn class(&self) -> Option<PasswordClass> {
        PasswordClass::from_selector(self.selector)
    }

    pub fn length(&self) -> std::result::Result<PasswordLength, crate::error::ValidationError> {
        PasswordLength::parse(&self.length)
    }

    /// Encode into the fixed request layout.
    pub fn to_bytes(&self) -> Result<[u8; REQUEST_SIZE]> {
        if !self.selector.is_ascii() {
            return Err(ProtocolError::InvalidEncoding(
                constants::ERR_NON_ASCII_SELECTOR,
            ));
        }
        let mut bytes = [0u8; REQUEST_SIZE];
        bytes[0] = self.selector as u8;
        write_text("length", self.length.as_bytes(), &mut bytes[1..])?;
        Ok(bytes)
    }

    /// Decode a request datagram, which must be exactly [`REQUEST_SIZE`] bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes = exact::<REQUEST_SIZE>(bytes)?;
        let length = read_text(&bytes[1..1 + LENGTH_FIELD_SIZE]);
        Ok(Self {
            selector: bytes[0] as char,
            length: String::from_utf8_lossy(length).into_owned(),
        })
    }
}

/// Generated password reply
///
/// # Format
///
/// ```plain
///  0                                                             32
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |  Password (ASCII, 0..=32 chars)  |NUL|        padding           |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// An empty password means the server refused the request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PasswordResponse {
    pub password: String,
}

impl PasswordResponse {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }

    /// The reply sent for a request the server would not serve
    pub fn rejection() -> Self {
        Self::default()
    }

    pub fn is_rejection(&self) -> bool {
        self.password.is_empty()
    }

    /// Encode into the fixed response layout.
    pub fn to_bytes(&self) -> Result<[u8; RESPONSE_SIZE]> {
        if !self.password.is_ascii() {
            return Err(ProtocolError::InvalidEncoding(
                constants::ERR_NON_ASCII_PASSWORD,
            ));
        }
        let mut bytes = [0u8; RESPONSE_SIZE];
        write_text("password", self.password.as_bytes(), &mut bytes)?;
        Ok(bytes)
    }

    /// Decode a response datagram, which must be exactly [`RESPONSE_SIZE`] bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes = exact::<RESPONSE_SIZE>(bytes)?;
        let password = read_text(&bytes[..PASSWORD_FIELD_SIZE]);
        let password = std::str::from_utf8(password)
            .ok()
            .filter(|p| p.is_ascii())
            .ok_or(ProtocolError::InvalidEncoding(
                constants::ERR_NON_ASCII_PASSWORD,
            ))?;
        Ok(Self::new(password))
    }
}

fn exact<const N: usize>(bytes: &[u8]) -> Result<&[u8; N]> {
    bytes
        .try_into()
        .map_err(|_| ProtocolError::MalformedMessage {
            expected: N,
            actual: bytes.len(),
        })
}

/// Copy `text` into `field` followed by a NUL; the rest of `field` stays zeroed.
fn write_text(name: &'static str, text: &[u8], field: &mut [u8]) -> Result<()> {
    if text.contains(&0) {
        return Err(ProtocolError::InvalidEncoding(constants::ERR_EMBEDDED_NUL));
    }
    if text.len() >= field.len() {
        return Err(ProtocolError::FieldOverflow {
            field: name,
            len: text.len(),
            capacity: field.len() - 1,
        });
    }
    field[..text.len()].copy_from_slice(text);
    field[text.len()] = 0;
    Ok(())
}

/// Text up to the first NUL, or the whole field when no terminator is present.
fn read_text(field: &[u8]) -> &[u8] {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    &field[..end]
}
