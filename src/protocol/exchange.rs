//! One request, one response.
//!
//! The decisions each side makes around the transport, without the transport:
//! the requesting side validates before anything is encoded, the serving side
//! treats every decoded request as untrusted and checks it again before
//! generating.

use crate::config::UnknownClassPolicy;
use crate::core::packet::{PasswordRequest, PasswordResponse};
use crate::error::{ProtocolError, Result, ValidationError};
use crate::password::validate::{check_class, check_request};
use crate::password::{PasswordClass, PasswordGenerator, PasswordLength, RandomSource};

/// Validate a class/length pair and build the request to send.
///
/// The raw selector and length text are kept as given (`"007"` stays
/// `"007"`), only their validity is checked. The quit selector is refused.
pub fn prepare_request(selector: char, length: &str) -> Result<PasswordRequest> {
    check_request(selector, length)?;
    Ok(PasswordRequest::new(selector, length))
}

/// Check a non-empty reply against the request it answers.
///
/// The password must have the requested length and use only the requested
/// class's characters. A reply that does not is someone else's answer.
pub fn verify_response(request: &PasswordRequest, response: &PasswordResponse) -> Result<()> {
    let class = request
        .class()
        .ok_or(ValidationError::UnknownClass(request.selector))?;
    let length = request.length()?;

    let got = response.password.len();
    if got != length.get() {
        return Err(ProtocolError::MismatchedResponse(format!(
            "expected {} characters, got {got}",
            length.get()
        )));
    }
    if let Some(c) = response.password.chars().find(|&c| !class.contains(c)) {
        return Err(ProtocolError::MismatchedResponse(format!(
            "'{}' is not a {class} character",
            c.escape_default()
        )));
    }
    Ok(())
}

/// What the serving side decided for one decoded request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServeOutcome {
    /// A password was generated
    Generated {
        class: PasswordClass,
        length: PasswordLength,
        password: String,
        /// The selector named no class and Numeric was used in its place
        fallback: bool,
    },
    /// The request failed validation; nothing was generated
    Rejected(ValidationError),
}

impl ServeOutcome {
    /// The response datagram to send back.
    pub fn response(&self) -> PasswordResponse {
        match self {
            ServeOutcome::Generated { password, .. } => PasswordResponse::new(password.as_str()),
            ServeOutcome::Rejected(_) => PasswordResponse::rejection(),
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, ServeOutcome::Rejected(_))
    }
}

/// Map a received selector to a class under `policy`.
///
/// Returns the class and whether the Numeric fallback was applied.
pub fn resolve_class(
    selector: char,
    policy: UnknownClassPolicy,
) -> std::result::Result<(PasswordClass, bool), ValidationError> {
    match PasswordClass::from_selector(selector) {
        Some(class) => Ok((class, false)),
        None => match policy {
            UnknownClassPolicy::Numeric => Ok((PasswordClass::Numeric, true)),
            UnknownClassPolicy::Reject => check_class(selector).map(|class| (class, false)),
        },
    }
}

/// Answer a decoded request.
///
/// The length is always re-validated, so a request that bypassed the
/// requesting side's checks can never ask for more than the response holds.
pub fn serve_request<R: RandomSource>(
    generator: &mut PasswordGenerator<R>,
    policy: UnknownClassPolicy,
    request: &PasswordRequest,
) -> ServeOutcome {
    let (class, fallback) = match resolve_class(request.selector, policy) {
        Ok(resolved) => resolved,
        Err(reason) => return ServeOutcome::Rejected(reason),
    };
    let length = match request.length() {
        Ok(length) => length,
        Err(reason) => return ServeOutcome::Rejected(reason),
    };

    ServeOutcome::Generated {
        class,
        length,
        password: generator.generate(class, length),
        fallback,
    }
}
