//! Validated email address value object.

use crate::validation::ValidationError;
use regex_lite::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Longest address accepted, in characters.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Restricted-ASCII subset of the RFC 5322 `addr-spec` grammar. Matched case-insensitively.
const EMAIL_PATTERN: &str = r"(?i)\A(?:[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?)\z";

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"))
}

/// An email address that passed validation.
///
/// The only way to obtain one is [`Email::create`] (or `str::parse`). Equality
/// and hashing use the full address string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Email {
    address: String,
    at: usize,
}

impl Email {
    /// Validate `value` and wrap it.
    ///
    /// Checks run in this order: length over [`MAX_EMAIL_LENGTH`], empty or
    /// whitespace-only, then the address pattern.
    pub fn create(value: &str) -> Result<Self, ValidationError> {
        if value.chars().count() > MAX_EMAIL_LENGTH {
            return Err(ValidationError::EmailTooLong {
                max: MAX_EMAIL_LENGTH,
            });
        }
        if value.trim().is_empty() {
            return Err(ValidationError::EmptyEmail);
        }
        if !email_regex().is_match(value) {
            return Err(ValidationError::InvalidEmailFormat);
        }

        // The pattern admits exactly one '@'.
        let at = value.find('@').ok_or(ValidationError::InvalidEmailFormat)?;
        Ok(Self {
            address: value.to_string(),
            at,
        })
    }

    /// The full address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Everything before the `@`.
    #[must_use]
    pub fn local_part(&self) -> &str {
        &self.address[..self.at]
    }

    /// Everything after the `@`.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.address[self.at + 1..]
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.address
    }
}

impl FromStr for Email {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::create(s)
    }
}

impl TryFrom<&str> for Email {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::create(value)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.address
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}
