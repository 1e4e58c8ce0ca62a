//! Email address type.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Address shape accepted by the contact forms.
///
/// The browser validator additionally rejects a leading `.` and any `..`
/// through lookaheads, which the `regex` crate does not support; those two
/// rules are checked separately in [`Email::parse`].
static ADDRESS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-\.]*[A-Za-z0-9_+-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("Invalid regex")
});

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input string is empty.
    #[error("email cannot be empty")]
    Empty,
    /// The input starts with a dot.
    #[error("email cannot start with a dot")]
    LeadingDot,
    /// The input contains two consecutive dots.
    #[error("email cannot contain consecutive dots")]
    ConsecutiveDots,
    /// The input does not match the address grammar.
    #[error("email is not a valid address")]
    Malformed,
}

/// An email address.
///
/// ## Constraints
///
/// - Non-empty; no upper length limit beyond the field's own checks
/// - Must not start with `.` or contain `..`
/// - Local part: `[A-Za-z0-9_'+-.]`, ending in a non-dot, non-quote character
/// - Domain: one or more dot-separated labels followed by a 2+ letter TLD
///
/// ## Examples
///
/// ```
/// use cadoutsource_core::Email;
///
/// assert!(Email::parse("jo@x.com").is_ok());
/// assert!(Email::parse("first.last+tag@mail.example.co.uk").is_ok());
///
/// assert!(Email::parse("").is_err());
/// assert!(Email::parse("no-at-symbol").is_err());
/// assert!(Email::parse("user@localhost").is_err()); // no TLD
/// assert!(Email::parse("a..b@example.com").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Parse an `Email` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or does not match the address
    /// grammar.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        if s.is_empty() {
            return Err(EmailError::Empty);
        }

        if s.starts_with('.') {
            return Err(EmailError::LeadingDot);
        }

        if s.contains("..") {
            return Err(EmailError::ConsecutiveDots);
        }

        if !ADDRESS_PATTERN.is_match(s) {
            return Err(EmailError::Malformed);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
