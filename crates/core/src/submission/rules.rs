//! Field rule descriptors.
//!
//! A schema is a static table of [`FieldSpec`]s. The table is interpreted by
//! [`validate`](super::validate) on the server and serialized verbatim into
//! the form markup, where the browser runs the same checks before submitting.

use std::collections::HashMap;
use std::sync::{LazyLock, Mutex, PoisonError};

use regex::Regex;
use serde::Serialize;

use super::Issue;
use crate::types::Email;

/// A single constraint on a string field.
///
/// Lengths are measured in UTF-16 code units so that counts match the
/// browser's `String.length`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Check {
    /// Value must be at least `min` units long.
    MinLength {
        min: usize,
        message: &'static str,
    },
    /// Value must be at most `max` units long.
    MaxLength {
        max: usize,
        message: &'static str,
    },
    /// Value must match `pattern` (a regular expression that compiles in both
    /// the `regex` crate and JavaScript).
    Pattern {
        pattern: &'static str,
        message: &'static str,
    },
    /// Value must be a valid [`Email`].
    Email { message: &'static str },
}

impl Check {
    /// Returns the check's message if `value` violates it.
    #[must_use]
    pub fn violation(&self, value: &str) -> Option<&'static str> {
        let failed = match *self {
            Self::MinLength { min, .. } => utf16_len(value) < min,
            Self::MaxLength { max, .. } => utf16_len(value) > max,
            Self::Pattern { pattern, .. } => !compiled(pattern).is_match(value),
            Self::Email { .. } => Email::parse(value).is_err(),
        };

        failed.then_some(self.message())
    }

    /// The human-readable message reported when this check fails.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match *self {
            Self::MinLength { message, .. }
            | Self::MaxLength { message, .. }
            | Self::Pattern { message, .. }
            | Self::Email { message } => message,
        }
    }
}

/// Validation rules for one field of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    /// Wire name of the field (camelCase JSON key).
    pub name: &'static str,
    /// Whether the key must be present.
    pub required: bool,
    /// Checks, in the order their issues are reported.
    pub checks: &'static [Check],
}

impl FieldSpec {
    /// Run every check against `value`, appending one issue per failure.
    ///
    /// Does not stop at the first failing check.
    pub fn check(&self, value: &str, issues: &mut Vec<Issue>) {
        issues.extend(
            self.checks
                .iter()
                .filter_map(|check| check.violation(value))
                .map(|message| Issue::new(self.name, message)),
        );
    }

    /// The field's checks as JSON, for embedding in form markup.
    #[must_use]
    pub fn rules_json(&self) -> String {
        serde_json::to_string(self.checks).unwrap_or_else(|_| "[]".to_string())
    }
}

fn utf16_len(value: &str) -> usize {
    value.encode_utf16().count()
}

/// Compile a descriptor pattern once and reuse it across requests.
fn compiled(pattern: &'static str) -> Regex {
    static CACHE: LazyLock<Mutex<HashMap<&'static str, Regex>>> =
        LazyLock::new(|| Mutex::new(HashMap::new()));

    let mut cache = CACHE.lock().unwrap_or_else(PoisonError::into_inner);
    cache
        .entry(pattern)
        .or_insert_with(|| Regex::new(pattern).expect("Invalid regex"))
        .clone()
}
