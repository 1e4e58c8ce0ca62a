//! Contact form submissions.
//!
//! Two schema variants exist, one per form on the site:
//!
//! - [`DetailedProjectSubmission`] - the full project quote form
//! - [`QuickServiceSubmission`] - the short "send us a message" form
//!
//! Both are validated by the same [`validate`] function, driven by the
//! variant's [`FieldSpec`] table. Validation is all-or-nothing: every
//! violated constraint is reported in one pass, and a payload with any issue
//! never becomes a submission.

/// ECMAScript `\s`, spelled out.
///
/// The `regex` crate's `\s` matches U+0085 and not U+FEFF; browsers do the
/// opposite. Patterns use this class so both engines agree.
macro_rules! whitespace_class {
    () => {
        r"\t\n\v\f\r \u{00A0}\u{1680}\u{2000}-\u{200A}\u{2028}\u{2029}\u{202F}\u{205F}\u{3000}\u{FEFF}"
    };
}

mod detailed;
mod quick;
pub mod rules;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use detailed::DetailedProjectSubmission;
pub use quick::QuickServiceSubmission;
pub use rules::{Check, FieldSpec};

use crate::types::Email;

/// A single validation failure: a dotted field path and a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub field: String,
    pub message: String,
}

impl Issue {
    /// Create an issue for `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A rejected payload, with every issue found.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("validation failed with {} issue(s)", issues.len())]
pub struct ValidationError {
    pub issues: Vec<Issue>,
}

impl ValidationError {
    /// Whether any issue concerns `field`.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }
}

/// The fields rendered into the operator notification email.
///
/// Every variant maps onto this shape; fields a variant does not collect are
/// filled with placeholder text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationDetails<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    /// Only shown when the submitter gave one.
    pub company: Option<&'a str>,
    pub project_type: &'a str,
    pub budget: &'a str,
    pub timeline: &'a str,
    pub message: &'a str,
}

/// Placeholder for notification fields a variant does not collect.
pub const NOT_SPECIFIED: &str = "Not specified";

/// A contact form schema variant.
pub trait SubmissionSchema: DeserializeOwned + Serialize + Send + Sync + 'static {
    /// Short identifier used in logs and on the command line.
    const KIND: &'static str;

    /// Key under which the operator notification result appears in the
    /// success envelope. The two routes historically spell it differently
    /// and existing clients read the key they were built against.
    const OPERATOR_DATA_KEY: &'static str;

    /// Field rules, in reporting order.
    const FIELDS: &'static [FieldSpec];

    /// Name used to address the submitter.
    fn display_name(&self) -> &str;

    /// The submitter's address, used for the thank-you email.
    fn email(&self) -> &Email;

    /// Fields for the operator notification.
    fn notification(&self) -> NotificationDetails<'_>;

    /// Look up the rules for a field by wire name.
    #[must_use]
    fn field(name: &str) -> Option<&'static FieldSpec> {
        Self::FIELDS.iter().find(|field| field.name == name)
    }
}

/// Validate an arbitrary JSON value against schema `S`.
///
/// Unknown keys are dropped. Accepted values are kept exactly as sent.
///
/// # Errors
///
/// Returns a [`ValidationError`] listing every violated constraint, in
/// field order and then check order.
pub fn validate<S: SubmissionSchema>(raw: &Value) -> Result<S, ValidationError> {
    let Some(object) = raw.as_object() else {
        return Err(ValidationError {
            issues: vec![Issue::new(
                "",
                format!("Invalid input: expected object, received {}", type_name(raw)),
            )],
        });
    };

    let mut issues = Vec::new();
    let mut accepted = Map::new();

    for field in S::FIELDS {
        match object.get(field.name) {
            None if field.required => issues.push(Issue::new(
                field.name,
                "Invalid input: expected string, received undefined",
            )),
            None => {}
            Some(Value::String(value)) => {
                field.check(value, &mut issues);
                accepted.insert(field.name.to_string(), Value::String(value.clone()));
            }
            Some(other) => issues.push(Issue::new(
                field.name,
                format!("Invalid input: expected string, received {}", type_name(other)),
            )),
        }
    }

    if !issues.is_empty() {
        return Err(ValidationError { issues });
    }

    serde_json::from_value(Value::Object(accepted)).map_err(|e| ValidationError {
        issues: vec![Issue::new("", e.to_string())],
    })
}

/// JSON type name as reported in type-mismatch issues.
const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
