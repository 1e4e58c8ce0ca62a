//! `validate` - check a payload against a form's rules.

use std::io::Write;

use cadoutsource_core::{SubmissionSchema, validate};

use super::CommandError;

/// Validate `raw` as form `S`, reporting issues to `out`.
///
/// # Errors
///
/// Returns [`CommandError::Invalid`] after printing the issues if the payload
/// is rejected.
pub fn accept<S: SubmissionSchema>(
    raw: &serde_json::Value,
    out: &mut impl Write,
) -> Result<S, CommandError> {
    validate::<S>(raw).or_else(|err| {
        writeln!(out, "{} form rejected:", S::KIND)?;
        for issue in &err.issues {
            let field = if issue.field.is_empty() {
                "(root)"
            } else {
                issue.field.as_str()
            };
            writeln!(out, "  {field}: {}", issue.message)?;
        }
        Err(CommandError::Invalid(err.issues.len()))
    })
}

/// Print the accepted submission as JSON, or its issues.
///
/// # Errors
///
/// Returns error if the payload is rejected or output fails.
pub fn run<S: SubmissionSchema>(
    raw: &serde_json::Value,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let submission = accept::<S>(raw, out)?;
    writeln!(out, "{}", serde_json::to_string_pretty(&submission)?)?;
    Ok(())
}
