//! `preview` - render both emails without sending them.

use std::io::Write;
use std::path::Path;

use cadoutsource_core::{Email, SubmissionSchema};
use cadoutsource_site::services::email::templates::{notification_email, thank_you_email};
use cadoutsource_site::services::{DispatchError, OutboundEmail};

use super::CommandError;
use super::validate::accept;

/// Addresses used when composing the preview.
#[derive(Debug, Clone)]
pub struct Addresses {
    pub from: Email,
    pub operator: Email,
}

/// Render the notification and thank-you for `raw`.
///
/// With `out_dir`, writes `notification.{html,txt}` and `thank_you.{html,txt}`
/// there; otherwise prints headers and plain-text bodies.
///
/// # Errors
///
/// Returns error if the payload is rejected, a template fails, or output
/// cannot be written.
pub fn run<S: SubmissionSchema>(
    raw: &serde_json::Value,
    addresses: &Addresses,
    out_dir: Option<&Path>,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let submission = accept::<S>(raw, out)?;

    let emails = [
        (
            "notification",
            notification_email(&submission, &addresses.from, &addresses.operator)
                .map_err(DispatchError::from)?,
        ),
        (
            "thank_you",
            thank_you_email(&submission, &addresses.from).map_err(DispatchError::from)?,
        ),
    ];

    for (stem, email) in &emails {
        match out_dir {
            Some(dir) => write_files(dir, stem, email, out)?,
            None => print_email(email, out)?,
        }
    }

    Ok(())
}

fn write_files(
    dir: &Path,
    stem: &str,
    email: &OutboundEmail,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    std::fs::create_dir_all(dir)?;

    for (extension, body) in [("html", &email.html), ("txt", &email.text)] {
        let path = dir.join(format!("{stem}.{extension}"));
        std::fs::write(&path, body)?;
        writeln!(out, "wrote {}", path.display())?;
    }

    Ok(())
}

fn print_email(email: &OutboundEmail, out: &mut impl Write) -> Result<(), CommandError> {
    writeln!(out, "From: {}", email.from)?;
    writeln!(out, "To: {}", email.to.join(", "))?;
    if let Some(reply_to) = &email.reply_to {
        writeln!(out, "Reply-To: {reply_to}")?;
    }
    writeln!(out, "Subject: {}", email.subject)?;
    writeln!(out)?;
    writeln!(out, "{}", email.text.trim_end())?;
    writeln!(out)?;
    Ok(())
}
