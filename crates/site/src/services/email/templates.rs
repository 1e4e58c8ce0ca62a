//! Email composition with Askama HTML and plain-text templates.

use askama::Template;
use cadoutsource_core::{Email, NotificationDetails, SubmissionSchema};

use super::OutboundEmail;

/// Display name on every outgoing email.
pub const SENDER_NAME: &str = "CadOutSource";

/// Subject of the email sent back to the submitter.
pub const THANK_YOU_SUBJECT: &str = "Thank you for contacting us!";

/// HTML template for the operator notification.
#[derive(Template)]
#[template(path = "email/contact_notification.html")]
struct NotificationEmailHtml<'a> {
    details: NotificationDetails<'a>,
}

/// Plain text template for the operator notification.
#[derive(Template)]
#[template(path = "email/contact_notification.txt")]
struct NotificationEmailText<'a> {
    details: NotificationDetails<'a>,
}

/// HTML template for the submitter thank-you.
#[derive(Template)]
#[template(path = "email/thank_you.html")]
struct ThankYouEmailHtml<'a> {
    name: &'a str,
}

/// Plain text template for the submitter thank-you.
#[derive(Template)]
#[template(path = "email/thank_you.txt")]
struct ThankYouEmailText<'a> {
    name: &'a str,
}

/// Format a sender mailbox.
fn sender(from: &Email) -> String {
    format!("{SENDER_NAME} <{from}>")
}

/// Compose the notification sent to the operator.
///
/// Replies go straight to the submitter.
///
/// # Errors
///
/// Returns error if a template fails to render.
pub fn notification_email<S: SubmissionSchema>(
    submission: &S,
    from: &Email,
    operator: &Email,
) -> askama::Result<OutboundEmail> {
    let details = submission.notification();

    Ok(OutboundEmail {
        from: sender(from),
        to: vec![operator.to_string()],
        subject: format!(
            "New Contact Form Submission from {}",
            submission.display_name()
        ),
        html: NotificationEmailHtml { details }.render()?,
        text: NotificationEmailText { details }.render()?,
        reply_to: Some(submission.email().to_string()),
    })
}

/// Compose the acknowledgment sent to the submitter.
///
/// # Errors
///
/// Returns error if a template fails to render.
pub fn thank_you_email<S: SubmissionSchema>(
    submission: &S,
    from: &Email,
) -> askama::Result<OutboundEmail> {
    let name = submission.display_name();

    Ok(OutboundEmail {
        from: sender(from),
        to: vec![submission.email().to_string()],
        subject: THANK_YOU_SUBJECT.to_string(),
        html: ThankYouEmailHtml { name }.render()?,
        text: ThankYouEmailText { name }.render()?,
        reply_to: None,
    })
}
