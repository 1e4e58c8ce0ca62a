//! Quick message form schema.

use serde::{Deserialize, Serialize};

use super::{Check, FieldSpec, NOT_SPECIFIED, NotificationDetails, SubmissionSchema};
use crate::types::Email;

/// A short enquiry about one service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickServiceSubmission {
    pub full_name: String,
    pub email: Email,
    pub phone: String,
    pub service: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SubmissionSchema for QuickServiceSubmission {
    const KIND: &'static str = "message";
    const OPERATOR_DATA_KEY: &'static str = "receiveEmailData";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec {
            name: "fullName",
            required: true,
            checks: &[
                Check::MinLength {
                    min: 2,
                    message: "Name must be at least 2 characters",
                },
                Check::MaxLength {
                    max: 50,
                    message: "Name must be less than 50 characters",
                },
                Check::Pattern {
                    pattern: concat!(r"^[a-zA-Z", whitespace_class!(), r"]+$"),
                    message: "Name can only contain letters and spaces",
                },
            ],
        },
        FieldSpec {
            name: "email",
            required: true,
            checks: &[Check::Email {
                message: "Please enter a valid email address",
            }],
        },
        FieldSpec {
            name: "phone",
            required: true,
            checks: &[
                Check::MinLength {
                    min: 10,
                    message: "Phone number must be at least 10 digits",
                },
                Check::MaxLength {
                    max: 25,
                    message: "Phone number must be less than 15 digits",
                },
                Check::Pattern {
                    pattern: concat!(r"^[0-9+\-()", whitespace_class!(), r"]+$"),
                    message: "Phone number can only contain digits, +, -, (, ) and spaces",
                },
            ],
        },
        FieldSpec {
            name: "service",
            required: true,
            checks: &[Check::MinLength {
                min: 1,
                message: "Please select a service",
            }],
        },
        FieldSpec {
            name: "message",
            required: false,
            checks: &[Check::MaxLength {
                max: 500,
                message: "Message must be less than 500 characters",
            }],
        },
    ];

    fn display_name(&self) -> &str {
        &self.full_name
    }

    fn email(&self) -> &Email {
        &self.email
    }

    fn notification(&self) -> NotificationDetails<'_> {
        NotificationDetails {
            name: &self.full_name,
            email: self.email.as_str(),
            phone: &self.phone,
            company: None,
            project_type: &self.service,
            budget: NOT_SPECIFIED,
            timeline: NOT_SPECIFIED,
            message: self
                .message
                .as_deref()
                .filter(|m| !m.is_empty())
                .unwrap_or("No message provided"),
        }
    }
}
