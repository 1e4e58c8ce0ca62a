//! Project quote form schema.

use serde::{Deserialize, Serialize};

use super::{Check, FieldSpec, NotificationDetails, SubmissionSchema};
use crate::types::Email;

/// A request for a detailed project quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedProjectSubmission {
    pub name: String,
    pub email: Email,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub project_type: String,
    pub budget: String,
    pub timeline: String,
    pub message: String,
}

const PHONE_MESSAGE: &str = "Please enter a valid phone number";

impl SubmissionSchema for DetailedProjectSubmission {
    const KIND: &'static str = "quote";
    const OPERATOR_DATA_KEY: &'static str = "recieveEmailData";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec {
            name: "name",
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
                    message: PHONE_MESSAGE,
                },
                Check::Pattern {
                    pattern: concat!(r"^[\+]?[0-9", whitespace_class!(), r"\-\(\)]+$"),
                    message: PHONE_MESSAGE,
                },
                // The message under-reports the limit; clients match on it.
                Check::MaxLength {
                    max: 25,
                    message: "Phone number must be less than 20 characters",
                },
            ],
        },
        FieldSpec {
            name: "company",
            required: false,
            checks: &[],
        },
        FieldSpec {
            name: "projectType",
            required: true,
            checks: &[Check::MinLength {
                min: 1,
                message: "Please select a project type",
            }],
        },
        FieldSpec {
            name: "budget",
            required: true,
            checks: &[Check::MinLength {
                min: 1,
                message: "Please select a budget range",
            }],
        },
        FieldSpec {
            name: "timeline",
            required: true,
            checks: &[Check::MinLength {
                min: 1,
                message: "Please select a timeline",
            }],
        },
        FieldSpec {
            name: "message",
            required: true,
            checks: &[
                Check::MinLength {
                    min: 10,
                    message: "Message must be at least 10 characters",
                },
                Check::MaxLength {
                    max: 1000,
                    message: "Message must be less than 1000 characters",
                },
            ],
        },
    ];

    fn display_name(&self) -> &str {
        &self.name
    }

    fn email(&self) -> &Email {
        &self.email
    }

    fn notification(&self) -> NotificationDetails<'_> {
        NotificationDetails {
            name: &self.name,
            email: self.email.as_str(),
            phone: &self.phone,
            company: self.company.as_deref().filter(|c| !c.is_empty()),
            project_type: &self.project_type,
            budget: &self.budget,
            timeline: &self.timeline,
            message: &self.message,
        }
    }
}
