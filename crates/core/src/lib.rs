//! CadOutSource Core - Contact submission types and validation.
//!
//! This crate provides the types shared by every CadOutSource component:
//! - `site` - Public marketing site and contact API
//! - `cli` - Command-line tools for validating and previewing submissions
//!
//! # Architecture
//!
//! The core crate contains only types, schema descriptors and pure
//! validation - no I/O, no HTTP clients, no templates. The same descriptor
//! tables drive server-side validation and the rules shipped to the browser,
//! so both sides always agree.
//!
//! # Modules
//!
//! - [`types`] - Validated newtypes (email addresses)
//! - [`submission`] - Submission schemas, validation and issue reporting

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod submission;
pub mod types;

pub use submission::{
    Check, DetailedProjectSubmission, FieldSpec, Issue, NotificationDetails,
    QuickServiceSubmission, SubmissionSchema, ValidationError, validate,
};
pub use types::*;
