//! Subcommand implementations.
//!
//! Each command writes its report to the supplied writer so it can be tested
//! without touching stdout.

pub mod preview;
pub mod validate;

use std::io::Read;
use std::path::Path;

use cadoutsource_core::EmailError;
use cadoutsource_site::config::ConfigError;
use cadoutsource_site::services::{DispatchError, SendError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input is not JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Submission failed validation.
    #[error("Submission has {0} issue(s)")]
    Invalid(usize),

    /// An address argument is not a valid email address.
    #[error("Invalid address: {0}")]
    Address(#[from] EmailError),

    /// Environment configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// `RESEND_API_KEY` and `OFFICIAL_EMAIL` are not set.
    #[error("Email is not configured (set RESEND_API_KEY and OFFICIAL_EMAIL)")]
    EmailNotConfigured,

    /// The provider client could not be built.
    #[error("Provider error: {0}")]
    Provider(#[from] SendError),

    /// Rendering or sending failed.
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
}

/// Read a JSON payload from a file, or from stdin when `path` is `-`.
///
/// # Errors
///
/// Returns error if the input cannot be read or is not JSON.
pub fn read_input(path: &Path) -> Result<serde_json::Value, CommandError> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };

    Ok(serde_json::from_str(&text)?)
}
