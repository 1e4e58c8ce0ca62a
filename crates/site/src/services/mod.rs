//! Business logic services for the site.
//!
//! # Services
//!
//! - `email` - Transactional email provider seam and the Resend client
//! - `dispatch` - Operator notification and submitter thank-you emails

pub mod dispatch;
pub mod email;

pub use dispatch::{DispatchError, DispatchOutcome, Dispatcher};
pub use email::{EmailProvider, OutboundEmail, ProviderError, ResendClient, SendError, SentEmail};
