//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::SiteConfig;
use crate::services::{Dispatcher, SendError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and is never mutated after
/// startup.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    dispatcher: Option<Dispatcher>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Builds a Resend-backed dispatcher when email is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the Resend client cannot be built.
    pub fn new(config: SiteConfig) -> Result<Self, SendError> {
        let dispatcher = config
            .dispatch
            .as_ref()
            .map(|dispatch| Dispatcher::resend(dispatch, &config.resend_api_url))
            .transpose()?;

        Ok(Self::with_dispatcher(config, dispatcher))
    }

    /// Create application state around an existing dispatcher.
    #[must_use]
    pub fn with_dispatcher(config: SiteConfig, dispatcher: Option<Dispatcher>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, dispatcher }),
        }
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get the notification dispatcher, if email is configured.
    #[must_use]
    pub fn dispatcher(&self) -> Option<&Dispatcher> {
        self.inner.dispatcher.as_ref()
    }
}
