//! Page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::filters;
use crate::forms::{self, FormView, SERVICES, SelectOption};
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub canonical_url: String,
    pub form: FormView,
    pub services: &'static [SelectOption],
}

/// Project quote page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/contact.html")]
pub struct ContactTemplate {
    pub canonical_url: String,
    pub form: FormView,
}

/// Acknowledgment page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/thank_you.html")]
pub struct ThankYouTemplate {
    pub canonical_url: String,
}

/// Query parameters for the acknowledgment page.
#[derive(Debug, Deserialize)]
pub struct ThankYouQuery {
    pub token: Option<String>,
}

/// Absolute URL of a page on the public site.
fn canonical(state: &AppState, path: &str) -> String {
    state
        .config()
        .base_url
        .join(path)
        .map_or_else(|_| path.to_string(), String::from)
}

/// Display the home page with the quick message form.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    HomeTemplate {
        canonical_url: canonical(&state, "/"),
        form: forms::message_form(&state.config().thank_you_token),
        services: SERVICES,
    }
}

/// Display the project quote form.
#[instrument(skip(state))]
pub async fn contact(State(state): State<AppState>) -> impl IntoResponse {
    ContactTemplate {
        canonical_url: canonical(&state, "/contact"),
        form: forms::quote_form(&state.config().thank_you_token),
    }
}

/// Display the acknowledgment page.
///
/// Visitors without the current token are sent home.
#[instrument(skip(state, query))]
pub async fn thank_you(
    State(state): State<AppState>,
    Query(query): Query<ThankYouQuery>,
) -> Response {
    if query.token.as_deref() == Some(state.config().thank_you_token.as_str()) {
        ThankYouTemplate {
            canonical_url: canonical(&state, "/thankyou"),
        }
        .into_response()
    } else {
        tracing::debug!("Acknowledgment page requested without a valid token");
        Redirect::to("/").into_response()
    }
}
