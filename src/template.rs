use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{Html, IntoResponse, Response},
};
use std::convert::Infallible;

use crate::routes::AppState;

/// Seconds before the validation page sends the visitor back to the form.
pub const INVALID_REFRESH_SECS: u8 = 7;
/// Seconds before the sent/failed pages send the visitor home.
pub const OUTCOME_REFRESH_SECS: u8 = 5;

/// Site details every page needs, pulled from the app config per request.
pub struct Template {
    pub site_name: String,
    pub home_url: String,
    pub form_url: String,
    pub fallback_email: String,
}

impl Template {
    pub fn render<T: askama::Template>(&self, template: T) -> Response {
        match template.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "Failed to render template");

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to render page",
                )
                    .into_response()
            }
        }
    }

    pub fn invalid(&self, errors: Vec<String>) -> Response {
        self.render(ContactInvalidTemplate {
            site_name: &self.site_name,
            refresh_secs: INVALID_REFRESH_SECS,
            refresh_url: &self.form_url,
            errors,
        })
    }

    pub fn sent(&self) -> Response {
        self.render(ContactSentTemplate {
            site_name: &self.site_name,
            refresh_secs: OUTCOME_REFRESH_SECS,
            refresh_url: &self.home_url,
        })
    }

    pub fn failed(&self) -> Response {
        self.render(ContactFailedTemplate {
            site_name: &self.site_name,
            refresh_secs: OUTCOME_REFRESH_SECS,
            refresh_url: &self.home_url,
            fallback_email: &self.fallback_email,
        })
    }
}

impl FromRequestParts<AppState> for Template {
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let site = &state.config.site;

        Ok(Template {
            site_name: site.name.to_owned(),
            home_url: site.home_url.to_owned(),
            form_url: site.form_url.to_owned(),
            fallback_email: state.config.fallback_email().to_owned(),
        })
    }
}

#[derive(askama::Template)]
#[template(path = "contact-invalid.html")]
pub struct ContactInvalidTemplate<'a> {
    pub site_name: &'a str,
    pub refresh_secs: u8,
    pub refresh_url: &'a str,
    pub errors: Vec<String>,
}

#[derive(askama::Template)]
#[template(path = "contact-sent.html")]
pub struct ContactSentTemplate<'a> {
    pub site_name: &'a str,
    pub refresh_secs: u8,
    pub refresh_url: &'a str,
}

#[derive(askama::Template)]
#[template(path = "contact-failed.html")]
pub struct ContactFailedTemplate<'a> {
    pub site_name: &'a str,
    pub refresh_secs: u8,
    pub refresh_url: &'a str,
    pub fallback_email: &'a str,
}
