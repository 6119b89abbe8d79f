use axum::{
    extract::{Form, FromRequest, Multipart, Request, State, multipart::MultipartError},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use contact_relay_form::{ContactForm, ENQUIRY_TOO_LONG, Screening, Submission};
use contact_relay_notification::{OutgoingEmail, Recipient};
use std::convert::Infallible;

use crate::{config::Config, routes::AppState, template::Template};

/// Posted contact form, read from either an urlencoded or a multipart body.
///
/// Never rejects: a body that can't be read yields an empty form, which then
/// fails validation like any other incomplete submission. Repeated fields keep
/// their last value.
pub enum ContactInput {
    Posted(ContactForm),
    /// Body went over [`MAX_BODY_BYTES`](crate::routes::MAX_BODY_BYTES), so no
    /// field could be read.
    Oversized,
}

impl<S> FromRequest<S> for ContactInput
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(is_multipart_form);

        let result = if is_multipart {
            match Multipart::from_request(req, state).await {
                Ok(multipart) => read_multipart(multipart)
                    .await
                    .map_err(|err| (err.status(), err.body_text())),
                Err(rejection) => Err((rejection.status(), rejection.body_text())),
            }
        } else {
            Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map(|Form(pairs)| pairs.into_iter().collect())
                .map_err(|rejection| (rejection.status(), rejection.body_text()))
        };

        Ok(match result {
            Ok(form) => Self::Posted(form),
            Err((StatusCode::PAYLOAD_TOO_LARGE, _)) => Self::Oversized,
            Err((status, reason)) => {
                tracing::debug!(%status, reason = %reason, "Unreadable form body");
                Self::Posted(ContactForm::default())
            }
        })
    }
}

fn is_multipart_form(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("multipart/form-data"))
}

async fn read_multipart(mut multipart: Multipart) -> Result<ContactForm, MultipartError> {
    let mut form = ContactForm::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name() else {
            continue;
        };
        let Some(slot) = form.field_mut(name) else {
            continue;
        };

        *slot = field.text().await?;
    }

    Ok(form)
}

pub async fn method_not_allowed() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}

/// POST /contact
#[tracing::instrument(name = "contact.submit", skip_all)]
pub async fn action(
    template: Template,
    State(state): State<AppState>,
    input: ContactInput,
) -> Response {
    let form = match input {
        ContactInput::Posted(form) => form,
        ContactInput::Oversized => {
            tracing::debug!("Form body over the size limit");
            return template.invalid(vec![ENQUIRY_TOO_LONG.to_owned()]);
        }
    };

    let submission = match form.screen() {
        Screening::Spam => {
            // Looks like success so the bot moves on.
            tracing::info!("Honeypot filled in, submission dropped");
            return "OK".into_response();
        }
        Screening::Invalid(errors) => {
            tracing::debug!(errors = errors.len(), "Submission failed validation");
            return template.invalid(errors);
        }
        Screening::Accepted(submission) => submission,
    };

    let email = enquiry_email(&state.config, &submission);
    let timeout = state.config.mail.timeout();

    match tokio::time::timeout(timeout, state.mailer.send(&email)).await {
        Ok(Ok(())) => {
            tracing::info!("Enquiry relayed");
            template.sent()
        }
        Ok(Err(err)) => {
            tracing::error!(error = %err, "Failed to relay enquiry");
            template.failed()
        }
        Err(_) => {
            tracing::error!(timeout_secs = timeout.as_secs(), "Relay timed out");
            template.failed()
        }
    }
}

/// Email sent to the operator mailbox. Replies go straight to the visitor.
pub fn enquiry_email(config: &Config, submission: &Submission) -> OutgoingEmail {
    OutgoingEmail {
        from: Recipient::new(&config.mail.from_address, &config.mail.from_name),
        to: Recipient::new(&config.mail.recipient_address, &config.mail.recipient_name),
        reply_to: Recipient::new(&submission.email, &submission.name),
        subject: config.mail.subject.to_owned(),
        text: submission.text_body(),
    }
}
