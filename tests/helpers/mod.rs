//! Test helpers: in-memory mailers and a ready-to-use app
//!
//! Each test builds its own router so mailers never share state.

#![allow(dead_code)]

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, header},
    response::Response,
};
use contact_relay::{
    AppState, Config,
    config::{LoggingConfig, ServerConfig, SiteConfig},
};
use contact_relay_notification::{
    EmailConfig, Encryption, Error, Mailer, OutgoingEmail, Recipient,
};
use http_body_util::BodyExt;

/// Keeps every email it is asked to send.
#[derive(Clone, Default)]
pub struct RecordingMailer {
    sent: Arc<Mutex<Vec<OutgoingEmail>>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), Error> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

/// Fails every send, like a relay rejecting the login.
#[derive(Clone, Default)]
pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _email: &OutgoingEmail) -> Result<(), Error> {
        Err(Recipient::new("relay-down", "")
            .mailbox()
            .expect_err("relay-down is not an address"))
    }
}

/// Never answers within the configured timeout.
#[derive(Clone, Default)]
pub struct StallingMailer;

#[async_trait]
impl Mailer for StallingMailer {
    async fn send(&self, _email: &OutgoingEmail) -> Result<(), Error> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(())
    }
}

pub fn create_test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        mail: EmailConfig {
            relay_host: "smtp.example.org".to_string(),
            relay_port: 587,
            encryption: Encryption::StartTls,
            username: "studio@example.org".to_string(),
            password: "app-password".to_string(),
            timeout_secs: 1,
            from_address: "studio@example.org".to_string(),
            from_name: "Pixel & Wood Tutoring".to_string(),
            recipient_address: "studio@example.org".to_string(),
            recipient_name: "Pixel & Wood Tutoring".to_string(),
            subject: "New enquiry from Pixel & Wood website".to_string(),
        },
        site: SiteConfig {
            name: "Pixel & Wood Tutoring".to_string(),
            home_url: "/index.html".to_string(),
            form_url: "/contact.html".to_string(),
            fallback_email: Some("hello@example.org".to_string()),
        },
        logging: LoggingConfig::default(),
    }
}

pub fn create_test_app(mailer: impl Mailer + 'static) -> Router {
    contact_relay::router(AppState {
        config: create_test_config(),
        mailer: Arc::new(mailer),
    })
}

pub fn post_form(fields: &[(&str, &str)]) -> Request<Body> {
    let body = serde_urlencoded::to_string(fields).unwrap();

    Request::builder()
        .method("POST")
        .uri("/contact")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

pub fn post_multipart(fields: &[(&str, &str)]) -> Request<Body> {
    let boundary = "contact-relay-boundary";
    let mut body = String::new();

    for (name, value) in fields {
        body.push_str(&format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{boundary}--\r\n"));

    Request::builder()
        .method("POST")
        .uri("/contact")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn valid_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "Jane Doe"),
        ("email", "jane@example.com"),
        ("enquiry", "Hello, I'd like tutoring."),
        ("website", ""),
    ]
}

pub async fn body_string(response: Response) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}
