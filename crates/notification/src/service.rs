//! Email notification service using lettre

use std::{fmt, time::Duration};

use async_trait::async_trait;
use lettre::{SmtpTransport, Transport, transport::smtp::authentication::Credentials};
use serde::Deserialize;

use crate::{Error, OutgoingEmail};

/// How the connection to the relay is secured.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Encryption {
    /// Plain connection upgraded with STARTTLS (port 587).
    #[default]
    StartTls,
    /// Implicit TLS (port 465).
    Tls,
    /// No encryption. Only meant for local catch-all servers such as MailDev.
    None,
}

#[derive(Deserialize, Clone)]
pub struct EmailConfig {
    pub relay_host: String,
    #[serde(default = "default_relay_port")]
    pub relay_port: u16,
    #[serde(default)]
    pub encryption: Encryption,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    pub from_address: String,
    #[serde(default)]
    pub from_name: String,
    pub recipient_address: String,
    #[serde(default)]
    pub recipient_name: String,
    #[serde(default = "default_subject")]
    pub subject: String,
}

fn default_relay_port() -> u16 {
    587
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_subject() -> String {
    "New enquiry from website".to_string()
}

impl fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailConfig")
            .field("relay_host", &self.relay_host)
            .field("relay_port", &self.relay_port)
            .field("encryption", &self.encryption)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .field("from_address", &self.from_address)
            .field("from_name", &self.from_name)
            .field("recipient_address", &self.recipient_address)
            .field("recipient_name", &self.recipient_name)
            .field("subject", &self.subject)
            .finish()
    }
}

impl EmailConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn credentials(&self) -> Option<Credentials> {
        if self.username.is_empty() || self.password.is_empty() {
            return None;
        }

        Some(Credentials::new(
            self.username.to_owned(),
            self.password.to_owned(),
        ))
    }
}

/// Capability to hand a message to the outbound relay.
///
/// Any failure (auth, network, rejection, bad address) comes back as an
/// [`Error`]; callers are not expected to tell them apart.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), Error>;
}

/// SMTP relay client
#[derive(Clone)]
pub struct EmailService {
    mailer: SmtpTransport,
}

impl EmailService {
    /// Create a new email service from configuration
    pub fn new(config: &EmailConfig) -> Result<Self, Error> {
        let builder = match config.encryption {
            Encryption::StartTls => SmtpTransport::starttls_relay(&config.relay_host)?,
            Encryption::Tls => SmtpTransport::relay(&config.relay_host)?,
            Encryption::None => {
                tracing::warn!(
                    relay_host = %config.relay_host,
                    "Relay connection is not encrypted"
                );
                SmtpTransport::builder_dangerous(&config.relay_host)
            }
        };

        let builder = builder
            .port(config.relay_port)
            .timeout(Some(config.timeout()));

        let builder = match config.credentials() {
            Some(credentials) => builder.credentials(credentials),
            None => builder,
        };

        tracing::info!(
            relay_host = %config.relay_host,
            relay_port = config.relay_port,
            encryption = ?config.encryption,
            authenticated = config.credentials().is_some(),
            "Email service initialized"
        );

        Ok(Self {
            mailer: builder.build(),
        })
    }
}

#[async_trait]
impl Mailer for EmailService {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), Error> {
        let message = email.to_message()?;
        let mailer = self.mailer.clone();

        // lettre's SmtpTransport is blocking.
        let response = tokio::task::spawn_blocking(move || mailer.send(&message)).await??;

        tracing::info!(code = %response.code(), "Email accepted by relay");

        Ok(())
    }
}
