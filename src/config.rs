use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use contact_relay_notification::{EmailConfig, Encryption};
use serde::Deserialize;
use std::env;
use validator::ValidateEmail;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub mail: EmailConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Public-facing details used by the outcome pages.
#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    #[serde(default = "default_site_name")]
    pub name: String,
    #[serde(default = "default_home_url")]
    pub home_url: String,
    #[serde(default = "default_form_url")]
    pub form_url: String,
    /// Shown on the failure page. Falls back to the recipient mailbox.
    #[serde(default)]
    pub fallback_email: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            home_url: default_home_url(),
            form_url: default_form_url(),
            fallback_email: None,
        }
    }
}

fn default_site_name() -> String {
    "our website".to_string()
}

fn default_home_url() -> String {
    "/".to_string()
}

fn default_form_url() -> String {
    "/contact.html".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (CONTACT_RELAY__MAIL__PASSWORD, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    ///
    /// Relay host, sender, recipient and credentials have no defaults.
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional, ignored if not found
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("CONTACT_RELAY")
                .separator("__")
                .try_parsing(true),
        );

        // Also support the usual unprefixed SMTP variables
        if let Ok(username) = env::var("SMTP_USERNAME") {
            builder = builder.set_override("mail.username", username)?;
        }
        if let Ok(password) = env::var("SMTP_PASSWORD") {
            builder = builder.set_override("mail.password", password)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.mail.relay_host.trim().is_empty() {
            return Err("Mail relay host must be set".to_string());
        }
        if self.mail.relay_port == 0 {
            return Err("Mail relay port must be greater than 0".to_string());
        }
        if self.mail.timeout_secs == 0 {
            return Err("Mail timeout must be at least 1 second".to_string());
        }
        if self.mail.encryption != Encryption::None && self.mail.credentials().is_none() {
            return Err("Mail username and password must be set for an encrypted relay".to_string());
        }
        if !self.mail.from_address.validate_email() {
            return Err(format!("Invalid sender address: {}", self.mail.from_address));
        }
        if !self.mail.recipient_address.validate_email() {
            return Err(format!(
                "Invalid recipient address: {}",
                self.mail.recipient_address
            ));
        }
        if let Some(fallback) = &self.site.fallback_email
            && !fallback.validate_email()
        {
            return Err(format!("Invalid fallback email: {fallback}"));
        }
        Ok(())
    }

    /// Address shown to visitors when the relay fails.
    pub fn fallback_email(&self) -> &str {
        self.site
            .fallback_email
            .as_deref()
            .unwrap_or(&self.mail.recipient_address)
    }
}
