//! Outbound mail for the contact endpoint.
//!
//! The HTTP side only sees the [`Mailer`] capability. [`EmailService`] is the
//! SMTP implementation used in production; tests swap in their own.

mod email;
mod error;
mod service;

pub use email::{OutgoingEmail, Recipient};
pub use error::Error;
pub use service::{EmailConfig, EmailService, Encryption, Mailer};
