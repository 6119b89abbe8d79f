//! Contact form input, honeypot screening and validation.
//!
//! Everything in here is request-scoped: a [`ContactForm`] is built from the
//! posted body, screened once, and either dropped or turned into a
//! [`Submission`] that lives until the email has been handed to the relay.

mod submission;

pub use submission::{
    ContactForm, EMAIL_INVALID, ENQUIRY_REQUIRED, ENQUIRY_TOO_LONG, MAX_ENQUIRY_CHARS,
    NAME_REQUIRED, Screening, Submission,
};
