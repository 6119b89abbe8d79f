use std::borrow::Cow;

use validator::{Validate, ValidateEmail, ValidationError, ValidationErrors};

pub const MAX_ENQUIRY_CHARS: usize = 4000;

pub const NAME_REQUIRED: &str = "Please enter your name.";
pub const EMAIL_INVALID: &str = "Please enter a valid email address.";
pub const ENQUIRY_REQUIRED: &str = "Please enter your enquiry.";
pub const ENQUIRY_TOO_LONG: &str = "Please keep your message under 4000 characters.";

/// Order in which field errors are reported back to the visitor.
const FIELD_ORDER: [&str; 3] = ["name", "email", "enquiry"];

/// Raw form fields as posted. Missing fields stay empty.
#[derive(Debug, Default, Clone)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub enquiry: String,
    /// Honeypot. Hidden from people, filled in by bots.
    pub website: String,
}

/// Result of screening a posted form.
pub enum Screening {
    /// Honeypot was filled in; nothing else was looked at.
    Spam,
    /// One message per failed rule, in form order.
    Invalid(Vec<String>),
    Accepted(Submission),
}

/// Collects posted `(name, value)` pairs. Unknown names are ignored and a
/// repeated name keeps its last value.
impl FromIterator<(String, String)> for ContactForm {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut form = Self::default();

        for (name, value) in pairs {
            if let Some(slot) = form.field_mut(&name) {
                *slot = value;
            }
        }

        form
    }
}

impl ContactForm {
    pub fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "name" => Some(&mut self.name),
            "email" => Some(&mut self.email),
            "enquiry" => Some(&mut self.enquiry),
            "website" => Some(&mut self.website),
            _ => None,
        }
    }

    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            enquiry: self.enquiry.trim().to_owned(),
            website: self.website.trim().to_owned(),
        }
    }

    pub fn is_spam(&self) -> bool {
        !self.website.trim().is_empty()
    }

    /// Trims the input, checks the honeypot and validates the remaining
    /// fields. All rules are evaluated so the visitor sees every problem at
    /// once.
    pub fn screen(self) -> Screening {
        let form = self.trimmed();

        if form.is_spam() {
            return Screening::Spam;
        }

        let submission = Submission {
            name: form.name,
            email: form.email,
            enquiry: form.enquiry,
        };

        match submission.validate() {
            Ok(()) => Screening::Accepted(submission),
            Err(errors) => Screening::Invalid(ordered_messages(&errors)),
        }
    }
}

/// A validated enquiry, ready to be relayed.
///
/// No `Debug` on purpose: visitor data must not end up in logs.
#[derive(Clone, Validate)]
pub struct Submission {
    #[validate(length(min = 1, message = "Please enter your name."))]
    pub name: String,
    #[validate(custom(function = "validate_email_address"))]
    pub email: String,
    #[validate(custom(function = "validate_enquiry"))]
    pub enquiry: String,
}

impl Submission {
    /// Plain-text body sent to the operator mailbox.
    pub fn text_body(&self) -> String {
        format!(
            "Name: {}\nEmail: {}\n\nMessage:\n{}\n",
            self.name, self.email, self.enquiry
        )
    }
}

// Syntax check plus a deliverable domain: `jane@localhost` is refused, an
// IP literal such as `jane@[192.0.2.1]` is not.
fn validate_email_address(email: &str) -> Result<(), ValidationError> {
    let has_routable_domain = email.rsplit_once('@').is_some_and(|(_, domain)| {
        domain.starts_with('[')
            || (domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.'))
    });

    if !email.validate_email() || !has_routable_domain {
        return Err(ValidationError::new("email").with_message(Cow::Borrowed(EMAIL_INVALID)));
    }

    Ok(())
}

// Empty and too-long are exclusive: at most one enquiry error per submission.
fn validate_enquiry(enquiry: &str) -> Result<(), ValidationError> {
    if enquiry.is_empty() {
        return Err(ValidationError::new("required").with_message(Cow::Borrowed(ENQUIRY_REQUIRED)));
    }

    if enquiry.chars().count() > MAX_ENQUIRY_CHARS {
        return Err(
            ValidationError::new("too_long").with_message(Cow::Borrowed(ENQUIRY_TOO_LONG))
        );
    }

    Ok(())
}

fn ordered_messages(errors: &ValidationErrors) -> Vec<String> {
    let fields = errors.field_errors();

    FIELD_ORDER
        .iter()
        .filter_map(|field| fields.get(*field))
        .flat_map(|errors| errors.iter())
        .map(|error| {
            error
                .message
                .as_deref()
                .unwrap_or(error.code.as_ref())
                .to_owned()
        })
        .collect()
}
