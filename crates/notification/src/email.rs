use lettre::{
    Address, Message,
    message::{Mailbox, header::ContentType},
};

use crate::Error;

/// An address with an optional display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub address: String,
    pub name: String,
}

impl Recipient {
    pub fn new(address: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: name.into(),
        }
    }

    pub fn mailbox(&self) -> Result<Mailbox, Error> {
        let address = self.address.parse::<Address>()?;
        let name = (!self.name.is_empty()).then(|| self.name.to_owned());

        Ok(Mailbox::new(name, address))
    }
}

/// A single plain-text message handed to a [`crate::Mailer`].
#[derive(Clone)]
pub struct OutgoingEmail {
    pub from: Recipient,
    pub to: Recipient,
    pub reply_to: Recipient,
    pub subject: String,
    pub text: String,
}

impl OutgoingEmail {
    pub fn to_message(&self) -> Result<Message, Error> {
        let message = Message::builder()
            .from(self.from.mailbox()?)
            .reply_to(self.reply_to.mailbox()?)
            .to(self.to.mailbox()?)
            .subject(self.subject.to_owned())
            .header(ContentType::TEXT_PLAIN)
            .body(self.text.to_owned())?;

        Ok(message)
    }
}
