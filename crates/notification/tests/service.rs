use contact_relay_notification::{
    EmailConfig, EmailService, Encryption, Error, Mailer, OutgoingEmail, Recipient,
};

fn config(encryption: Encryption) -> EmailConfig {
    EmailConfig {
        relay_host: "127.0.0.1".to_owned(),
        relay_port: 1,
        encryption,
        username: "relay@example.org".to_owned(),
        password: "app-password".to_owned(),
        timeout_secs: 1,
        from_address: "relay@example.org".to_owned(),
        from_name: "Website".to_owned(),
        recipient_address: "inbox@example.org".to_owned(),
        recipient_name: "Inbox".to_owned(),
        subject: "New enquiry from website".to_owned(),
    }
}

fn email() -> OutgoingEmail {
    OutgoingEmail {
        from: Recipient::new("relay@example.org", "Website"),
        to: Recipient::new("inbox@example.org", "Inbox"),
        reply_to: Recipient::new("jane@example.com", "Jane Doe"),
        subject: "New enquiry from website".to_owned(),
        text: "Name: Jane Doe\n".to_owned(),
    }
}

#[test]
fn test_service_builds_for_every_encryption_mode() -> anyhow::Result<()> {
    for encryption in [Encryption::StartTls, Encryption::Tls, Encryption::None] {
        EmailService::new(&config(encryption))?;
    }

    Ok(())
}

#[test]
fn test_credentials_require_both_parts() {
    let mut config = config(Encryption::StartTls);
    assert!(config.credentials().is_some());

    config.password.clear();
    assert!(config.credentials().is_none());
}

#[test]
fn test_debug_redacts_password() {
    let output = format!("{:?}", config(Encryption::StartTls));

    assert!(!output.contains("app-password"));
    assert!(output.contains("<redacted>"));
}

#[tokio::test]
async fn test_unreachable_relay_is_an_smtp_error() -> anyhow::Result<()> {
    let service = EmailService::new(&config(Encryption::None))?;

    let result = service.send(&email()).await;

    assert!(matches!(result, Err(Error::Smtp(_))));

    Ok(())
}

#[tokio::test]
async fn test_bad_address_fails_before_connecting() -> anyhow::Result<()> {
    let service = EmailService::new(&config(Encryption::None))?;
    let mut email = email();
    email.reply_to = Recipient::new("not-an-email", "Jane");

    let result = service.send(&email).await;

    assert!(matches!(result, Err(Error::Address(_))));

    Ok(())
}
