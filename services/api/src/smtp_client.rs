//! SMTP Client
//!
//! Handles email sending via SMTP using lettre.

use anyhow::{Context, Result};
use lettre::message::{header::ContentType, Mailbox, SinglePart};
use lettre::{
    transport::smtp::authentication::Credentials, AsyncSmtpTransport, AsyncTransport, Message,
    Tokio1Executor,
};

use leadform_utils::EmailConfig;

/// SMTP client for sending notification emails. The transport is built once
/// at construction and reused across sends.
pub struct SmtpClient {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpClient {
    pub fn new(config: &EmailConfig) -> Result<Self> {
        let creds = Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .context("Failed to create SMTP transport")?
            .port(config.smtp_port)
            .credentials(creds)
            .build();

        Ok(Self {
            transport,
            from_address: config.from_address.clone(),
        })
    }

    /// Send one HTML email to the given recipients.
    pub async fn send(
        &self,
        from_name: &str,
        recipients: &[String],
        subject: &str,
        body_html: &str,
    ) -> Result<()> {
        anyhow::ensure!(!recipients.is_empty(), "No recipients configured");

        let from_mailbox: Mailbox = format!("{} <{}>", from_name, self.from_address)
            .parse()
            .context("Invalid from address")?;

        let mut builder = Message::builder().from(from_mailbox).subject(subject);
        for recipient in recipients {
            let to_mailbox: Mailbox = recipient
                .parse()
                .with_context(|| format!("Invalid recipient address: {recipient}"))?;
            builder = builder.to(to_mailbox);
        }

        let email = builder
            .singlepart(
                SinglePart::builder()
                    .header(ContentType::TEXT_HTML)
                    .body(body_html.to_string()),
            )
            .context("Failed to build email")?;

        self.transport
            .send(email)
            .await
            .context("Failed to send email")?;

        Ok(())
    }
}
