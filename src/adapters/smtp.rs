//! Email notifications over SMTP.
//!
//! Uses lettre's async transport. Sending is best-effort: every failure is
//! logged here and reported upward only as `false`.

use chrono::{DateTime, Utc};
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::{authentication::Credentials, Error as SmtpError},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::EmailConfig;
use crate::domain::aggregates::{ContactMessage, OrderRecord};
use crate::ports::NotificationSender;

pub const ORDER_SUBJECT: &str = "New Order";

#[derive(Debug, Error)]
pub enum NotifierError {
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    #[error("email notifications are not configured")]
    NotConfigured,
}

struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

/// Notification sender that mails the shop owner. Built without a config it
/// still logs every notification but never dispatches one.
pub struct SmtpNotifier {
    mailer: Option<Mailer>,
}

impl SmtpNotifier {
    /// # Errors
    ///
    /// Returns error if the relay host is rejected or an address does not parse.
    pub fn new(config: Option<&EmailConfig>) -> Result<Self, NotifierError> {
        let Some(config) = config else {
            tracing::warn!("SMTP not configured, order emails will not be sent");
            return Ok(Self::disabled());
        };

        let credentials = Credentials::new(config.smtp_username.clone(), config.smtp_password.expose_secret().to_string());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        tracing::info!(from = %config.from_address, to = %config.to_address, "SMTP notifier configured");
        Ok(Self {
            mailer: Some(Mailer {
                transport,
                from: parse_mailbox(&config.from_address)?,
                to: parse_mailbox(&config.to_address)?,
            }),
        })
    }

    pub fn disabled() -> Self { Self { mailer: None } }

    pub fn is_configured(&self) -> bool { self.mailer.is_some() }

    async fn send(&self, subject: &str, body: String, reply_to: Option<Mailbox>) -> Result<(), NotifierError> {
        let mailer = self.mailer.as_ref().ok_or(NotifierError::NotConfigured)?;
        let mut builder = Message::builder()
            .from(mailer.from.clone())
            .to(mailer.to.clone())
            .subject(subject)
            .header(ContentType::TEXT_PLAIN);
        if let Some(reply_to) = reply_to {
            builder = builder.reply_to(reply_to);
        }
        let email = builder.body(body)?;
        mailer.transport.send(email).await?;
        Ok(())
    }
}

#[async_trait]
impl NotificationSender for SmtpNotifier {
    async fn notify_order(&self, record: &OrderRecord) -> bool {
        let body = order_notification_body(record);
        match self.send(ORDER_SUBJECT, body, None).await {
            Ok(()) => {
                tracing::info!(product = %record.product_name, customer = %record.customer_name, "Order email sent");
                true
            }
            Err(NotifierError::NotConfigured) => {
                tracing::warn!(product = %record.product_name, "SMTP not configured, order email not sent");
                false
            }
            Err(e) => {
                tracing::error!(product = %record.product_name, error = %e, "Failed to send order email");
                false
            }
        }
    }

    async fn send_contact_message(&self, message: &ContactMessage) -> bool {
        let subject = match message.subject.as_deref().filter(|s| !s.is_empty()) {
            Some(s) => format!("Contact: {s}"),
            None => "New Contact Message".to_string(),
        };
        let reply_to = message.email.as_deref().filter(|e| !e.is_empty()).and_then(|e| e.parse().ok());
        match self.send(&subject, contact_message_body(message), reply_to).await {
            Ok(()) => {
                tracing::info!(name = %message.name, "Contact message sent");
                true
            }
            Err(e) => {
                tracing::error!(name = %message.name, error = %e, "Failed to send contact message");
                false
            }
        }
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, NotifierError> {
    address.parse().map_err(|_| NotifierError::InvalidAddress(address.to_string()))
}

fn display_date(at: &DateTime<Utc>) -> String { at.format("%d/%m/%Y, %H:%M").to_string() }

pub fn order_notification_body(record: &OrderRecord) -> String {
    let mut body = format!(
        "New Order Alert!\n\n\
         Order Details:\n\
         • Date: {date}\n\
         • Product: {product}\n\
         • Size: {size}\n\
         • Color: {color}\n\
         • Quantity: {quantity}\n\
         • Price: {price}\n\n\
         Customer Information:\n\
         • Name: {name}\n\
         • Phone: {phone}\n\
         • Email: {email}\n\
         • Wilaya: {region}\n\
         • City: {city}\n\
         • Address: {address}\n",
        date = display_date(&record.order_date),
        product = record.product_name,
        size = record.size,
        color = record.color,
        quantity = record.quantity,
        price = record.price,
        name = record.customer_name,
        phone = record.phone,
        email = record.email,
        region = record.region,
        city = record.city,
        address = record.street_address,
    );
    if !record.order_notes.is_empty() {
        body.push_str(&format!("• Notes: {}\n", record.order_notes));
    }
    body.push_str("\nThis order has been automatically saved to your Google Sheets.\n\nBest regards,\nE-commerce System");
    body
}

pub fn contact_message_body(message: &ContactMessage) -> String {
    let field = |v: &Option<String>| v.as_deref().filter(|s| !s.is_empty()).unwrap_or("-").to_string();
    format!(
        "New Contact Message\n\n\
         • Date: {date}\n\
         • Name: {name}\n\
         • Email: {email}\n\
         • Phone: {phone}\n\
         • Subject: {subject}\n\n\
         Message:\n{text}\n",
        date = display_date(&message.received_at),
        name = message.name,
        email = field(&message.email),
        phone = field(&message.phone),
        subject = field(&message.subject),
        text = message.message,
    )
}
