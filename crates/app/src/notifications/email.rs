//! Transactional email notifier.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::notifications::{Contact, Notifier, NotifyError, OrderNotice, notice::escape_html};

/// Configuration for the transactional email API.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// Send endpoint, e.g. `"https://api.brevo.com/v3/smtp/email"`.
    pub endpoint: String,

    /// API key sent in the `api-key` header.
    pub api_key: String,

    /// The address mail is sent from.
    pub sender: Contact,

    /// Receives a copy of every order.
    pub admin: Contact,
}

/// Sends order emails through a JSON email API.
#[derive(Debug, Clone)]
pub struct EmailNotifier {
    config: EmailConfig,
    http: Client,
}

impl EmailNotifier {
    #[must_use]
    pub fn new(config: EmailConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    async fn send(&self, email: &Email<'_>) -> Result<(), NotifyError> {
        let response = self
            .http
            .post(&self.config.endpoint)
            .header("api-key", &self.config.api_key)
            .json(email)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(NotifyError::UnexpectedResponse(format!(
                "send request failed with status {status}: {text}"
            )));
        }

        debug!(subject = %email.subject, "email sent");

        Ok(())
    }

    fn admin_email<'a>(&'a self, notice: &'a OrderNotice) -> Email<'a> {
        Email {
            sender: &self.config.sender,
            to: vec![&self.config.admin],
            subject: format!("New order {}", notice.serial_number),
            html_content: format!(
                "<h3>New order {serial}</h3>\
                 <p>{name} ({email}) placed an order of {quantity} units.</p>\
                 <table>{lines}</table>\
                 <p>Total: {total}</p>",
                serial = escape_html(&notice.serial_number),
                name = escape_html(&notice.buyer.name),
                email = escape_html(&notice.buyer.email),
                quantity = notice.total_quantity(),
                lines = notice.lines_html(),
                total = notice.total_amount,
            ),
        }
    }

    fn buyer_email<'a>(&'a self, notice: &'a OrderNotice) -> Email<'a> {
        Email {
            sender: &self.config.sender,
            to: vec![&notice.buyer],
            subject: format!("Your order {} has been received", notice.serial_number),
            html_content: format!(
                "<h3>Thank you for your order</h3>\
                 <p>Hello {name},</p>\
                 <p>We received order {serial}.</p>\
                 <table>{lines}</table>\
                 <p>Total: {total}</p>",
                name = escape_html(&notice.buyer.name),
                serial = escape_html(&notice.serial_number),
                lines = notice.lines_html(),
                total = notice.total_amount,
            ),
        }
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn order_placed(&self, notice: &OrderNotice) -> Result<(), NotifyError> {
        self.send(&self.admin_email(notice)).await?;
        self.send(&self.buyer_email(notice)).await
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Email<'a> {
    sender: &'a Contact,
    to: Vec<&'a Contact>,
    subject: String,
    html_content: String,
}
