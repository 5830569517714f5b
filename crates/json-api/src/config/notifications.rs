//! Notifications Config

use clap::Args;

use showroom_app::notifications::{Contact, EmailConfig};

/// Order notification settings. Without an endpoint, notifications are only logged.
#[derive(Debug, Args)]
pub struct NotificationsConfig {
    /// Transactional email API send URL
    #[arg(long, env = "NOTIFY_ENDPOINT")]
    pub notify_endpoint: Option<String>,

    /// Transactional email API key
    #[arg(long, env = "NOTIFY_API_KEY", default_value = "", hide_env_values = true)]
    pub notify_api_key: String,

    /// Sender address for order emails
    #[arg(long, env = "NOTIFY_SENDER", default_value = "orders@showroom.local")]
    pub notify_sender: String,

    /// Sender display name
    #[arg(long, env = "NOTIFY_SENDER_NAME", default_value = "Showroom")]
    pub notify_sender_name: String,

    /// Marketplace admin address receiving order copies
    #[arg(long, env = "NOTIFY_ADMIN_EMAIL", default_value = "admin@showroom.local")]
    pub notify_admin_email: String,
}

impl NotificationsConfig {
    /// Email delivery settings, when an endpoint is configured.
    #[must_use]
    pub fn email_config(&self) -> Option<EmailConfig> {
        let endpoint = self
            .notify_endpoint
            .as_deref()
            .map(str::trim)
            .filter(|endpoint| !endpoint.is_empty())?;

        Some(EmailConfig {
            endpoint: endpoint.to_string(),
            api_key: self.notify_api_key.clone(),
            sender: Contact {
                email: self.notify_sender.clone(),
                name: self.notify_sender_name.clone(),
            },
            admin: Contact {
                email: self.notify_admin_email.clone(),
                name: "Showroom Admin".to_string(),
            },
        })
    }
}
