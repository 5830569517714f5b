//! Server configuration module

use clap::Parser;

use crate::config::{
    db::DatabaseConfig, notifications::NotificationsConfig, observability::LoggingConfig,
    server::ServerRuntimeConfig,
};

pub(crate) mod db;
pub(crate) mod notifications;
pub(crate) mod observability;
pub(crate) mod server;

/// Showroom JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "showroom-json", about = "Showroom JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Order notification settings.
    #[command(flatten)]
    pub notifications: NotificationsConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_arguments_with_defaults() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "showroom-json",
            "--database-url",
            "postgres://localhost/showroom",
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8698");
        assert_eq!(config.server.shutdown_grace().as_secs(), 30);
        assert_eq!(config.logging.slow_request_threshold_ms, 1_000);
        assert!(config.notifications.email_config().is_none());

        Ok(())
    }

    #[test]
    fn notification_endpoint_enables_email() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "showroom-json",
            "--database-url",
            "postgres://localhost/showroom",
            "--notify-endpoint",
            "https://mail.example.com",
            "--notify-api-key",
            "secret",
        ])?;

        let email = config.notifications.email_config();

        assert_eq!(
            email.as_ref().map(|email| email.endpoint.as_str()),
            Some("https://mail.example.com")
        );
        assert_eq!(
            email.as_ref().map(|email| email.api_key.as_str()),
            Some("secret")
        );

        Ok(())
    }
}
