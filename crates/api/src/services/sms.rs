//! SMS service for registration confirmation texts.
//!
//! Supports two providers:
//! - `console`: Logs messages to console (development)
//! - `http`: Posts to an SMS gateway HTTP API (mNotify-style)

use domain::models::{EventSummary, Registration};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::SmsConfig;

/// Errors that can occur during SMS operations.
#[derive(Debug, Error)]
pub enum SmsError {
    #[error("SMS service not configured")]
    NotConfigured,

    #[error("Failed to send SMS: {0}")]
    SendFailed(String),

    #[error("Provider error: {0}")]
    ProviderError(String),
}

/// SMS service for sending transactional texts.
#[derive(Clone)]
pub struct SmsService {
    config: Arc<SmsConfig>,
}

impl SmsService {
    /// Creates a new SmsService with the given configuration.
    pub fn new(config: SmsConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Check if SMS service is enabled.
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Send the registration confirmation SMS.
    ///
    /// Skips silently when the registrant gave no phone number. Called
    /// after the registration has been persisted; failures are logged by
    /// the caller and never affect the registration.
    pub async fn send_registration_sms(
        &self,
        registration: &Registration,
        event: &EventSummary,
    ) -> Result<(), SmsError> {
        let Some(phone) = registration.phone.as_deref() else {
            debug!("No phone number provided, skipping SMS notification");
            return Ok(());
        };

        let message = format!(
            "Hi {}! You're registered for {} on {}. Check your email for your ticket with QR code. See you there!",
            registration.name,
            event.title,
            event.date_display(),
        );

        self.send(&normalize_phone(phone), &message).await
    }

    /// Send a single SMS message.
    pub async fn send(&self, recipient: &str, message: &str) -> Result<(), SmsError> {
        if !self.config.enabled {
            debug!(recipient = %recipient, "SMS service disabled, skipping send");
            return Ok(());
        }

        match self.config.provider.as_str() {
            "console" => self.send_console(recipient, message).await,
            "http" => self.send_http(recipient, message).await,
            provider => {
                error!(provider = %provider, "Unknown SMS provider");
                Err(SmsError::NotConfigured)
            }
        }
    }

    /// Console provider - logs the SMS to console (for development).
    async fn send_console(&self, recipient: &str, message: &str) -> Result<(), SmsError> {
        info!(
            recipient = %recipient,
            sender_id = %self.config.sender_id,
            message = %message,
            "SMS (console provider)"
        );
        Ok(())
    }

    /// HTTP gateway provider - posts to the configured SMS API.
    async fn send_http(&self, recipient: &str, message: &str) -> Result<(), SmsError> {
        if self.config.api_url.is_empty() || self.config.api_key.is_empty() {
            return Err(SmsError::NotConfigured);
        }

        let client = reqwest::Client::new();
        let url = format!(
            "{}/sms/quick?key={}",
            self.config.api_url.trim_end_matches('/'),
            self.config.api_key
        );

        let body = serde_json::json!({
            "recipient": [recipient],
            "sender": self.config.sender_id,
            "message": message,
        });

        let response = client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| SmsError::SendFailed(format!("SMS gateway request failed: {}", e)))?;

        if response.status().is_success() {
            info!(recipient = %recipient, "SMS sent via gateway");
            Ok(())
        } else {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            error!(
                status = %status,
                error = %error_body,
                "SMS gateway error"
            );
            Err(SmsError::ProviderError(format!(
                "Gateway returned {}: {}",
                status, error_body
            )))
        }
    }
}

/// Normalizes a phone number for the gateway (Ghana numbering plan:
/// strips a leading 0 and prefixes the 233 country code).
pub fn normalize_phone(phone: &str) -> String {
    let cleaned: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if let Some(rest) = cleaned.strip_prefix('0') {
        return format!("233{}", rest);
    }
    if cleaned.starts_with("233") {
        cleaned
    } else {
        format!("233{}", cleaned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn test_config() -> SmsConfig {
        SmsConfig {
            enabled: true,
            provider: "console".to_string(),
            api_url: String::new(),
            api_key: String::new(),
            sender_id: "EventMgr".to_string(),
        }
    }

    fn test_registration(phone: Option<&str>) -> Registration {
        Registration {
            id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            email: "alice@x.com".to_string(),
            name: "Alice".to_string(),
            phone: phone.map(|p| p.to_string()),
            note: None,
            token: "reg_test-token".to_string(),
            qr_code: None,
            checked_in: false,
            check_in_time: None,
            registered_at: Utc::now(),
        }
    }

    fn test_event() -> EventSummary {
        EventSummary {
            id: Uuid::new_v4(),
            title: "Tech Summit".to_string(),
            date: None,
            time: None,
            location: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_normalize_phone_local() {
        assert_eq!(normalize_phone("0543358413"), "233543358413");
    }

    #[test]
    fn test_normalize_phone_already_international() {
        assert_eq!(normalize_phone("233543358413"), "233543358413");
    }

    #[test]
    fn test_normalize_phone_strips_formatting() {
        assert_eq!(normalize_phone("+233 54 335 8413"), "233543358413");
    }

    #[tokio::test]
    async fn test_send_console_sms() {
        let service = SmsService::new(test_config());
        assert!(service.send("233543358413", "hello").await.is_ok());
    }

    #[tokio::test]
    async fn test_send_disabled_silently_succeeds() {
        let mut config = test_config();
        config.enabled = false;
        let service = SmsService::new(config);
        assert!(service.send("233543358413", "hello").await.is_ok());
    }

    #[tokio::test]
    async fn test_registration_sms_skips_without_phone() {
        let service = SmsService::new(test_config());
        let result = service
            .send_registration_sms(&test_registration(None), &test_event())
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_registration_sms_with_phone() {
        let service = SmsService::new(test_config());
        let result = service
            .send_registration_sms(&test_registration(Some("0543358413")), &test_event())
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_http_provider_unconfigured_fails() {
        let mut config = test_config();
        config.provider = "http".to_string();
        let service = SmsService::new(config);
        assert!(service.send("233543358413", "hello").await.is_err());
    }
}
