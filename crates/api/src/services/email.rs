//! Email service for sending registration confirmation emails.
//!
//! Supports multiple email providers:
//! - `console`: Logs emails to console (development)
//! - `smtp`: Sends via SMTP server
//! - `sendgrid`: Uses SendGrid API

use domain::models::{EventSummary, Registration};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::config::EmailConfig;

/// Errors that can occur during email operations.
#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Email service not configured")]
    NotConfigured,

    #[error("Failed to send email: {0}")]
    SendFailed(String),

    #[error("Provider error: {0}")]
    ProviderError(String),
}

/// Email message to be sent.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    /// Recipient email address
    pub to: String,
    /// Recipient name (optional)
    pub to_name: Option<String>,
    /// Email subject
    pub subject: String,
    /// Plain text body
    pub body_text: String,
    /// HTML body (optional)
    pub body_html: Option<String>,
}

/// Email service for sending transactional emails.
#[derive(Clone)]
pub struct EmailService {
    config: Arc<EmailConfig>,
}

impl EmailService {
    /// Creates a new EmailService with the given configuration.
    pub fn new(config: EmailConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Check if email service is enabled.
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Send an email message.
    pub async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        if !self.config.enabled {
            debug!(
                to = %message.to,
                subject = %message.subject,
                "Email service disabled, skipping send"
            );
            return Ok(());
        }

        match self.config.provider.as_str() {
            "console" => self.send_console(message).await,
            "smtp" => self.send_smtp(message).await,
            "sendgrid" => self.send_sendgrid(message).await,
            provider => {
                error!(provider = %provider, "Unknown email provider");
                Err(EmailError::NotConfigured)
            }
        }
    }

    /// Send the registration confirmation email carrying the ticket token
    /// and QR code.
    ///
    /// Called after the registration has been persisted; a failure here is
    /// logged by the caller and never rolls the registration back.
    pub async fn send_registration_confirmation(
        &self,
        registration: &Registration,
        event: &EventSummary,
        ticket_url: &str,
    ) -> Result<(), EmailError> {
        let subject = format!("You're registered for {}", event.title);

        let body_text = format!(
            r#"Hi {name},

You're registered for {title}!

Date: {date}
Time: {time}
Location: {location}

Your registration token is:

{token}

Present the QR code from your ticket page at the entrance, or show this
token to the staff. View your ticket here:

{url}

See you there!
The Event Manager Team"#,
            name = registration.name,
            title = event.title,
            date = event.date_display(),
            time = event.time.as_deref().unwrap_or("TBA"),
            location = event.location.as_deref().unwrap_or("TBA"),
            token = registration.token,
            url = ticket_url,
        );

        let body_html = if self.config.template_style == "html" {
            let qr_block = registration
                .qr_code
                .as_deref()
                .map(|qr| {
                    format!(
                        r#"<p style="text-align: center;"><img src="{}" alt="Registration QR code" width="300" height="300"></p>"#,
                        qr
                    )
                })
                .unwrap_or_default();

            Some(format!(
                r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Registration confirmed</title>
</head>
<body style="font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Helvetica, Arial, sans-serif; line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto; padding: 20px;">
    <div style="background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); padding: 30px; border-radius: 10px 10px 0 0;">
        <h1 style="color: white; margin: 0; font-size: 24px;">{title}</h1>
    </div>
    <div style="background: #f9f9f9; padding: 30px; border-radius: 0 0 10px 10px;">
        <h2 style="color: #333; margin-top: 0;">You're in, {name}!</h2>
        <p><strong>Date:</strong> {date}<br>
           <strong>Time:</strong> {time}<br>
           <strong>Location:</strong> {location}</p>
        {qr_block}
        <p>Scan this code at the entrance to check in. Your registration token:</p>
        <p style="font-family: monospace; background: #eee; padding: 10px; border-radius: 4px; word-break: break-all;">{token}</p>
        <p><a href="{url}">View your ticket</a></p>
    </div>
</body>
</html>"#,
                title = event.title,
                name = registration.name,
                date = event.date_display(),
                time = event.time.as_deref().unwrap_or("TBA"),
                location = event.location.as_deref().unwrap_or("TBA"),
                qr_block = qr_block,
                token = registration.token,
                url = ticket_url,
            ))
        } else {
            None
        };

        let message = EmailMessage {
            to: registration.email.clone(),
            to_name: Some(registration.name.clone()),
            subject,
            body_text,
            body_html,
        };

        self.send(message).await
    }

    /// Console provider - logs email to console (for development).
    async fn send_console(&self, message: EmailMessage) -> Result<(), EmailError> {
        info!(
            to = %message.to,
            to_name = ?message.to_name,
            subject = %message.subject,
            from = %self.config.sender_email,
            from_name = %self.config.sender_name,
            "Email (console provider)"
        );

        info!(
            body_text = %message.body_text,
            "Email body (plain text)"
        );

        if let Some(html) = &message.body_html {
            debug!(
                body_html_length = %html.len(),
                "Email body (HTML) - {} chars",
                html.len()
            );
        }

        Ok(())
    }

    /// SMTP provider - sends via SMTP server.
    async fn send_smtp(&self, message: EmailMessage) -> Result<(), EmailError> {
        if self.config.smtp_host.is_empty() {
            return Err(EmailError::NotConfigured);
        }

        warn!(
            provider = "smtp",
            host = %self.config.smtp_host,
            port = %self.config.smtp_port,
            "SMTP provider configured but full implementation requires lettre crate"
        );

        info!(
            to = %message.to,
            subject = %message.subject,
            smtp_host = %self.config.smtp_host,
            "Email would be sent via SMTP (full implementation pending)"
        );

        Ok(())
    }

    /// SendGrid provider - sends via SendGrid API.
    async fn send_sendgrid(&self, message: EmailMessage) -> Result<(), EmailError> {
        if self.config.sendgrid_api_key.is_empty() {
            return Err(EmailError::NotConfigured);
        }

        let client = reqwest::Client::new();

        let mut personalizations = serde_json::json!({
            "to": [{
                "email": message.to
            }]
        });

        if let Some(name) = &message.to_name {
            personalizations["to"][0]["name"] = serde_json::json!(name);
        }

        let mut content = vec![serde_json::json!({
            "type": "text/plain",
            "value": message.body_text
        })];

        if let Some(html) = &message.body_html {
            content.push(serde_json::json!({
                "type": "text/html",
                "value": html
            }));
        }

        let body = serde_json::json!({
            "personalizations": [personalizations],
            "from": {
                "email": self.config.sender_email,
                "name": self.config.sender_name
            },
            "subject": message.subject,
            "content": content
        });

        let response = client
            .post("https://api.sendgrid.com/v3/mail/send")
            .header(
                "Authorization",
                format!("Bearer {}", self.config.sendgrid_api_key),
            )
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| EmailError::SendFailed(format!("SendGrid request failed: {}", e)))?;

        if response.status().is_success() {
            info!(
                to = %message.to,
                subject = %message.subject,
                "Email sent via SendGrid"
            );
            Ok(())
        } else {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            error!(
                status = %status,
                error = %error_body,
                "SendGrid API error"
            );
            Err(EmailError::ProviderError(format!(
                "SendGrid returned {}: {}",
                status, error_body
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn test_config() -> EmailConfig {
        EmailConfig {
            enabled: true,
            provider: "console".to_string(),
            smtp_host: String::new(),
            smtp_port: 587,
            smtp_username: String::new(),
            smtp_password: String::new(),
            sendgrid_api_key: String::new(),
            sender_email: "test@example.com".to_string(),
            sender_name: "Test".to_string(),
            template_style: "html".to_string(),
        }
    }

    fn test_registration() -> Registration {
        Registration {
            id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            email: "alice@x.com".to_string(),
            name: "Alice".to_string(),
            phone: None,
            note: None,
            token: "reg_test-token".to_string(),
            qr_code: Some("data:image/png;base64,AAAA".to_string()),
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
            location: Some("Main Hall".to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_email_service_creation() {
        let service = EmailService::new(test_config());
        assert!(service.is_enabled());
    }

    #[test]
    fn test_email_service_disabled() {
        let mut config = test_config();
        config.enabled = false;
        let service = EmailService::new(config);
        assert!(!service.is_enabled());
    }

    #[tokio::test]
    async fn test_send_console_email() {
        let service = EmailService::new(test_config());

        let message = EmailMessage {
            to: "user@example.com".to_string(),
            to_name: Some("Test User".to_string()),
            subject: "Test Subject".to_string(),
            body_text: "Test body".to_string(),
            body_html: Some("<p>Test body</p>".to_string()),
        };

        assert!(service.send(message).await.is_ok());
    }

    #[tokio::test]
    async fn test_send_disabled_silently_succeeds() {
        let mut config = test_config();
        config.enabled = false;
        let service = EmailService::new(config);

        let message = EmailMessage {
            to: "user@example.com".to_string(),
            to_name: None,
            subject: "Test".to_string(),
            body_text: "Test".to_string(),
            body_html: None,
        };

        assert!(service.send(message).await.is_ok());
    }

    #[tokio::test]
    async fn test_send_registration_confirmation() {
        let service = EmailService::new(test_config());

        let result = service
            .send_registration_confirmation(
                &test_registration(),
                &test_event(),
                "http://localhost:8080/tickets/reg_test-token",
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_send_registration_confirmation_without_qr() {
        let service = EmailService::new(test_config());
        let mut registration = test_registration();
        registration.qr_code = None;

        let result = service
            .send_registration_confirmation(
                &registration,
                &test_event(),
                "http://localhost:8080/tickets/reg_test-token",
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_provider_fails() {
        let mut config = test_config();
        config.provider = "carrier-pigeon".to_string();
        let service = EmailService::new(config);

        let message = EmailMessage {
            to: "user@example.com".to_string(),
            to_name: None,
            subject: "Test".to_string(),
            body_text: "Test".to_string(),
            body_html: None,
        };

        assert!(service.send(message).await.is_err());
    }
}
