use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
    /// Email notification configuration
    #[serde(default)]
    pub email: EmailConfig,
    /// SMS notification configuration
    #[serde(default)]
    pub sms: SmsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Base URL used in notification links and QR check-in URLs.
    #[serde(default = "default_app_base_url")]
    pub app_base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Whether email sending is enabled
    #[serde(default)]
    pub enabled: bool,

    /// Email provider: smtp, sendgrid, or console (for development)
    #[serde(default = "default_email_provider")]
    pub provider: String,

    /// SMTP server host (for smtp provider)
    #[serde(default)]
    pub smtp_host: String,

    /// SMTP server port (for smtp provider)
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// SMTP username (for smtp provider)
    #[serde(default)]
    pub smtp_username: String,

    /// SMTP password (for smtp provider)
    #[serde(default)]
    pub smtp_password: String,

    /// SendGrid API key (for sendgrid provider)
    #[serde(default)]
    pub sendgrid_api_key: String,

    /// Sender email address
    #[serde(default = "default_sender_email")]
    pub sender_email: String,

    /// Sender display name
    #[serde(default = "default_sender_name")]
    pub sender_name: String,

    /// Whether to render HTML bodies alongside plain text
    #[serde(default = "default_template_style")]
    pub template_style: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: default_email_provider(),
            smtp_host: String::new(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            sendgrid_api_key: String::new(),
            sender_email: default_sender_email(),
            sender_name: default_sender_name(),
            template_style: default_template_style(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SmsConfig {
    /// Whether SMS sending is enabled
    #[serde(default)]
    pub enabled: bool,

    /// SMS provider: http (gateway API) or console (for development)
    #[serde(default = "default_sms_provider")]
    pub provider: String,

    /// Gateway API base URL (for http provider)
    #[serde(default)]
    pub api_url: String,

    /// Gateway API key (for http provider)
    #[serde(default)]
    pub api_key: String,

    /// Sender ID displayed on recipient phones
    #[serde(default = "default_sms_sender_id")]
    pub sender_id: String,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: default_sms_provider(),
            api_url: String::new(),
            api_key: String::new(),
            sender_id: default_sms_sender_id(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_app_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_idle_timeout() -> u64 {
    600
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_email_provider() -> String {
    "console".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_sender_email() -> String {
    "noreply@eventmanager.local".to_string()
}

fn default_sender_name() -> String {
    "Event Manager".to_string()
}

fn default_template_style() -> String {
    "html".to_string()
}

fn default_sms_provider() -> String {
    "console".to_string()
}

fn default_sms_sender_id() -> String {
    "EventMgr".to_string()
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with EM__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("EM").separator("__"))
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Validate configuration values that have no sensible defaults.
    pub fn validate(&self) -> Result<(), String> {
        if self.database.url.is_empty() {
            return Err("database.url must be set".to_string());
        }
        if self.server.request_timeout_secs == 0 {
            return Err("server.request_timeout_secs must be positive".to_string());
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .expect("Invalid socket address")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                request_timeout_secs: 30,
                app_base_url: "http://localhost:8080".to_string(),
            },
            database: DatabaseConfig {
                url: "postgres://localhost/test".to_string(),
                max_connections: 5,
                min_connections: 1,
                connect_timeout_secs: 10,
                idle_timeout_secs: 600,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
            security: SecurityConfig {
                cors_origins: vec![],
            },
            email: EmailConfig::default(),
            sms: SmsConfig::default(),
        }
    }

    #[test]
    fn test_validate_accepts_minimal_config() {
        assert!(minimal_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_database_url() {
        let mut config = minimal_config();
        config.database.url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = minimal_config();
        config.server.request_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_socket_addr() {
        let config = minimal_config();
        assert_eq!(config.socket_addr().port(), 8080);
    }

    #[test]
    fn test_email_config_defaults_disabled() {
        assert!(!EmailConfig::default().enabled);
        assert_eq!(EmailConfig::default().provider, "console");
    }

    #[test]
    fn test_sms_config_defaults_disabled() {
        assert!(!SmsConfig::default().enabled);
        assert_eq!(SmsConfig::default().provider, "console");
    }
}
