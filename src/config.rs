//! Configuration management

use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub attendance: AttendanceConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub http_port: u16,
    /// Origin allowed for CORS (e.g. "https://hr.example.com"); "*" allows any
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_cors_origin() -> String {
    "*".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Secret used to sign session tokens
    pub token_secret: String,
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
}

fn default_token_ttl_hours() -> i64 {
    12
}

/// Biometric access-control devices polled for the attendance feed.
/// One entry per device serial; all devices share the gateway endpoint
/// and API key.
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceConfig {
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub device_serials: Vec<String>,
    #[serde(default = "default_device_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_device_timeout_secs() -> u64 {
    5
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = "config.toml";

        let builder = config::Config::builder()
            .add_source(config::File::with_name(config_path))
            .add_source(config::Environment::with_prefix("STAFFOPS").separator("__"));

        let settings = builder.build()?;
        let config: Config = settings.try_deserialize()?;

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        // Validate server config
        if self.server.http_port == 0 {
            anyhow::bail!("Invalid http_port: 0 is not allowed");
        }
        if self.server.host.is_empty() {
            anyhow::bail!("Server host cannot be empty");
        }

        // Validate database config
        if self.database.url.is_empty() {
            anyhow::bail!("Database URL cannot be empty");
        }
        if self.database.max_connections == 0 {
            anyhow::bail!("database.max_connections must be at least 1");
        }

        // Validate auth config
        if self.auth.token_secret.trim().is_empty() {
            anyhow::bail!("auth.token_secret cannot be empty");
        }
        if self.auth.token_ttl_hours <= 0 {
            anyhow::bail!("auth.token_ttl_hours must be positive");
        }

        // Validate attendance config (devices are optional, but a configured
        // device list needs a gateway endpoint and key to be reachable)
        if !self.attendance.device_serials.is_empty() {
            if self.attendance.endpoint.is_empty() {
                anyhow::bail!("attendance.endpoint is required when device_serials are configured");
            }
            if self.attendance.api_key.is_empty() {
                anyhow::bail!("attendance.api_key is required when device_serials are configured");
            }
        }
        if self.attendance.timeout_secs == 0 {
            anyhow::bail!("attendance.timeout_secs must be at least 1");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> Config {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                http_port: 8080,
                cors_origin: "*".to_string(),
            },
            database: DatabaseConfig {
                url: "postgres://localhost/staffops".to_string(),
                max_connections: 10,
            },
            auth: AuthConfig {
                token_secret: "test-secret".to_string(),
                token_ttl_hours: 12,
            },
            attendance: AttendanceConfig {
                endpoint: "http://devices.local".to_string(),
                api_key: "key".to_string(),
                device_serials: vec!["AX-100".to_string()],
                timeout_secs: 5,
            },
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(sample_config().validate().is_ok());
    }

    #[test]
    fn rejects_zero_port() {
        let mut config = sample_config();
        config.server.http_port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_empty_database_url() {
        let mut config = sample_config();
        config.database.url.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_blank_token_secret() {
        let mut config = sample_config();
        config.auth.token_secret = "   ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn devices_require_endpoint_and_key() {
        let mut config = sample_config();
        config.attendance.endpoint.clear();
        assert!(config.validate().is_err());

        let mut config = sample_config();
        config.attendance.device_serials.clear();
        config.attendance.endpoint.clear();
        config.attendance.api_key.clear();
        assert!(config.validate().is_ok());
    }
}
