use dotenvy::dotenv;
use std::env;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} missing, it is required")]
    Missing(&'static str),
    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Credentials for one external HTTP integration.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub crm: ProviderConfig,
    pub invoicing: ProviderConfig,
    pub http_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenv().is_ok();

        let port = env::var("PORT")
            .map_err(|_| ConfigError::Missing("PORT"))?
            .parse()
            .map_err(|_| ConfigError::Invalid {
                name: "PORT",
                reason: "must be a valid u16 number".to_string(),
            })?;

        let database_url = env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let http_timeout = match optional("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|_| ConfigError::Invalid {
                name: "HTTP_TIMEOUT_SECS",
                reason: "must be a whole number of seconds".to_string(),
            })?,
            None => 10,
        };

        Ok(Self {
            host: optional("BIND_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            database_url,
            crm: ProviderConfig {
                base_url: optional("CRM_BASE_URL"),
                api_key: optional("CRM_API_TOKEN"),
            },
            invoicing: ProviderConfig {
                base_url: optional("INVOICING_BASE_URL"),
                api_key: optional("INVOICING_API_KEY"),
            },
            http_timeout: Duration::from_secs(http_timeout),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// Blank values count as unset.
fn optional(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_addr_uses_host_and_port() {
        let config = Config {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "postgres://localhost/fleet".to_string(),
            crm: ProviderConfig { base_url: None, api_key: None },
            invoicing: ProviderConfig { base_url: None, api_key: None },
            http_timeout: Duration::from_secs(10),
        };

        assert_eq!(config.addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_config_error_messages() {
        assert_eq!(ConfigError::Missing("PORT").to_string(), "PORT missing, it is required");
        let invalid = ConfigError::Invalid {
            name: "PORT",
            reason: "must be a valid u16 number".to_string(),
        };
        assert_eq!(invalid.to_string(), "PORT is invalid: must be a valid u16 number");
    }
}
