//! Server configuration
//!
//! Resolves the API key and the service endpoint from the command line and
//! environment. An explicit endpoint always wins over the named environment.

use anyhow::{Result, bail};
use std::fmt;
use tracing::warn;

/// Named deployment of the pipeline service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Live,
    Test,
    Local,
}

impl Environment {
    /// Parse an environment name, falling back to `Live` for unknown values
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "live" => Self::Live,
            "test" => Self::Test,
            "local" => Self::Local,
            other => {
                warn!("Unknown environment '{}', using live", other);
                Self::Live
            }
        }
    }

    /// Endpoint of the pipeline service for this environment
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Live => "api.pipelog.dev:443",
            Self::Test => "api.test.pipelog.dev:443",
            Self::Local => "localhost:8080",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Live => "live",
            Self::Test => "test",
            Self::Local => "local",
        };
        f.write_str(name)
    }
}

/// Resolved configuration shared by the server and terminal commands
#[derive(Clone)]
pub struct Config {
    /// Caller credential forwarded as a bearer token
    pub api_key: String,

    /// Endpoint handed to the client (`host:port` or full URL)
    pub endpoint: String,

    /// Environment the endpoint was derived from
    pub environment: Environment,
}

impl Config {
    /// Build the configuration from raw option values
    ///
    /// Empty strings count as unset, so an exported-but-blank variable
    /// behaves like a missing one.
    pub fn resolve(
        api_key: Option<String>,
        endpoint: Option<String>,
        environment: Option<&str>,
    ) -> Result<Self> {
        let environment = environment.map(Environment::parse).unwrap_or_default();

        let endpoint = endpoint
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| environment.endpoint().to_string());

        let config = Self {
            api_key: api_key.unwrap_or_default().trim().to_string(),
            endpoint,
            environment,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates configuration values
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            bail!("An API key is required: pass --api-key or set PIPELOG_API_KEY");
        }

        if self.endpoint.is_empty() {
            bail!("Endpoint cannot be empty");
        }

        Ok(())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("environment", &self.environment)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parse() {
        assert_eq!(Environment::parse("live"), Environment::Live);
        assert_eq!(Environment::parse("TEST"), Environment::Test);
        assert_eq!(Environment::parse(" local "), Environment::Local);
        assert_eq!(Environment::parse("staging"), Environment::Live);
        assert_eq!(Environment::parse(""), Environment::Live);
    }

    #[test]
    fn test_defaults_to_live_endpoint() {
        let config = Config::resolve(Some("key".to_string()), None, None).unwrap();
        assert_eq!(config.environment, Environment::Live);
        assert_eq!(config.endpoint, "api.pipelog.dev:443");
    }

    #[test]
    fn test_environment_selects_endpoint() {
        let config = Config::resolve(Some("key".to_string()), None, Some("local")).unwrap();
        assert_eq!(config.endpoint, "localhost:8080");

        let config = Config::resolve(Some("key".to_string()), None, Some("test")).unwrap();
        assert_eq!(config.endpoint, "api.test.pipelog.dev:443");
    }

    #[test]
    fn test_endpoint_override_wins() {
        let config = Config::resolve(
            Some("key".to_string()),
            Some("http://127.0.0.1:9000".to_string()),
            Some("test"),
        )
        .unwrap();
        assert_eq!(config.endpoint, "http://127.0.0.1:9000");
        assert_eq!(config.environment, Environment::Test);
    }

    #[test]
    fn test_blank_endpoint_is_ignored() {
        let config =
            Config::resolve(Some("key".to_string()), Some("  ".to_string()), Some("local"))
                .unwrap();
        assert_eq!(config.endpoint, "localhost:8080");
    }

    #[test]
    fn test_missing_api_key_is_rejected() {
        assert!(Config::resolve(None, None, None).is_err());
        assert!(Config::resolve(Some("   ".to_string()), None, None).is_err());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config::resolve(Some("secret-token".to_string()), None, None).unwrap();
        assert!(!format!("{:?}", config).contains("secret-token"));
    }
}
