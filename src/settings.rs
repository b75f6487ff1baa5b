use std::time::Duration;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

use crate::error::BookmarkError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration, read from the process environment.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub hasura_endpoint: Option<String>,
    #[serde(default)]
    pub hasura_admin_secret: Option<String>,
    #[serde(default)]
    pub vimeo_key: Option<String>,
    pub request_timeout_secs: u64,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("request_timeout_secs", DEFAULT_TIMEOUT_SECS)?
            .add_source(Environment::default())
            .build()?;
        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        config.try_deserialize()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn endpoint(&self) -> Result<&str, BookmarkError> {
        non_empty(&self.hasura_endpoint).ok_or(BookmarkError::MissingConfig("HASURA_ENDPOINT"))
    }

    pub fn admin_secret(&self) -> Result<&str, BookmarkError> {
        non_empty(&self.hasura_admin_secret)
            .ok_or(BookmarkError::MissingConfig("HASURA_ADMIN_SECRET"))
    }

    pub fn vimeo_token(&self) -> Result<&str, BookmarkError> {
        non_empty(&self.vimeo_key).ok_or(BookmarkError::MissingConfig("VIMEO_KEY"))
    }

    /// Shared outbound client; every request inherits the configured timeout.
    pub fn http_client(&self) -> Result<reqwest::Client, BookmarkError> {
        Ok(reqwest::Client::builder().timeout(self.timeout()).build()?)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(pairs: &[(&str, &str)]) -> Settings {
        let mut builder = Config::builder()
            .set_default("request_timeout_secs", DEFAULT_TIMEOUT_SECS)
            .unwrap();
        for (k, v) in pairs {
            builder = builder.set_override(*k, *v).unwrap();
        }
        Settings::from_config(builder.build().unwrap()).unwrap()
    }

    #[test]
    fn defaults_timeout_when_unset() {
        let s = settings(&[("hasura_endpoint", "http://localhost:8080/v1/graphql")]);
        assert_eq!(s.timeout(), Duration::from_secs(30));
        assert_eq!(s.endpoint().unwrap(), "http://localhost:8080/v1/graphql");
    }

    #[test]
    fn timeout_override_parses_from_string() {
        let s = settings(&[("request_timeout_secs", "5")]);
        assert_eq!(s.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn blank_secret_is_missing() {
        let s = settings(&[("hasura_admin_secret", "  ")]);
        assert!(matches!(
            s.admin_secret(),
            Err(BookmarkError::MissingConfig("HASURA_ADMIN_SECRET"))
        ));
        assert!(s.vimeo_token().is_err());
    }
}
