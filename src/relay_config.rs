use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::fs::File;

use reqwest::Url;

use crate::http_client::effective_proxy_url;

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone, Default)]
pub struct ProxySettings {
  #[serde(default)]
  pub url: String,
  #[serde(default)]
  pub username: String,
  #[serde(default)]
  pub password: String,
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RelayConfig {
  pub port: u16,
  pub target_url: String,
  /// Outbound request deadline in seconds. Zero leaves the client default.
  #[serde(default)]
  pub connection_timeout: u64,
  #[serde(default)]
  pub bind: Option<String>,
  #[serde(default)]
  pub workers: Option<usize>,
  #[serde(default)]
  pub proxy: ProxySettings,
}

#[derive(Debug)]
pub enum ConfigError {
  Parse(serde_yaml::Error),
  InvalidTargetUrl(String),
  InvalidProxyUrl(String),
}

impl RelayConfig {
  pub fn load_from_file(file: &File) -> Result<RelayConfig, ConfigError> {
    let config: RelayConfig = serde_yaml::from_reader(file).map_err(ConfigError::Parse)?;
    config.validate()?;

    Ok(config)
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    Url::parse(&self.target_url).map_err(|err| ConfigError::InvalidTargetUrl(err.to_string()))?;

    if let Some(proxy_url) = effective_proxy_url(&self.proxy) {
      Url::parse(&proxy_url).map_err(|err| ConfigError::InvalidProxyUrl(err.to_string()))?;
    }

    Ok(())
  }
}

impl Display for ConfigError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      ConfigError::Parse(err) => write!(f, "Unable to parse configuration: {}", err),
      ConfigError::InvalidTargetUrl(err) => write!(f, "Invalid target url: {}", err),
      ConfigError::InvalidProxyUrl(err) => write!(f, "Invalid proxy url: {}", err),
    }
  }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_full_document() {
    let document = r#"
port: 8080
targetUrl: "https://api.example.com"
connectionTimeout: 30
proxy:
  url: "http://proxy.local:8080"
  username: "u"
  password: "p"
"#;

    let config: RelayConfig = serde_yaml::from_str(document).unwrap();

    assert_eq!(config.port, 8080);
    assert_eq!(config.target_url, "https://api.example.com");
    assert_eq!(config.connection_timeout, 30);
    assert_eq!(config.proxy.url, "http://proxy.local:8080");
    assert_eq!(config.proxy.username, "u");
    assert_eq!(config.proxy.password, "p");
    assert!(config.validate().is_ok());
  }

  #[test]
  fn missing_optionals_fall_back_to_defaults() {
    let document = r#"
port: 9000
targetUrl: "http://localhost:3000"
"#;

    let config: RelayConfig = serde_yaml::from_str(document).unwrap();

    assert_eq!(config.connection_timeout, 0);
    assert_eq!(config.bind, None);
    assert_eq!(config.workers, None);
    assert_eq!(config.proxy, ProxySettings::default());
    assert!(config.validate().is_ok());
  }

  #[test]
  fn rejects_malformed_target_url() {
    let document = r#"
port: 8080
targetUrl: "not a url"
"#;

    let config: RelayConfig = serde_yaml::from_str(document).unwrap();

    assert!(matches!(
      config.validate(),
      Err(ConfigError::InvalidTargetUrl(_))
    ));
  }

  #[test]
  fn rejects_malformed_proxy_url() {
    let document = r#"
port: 8080
targetUrl: "http://localhost:3000"
proxy:
  url: "http//missing-scheme-separator"
  username: "u"
  password: "p"
"#;

    let config: RelayConfig = serde_yaml::from_str(document).unwrap();

    assert!(matches!(
      config.validate(),
      Err(ConfigError::InvalidProxyUrl(_))
    ));
  }
}
