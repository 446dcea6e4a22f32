use std::time::Duration;

use reqwest::Client;

use crate::relay_config::{ProxySettings, RelayConfig};

pub struct HttpClientConfig {
  pub proxy_url: Option<String>,
  pub timeout: Option<Duration>,
}

impl HttpClientConfig {
  pub fn to_client(self) -> Result<Client, reqwest::Error> {
    let HttpClientConfig { proxy_url, timeout } = self;

    // Outbound calls stay on HTTP/1.1; no h2 negotiation with proxies.
    let mut client_builder = reqwest::ClientBuilder::new().http1_only();

    if let Some(proxy_url) = proxy_url {
      let proxy = reqwest::Proxy::all(proxy_url)?;
      client_builder = client_builder.proxy(proxy);
    }

    if let Some(timeout) = timeout {
      client_builder = client_builder.timeout(timeout);
    }

    client_builder.build()
  }
}

impl From<&RelayConfig> for HttpClientConfig {
  fn from(config: &RelayConfig) -> Self {
    let timeout = if config.connection_timeout > 0 {
      Some(Duration::from_secs(config.connection_timeout))
    } else {
      None
    };

    HttpClientConfig {
      proxy_url: effective_proxy_url(&config.proxy),
      timeout,
    }
  }
}

/// Proxy url with the configured credentials spliced in after the scheme
/// separator. Credentials are only applied when both parts are non-empty.
pub fn effective_proxy_url(proxy: &ProxySettings) -> Option<String> {
  if proxy.url.is_empty() {
    return None;
  }

  if proxy.username.is_empty() || proxy.password.is_empty() {
    return Some(proxy.url.clone());
  }

  match proxy.url.split_once("://") {
    Some((scheme, rest)) => Some(format!(
      "{}://{}:{}@{}",
      scheme, proxy.username, proxy.password, rest
    )),
    None => Some(proxy.url.clone()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn settings(url: &str, username: &str, password: &str) -> ProxySettings {
    ProxySettings {
      url: url.into(),
      username: username.into(),
      password: password.into(),
    }
  }

  #[test]
  fn injects_credentials_after_scheme() {
    let proxy = settings("http://proxy.local:8080", "u", "p");

    assert_eq!(
      effective_proxy_url(&proxy).as_deref(),
      Some("http://u:p@proxy.local:8080")
    );
  }

  #[test]
  fn keeps_url_unmodified_when_either_credential_is_empty() {
    let no_pass = settings("http://proxy.local:8080", "u", "");
    let no_user = settings("http://proxy.local:8080", "", "p");

    assert_eq!(
      effective_proxy_url(&no_pass).as_deref(),
      Some("http://proxy.local:8080")
    );
    assert_eq!(
      effective_proxy_url(&no_user).as_deref(),
      Some("http://proxy.local:8080")
    );
  }

  #[test]
  fn empty_url_means_no_proxy() {
    let proxy = settings("", "u", "p");

    assert_eq!(effective_proxy_url(&proxy), None);
  }

  #[test]
  fn builds_client_with_authenticated_proxy() {
    let client = HttpClientConfig {
      proxy_url: Some("http://u:p@proxy.local:8080".into()),
      timeout: Some(Duration::from_secs(30)),
    }
    .to_client();

    assert!(client.is_ok());
  }

  #[test]
  fn rejects_malformed_proxy_url() {
    let client = HttpClientConfig {
      proxy_url: Some("::not-a-url::".into()),
      timeout: None,
    }
    .to_client();

    assert!(client.is_err());
  }
}
