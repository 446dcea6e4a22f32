use crate::relay_config::RelayConfig;

pub mod relay_error;
pub mod relay_factory;
pub mod relay_route_service;

/// Fixed upstream every inbound request is rewritten onto. The inbound
/// request-URI is appended verbatim, so the base url is kept as configured
/// without any normalization.
pub struct RelayTarget {
  pub base_url: Box<str>,
}

impl From<&RelayConfig> for RelayTarget {
  fn from(config: &RelayConfig) -> Self {
    RelayTarget {
      base_url: Box::from(config.target_url.as_str()),
    }
  }
}
