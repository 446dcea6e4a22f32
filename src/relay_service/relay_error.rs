use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Failure stages of a single relayed request. Each maps to one fixed,
/// caller-visible message; the underlying cause is only logged.
pub enum RelayError {
  RequestBuild,
  Dispatch,
  ResponseRead,
}

impl RelayError {
  pub fn message(&self) -> &'static str {
    match self {
      RelayError::RequestBuild => "Failed to build a request",
      RelayError::Dispatch => "Request failed",
      RelayError::ResponseRead => "Failed to read response body",
    }
  }
}

impl Display for RelayError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.message())
  }
}

#[derive(Serialize, Deserialize, PartialEq, Debug)]
pub struct ErrorEnvelope {
  pub error: String,
}

impl From<RelayError> for ErrorEnvelope {
  fn from(err: RelayError) -> Self {
    ErrorEnvelope {
      error: err.message().into(),
    }
  }
}
