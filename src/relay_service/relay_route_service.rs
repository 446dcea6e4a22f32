use std::sync::Arc;

use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse};
use actix_web::http::header::ContentType;
use actix_web::{dev, HttpRequest, HttpResponse};
use bytes::Bytes;
use futures_core::future::LocalBoxFuture;
use futures_core::Stream;
use futures_util::StreamExt;
use log::{error, info};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Url};

use crate::relay_service::relay_error::{ErrorEnvelope, RelayError};
use crate::relay_service::RelayTarget;

pub struct RelayRouteService {
  pub(super) target: Arc<RelayTarget>,
  pub(super) http_client: Client,
}

impl Service<ServiceRequest> for RelayRouteService {
  type Response = ServiceResponse;
  type Error = actix_web::Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  dev::always_ready!();

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let (http_request, payload) = req.into_parts();
    let http_client = self.http_client.clone();
    let target = self.target.clone();

    Box::pin(async move {
      let response = RelayRouteService::exec(http_client, target, &http_request, payload).await;
      Ok(ServiceResponse::new(http_request, response))
    })
  }
}

impl RelayRouteService {
  async fn exec(
    client: Client,
    target: Arc<RelayTarget>,
    inbound: &HttpRequest,
    payload: Payload,
  ) -> HttpResponse {
    let outbound = match RelayRouteService::build_outbound(&client, &target, inbound, payload).await
    {
      Ok(builder) => builder,
      Err(err) => return RelayRouteService::error_response(err),
    };

    let upstream_response = match outbound.send().await {
      Ok(response) => response,
      Err(err) => {
        error!("Upstream request failed {}", err);
        return RelayRouteService::error_response(RelayError::Dispatch);
      }
    };

    // Consuming the response drains and releases the upstream connection on
    // both arms.
    match upstream_response.bytes().await {
      Ok(body) => HttpResponse::Ok().content_type(ContentType::json()).body(body),
      Err(err) => {
        error!("Reading upstream body failed {}", err);
        RelayRouteService::error_response(RelayError::ResponseRead)
      }
    }
  }

  async fn build_outbound(
    client: &Client,
    target: &RelayTarget,
    inbound: &HttpRequest,
    mut payload: Payload,
  ) -> Result<RequestBuilder, RelayError> {
    // Path and query are appended verbatim, no normalization.
    let outbound_url = format!("{}{}", target.base_url, inbound.uri());
    let url = Url::parse(&outbound_url).map_err(|err| {
      error!("Invalid outbound url '{}': {}", outbound_url, err);
      RelayError::RequestBuild
    })?;

    let method = Method::from_bytes(inbound.method().as_str().as_bytes()).map_err(|err| {
      error!("Invalid outbound method '{}': {}", inbound.method(), err);
      RelayError::RequestBuild
    })?;

    let (size, _) = payload.size_hint();
    let mut body_buffer: Vec<u8> = Vec::with_capacity(size);

    while let Some(chunk) = payload.next().await {
      let bytes: Bytes = chunk.map_err(|err| {
        error!("Reading inbound body failed {}", err);
        RelayError::RequestBuild
      })?;

      body_buffer.extend_from_slice(&bytes);
    }

    info!("Forwarding to '{}'.", url);

    Ok(
      client
        .request(method, url)
        .header(CONTENT_TYPE, "application/json")
        .header(ACCEPT, "application/json")
        .body(body_buffer),
    )
  }

  // Failures keep the default 200 status; callers tell them apart from
  // upstream payloads by the envelope shape alone.
  fn error_response(err: RelayError) -> HttpResponse {
    HttpResponse::Ok().json(ErrorEnvelope::from(err))
  }
}
