use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::Error;
use futures_core::future::LocalBoxFuture;
use reqwest::Client;

use crate::relay_service::relay_route_service::RelayRouteService;
use crate::relay_service::RelayTarget;

pub struct RelayServiceFactory {
  pub target: Arc<RelayTarget>,
  pub http_client: Client,
}

impl ServiceFactory<ServiceRequest> for RelayServiceFactory {
  type Response = ServiceResponse;
  type Error = Error;
  type Config = ();
  type Service = RelayRouteService;
  type InitError = ();
  type Future = LocalBoxFuture<'static, Result<Self::Service, Self::InitError>>;

  fn new_service(&self, _: Self::Config) -> Self::Future {
    let service = RelayRouteService {
      target: self.target.clone(),
      http_client: self.http_client.clone(),
    };

    Box::pin(async move { Ok(service) })
  }
}

impl RelayServiceFactory {
  pub fn create(http_client: Client, target: Arc<RelayTarget>) -> Self {
    Self { target, http_client }
  }
}
