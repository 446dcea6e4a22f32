mod http_client;
mod relay_config;
mod relay_service;
mod std_logger;

use std::fs::File;
use std::io::{ErrorKind, Result};
use std::sync::Arc;

use actix_web::{App, HttpServer};
use clap::Parser;
use log::info;

use crate::http_client::HttpClientConfig;
use crate::relay_config::RelayConfig;
use crate::relay_service::relay_factory::RelayServiceFactory;
use crate::relay_service::RelayTarget;

const DEFAULT_BIND: &str = "0.0.0.0";
const DEFAULT_WORKER_COUNT: usize = 4;

#[derive(Parser, Debug)]
#[command(
    name = "http-relay",
    about = "Forwards inbound HTTP requests onto a fixed upstream target"
)]
struct CliArgs {
    /// Path to the YAML configuration file.
    #[arg(short, long, default_value = "config.yml")]
    config: String,
}

#[actix_web::main]
async fn main() -> Result<()> {
    std_logger::init().map_err(|err| std::io::Error::new(ErrorKind::Other, err))?;

    let args = CliArgs::parse();
    let config_fd = File::open(&args.config)?;
    let config = RelayConfig::load_from_file(&config_fd)
        .map_err(|err| std::io::Error::new(ErrorKind::InvalidData, err))?;

    let http_client = HttpClientConfig::from(&config)
        .to_client()
        .map_err(|err| std::io::Error::new(ErrorKind::Other, err))?;

    let target = Arc::new(RelayTarget::from(&config));
    let bind = config.bind.clone().unwrap_or_else(|| DEFAULT_BIND.into());
    let workers = config.workers.unwrap_or(DEFAULT_WORKER_COUNT);

    info!(
        "Listening on '{}:{}', relaying to '{}'.",
        bind, config.port, target.base_url
    );

    HttpServer::new(move || {
        App::new().default_service(RelayServiceFactory::create(
            http_client.clone(),
            target.clone(),
        ))
    })
    .workers(workers)
    .bind((bind, config.port))?
    .run()
    .await
}
