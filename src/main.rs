//! Hepascan liver disease screening service
//!
//! Main entry point for the Hepascan web application.

use actix_files as fs;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use hepascan::api::{self, AppState};
use hepascan::config;
use hepascan::core::inference::ModelGateway;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Initialize logger
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = config::load_config().context("failed to load configuration")?;

    // Both classifiers must be loadable before the server accepts traffic.
    let gateway = ModelGateway::load(
        &config.artifacts.binary_model,
        &config.artifacts.multiclass_model,
    )
    .context("failed to load model artifacts")?;
    info!(
        binary = %config.artifacts.binary_model.display(),
        multiclass = %config.artifacts.multiclass_model.display(),
        "model artifacts ready"
    );

    let state = web::Data::new(AppState::new(gateway));
    let assets_dir = config.assets.dir.clone();

    info!(host = %config.server.host, port = config.server.port, "starting http server");
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(TracingLogger::default())
            .configure(api::configure)
            .service(fs::Files::new("/assets", assets_dir.clone()))
    })
    // One worker: interactions re-evaluate a single shared session in order.
    .workers(1)
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await?;

    Ok(())
}
