//! # Messenger Relay
//!
//! Bridges Messenger page webhooks to the Send API: every inbound message or
//! postback gets one reply. Configures logging, the Send API client and the
//! route handling.

pub mod config;
pub mod consts;
pub mod front;
pub mod logger;
pub mod webhook;

use log::info;
use ntex::web;
use std::sync::Arc;

#[ntex::main]
async fn main() -> anyhow::Result<()> {
    // Initialize configuration, aborting before serving if a secret is missing
    let app_config = config::AppConfig::load()?;

    logger::setup_simple_logger(app_config.log_level_filter()?)?;

    let sender = webhook::messenger::client::GraphApiClient::new(&app_config);
    info!("Send API endpoint: {}", sender.endpoint());

    let app_state = front::AppState {
        config: Arc::new(app_config),
        sender: Arc::new(sender),
    };

    configure_and_run_server(app_state).await
}

/// Configures and starts the web server
async fn configure_and_run_server(app_state: front::AppState) -> anyhow::Result<()> {
    let server_addr = (
        app_state.config.web_server_host.clone(),
        app_state.config.web_server_port,
    );
    info!("Listening on {}:{}", server_addr.0, server_addr.1);

    web::server(move || {
        web::App::new()
            .wrap(web::middleware::Logger::default())
            .wrap(web::middleware::Compress::default())
            .state(app_state.clone())
            .configure(webhook::routes::messenger)
            .service(front::server::index)
            .default_service(web::route().to(front::server::serve_not_found))
    })
    .bind(server_addr)?
    .run()
    .await
    .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
