mod credential;
mod handlers;
mod keyword_payload;
mod keyword_response;
mod manual_request;
mod page;

use prospector::{OpenAiService, PageService, ProspectService, ProspectorConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Initialize environment variables and logging
    dotenv::dotenv().ok();
    env_logger::init();

    let config = ProspectorConfig::from_env();

    let page_service = match PageService::new() {
        Ok(page_service) => Arc::new(page_service),
        Err(e) => {
            eprintln!("Failed to initialize page fetcher: {:#}", e);
            std::process::exit(1);
        }
    };
    let openai_service = Arc::new(OpenAiService::new(&config));
    log::info!(
        "Using model {} at {}",
        openai_service.model(),
        config.openai_base_url
    );

    let service = Arc::new(ProspectService::new(page_service, openai_service));
    let app = handlers::router(service);

    let listener = match tokio::net::TcpListener::bind(&config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("Failed to bind {}: {}", config.bind_addr, e);
            std::process::exit(1);
        }
    };

    match listener.local_addr() {
        Ok(addr) => log::info!("Listening on {}", addr),
        Err(e) => log::warn!("Listening on unknown address: {}", e),
    }

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
