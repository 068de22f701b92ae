mod api;
mod config;
mod database;
mod jira;
mod models;
mod services;
mod state;
mod utils;

#[cfg(test)]
mod testutils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = config::AppConfig::from_env()
        .unwrap_or_else(|e| panic!("Invalid configuration: {}", e));

    log::info!("🚀 Starting Estimation Service...");
    log::info!("🧭 Jira: {}", config.jira.url);
    for (name, field_id) in config.jira.custom_fields.iter() {
        log::info!("🏷️  Field mapping: {} -> {}", name, field_id);
    }

    let db = database::MongoDB::new(&config.mongo)
        .await
        .expect("Failed to connect to MongoDB");
    log::info!("✅ MongoDB connected successfully");

    let tracker = jira::JiraClient::new(&config.jira).expect("Failed to build Jira client");

    let host = config.host.clone();
    let port = config.port;
    let state = web::Data::new(state::AppState::new(config, Arc::new(tracker), Arc::new(db)));

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);

    HttpServer::new(move || {
        // The web client is served from arbitrary origins
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi)
            )
            .configure(api::configure)
            .default_service(web::to(api::not_found))
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
