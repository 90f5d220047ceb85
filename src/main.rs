use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use blog_api::application::post_service::PostService;
use blog_api::data::post_repository::MemoryPostRepository;
use blog_api::infrastructure::config::AppConfig;
use blog_api::infrastructure::logging::init_logging;
use blog_api::presentation::api_scope;
use tracing::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_logging();

    let config = AppConfig::from_env().expect("invalid configuration");

    let post_repo = Arc::new(MemoryPostRepository::seeded());
    let post_service = PostService::new(Arc::clone(&post_repo));

    let config_data = config.clone();

    info!(host = %config.host, port = config.port, "HTTP server starting");

    HttpServer::new(move || {
        let cors = build_cors(&config_data);
        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(post_service.clone()))
            .service(api_scope())
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

fn build_cors(config: &AppConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![actix_web::http::header::CONTENT_TYPE])
        .max_age(3600);

    if config.cors_origins.iter().any(|origin| origin == "*") {
        cors = cors.allow_any_origin().send_wildcard();
    } else {
        for origin in &config.cors_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}
