pub mod dto;
pub mod handlers;

use actix_web::{Scope, web};

/// The full route table, shared by the server binary and the tests.
pub fn api_scope() -> Scope {
    web::scope("/api")
        .route("/health", web::get().to(handlers::health::health))
        .service(handlers::post::search_posts)
        .service(handlers::post::get_posts)
        .service(handlers::post::create_post)
        .service(handlers::post::update_post)
        .service(handlers::post::delete_post)
}
