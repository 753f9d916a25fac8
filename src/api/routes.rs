// src/api/routes.rs
use actix_web::web;

use super::handlers;
use super::middleware::rate_limit::RequestBudget;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api").service(
            web::scope("/password")
                .wrap(RequestBudget)
                .route("/generate", web::post().to(handlers::generator::generate_password))
                .route(
                    "/generate-multiple",
                    web::post().to(handlers::generator::generate_multiple),
                )
                .route("/validate", web::post().to(handlers::analyzer::validate_password))
                .route("/config", web::get().to(handlers::config::get_configuration))
                .route("", web::get().to(handlers::generator::generate_from_query)),
        ),
    );
}
