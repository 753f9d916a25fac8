// src/api/mod.rs
use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use crate::core::config::ServerConfig;
use self::middleware::rate_limit::RateLimiter;
use self::types::ErrorResponse;

// This will hold our API documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Generator endpoints
        crate::api::handlers::generator::generate_password,
        crate::api::handlers::generator::generate_multiple,
        crate::api::handlers::generator::generate_from_query,

        // Analyzer endpoint
        crate::api::handlers::analyzer::validate_password,

        // Configuration endpoint
        crate::api::handlers::config::get_configuration
    ),
    components(
        schemas(
            // Request/response schemas
            crate::api::types::GenerateRequest,
            crate::api::types::GenerateManyRequest,
            crate::api::types::ValidateRequest,
            crate::api::types::GenerateResponse,
            crate::api::types::GenerateManyResponse,
            crate::api::types::ValidateResponse,
            crate::api::types::ErrorResponse,
            crate::api::types::RateLimitResponse,

            // Configuration schemas
            crate::api::types::ConfigurationResponse,
            crate::api::types::Configuration,
            crate::api::types::LengthBounds,
            crate::api::types::CountBounds,
            crate::api::types::ExcludeBounds,
            crate::api::types::Charsets,
            crate::api::types::OptionDefaults,
            crate::api::types::OptionSpec,

            // Domain models
            crate::models::GenerationOptions,
            crate::models::StrengthReport,
            crate::models::StrengthLevel,
            crate::models::WeakPattern,
            crate::models::Composition,
            crate::models::Analysis,
            crate::models::Security
        )
    ),
    tags(
        (name = "Generator", description = "Password generation endpoints"),
        (name = "Analyzer", description = "Password strength analysis endpoints"),
        (name = "Configuration", description = "Service limits and defaults")
    ),
    info(
        title = "Passforge API",
        version = "0.1.0",
        description = "Password generation and strength analysis API",
        license(name = "MIT")
    )
)]
struct ApiDoc;

pub async fn start_server(config: ServerConfig) -> std::io::Result<()> {
    log::info!(
        "Starting passforge API server on {}:{}",
        config.bind_address,
        config.port
    );

    let limiter = web::Data::new(RateLimiter::new(config.rate_limit.clone()));
    let bind = (config.bind_address.clone(), config.port);
    let cors_enabled = config.cors_enabled;

    HttpServer::new(move || {
        let cors = if cors_enabled {
            Cors::default()
                .allow_any_origin()
                .allowed_methods(vec!["GET", "POST"])
                .allowed_headers(vec!["Content-Type", "Accept"])
                .max_age(3600)
        } else {
            Cors::default()
        };

        // Malformed request bodies get the same error envelope as
        // everything else instead of the framework default.
        let json_config = web::JsonConfig::default().error_handler(|err, _req| {
            let message = err.to_string();
            actix_web::error::InternalError::from_response(err, ErrorResponse::bad_request(message))
                .into()
        });

        App::new()
            .wrap(cors)
            .app_data(limiter.clone())
            .app_data(json_config)
            // Add Swagger UI
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
            // Add Redoc
            .service(Redoc::with_url("/redoc", ApiDoc::openapi()))
            .configure(routes::configure_routes)
    })
    .bind(bind)?
    .run()
    .await
}

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod types;
pub mod utils;
