// src/api/handlers/generator.rs
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use log::{debug, warn};

use crate::api::middleware::rate_limit::{RateLimiter, RETRY_AFTER_SECONDS};
use crate::api::types::{
    ErrorResponse, GenerateManyRequest, GenerateManyResponse, GenerateQuery, GenerateRequest,
    GenerateResponse, RateLimitResponse, ValidationErrors,
};
use crate::api::utils::client_ip;
use crate::core::generator::{
    self, COUNT_MAX, COUNT_MIN, EXCLUDE_MAX_LENGTH, LENGTH_MAX, LENGTH_MIN,
};
use crate::models::GenerationOptions;

/// Upper bound on count * length for one batch request.
pub const BATCH_CHARS_MAX: usize = 10_000;

/// Generate a secure password
///
/// Generates one password from the requested composition options.
#[utoipa::path(
    post,
    path = "/api/password/generate",
    tag = "Generator",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Generated password", body = GenerateResponse),
        (status = 400, description = "Generation failed", body = ErrorResponse),
        (status = 422, description = "Invalid parameters", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = RateLimitResponse)
    )
)]
pub async fn generate_password(
    req: HttpRequest,
    body: web::Json<GenerateRequest>,
) -> impl Responder {
    respond_single(&req, body.length(), body.options())
}

/// Generate a password from query parameters
///
/// Same contract as the JSON endpoint, using camelCase query parameter
/// names; symbols are off unless requested.
#[utoipa::path(
    get,
    path = "/api/password",
    tag = "Generator",
    params(GenerateQuery),
    responses(
        (status = 200, description = "Generated password", body = GenerateResponse),
        (status = 400, description = "Generation failed", body = ErrorResponse),
        (status = 422, description = "Invalid parameters", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = RateLimitResponse)
    )
)]
pub async fn generate_from_query(
    req: HttpRequest,
    query: web::Query<GenerateQuery>,
) -> impl Responder {
    respond_single(&req, query.length(), query.options())
}

/// Generate multiple secure passwords
///
/// Generates up to 100 passwords in one call; a single failure aborts the
/// whole batch.
#[utoipa::path(
    post,
    path = "/api/password/generate-multiple",
    tag = "Generator",
    request_body = GenerateManyRequest,
    responses(
        (status = 200, description = "Generated passwords", body = GenerateManyResponse),
        (status = 400, description = "Generation failed", body = ErrorResponse),
        (status = 422, description = "Invalid parameters", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = RateLimitResponse)
    )
)]
pub async fn generate_multiple(
    req: HttpRequest,
    body: web::Json<GenerateManyRequest>,
) -> impl Responder {
    let count = body.count();
    let length = body.generate.length();
    let options = body.generate.options();

    let mut errors = validate_generation(length, &options);
    if !(COUNT_MIN..=COUNT_MAX).contains(&count) {
        add_error(
            &mut errors,
            "count",
            format!("count must be between {} and {}", COUNT_MIN, COUNT_MAX),
        );
    } else if count.saturating_mul(length) > BATCH_CHARS_MAX {
        add_error(
            &mut errors,
            "count",
            format!(
                "the total of {} characters to generate exceeds the limit of {}",
                count.saturating_mul(length),
                BATCH_CHARS_MAX
            ),
        );
    }
    if !errors.is_empty() {
        return ErrorResponse::unprocessable(errors);
    }

    if let Some(denied) = reserve_volume(&req, (count * length) as u64) {
        return denied;
    }

    match generator::generate_many(count, length, &options) {
        Ok(passwords) => {
            debug!("generated a batch of {} passwords", passwords.len());
            HttpResponse::Ok().json(GenerateManyResponse {
                success: true,
                count: passwords.len(),
                passwords,
                length,
                options,
            })
        }
        Err(e) => ErrorResponse::bad_request(e.to_string()),
    }
}

fn respond_single(req: &HttpRequest, length: usize, options: GenerationOptions) -> HttpResponse {
    let errors = validate_generation(length, &options);
    if !errors.is_empty() {
        return ErrorResponse::unprocessable(errors);
    }

    if let Some(denied) = reserve_volume(req, length as u64) {
        return denied;
    }

    match generator::generate(length, &options) {
        Ok(password) => HttpResponse::Ok().json(GenerateResponse {
            success: true,
            length: password.chars().count(),
            password,
            options,
        }),
        Err(e) => ErrorResponse::bad_request(e.to_string()),
    }
}

/// Boundary validation, collected per field the way the original API
/// reported it. The core re-checks all of this; validating here keeps the
/// 422/400 distinction and lets several problems surface at once.
fn validate_generation(length: usize, options: &GenerationOptions) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if !(LENGTH_MIN..=LENGTH_MAX).contains(&length) {
        add_error(
            &mut errors,
            "length",
            format!("length must be between {} and {}", LENGTH_MIN, LENGTH_MAX),
        );
    }

    let active = options.active_categories();
    if active == 0 {
        add_error(
            &mut errors,
            "categories",
            "at least one category must be enabled (upper, lower, digits, symbols)".to_string(),
        );
    } else if options.require_each && length < active {
        add_error(
            &mut errors,
            "length",
            format!(
                "length must be at least {} when require_each is set (one per selected category)",
                active
            ),
        );
    }

    if options.exclude.chars().count() > EXCLUDE_MAX_LENGTH {
        add_error(
            &mut errors,
            "exclude",
            format!("exclude cannot exceed {} characters", EXCLUDE_MAX_LENGTH),
        );
    }
    if !options
        .exclude
        .chars()
        .all(|c| c.is_ascii_graphic() || c == ' ')
    {
        add_error(
            &mut errors,
            "exclude",
            "exclude may only contain printable ASCII characters".to_string(),
        );
    }

    errors
}

fn add_error(errors: &mut ValidationErrors, field: &str, message: String) {
    errors.entry(field.to_string()).or_default().push(message);
}

/// Charges the generated-character volume budget; `None` means the request
/// may proceed.
fn reserve_volume(req: &HttpRequest, chars: u64) -> Option<HttpResponse> {
    let limiter = req.app_data::<web::Data<RateLimiter>>()?;
    let client = client_ip(req);
    if limiter.reserve_chars(&client, chars) {
        return None;
    }

    warn!("volume budget exhausted for client {}", client);
    Some(
        HttpResponse::TooManyRequests().json(RateLimitResponse {
            success: false,
            error: "Password generation limit exceeded".to_string(),
            message: format!(
                "Generation volume exceeded. Maximum: {} characters per minute.",
                limiter.config().chars_per_minute
            ),
            retry_after: RETRY_AFTER_SECONDS,
        }),
    )
}
