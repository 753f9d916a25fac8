// src/api/handlers/analyzer.rs
use actix_web::{web, HttpResponse, Responder};

use crate::api::types::{ErrorResponse, ValidateRequest, ValidateResponse, ValidationErrors};
use crate::core::analyzer;

/// Analyze password strength
///
/// Scores the supplied password and reports composition, weak patterns,
/// an estimated crack time, and remediation hints.
#[utoipa::path(
    post,
    path = "/api/password/validate",
    tag = "Analyzer",
    request_body = ValidateRequest,
    responses(
        (status = 200, description = "Strength report", body = ValidateResponse),
        (status = 422, description = "Invalid parameters", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = crate::api::types::RateLimitResponse)
    )
)]
pub async fn validate_password(body: web::Json<ValidateRequest>) -> impl Responder {
    let password = match body.password.as_deref() {
        Some(password) if !password.is_empty() => password,
        _ => {
            let mut errors = ValidationErrors::new();
            errors
                .entry("password".to_string())
                .or_default()
                .push("the password field is required".to_string());
            return ErrorResponse::unprocessable(errors);
        }
    };

    if password.chars().count() > analyzer::MAX_PASSWORD_LENGTH {
        let mut errors = ValidationErrors::new();
        errors.entry("password".to_string()).or_default().push(format!(
            "the password to analyze cannot exceed {} characters",
            analyzer::MAX_PASSWORD_LENGTH
        ));
        return ErrorResponse::unprocessable(errors);
    }

    HttpResponse::Ok().json(ValidateResponse {
        success: true,
        data: analyzer::analyze(password),
    })
}
