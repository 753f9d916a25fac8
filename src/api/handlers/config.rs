// src/api/handlers/config.rs
use actix_web::{HttpResponse, Responder};
use serde_json::json;

use crate::api::types::{
    Charsets, Configuration, ConfigurationResponse, CountBounds, ExcludeBounds, LengthBounds,
    OptionDefaults, OptionSpec,
};
use crate::core::charset;
use crate::core::generator::{
    COUNT_DEFAULT, COUNT_MAX, COUNT_MIN, EXCLUDE_MAX_LENGTH, LENGTH_DEFAULT, LENGTH_MAX,
    LENGTH_MIN, LENGTH_OPTIMAL, LENGTH_RECOMMENDED_MIN,
};

/// Service configuration
///
/// Read-only projection of the generation bounds, option defaults, and
/// character sets the API operates with.
#[utoipa::path(
    get,
    path = "/api/password/config",
    tag = "Configuration",
    responses(
        (status = 200, description = "Bounds and defaults", body = ConfigurationResponse),
        (status = 429, description = "Rate limit exceeded", body = crate::api::types::RateLimitResponse)
    )
)]
pub async fn get_configuration() -> impl Responder {
    HttpResponse::Ok().json(ConfigurationResponse {
        success: true,
        configuration: configuration(),
        version: crate::VERSION.to_string(),
        description: "Password generation and strength analysis API".to_string(),
    })
}

fn configuration() -> Configuration {
    Configuration {
        length: LengthBounds {
            min: LENGTH_MIN,
            max: LENGTH_MAX,
            default: LENGTH_DEFAULT,
            recommended_min: LENGTH_RECOMMENDED_MIN,
            optimal: LENGTH_OPTIMAL,
        },
        count: CountBounds {
            min: COUNT_MIN,
            max: COUNT_MAX,
            default: COUNT_DEFAULT,
        },
        exclude: ExcludeBounds {
            max_length: EXCLUDE_MAX_LENGTH,
        },
        charsets: Charsets {
            uppercase: charset::UPPERCASE,
            lowercase: charset::LOWERCASE,
            digits: charset::DIGITS,
            symbols: charset::SYMBOLS,
            ambiguous: charset::AMBIGUOUS,
        },
        options: OptionDefaults {
            upper: OptionSpec {
                kind: "boolean",
                default: json!(true),
                description: "Include uppercase letters [A-Z]",
                max_length: None,
            },
            lower: OptionSpec {
                kind: "boolean",
                default: json!(true),
                description: "Include lowercase letters [a-z]",
                max_length: None,
            },
            digits: OptionSpec {
                kind: "boolean",
                default: json!(true),
                description: "Include digits [0-9]",
                max_length: None,
            },
            symbols: OptionSpec {
                kind: "boolean",
                default: json!(true),
                description: "Include special symbols",
                max_length: None,
            },
            avoid_ambiguous: OptionSpec {
                kind: "boolean",
                default: json!(true),
                description: "Avoid ambiguous characters (I, l, 1, O, 0, o)",
                max_length: None,
            },
            exclude: OptionSpec {
                kind: "string",
                default: json!(""),
                description: "Specific characters to exclude",
                max_length: Some(EXCLUDE_MAX_LENGTH),
            },
            require_each: OptionSpec {
                kind: "boolean",
                default: json!(true),
                description: "Guarantee at least one character per selected category",
                max_length: None,
            },
        },
    }
}
