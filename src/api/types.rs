// src/api/types.rs
use std::collections::BTreeMap;

use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::core::generator::{COUNT_DEFAULT, LENGTH_DEFAULT};
use crate::models::{GenerationOptions, StrengthReport};

/// Field name -> list of messages, as returned under `validation_errors`.
pub type ValidationErrors = BTreeMap<String, Vec<String>>;

// Generation requests

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct GenerateRequest {
    /// Desired password length (4-128, default 16)
    pub length: Option<usize>,
    /// Include uppercase letters [A-Z] (default true)
    pub upper: Option<bool>,
    /// Include lowercase letters [a-z] (default true)
    pub lower: Option<bool>,
    /// Include digits [0-9] (default true)
    pub digits: Option<bool>,
    /// Include special symbols (default true)
    pub symbols: Option<bool>,
    /// Skip visually ambiguous characters I, l, 1, O, 0, o (default true)
    pub avoid_ambiguous: Option<bool>,
    /// Characters to exclude explicitly (printable ASCII, max 100)
    pub exclude: Option<String>,
    /// Guarantee at least one character per selected category (default true)
    pub require_each: Option<bool>,
}

impl GenerateRequest {
    pub fn length(&self) -> usize {
        self.length.unwrap_or(LENGTH_DEFAULT)
    }

    pub fn options(&self) -> GenerationOptions {
        let defaults = GenerationOptions::default();
        GenerationOptions {
            upper: self.upper.unwrap_or(defaults.upper),
            lower: self.lower.unwrap_or(defaults.lower),
            digits: self.digits.unwrap_or(defaults.digits),
            symbols: self.symbols.unwrap_or(defaults.symbols),
            avoid_ambiguous: self.avoid_ambiguous.unwrap_or(defaults.avoid_ambiguous),
            exclude: self.exclude.clone().unwrap_or_default(),
            require_each: self.require_each.unwrap_or(defaults.require_each),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct GenerateManyRequest {
    /// Number of passwords to generate (1-100, default 5)
    pub count: Option<usize>,
    #[serde(flatten)]
    pub generate: GenerateRequest,
}

impl GenerateManyRequest {
    pub fn count(&self) -> usize {
        self.count.unwrap_or(COUNT_DEFAULT)
    }
}

/// Query-parameter variant of the generation request. Uses the camelCase
/// names of the public GET endpoint; note that symbols default to false
/// here, unlike the JSON body endpoints.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct GenerateQuery {
    /// Desired password length (4-128, default 16)
    pub length: Option<usize>,
    /// Include uppercase letters [A-Z] (default true)
    pub include_uppercase: Option<bool>,
    /// Include lowercase letters [a-z] (default true)
    pub include_lowercase: Option<bool>,
    /// Include digits [0-9] (default true)
    pub include_numbers: Option<bool>,
    /// Include special symbols (default false)
    pub include_symbols: Option<bool>,
    /// Skip visually ambiguous characters (default true)
    pub exclude_ambiguous: Option<bool>,
    /// Characters to exclude explicitly (printable ASCII, max 100)
    pub exclude: Option<String>,
    /// Guarantee at least one character per selected category (default true)
    pub require_each: Option<bool>,
}

impl GenerateQuery {
    pub fn length(&self) -> usize {
        self.length.unwrap_or(LENGTH_DEFAULT)
    }

    pub fn options(&self) -> GenerationOptions {
        GenerationOptions {
            upper: self.include_uppercase.unwrap_or(true),
            lower: self.include_lowercase.unwrap_or(true),
            digits: self.include_numbers.unwrap_or(true),
            symbols: self.include_symbols.unwrap_or(false),
            avoid_ambiguous: self.exclude_ambiguous.unwrap_or(true),
            exclude: self.exclude.clone().unwrap_or_default(),
            require_each: self.require_each.unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidateRequest {
    /// Password to analyze (required, max 1000 characters)
    pub password: Option<String>,
}

// Responses

#[derive(Debug, Serialize, ToSchema)]
pub struct GenerateResponse {
    pub success: bool,
    pub password: String,
    pub length: usize,
    pub options: GenerationOptions,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GenerateManyResponse {
    pub success: bool,
    pub passwords: Vec<String>,
    pub count: usize,
    pub length: usize,
    pub options: GenerationOptions,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ValidateResponse {
    pub success: bool,
    pub data: StrengthReport,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<ValidationErrors>,
}

impl ErrorResponse {
    /// 400 with a plain error message (deterministic generator failures).
    pub fn bad_request(error: impl Into<String>) -> HttpResponse {
        HttpResponse::BadRequest().json(Self {
            success: false,
            error: error.into(),
            validation_errors: None,
        })
    }

    /// 422 with field-keyed validation messages.
    pub fn unprocessable(errors: ValidationErrors) -> HttpResponse {
        HttpResponse::UnprocessableEntity().json(Self {
            success: false,
            error: "The given data was invalid".to_string(),
            validation_errors: Some(errors),
        })
    }

    /// 500 with a generic message; details stay in the server log.
    pub fn server_error(error: impl Into<String>) -> HttpResponse {
        HttpResponse::InternalServerError().json(Self {
            success: false,
            error: error.into(),
            validation_errors: None,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RateLimitResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
    /// Seconds until the current window expires
    pub retry_after: u64,
}

// Configuration introspection

#[derive(Debug, Serialize, ToSchema)]
pub struct ConfigurationResponse {
    pub success: bool,
    pub configuration: Configuration,
    pub version: String,
    pub description: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Configuration {
    pub length: LengthBounds,
    pub count: CountBounds,
    pub exclude: ExcludeBounds,
    pub charsets: Charsets,
    pub options: OptionDefaults,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LengthBounds {
    pub min: usize,
    pub max: usize,
    pub default: usize,
    pub recommended_min: usize,
    pub optimal: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CountBounds {
    pub min: usize,
    pub max: usize,
    pub default: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ExcludeBounds {
    pub max_length: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Charsets {
    #[schema(value_type = String)]
    pub uppercase: &'static str,
    #[schema(value_type = String)]
    pub lowercase: &'static str,
    #[schema(value_type = String)]
    pub digits: &'static str,
    #[schema(value_type = String)]
    pub symbols: &'static str,
    #[schema(value_type = String)]
    pub ambiguous: &'static str,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OptionDefaults {
    pub upper: OptionSpec,
    pub lower: OptionSpec,
    pub digits: OptionSpec,
    pub symbols: OptionSpec,
    pub avoid_ambiguous: OptionSpec,
    pub exclude: OptionSpec,
    pub require_each: OptionSpec,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OptionSpec {
    #[serde(rename = "type")]
    #[schema(value_type = String)]
    pub kind: &'static str,
    #[schema(value_type = Object)]
    pub default: serde_json::Value,
    #[schema(value_type = String)]
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}
