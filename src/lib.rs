//! Passforge - password generation and strength analysis service.
//!
//! The core is two pure, stateless functions: constrained secure password
//! generation (`core::generator`) and heuristic strength scoring
//! (`core::analyzer`). The `api` module wraps them in an Actix-web REST
//! boundary with request validation, rate limiting, and OpenAPI docs.

pub mod api;
pub mod core;
pub mod models;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SERVICE_NAME: &str = "passforge";
