//! # API REST
//!
//! REST API implementation for the two medcalc services.
//!
//! Handles:
//! - HTTP endpoints with axum, one router per service
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON bodies, error status mapping, CORS)
//!
//! Business logic lives in `medcalc-core`; report persistence in `medcalc-files`.

#![warn(rust_2018_idioms)]

pub mod calculator;
pub mod chatbot;
pub mod error;
pub mod health;
pub mod types;

pub use calculator::calculator_router;
pub use chatbot::chatbot_router;
pub use error::ApiError;
pub use health::HealthService;
