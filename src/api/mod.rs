//! HTTP boundary: axum router, handlers, request/response DTOs.

pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
