//! HTTP API layer for muse.
//!
//! This crate provides the REST API surface of the user service:
//!
//! - **Endpoints**: enrollment and profile routes, the love toggle,
//!   bulk love checks and loved-picture listings
//! - **Extractors**: caller identity from the `x-auth-uid` header
//! - **Middleware**: shared application state
//!
//! Built on Axum 0.8.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use middleware::AppState;
