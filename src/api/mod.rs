//! API Module
//!
//! HTTP handlers and routing for the file cache server.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /stats` - Cache statistics
//! - `GET /` and `GET /*path` - Serve a file through the read-through cache

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
