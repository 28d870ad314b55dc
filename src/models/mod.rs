//! Response models for the file cache server API
//!
//! Defines the DTOs used for serializing HTTP response bodies; file
//! contents themselves are served raw.

pub mod responses;

// Re-export commonly used types
pub use responses::{ErrorResponse, HealthResponse, StatsResponse};
