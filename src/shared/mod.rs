//! Shared Module
//!
//! Types shared between the server and any Rust client of the API: wire
//! models, the response envelope, pagination and validation helpers, and
//! configuration.
//!
//! # Overview
//!
//! Nothing in here depends on the HTTP framework, so the module compiles
//! without the `ssr` feature. Everything serializes to the camelCase JSON
//! the `/api/v1` endpoints speak.

/// Shared error types
pub mod error;

/// Request validation helpers
pub mod validation;

/// Success response envelope
pub mod response;

/// Pagination and sorting
pub mod pagination;

/// API data models
pub mod models;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use error::SharedError;
pub use response::{ApiResponse, Empty};
pub use pagination::{ListQuery, Page, Pagination, Sort, SortDirection, SortField};
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
