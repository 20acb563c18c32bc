//! Backend Error Module
//!
//! Error types returned by HTTP handlers and their conversion into responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - BackendError and its status/message mapping
//! └── conversion.rs - IntoResponse impls and rejection conversions
//! ```
//!
//! # HTTP Response Conversion
//!
//! `BackendError` implements `IntoResponse`, so handlers return
//! `Result<ApiResponse<T>, BackendError>` and use `?` throughout. Extractor
//! rejections (`Json`, `Query`, `Path`) convert into `BackendError` so that
//! malformed input gets the same error envelope as everything else.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
pub use conversion::ErrorBody;

/// Result type of every handler
pub type ApiResult<T> = Result<crate::shared::ApiResponse<T>, BackendError>;
