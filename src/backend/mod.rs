//! Backend Module
//!
//! This module contains all server-side code for the VidTube API: an Axum
//! HTTP server over PostgreSQL.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Accounts, JWT sessions, cookies, channel pages
//! - **`middleware`** - Access-token authentication
//! - **`videos`**, **`comments`**, **`likes`**, **`subscriptions`**,
//!   **`tweets`**, **`playlists`**, **`dashboard`** - Resource handlers and queries
//! - **`healthcheck`** - Liveness and database reachability
//! - **`error`** - Backend error type and the JSON error body
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - `vidtube-server` binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── middleware/     - Request middleware
//! ├── error/          - Error types
//! ├── healthcheck/    - Healthcheck endpoint
//! └── <resource>/     - db.rs (queries) + handlers.rs per resource
//! ```
//!
//! # Error Handling
//!
//! Every handler returns `Result<_, BackendError>`; `BackendError` renders
//! itself as `{statusCode, success: false, message, errors, data: null}`
//! with the matching HTTP status.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

pub mod videos;
pub mod comments;
pub mod likes;
pub mod subscriptions;
pub mod tweets;
pub mod playlists;
pub mod dashboard;
pub mod healthcheck;

pub use error::BackendError;
pub use server::{create_app, AppState};
