//! VidTube - Video Platform Backend
//!
//! VidTube is the REST backend of a video-sharing platform: user accounts and
//! channels, videos, comments, likes, subscriptions, playlists, short text
//! posts ("tweets") and a per-channel dashboard, stored in PostgreSQL and
//! served over Axum.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared between server and clients
//!   - Wire models, response envelope, pagination
//!   - Validation helpers and error types
//!   - Layered configuration
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum router, auth middleware and handlers
//!   - One module per resource (`db` queries + `handlers`)
//!   - Error-to-response mapping
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - Enables the `backend` module and the server binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use vidtube::backend::server::init::create_app;
//! use vidtube::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let app = create_app(config).await;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::SharedError` for validation failures
//! - `backend::BackendError` for everything a handler can return; it renders
//!   as `{ statusCode, success: false, message, errors, data: null }`

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
