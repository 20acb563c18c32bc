//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation, layers and fallback
//! └── api_routes.rs   - `/api/v1` resources
//! ```
//!
//! # Resources
//!
//! | Prefix                   | Auth                                   |
//! |--------------------------|----------------------------------------|
//! | `/api/v1/healthcheck`    | public                                 |
//! | `/api/v1/users`          | register, login, refresh-token public  |
//! | `/api/v1/videos`         | `/public` public                       |
//! | `/api/v1/comments`       | all protected                          |
//! | `/api/v1/likes`          | all protected                          |
//! | `/api/v1/subscriptions`  | all protected                          |
//! | `/api/v1/tweets`         | all protected                          |
//! | `/api/v1/playlists`      | all protected                          |
//! | `/api/v1/dashboard`      | all protected                          |
//!
//! # Example
//!
//! ```rust,no_run
//! use vidtube::backend::routes::create_router;
//! use vidtube::backend::server::state::AppState;
//! use vidtube::shared::AppConfig;
//!
//! let router = create_router(AppState::new(AppConfig::default(), None));
//! ```

/// Main router creation
pub mod router;

/// API endpoint routes
pub mod api_routes;

pub use router::create_router;
