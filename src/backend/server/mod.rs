//! Server Module
//!
//! This module contains all server-side code for initializing and configuring
//! the Axum HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Database pool and CORS from AppConfig
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # State Management
//!
//! `AppState` holds the configuration, the JWT keys and the optional
//! database pool. Handlers extract only the part they need through `FromRef`.
//!
//! # Example
//!
//! ```rust,no_run
//! use vidtube::backend::server::create_app;
//! use vidtube::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let app = create_app(config).await;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use init::{build_app, create_app};
pub use state::AppState;
