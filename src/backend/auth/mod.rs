//! Authentication Module
//!
//! User accounts, JWT sessions and the `/api/v1/users` handlers.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User record, account and channel queries
//! ├── sessions.rs     - Access / refresh JWTs
//! ├── cookies.rs      - Auth cookie building and parsing
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt before storage
//! - Access and refresh tokens use separate secrets
//! - Only the latest refresh token per user is accepted
//! - Password hashes and refresh tokens never leave the server

/// User data model and database operations
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// Auth cookies
pub mod cookies;

/// HTTP handlers for account endpoints
pub mod handlers;

pub use handlers::types::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
pub use sessions::{TokenKeys, TokenPair};
