//! Account Handlers Module
//!
//! HTTP handlers for the `/api/v1/users` endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── register.rs - Account registration
//! ├── login.rs    - Login and logout
//! ├── refresh.rs  - Refresh-token rotation
//! ├── me.rs       - Current user
//! ├── account.rs  - Password, profile, avatar and cover updates
//! └── channel.rs  - Channel profile and watch history
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: account created, nothing issued
//! 2. **Login**: credentials verified, access + refresh tokens issued as body and cookies
//! 3. **Refresh**: stored refresh token matched, both tokens rotated
//! 4. **Logout**: stored refresh token cleared, cookies removed

/// Request and response types
pub mod types;

pub mod register;
pub mod login;
pub mod refresh;
pub mod me;
pub mod account;
pub mod channel;

pub use types::{AuthResponse, LoginRequest, RegisterRequest, TokenResponse, UserResponse};

pub use register::register;
pub use login::{login, logout};
pub use refresh::refresh_access_token;
pub use me::current_user;
pub use account::{change_password, update_account_details, update_user_avatar, update_user_cover_image};
pub use channel::{get_channel_profile, get_watch_history};
