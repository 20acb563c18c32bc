//! Common test utilities and helpers
//!
//! - Database fixture (skips when `DATABASE_URL` is unset)
//! - Authentication helpers (config, tokens, registered users)
//! - Custom assertion macros

#![allow(dead_code)]

#[macro_use]
pub mod assertions;
pub mod auth_helpers;
pub mod database;

pub use auth_helpers::*;
pub use database::*;
