//! Comments Module
//!
//! Comments under videos, served at `/api/v1/comments`.

pub mod db;
pub mod handlers;

pub use handlers::*;
