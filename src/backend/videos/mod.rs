//! Videos Module
//!
//! Video records, listings and the `/api/v1/videos` handlers.
//!
//! - **`db`** - Queries (listing, detail, owner mutations, view recording)
//! - **`handlers`** - HTTP handlers

pub mod db;
pub mod handlers;

pub use handlers::*;
