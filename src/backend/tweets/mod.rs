//! Tweets Module
//!
//! Short text posts on a channel, served at `/api/v1/tweets`.

pub mod db;
pub mod handlers;

pub use handlers::*;
