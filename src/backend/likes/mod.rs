//! Likes Module
//!
//! Like toggles on videos, comments and tweets, and the caller's liked videos.

pub mod db;
pub mod handlers;

pub use handlers::*;
