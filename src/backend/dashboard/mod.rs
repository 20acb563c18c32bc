//! Dashboard Module
//!
//! The caller's own channel: totals and the full video list.

pub mod db;
pub mod handlers;

pub use handlers::*;
