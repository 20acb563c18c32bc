//! Subscriptions Module
//!
//! Channel subscriptions at `/api/v1/subscriptions`. A user holds at most one
//! subscription per channel and never one to their own channel.

pub mod db;
pub mod handlers;

pub use handlers::*;
