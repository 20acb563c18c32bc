//! Playlists Module
//!
//! User playlists at `/api/v1/playlists`. Only the owner renames, deletes or
//! changes the videos of a playlist.

pub mod db;
pub mod handlers;

pub use handlers::*;
