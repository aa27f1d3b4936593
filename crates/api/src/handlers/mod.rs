//! Request handlers, one submodule per resource.
//!
//! Handlers delegate persistence to the repositories in `moodtunes_db` and
//! AI work to `moodtunes_pipeline`, mapping failures via [`crate::error::AppError`].

pub mod account;
pub mod auth;
pub mod emotion;
pub mod moods;
pub mod playlists;
pub mod specialized;
