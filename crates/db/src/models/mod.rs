//! Row structs and DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching the table
//! and the DTOs used to insert or patch it.

pub mod mood_entry;
pub mod password_reset;
pub mod playlist;
pub mod session;
pub mod specialized_playlist;
pub mod track;
pub mod user;
pub mod user_preference;
