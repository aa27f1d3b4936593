//! Authentication primitives.
//!
//! - [`password`] -- Argon2id hashing and the password composition rules.
//! - [`jwt`] -- Signed access tokens and hashed opaque tokens.
//! - [`reset`] -- Password-reset links: encoded user ids and single-use tokens.

pub mod jwt;
pub mod password;
pub mod reset;
