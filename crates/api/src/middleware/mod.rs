//! Request extractors.
//!
//! - [`auth::AuthUser`] -- The authenticated user from a JWT Bearer token.
//! - [`client_ip::ClientIp`] -- The caller's IP for market resolution.

pub mod auth;
pub mod client_ip;
