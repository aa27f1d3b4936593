//! MoodTunes API server library.
//!
//! Exposes config, state, error handling and routes so integration tests
//! and the binary entrypoints can share them.

pub mod auth;
pub mod background;
pub mod config;
pub mod error;
pub mod handlers;
pub mod mail;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;
