//! Domain types and pure logic shared by every MoodTunes crate.
//!
//! Nothing in here performs I/O: prompt text, mood/season derivation,
//! duration formatting, market keywords and the specialized-playlist seed
//! templates are all plain functions over plain data.

pub mod duration;
pub mod error;
pub mod limits;
pub mod market;
pub mod mood;
pub mod prompts;
pub mod templates;
pub mod types;
