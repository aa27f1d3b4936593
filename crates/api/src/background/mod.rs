//! Background tasks.
//!
//! Each submodule provides an async job that stops early when its
//! [`tokio_util::sync::CancellationToken`] fires.

pub mod specialized_refresh;
