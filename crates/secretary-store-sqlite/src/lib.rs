//! SQLite backend for the secretary record store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Timestamps are stored as
//! `YYYY-MM-DDTHH:MM:SS` text and decoded into [`chrono::NaiveDateTime`]
//! before anything leaves this crate.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
