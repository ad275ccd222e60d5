//! Record model, occupancy rule, and the storage and clock seams.
//!
//! No HTTP, no database, no parsing. Every other crate in the workspace
//! builds on these types.

#![allow(async_fn_in_trait)]

pub mod clock;
pub mod error;
pub mod occupancy;
pub mod record;
pub mod store;

pub use error::{Error, Result};
