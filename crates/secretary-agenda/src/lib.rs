//! The secretary's stateful layer.
//!
//! Everything here sits between the pure parsing crate and a transport: it
//! checks new events against stored ones, stores what was understood, keeps
//! the per-user conflict-resolution state, renders schedules, and sweeps for
//! due reminders. All storage access goes through
//! [`RecordStore`](secretary_core::store::RecordStore).
//!
//! ```no_run
//! # async fn demo(store: std::sync::Arc<secretary_store_sqlite::SqliteStore>) {
//! use secretary_agenda::Desk;
//! use secretary_core::clock::SystemClock;
//!
//! let desk = Desk::new(store, SystemClock);
//! let reply = desk.handle_message("42", "meeting tomorrow at 15:00").await;
//! # let _ = reply;
//! # }
//! ```

pub mod conflict;
pub mod desk;
mod error;
pub mod intake;
pub mod reminder;
pub mod render;
pub mod session;

pub use self::{
  conflict::{ConflictReport, find_conflict},
  desk::{Desk, Reply},
  error::{Error, Result},
  intake::{Outcome, handle_input},
  reminder::{LogNotifier, Notifier, ReminderPolicy, SweepReport, SweepState, sweep},
  session::{PendingResolution, SessionStore},
};
