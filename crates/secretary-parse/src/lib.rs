//! Natural-language front half of the secretary.
//!
//! Turns a raw utterance into a [`Classification`] (event, task, or note with
//! resolved times) and a normalised title. Pure synchronous; no I/O and no
//! error type, since nothing here can fail: an unrecognised phrase is simply
//! absent from the result.
//!
//! # Quick start
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use secretary_parse::{classify, split_title_desc};
//!
//! let now = NaiveDate::from_ymd_opt(2024, 1, 1)
//!   .unwrap()
//!   .and_hms_opt(9, 0, 0)
//!   .unwrap();
//! let text = "meeting tomorrow at 15:00 for 1 hour";
//! let c = classify(text, now);
//! let (title, _desc) = split_title_desc(text);
//! println!("{} {title:?} {:?}-{:?}", c.kind, c.start_at, c.end_at);
//! ```

pub mod classify;
pub mod deadline;
pub mod duration;
pub mod format;
pub mod lexicon;
pub mod span;
pub mod temporal;
pub mod title;

pub use classify::{Classification, classify};
pub use deadline::parse_deadline;
pub use duration::parse_duration;
pub use span::Found;
pub use temporal::{Slot, parse_slot, resolve_numeric_date, resolve_weekday};
pub use title::{normalize_title, split_title_desc, strip_temporal_markers};
