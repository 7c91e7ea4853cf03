//! # recurrence-engine
//!
//! Deterministic expansion of compact recurrence rules into calendar dates.
//!
//! Rules are `KEY=VALUE` pairs separated by `;` (`FREQ`, `INTERVAL`, `COUNT`,
//! `UNTIL`, `BYDAY`, `BYMONTH`, `BYMONTHDAY`). Every function here is pure:
//! no I/O, no global state, and bounded work per call.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use recurrence_engine::expand_rrule;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let dates = expand_rrule("FREQ=WEEKLY;BYDAY=MO,WE,FR;COUNT=4", start, None);
//! assert_eq!(dates.len(), 4);
//! assert_eq!(dates[3], NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
//! ```
//!
//! ## Modules
//!
//! - [`rule`] — rule string → [`RecurrenceRule`] (permissive and strict)
//! - [`advance`] — one step from an occurrence to the next candidate
//! - [`expander`] — rule + start + bounds → list of dates
//! - [`describe`] — localized summaries of a rule
//! - [`range`] — window filtering and membership checks
//! - [`error`] — Error types

pub mod advance;
pub mod describe;
pub mod error;
pub mod expander;
pub mod range;
pub mod rule;

pub use advance::{next_occurrence, seed_occurrence};
pub use describe::{describe_rrule, describe_rrule_in, describe_rule, Locale};
pub use error::RecurrenceError;
pub use expander::{
    expand_rrule, expand_rrule_with_limit, expand_rule, expand_with_options, ExpandOptions,
    DEFAULT_MAX_OCCURRENCES, SAFETY_CEILING,
};
pub use range::{filter_in_range, occurrences_in_range, occurs_on};
pub use rule::{Frequency, RecurrenceRule};
