//! Error types for recurrence-engine operations.
//!
//! Only the strict parser and the date helpers return these. Expansion,
//! description and range filtering never fail: bad input degrades to fewer
//! (or zero) occurrences.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecurrenceError {
    #[error("empty recurrence rule")]
    EmptyRule,

    #[error("malformed rule part '{0}': expected KEY=VALUE")]
    MalformedPart(String),

    #[error("invalid {key} value: '{value}'")]
    InvalidNumber { key: &'static str, value: String },

    #[error("invalid UNTIL value: '{0}'")]
    InvalidUntil(String),

    #[error("unknown frequency: '{0}'")]
    UnknownFrequency(String),

    #[error("rule has no FREQ")]
    MissingFrequency,

    #[error("unknown weekday token: '{0}'")]
    UnknownWeekday(String),

    #[error("{0} is parsed but not applied by the expander")]
    UnsupportedField(&'static str),

    #[error("unknown locale '{0}': expected one of en, pt, es")]
    InvalidLocale(String),
}

pub type Result<T> = std::result::Result<T, RecurrenceError>;
