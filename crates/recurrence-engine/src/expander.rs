//! Rule expansion -- converts recurrence rule strings into concrete dates.
//!
//! Expansion is total: empty or unusable rules produce an empty list, and a
//! rule that stops advancing ends the list early instead of failing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::advance::{next_occurrence, seed_occurrence};
use crate::rule::RecurrenceRule;

/// Occurrence cap used when neither the rule nor the caller gives one.
pub const DEFAULT_MAX_OCCURRENCES: usize = 100;

/// Hard limit on advance steps per expansion, independent of `COUNT` and the
/// caller's cap. Bounds the work a buggy or hostile rule string can cause.
pub const SAFETY_CEILING: usize = 1000;

/// Caller-side bounds for an expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpandOptions {
    /// Last date that may be emitted. Ignored when the rule has `UNTIL`.
    pub horizon: Option<NaiveDate>,
    /// Occurrence cap. Ignored when the rule has `COUNT`.
    pub max_occurrences: usize,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            horizon: None,
            max_occurrences: DEFAULT_MAX_OCCURRENCES,
        }
    }
}

/// Expand a rule string with the default cap of [`DEFAULT_MAX_OCCURRENCES`].
///
/// # Arguments
/// - `rule` -- rule string (e.g., "FREQ=WEEKLY;BYDAY=MO,WE,FR;COUNT=10")
/// - `start` -- first day of the event
/// - `horizon` -- optional inclusive end date, overridden by the rule's `UNTIL`
pub fn expand_rrule(rule: &str, start: NaiveDate, horizon: Option<NaiveDate>) -> Vec<NaiveDate> {
    expand_rrule_with_limit(rule, start, horizon, DEFAULT_MAX_OCCURRENCES)
}

/// Identical to [`expand_rrule`] but with an explicit occurrence cap.
///
/// The rule's own `COUNT` takes precedence over `max_occurrences`.
pub fn expand_rrule_with_limit(
    rule: &str,
    start: NaiveDate,
    horizon: Option<NaiveDate>,
    max_occurrences: usize,
) -> Vec<NaiveDate> {
    if rule.is_empty() {
        return Vec::new();
    }
    expand_rule(&RecurrenceRule::parse(rule), start, horizon, max_occurrences)
}

/// Expand a rule string using bounds collected in [`ExpandOptions`].
pub fn expand_with_options(rule: &str, start: NaiveDate, options: &ExpandOptions) -> Vec<NaiveDate> {
    expand_rrule_with_limit(rule, start, options.horizon, options.max_occurrences)
}

/// Expand an already-parsed rule.
///
/// The first occurrence (the start, or the adjusted start for WEEKLY rules
/// with `BYDAY`) is always emitted, even when it lies past the stop date or
/// the cap is zero. Rules with no `FREQ` expand to nothing.
pub fn expand_rule(
    rule: &RecurrenceRule,
    start: NaiveDate,
    horizon: Option<NaiveDate>,
    max_occurrences: usize,
) -> Vec<NaiveDate> {
    if rule.frequency().is_none() {
        return Vec::new();
    }

    let unapplied = rule.unapplied_fields();
    if !unapplied.is_empty() {
        log::warn!(
            "{} parsed but not applied; occurrences are not constrained by them",
            unapplied.join(", ")
        );
    }

    // COUNT below one still yields the seed.
    let cap = match rule.count() {
        Some(count) => usize::try_from(count).unwrap_or(usize::MAX),
        None => max_occurrences,
    };
    let stop = rule.until_date().or(horizon);

    let Some(mut current) = seed_occurrence(start, rule) else {
        log::warn!("first occurrence after {start} is out of range");
        return Vec::new();
    };
    let mut occurrences = vec![current];
    let mut iterations = 0;

    while occurrences.len() < cap {
        if iterations >= SAFETY_CEILING {
            log::warn!("stopping expansion after {SAFETY_CEILING} steps");
            break;
        }
        let Some(next) = next_occurrence(current, rule) else {
            log::warn!("no representable occurrence after {current}");
            break;
        };
        if next <= current {
            log::warn!("rule did not advance past {current}, stopping expansion");
            break;
        }
        current = next;
        iterations += 1;

        if stop.is_some_and(|stop| current > stop) {
            break;
        }
        occurrences.push(current);
    }

    occurrences
}
