//! Intersect expanded occurrences with a viewing window.
//!
//! These helpers re-expand from the event start on every call, so each query
//! costs O(occurrences before the window). They suit calendar views, not
//! high-frequency scanning.

use chrono::NaiveDate;

use crate::expander::expand_rrule_with_limit;

/// Occurrence cap used by [`occurs_on`].
pub const OCCURS_ON_CAP: usize = 500;

/// Extra occurrences [`occurrences_in_range`] generates beyond one per day of
/// the window.
pub const RANGE_PADDING: usize = 100;

/// Keep the occurrences within `start..=end`, in their original order.
pub fn filter_in_range(occurrences: &[NaiveDate], start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    occurrences
        .iter()
        .copied()
        .filter(|d| (start..=end).contains(d))
        .collect()
}

/// Whether an event starting on `start` with `rule` occurs on `date`.
///
/// Expands up to `date` with a cap of [`OCCURS_ON_CAP`]; occurrences beyond
/// the cap are never found.
pub fn occurs_on(date: NaiveDate, start: NaiveDate, rule: &str) -> bool {
    if rule.is_empty() {
        return false;
    }
    expand_rrule_with_limit(rule, start, Some(date), OCCURS_ON_CAP).contains(&date)
}

/// Occurrences of an event that fall inside `view_start..=view_end`.
///
/// Expansion starts at `start` and generates one occurrence per day of the
/// window plus [`RANGE_PADDING`], so an event that began long before the
/// window may have used up its budget before reaching it.
pub fn occurrences_in_range(
    start: NaiveDate,
    rule: &str,
    view_start: NaiveDate,
    view_end: NaiveDate,
) -> Vec<NaiveDate> {
    if rule.is_empty() || view_end < view_start {
        return Vec::new();
    }
    let span = usize::try_from(view_end.signed_duration_since(view_start).num_days()).unwrap_or(0);
    let cap = span.saturating_add(RANGE_PADDING);
    let occurrences = expand_rrule_with_limit(rule, start, Some(view_end), cap);
    filter_in_range(&occurrences, view_start, view_end)
}
