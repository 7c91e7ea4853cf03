//! Next-occurrence calculation -- one step of a rule from a given date.
//!
//! Weeks run Sunday..Saturday. Month and year steps use `chrono::Months`,
//! which clamps to the last valid day of the target month (Jan 31 + 1 month
//! is Feb 28/29). Steps are taken from the current occurrence, not from the
//! original start, so a clamped day-of-month carries forward.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

use crate::rule::{Frequency, RecurrenceRule};

/// Compute the candidate that follows `current` under `rule`.
///
/// Returns `None` only if the step would leave chrono's representable range.
/// A rule with an unrecognized (or missing) frequency steps one day.
pub fn next_occurrence(current: NaiveDate, rule: &RecurrenceRule) -> Option<NaiveDate> {
    let interval = rule.interval();
    match rule.frequency() {
        Some(Frequency::Daily) => current.checked_add_days(Days::new(u64::from(interval))),
        Some(Frequency::Weekly) => {
            let days = rule.effective_by_day();
            if days.is_empty() {
                current.checked_add_days(Days::new(7 * u64::from(interval)))
            } else {
                next_weekly_by_day(current, &days, interval)
            }
        }
        Some(Frequency::Monthly) => current.checked_add_months(Months::new(interval)),
        Some(Frequency::Yearly) => interval
            .checked_mul(12)
            .and_then(|months| current.checked_add_months(Months::new(months))),
        Some(Frequency::Unrecognized(token)) => {
            log::warn!("unrecognized frequency '{token}', stepping one day");
            current.succ_opt()
        }
        None => {
            log::warn!("rule has no frequency, stepping one day");
            current.succ_opt()
        }
    }
}

/// The first occurrence of `rule` for an event starting on `start`.
///
/// Only WEEKLY rules with `BYDAY` move the start: to the next listed weekday
/// later in the same week, or failing that to the first listed weekday of the
/// following week. `INTERVAL` does not apply to this adjustment.
pub fn seed_occurrence(start: NaiveDate, rule: &RecurrenceRule) -> Option<NaiveDate> {
    if rule.frequency() != Some(&Frequency::Weekly) {
        return Some(start);
    }
    let days = rule.effective_by_day();
    if days.is_empty() || days.contains(&start.weekday()) {
        return Some(start);
    }

    let today = start.weekday().num_days_from_sunday();
    let offset = match later_in_week(today, &days) {
        Some(target) => target - today,
        None => 7 - today + days.first()?.num_days_from_sunday(),
    };
    start.checked_add_days(Days::new(u64::from(offset)))
}

fn next_weekly_by_day(current: NaiveDate, days: &[Weekday], interval: u32) -> Option<NaiveDate> {
    let today = current.weekday().num_days_from_sunday();
    if let Some(target) = later_in_week(today, days) {
        return current.checked_add_days(Days::new(u64::from(target - today)));
    }

    // Wrap to the first listed day of the week `interval` weeks on.
    let first = days.first()?.num_days_from_sunday();
    let offset = u64::from(7 - today + first) + 7 * (u64::from(interval) - 1);
    current.checked_add_days(Days::new(offset))
}

/// Smallest Sunday-based index in `days` strictly after `today`.
fn later_in_week(today: u32, days: &[Weekday]) -> Option<u32> {
    days.iter()
        .map(|d| d.num_days_from_sunday())
        .filter(|&d| d > today)
        .min()
}
