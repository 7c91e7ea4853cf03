//! Tests for rule expansion: bounds, seed adjustment, calendar arithmetic and
//! the degenerate inputs that must expand to little or nothing.

use chrono::NaiveDate;
use recurrence_engine::{
    expand_rrule, expand_rrule_with_limit, expand_rule, expand_with_options, ExpandOptions,
    RecurrenceRule, DEFAULT_MAX_OCCURRENCES, SAFETY_CEILING,
};

fn d(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

// ---------------------------------------------------------------------------
// Reference scenarios
// ---------------------------------------------------------------------------

#[test]
fn daily_count_three() {
    let result = expand_rrule("FREQ=DAILY;COUNT=3", d(2024, 1, 1), None);
    assert_eq!(result, vec![d(2024, 1, 1), d(2024, 1, 2), d(2024, 1, 3)]);
}

#[test]
fn weekly_mon_wed_fri_count_four() {
    // 2024-01-01 is a Monday.
    let result = expand_rrule("FREQ=WEEKLY;BYDAY=MO,WE,FR;COUNT=4", d(2024, 1, 1), None);
    assert_eq!(
        result,
        vec![d(2024, 1, 1), d(2024, 1, 3), d(2024, 1, 5), d(2024, 1, 8)]
    );
}

#[test]
fn bimonthly_from_month_end_clamps_per_step() {
    // Two-month steps from Jan 31 land on months that all have a 31st.
    let result = expand_rrule("FREQ=MONTHLY;INTERVAL=2;COUNT=3", d(2024, 1, 31), None);
    assert_eq!(result, vec![d(2024, 1, 31), d(2024, 3, 31), d(2024, 5, 31)]);
}

#[test]
fn weekly_until_is_inclusive() {
    let result = expand_rrule("FREQ=WEEKLY;UNTIL=20240115T000000Z", d(2024, 1, 1), None);
    assert_eq!(result, vec![d(2024, 1, 1), d(2024, 1, 8), d(2024, 1, 15)]);
}

#[test]
fn empty_rule_expands_to_nothing() {
    assert!(expand_rrule("", d(2024, 1, 1), None).is_empty());
}

// ---------------------------------------------------------------------------
// Frequencies and intervals
// ---------------------------------------------------------------------------

#[test]
fn daily_interval_three() {
    let result = expand_rrule("FREQ=DAILY;INTERVAL=3;COUNT=3", d(2024, 1, 1), None);
    assert_eq!(result, vec![d(2024, 1, 1), d(2024, 1, 4), d(2024, 1, 7)]);
}

#[test]
fn weekly_without_byday_keeps_weekday() {
    let result = expand_rrule("FREQ=WEEKLY;INTERVAL=2;COUNT=3", d(2024, 1, 1), None);
    assert_eq!(result, vec![d(2024, 1, 1), d(2024, 1, 15), d(2024, 1, 29)]);
}

#[test]
fn biweekly_tue_thu_skips_alternate_weeks() {
    let result = expand_rrule(
        "FREQ=WEEKLY;INTERVAL=2;BYDAY=TU,TH;COUNT=6",
        d(2024, 1, 2), // Tuesday
        None,
    );
    assert_eq!(
        result,
        vec![
            d(2024, 1, 2),
            d(2024, 1, 4),
            d(2024, 1, 16),
            d(2024, 1, 18),
            d(2024, 1, 30),
            d(2024, 2, 1),
        ]
    );
}

#[test]
fn weeks_start_on_sunday_for_interval_steps() {
    // Sunday is the first day of a week, so from Monday the next SU is
    // `interval` weeks away while the MO after it is the next day.
    let result = expand_rrule("FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,SU;COUNT=4", d(2024, 1, 1), None);
    assert_eq!(
        result,
        vec![d(2024, 1, 1), d(2024, 1, 14), d(2024, 1, 15), d(2024, 1, 28)]
    );
}

#[test]
fn monthly_from_month_end_drifts_after_short_month() {
    // Each step starts from the previous (clamped) occurrence.
    let result = expand_rrule("FREQ=MONTHLY;COUNT=4", d(2024, 1, 31), None);
    assert_eq!(
        result,
        vec![d(2024, 1, 31), d(2024, 2, 29), d(2024, 3, 29), d(2024, 4, 29)]
    );
}

#[test]
fn yearly_from_leap_day_clamps_to_feb_28() {
    let result = expand_rrule("FREQ=YEARLY;COUNT=3", d(2024, 2, 29), None);
    assert_eq!(result, vec![d(2024, 2, 29), d(2025, 2, 28), d(2026, 2, 28)]);
}

#[test]
fn yearly_interval_preserves_month_and_day() {
    let result = expand_rrule("FREQ=YEARLY;INTERVAL=5;COUNT=3", d(2024, 6, 15), None);
    assert_eq!(result, vec![d(2024, 6, 15), d(2029, 6, 15), d(2034, 6, 15)]);
}

#[test]
fn unrecognized_frequency_steps_one_day() {
    // INTERVAL does not apply to the fallback step.
    let result = expand_rrule("FREQ=HOURLY;INTERVAL=4;COUNT=3", d(2024, 1, 1), None);
    assert_eq!(result, vec![d(2024, 1, 1), d(2024, 1, 2), d(2024, 1, 3)]);
}

#[test]
fn zero_interval_is_treated_as_one() {
    let result = expand_rrule("FREQ=DAILY;INTERVAL=0;COUNT=2", d(2024, 1, 1), None);
    assert_eq!(result, vec![d(2024, 1, 1), d(2024, 1, 2)]);
}

// ---------------------------------------------------------------------------
// Seed adjustment
// ---------------------------------------------------------------------------

#[test]
fn seed_moves_to_next_listed_day_in_same_week() {
    let result = expand_rrule("FREQ=WEEKLY;BYDAY=WE,FR;COUNT=3", d(2024, 1, 1), None);
    assert_eq!(result, vec![d(2024, 1, 3), d(2024, 1, 5), d(2024, 1, 10)]);
}

#[test]
fn seed_wraps_to_following_week() {
    // Saturday start, only Mondays listed.
    let result = expand_rrule("FREQ=WEEKLY;BYDAY=MO;COUNT=2", d(2024, 1, 6), None);
    assert_eq!(result, vec![d(2024, 1, 8), d(2024, 1, 15)]);
}

#[test]
fn seed_adjustment_ignores_interval() {
    let result = expand_rrule("FREQ=WEEKLY;INTERVAL=3;BYDAY=MO;COUNT=2", d(2024, 1, 6), None);
    assert_eq!(result, vec![d(2024, 1, 8), d(2024, 1, 29)]);
}

#[test]
fn byday_on_daily_rule_does_not_move_seed() {
    let result = expand_rrule("FREQ=DAILY;BYDAY=MO;COUNT=2", d(2024, 1, 6), None);
    assert_eq!(result, vec![d(2024, 1, 6), d(2024, 1, 7)]);
}

#[test]
fn byday_with_only_unknown_tokens_is_plain_weekly() {
    let result = expand_rrule("FREQ=WEEKLY;BYDAY=XX;COUNT=2", d(2024, 1, 3), None);
    assert_eq!(result, vec![d(2024, 1, 3), d(2024, 1, 10)]);
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

#[test]
fn default_cap_applies_without_count_or_horizon() {
    let result = expand_rrule("FREQ=DAILY", d(2024, 1, 1), None);
    assert_eq!(result.len(), DEFAULT_MAX_OCCURRENCES);
    assert_eq!(result.last(), Some(&d(2024, 4, 9)));
}

#[test]
fn count_overrides_caller_cap() {
    let result = expand_rrule("FREQ=DAILY;COUNT=150", d(2024, 1, 1), None);
    assert_eq!(result.len(), 150);

    let result = expand_rrule_with_limit("FREQ=DAILY;COUNT=2", d(2024, 1, 1), None, 50);
    assert_eq!(result.len(), 2);
}

#[test]
fn horizon_bounds_expansion() {
    let result = expand_rrule("FREQ=DAILY", d(2024, 1, 1), Some(d(2024, 1, 3)));
    assert_eq!(result, vec![d(2024, 1, 1), d(2024, 1, 2), d(2024, 1, 3)]);
}

#[test]
fn until_takes_precedence_over_horizon() {
    let result = expand_rrule("FREQ=DAILY;UNTIL=20240105", d(2024, 1, 1), Some(d(2024, 1, 3)));
    assert_eq!(result.len(), 5);
    assert_eq!(result.last(), Some(&d(2024, 1, 5)));
}

#[test]
fn until_time_of_day_is_ignored() {
    let result = expand_rrule("FREQ=DAILY;UNTIL=20240110T235959Z", d(2024, 1, 8), None);
    assert_eq!(result, vec![d(2024, 1, 8), d(2024, 1, 9), d(2024, 1, 10)]);
}

#[test]
fn count_reached_before_until() {
    let result = expand_rrule("FREQ=DAILY;COUNT=2;UNTIL=20240131", d(2024, 1, 1), None);
    assert_eq!(result, vec![d(2024, 1, 1), d(2024, 1, 2)]);
}

#[test]
fn until_reached_before_count() {
    let result = expand_rrule("FREQ=DAILY;COUNT=20;UNTIL=20240102", d(2024, 1, 1), None);
    assert_eq!(result, vec![d(2024, 1, 1), d(2024, 1, 2)]);
}

#[test]
fn count_below_one_emits_only_seed() {
    for rule in ["FREQ=DAILY;COUNT=0", "FREQ=DAILY;COUNT=-3"] {
        assert_eq!(expand_rrule(rule, d(2024, 1, 1), None), vec![d(2024, 1, 1)], "{rule}");
    }
}

#[test]
fn zero_cap_still_emits_seed() {
    let result = expand_rrule_with_limit("FREQ=DAILY", d(2024, 1, 1), None, 0);
    assert_eq!(result, vec![d(2024, 1, 1)]);
}

#[test]
fn seed_is_emitted_even_after_until() {
    let result = expand_rrule("FREQ=DAILY;UNTIL=20231231", d(2024, 1, 1), None);
    assert_eq!(result, vec![d(2024, 1, 1)]);
}

#[test]
fn safety_ceiling_limits_large_caps() {
    let result = expand_rrule_with_limit("FREQ=DAILY", d(2024, 1, 1), None, 5000);
    assert_eq!(result.len(), SAFETY_CEILING + 1);
}

#[test]
fn overflow_at_calendar_end_stops_quietly() {
    let result = expand_rrule("FREQ=DAILY;COUNT=3", NaiveDate::MAX, None);
    assert_eq!(result, vec![NaiveDate::MAX]);
}

// ---------------------------------------------------------------------------
// Rules that expand to nothing
// ---------------------------------------------------------------------------

#[test]
fn rule_without_freq_expands_to_nothing() {
    for rule in ["garbage", "INTERVAL=2;COUNT=3", ";;;"] {
        assert!(expand_rrule(rule, d(2024, 1, 1), None).is_empty(), "{rule}");
    }
}

// ---------------------------------------------------------------------------
// Parsed-but-unapplied fields
// ---------------------------------------------------------------------------

#[test]
fn bymonth_does_not_constrain_yearly_dates() {
    let result = expand_rrule("FREQ=YEARLY;BYMONTH=6;COUNT=3", d(2024, 1, 15), None);
    assert_eq!(result, vec![d(2024, 1, 15), d(2025, 1, 15), d(2026, 1, 15)]);
}

#[test]
fn bymonthday_does_not_constrain_monthly_dates() {
    let result = expand_rrule("FREQ=MONTHLY;BYMONTHDAY=15;COUNT=2", d(2024, 1, 1), None);
    assert_eq!(result, vec![d(2024, 1, 1), d(2024, 2, 1)]);
}

// ---------------------------------------------------------------------------
// Entry points agree
// ---------------------------------------------------------------------------

#[test]
fn parsed_rule_and_options_match_string_entry_point() {
    let rule_str = "FREQ=WEEKLY;BYDAY=TU,FR";
    let start = d(2024, 3, 1);
    let horizon = Some(d(2024, 4, 30));

    let expected = expand_rrule(rule_str, start, horizon);
    let parsed = RecurrenceRule::parse(rule_str);
    assert_eq!(expand_rule(&parsed, start, horizon, DEFAULT_MAX_OCCURRENCES), expected);

    let options = ExpandOptions {
        horizon,
        ..ExpandOptions::default()
    };
    assert_eq!(expand_with_options(rule_str, start, &options), expected);
}

#[test]
fn options_deserialize_with_defaults() {
    let options: ExpandOptions = serde_json::from_str(r#"{"horizon":"2024-01-03"}"#).unwrap();
    assert_eq!(options.horizon, Some(d(2024, 1, 3)));
    assert_eq!(options.max_occurrences, DEFAULT_MAX_OCCURRENCES);

    let result = expand_with_options("FREQ=DAILY", d(2024, 1, 1), &options);
    assert_eq!(result.len(), 3);
}

// ---------------------------------------------------------------------------
// Reentrancy
// ---------------------------------------------------------------------------

#[test]
fn concurrent_expansions_do_not_interfere() {
    let cases: Vec<(&str, NaiveDate)> = vec![
        ("FREQ=DAILY;INTERVAL=2", d(2024, 1, 1)),
        ("FREQ=WEEKLY;BYDAY=MO,WE,FR", d(2024, 2, 7)),
        ("FREQ=MONTHLY;COUNT=12", d(2024, 1, 31)),
        ("FREQ=YEARLY;UNTIL=20400101", d(2024, 2, 29)),
    ];
    let sequential: Vec<Vec<NaiveDate>> = cases
        .iter()
        .map(|(rule, start)| expand_rrule(rule, *start, None))
        .collect();

    let concurrent: Vec<Vec<NaiveDate>> = std::thread::scope(|scope| {
        let handles: Vec<_> = cases
            .iter()
            .map(|(rule, start)| scope.spawn(move || expand_rrule(rule, *start, None)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(concurrent, sequential);
}
