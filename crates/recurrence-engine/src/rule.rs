//! Rule parsing -- compact `KEY=VALUE;...` strings into a [`RecurrenceRule`].
//!
//! Two entry points share one parser:
//!
//! - [`RecurrenceRule::parse`] is permissive. Malformed values drop their field
//!   (logged at `debug`) and never fail.
//! - [`RecurrenceRule::parse_strict`] (also `FromStr`) surfaces the first
//!   problem as a [`RecurrenceError`].
//!
//! Unknown keys are ignored in both modes.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Serialize, Serializer};

use crate::error::{RecurrenceError, Result};

/// How often a rule repeats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    /// A `FREQ=` token the parser does not know (e.g. `HOURLY`). The
    /// expander steps such rules one day at a time.
    Unrecognized(String),
}

impl Frequency {
    fn from_token(token: &str) -> Frequency {
        match token {
            "DAILY" => Frequency::Daily,
            "WEEKLY" => Frequency::Weekly,
            "MONTHLY" => Frequency::Monthly,
            "YEARLY" => Frequency::Yearly,
            other => Frequency::Unrecognized(other.to_string()),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Frequency::Unrecognized(_))
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Daily => f.write_str("DAILY"),
            Frequency::Weekly => f.write_str("WEEKLY"),
            Frequency::Monthly => f.write_str("MONTHLY"),
            Frequency::Yearly => f.write_str("YEARLY"),
            Frequency::Unrecognized(token) => f.write_str(token),
        }
    }
}

impl Serialize for Frequency {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A parsed recurrence rule.
///
/// Fields are private so that `interval >= 1` holds for every value; use the
/// accessors to read them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecurrenceRule {
    frequency: Option<Frequency>,
    interval: u32,
    count: Option<u32>,
    until: Option<NaiveDateTime>,
    by_day: Vec<Weekday>,
    // Parsed but never consulted by the expander.
    by_month: Vec<u32>,
    by_month_day: Vec<i32>,
}

impl Default for RecurrenceRule {
    fn default() -> Self {
        Self {
            frequency: None,
            interval: 1,
            count: None,
            until: None,
            by_day: Vec::new(),
            by_month: Vec::new(),
            by_month_day: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Permissive,
    Strict,
}

impl RecurrenceRule {
    /// Parse a rule, silently omitting any field whose value is malformed.
    ///
    /// An empty string yields a rule with no frequency, which expands to
    /// nothing.
    pub fn parse(rule: &str) -> RecurrenceRule {
        parse_rule(rule, Mode::Permissive).unwrap_or_default()
    }

    /// Parse a rule, rejecting anything the permissive parser would drop.
    ///
    /// # Errors
    /// Returns the first problem found: an empty rule, a part without `=`,
    /// a non-numeric `INTERVAL`/`COUNT`, a malformed `UNTIL`, an unknown
    /// `FREQ` or weekday token, a missing `FREQ`, or a `BYMONTH`/`BYMONTHDAY`
    /// field (which the expander cannot honor).
    pub fn parse_strict(rule: &str) -> Result<RecurrenceRule> {
        parse_rule(rule, Mode::Strict)
    }

    pub fn frequency(&self) -> Option<&Frequency> {
        self.frequency.as_ref()
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// `Some(0)` means the rule asked for fewer than one occurrence.
    pub fn count(&self) -> Option<u32> {
        self.count
    }

    pub fn until(&self) -> Option<NaiveDateTime> {
        self.until
    }

    /// The `UNTIL` bound truncated to a whole day.
    pub fn until_date(&self) -> Option<NaiveDate> {
        self.until.map(|dt| dt.date())
    }

    /// Weekdays in the order they were listed.
    pub fn by_day(&self) -> &[Weekday] {
        &self.by_day
    }

    /// Weekdays sorted Sunday-first with duplicates removed.
    pub fn effective_by_day(&self) -> Vec<Weekday> {
        let mut days = self.by_day.clone();
        days.sort_by_key(|d| d.num_days_from_sunday());
        days.dedup();
        days
    }

    pub fn by_month(&self) -> &[u32] {
        &self.by_month
    }

    pub fn by_month_day(&self) -> &[i32] {
        &self.by_month_day
    }

    /// Names of fields this rule sets that expansion does not apply.
    pub fn unapplied_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if !self.by_month.is_empty() {
            fields.push("BYMONTH");
        }
        if !self.by_month_day.is_empty() {
            fields.push("BYMONTHDAY");
        }
        fields
    }
}

impl FromStr for RecurrenceRule {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self> {
        RecurrenceRule::parse_strict(s)
    }
}

impl fmt::Display for RecurrenceRule {
    /// Canonical `KEY=VALUE;...` form. `INTERVAL=1` is omitted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if let Some(freq) = &self.frequency {
            parts.push(format!("FREQ={freq}"));
        }
        if self.interval > 1 {
            parts.push(format!("INTERVAL={}", self.interval));
        }
        if let Some(count) = self.count {
            parts.push(format!("COUNT={count}"));
        }
        if let Some(until) = self.until {
            parts.push(format!("UNTIL={}", until.format("%Y%m%dT%H%M%S")));
        }
        if !self.by_day.is_empty() {
            let days: Vec<&str> = self.by_day.iter().map(|d| weekday_token(*d)).collect();
            parts.push(format!("BYDAY={}", days.join(",")));
        }
        if !self.by_month.is_empty() {
            parts.push(format!("BYMONTH={}", join_numbers(&self.by_month)));
        }
        if !self.by_month_day.is_empty() {
            parts.push(format!("BYMONTHDAY={}", join_numbers(&self.by_month_day)));
        }
        f.write_str(&parts.join(";"))
    }
}

fn join_numbers<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Strict mode turns a dropped field into an error; permissive mode logs it.
fn reject(mode: Mode, err: RecurrenceError) -> Result<()> {
    match mode {
        Mode::Strict => Err(err),
        Mode::Permissive => {
            log::debug!("ignoring rule field: {err}");
            Ok(())
        }
    }
}

fn parse_rule(text: &str, mode: Mode) -> Result<RecurrenceRule> {
    let mut rule = RecurrenceRule::default();

    if text.is_empty() {
        return match mode {
            Mode::Strict => Err(RecurrenceError::EmptyRule),
            Mode::Permissive => Ok(rule),
        };
    }

    for part in text.split(';') {
        // Tolerate trailing or doubled separators.
        if part.is_empty() {
            continue;
        }
        let Some((key, value)) = part.split_once('=') else {
            reject(mode, RecurrenceError::MalformedPart(part.to_string()))?;
            continue;
        };

        match key {
            "FREQ" => {
                let frequency = Frequency::from_token(value);
                // Permissive mode keeps the token; expansion falls back to daily steps.
                if mode == Mode::Strict && !frequency.is_recognized() {
                    return Err(RecurrenceError::UnknownFrequency(value.to_string()));
                }
                rule.frequency = Some(frequency);
            }
            "INTERVAL" => {
                rule.interval = 1;
                match value.parse::<i64>() {
                    Ok(n) => {
                        rule.interval = u32::try_from(n).ok().filter(|&n| n >= 1).unwrap_or(1);
                    }
                    Err(_) => reject(mode, invalid_number("INTERVAL", value))?,
                }
            }
            "COUNT" => match value.parse::<i64>() {
                Ok(n) => rule.count = Some(u32::try_from(n.max(0)).unwrap_or(u32::MAX)),
                Err(_) => reject(mode, invalid_number("COUNT", value))?,
            },
            "UNTIL" => match parse_until(value) {
                Ok(until) => rule.until = Some(until),
                Err(err) => reject(mode, err)?,
            },
            "BYDAY" => {
                let mut days = Vec::new();
                for token in value.split(',') {
                    match weekday_from_token(token) {
                        Some(day) => days.push(day),
                        None => reject(mode, RecurrenceError::UnknownWeekday(token.to_string()))?,
                    }
                }
                rule.by_day = days;
            }
            "BYMONTH" => {
                if mode == Mode::Strict {
                    return Err(RecurrenceError::UnsupportedField("BYMONTH"));
                }
                rule.by_month = parse_number_list("BYMONTH", value, mode)?;
            }
            "BYMONTHDAY" => {
                if mode == Mode::Strict {
                    return Err(RecurrenceError::UnsupportedField("BYMONTHDAY"));
                }
                rule.by_month_day = parse_number_list("BYMONTHDAY", value, mode)?;
            }
            other => log::trace!("skipping unknown rule key '{other}'"),
        }
    }

    if mode == Mode::Strict && rule.frequency.is_none() {
        return Err(RecurrenceError::MissingFrequency);
    }

    Ok(rule)
}

fn invalid_number(key: &'static str, value: &str) -> RecurrenceError {
    RecurrenceError::InvalidNumber {
        key,
        value: value.to_string(),
    }
}

fn parse_number_list<T: FromStr>(key: &'static str, value: &str, mode: Mode) -> Result<Vec<T>> {
    let mut numbers = Vec::new();
    for item in value.split(',') {
        match item.parse::<T>() {
            Ok(n) => numbers.push(n),
            Err(_) => reject(mode, invalid_number(key, item))?,
        }
    }
    Ok(numbers)
}

/// Decode `YYYYMMDD`, optionally followed by `THHMMSS` and a trailing `Z`.
fn parse_until(value: &str) -> Result<NaiveDateTime> {
    let invalid = || RecurrenceError::InvalidUntil(value.to_string());
    let token = value.strip_suffix('Z').unwrap_or(value);
    let (date_part, time_part) = match token.split_once('T') {
        Some((date, time)) => (date, Some(time)),
        None => (token, None),
    };

    let [year, month, day] = split_digits(date_part, [4, 2, 2]).ok_or_else(invalid)?;
    let date = NaiveDate::from_ymd_opt(year as i32, month, day).ok_or_else(invalid)?;

    let time = match time_part {
        None => NaiveTime::MIN,
        Some(time) => {
            let [hour, minute, second] = split_digits(time, [2, 2, 2]).ok_or_else(invalid)?;
            NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(invalid)?
        }
    };

    Ok(date.and_time(time))
}

/// Split an all-digit string into fixed-width numeric fields.
fn split_digits<const N: usize>(s: &str, widths: [usize; N]) -> Option<[u32; N]> {
    if s.len() != widths.iter().sum::<usize>() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut fields = [0u32; N];
    let mut offset = 0;
    for (field, width) in fields.iter_mut().zip(widths) {
        *field = s[offset..offset + width].parse().ok()?;
        offset += width;
    }
    Some(fields)
}

pub(crate) fn weekday_from_token(token: &str) -> Option<Weekday> {
    match token {
        "MO" => Some(Weekday::Mon),
        "TU" => Some(Weekday::Tue),
        "WE" => Some(Weekday::Wed),
        "TH" => Some(Weekday::Thu),
        "FR" => Some(Weekday::Fri),
        "SA" => Some(Weekday::Sat),
        "SU" => Some(Weekday::Sun),
        _ => None,
    }
}

pub(crate) fn weekday_token(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    }
}
