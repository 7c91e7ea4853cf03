//! Human-readable rule summaries.
//!
//! A summary is the frequency phrase, the listed weekdays (WEEKLY only) and a
//! termination clause. `COUNT` wins over `UNTIL` when both are set.
//!
//! | Locale | Daily / every N | Count | Until |
//! |--------|-----------------|-------|-------|
//! | `en` | `Daily` / `Every 3 days` | `, 5 times` | ` until 2024-01-15` |
//! | `pt` | `Diariamente` / `A cada 3 dias` | `, 5 vezes` | ` até 15/01/2024` |
//! | `es` | `Diariamente` / `Cada 3 días` | `, 5 veces` | ` hasta 15/01/2024` |

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::RecurrenceError;
use crate::rule::{Frequency, RecurrenceRule};

/// Output language for [`describe_rrule_in`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    /// Portuguese, the language of the member portal these rules come from.
    #[default]
    Pt,
    Es,
}

impl FromStr for Locale {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "pt" => Ok(Locale::Pt),
            "es" => Ok(Locale::Es),
            _ => Err(RecurrenceError::InvalidLocale(s.to_string())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Locale::En => "en",
            Locale::Pt => "pt",
            Locale::Es => "es",
        })
    }
}

/// Describe a rule string in the default locale ([`Locale::Pt`]).
pub fn describe_rrule(rule: &str) -> String {
    describe_rrule_in(rule, Locale::default())
}

/// Describe a rule string in `locale`. An empty rule gives an empty string.
pub fn describe_rrule_in(rule: &str, locale: Locale) -> String {
    if rule.is_empty() {
        return String::new();
    }
    describe_rule(&RecurrenceRule::parse(rule), locale)
}

pub fn describe_rule(rule: &RecurrenceRule, locale: Locale) -> String {
    let mut description = match rule.frequency() {
        Some(freq) => frequency_phrase(freq, rule.interval(), locale),
        None => String::new(),
    };

    if rule.frequency() == Some(&Frequency::Weekly) && !rule.by_day().is_empty() {
        let names: Vec<&str> = rule.by_day().iter().map(|d| weekday_name(*d, locale)).collect();
        description.push_str(&format!(" ({})", names.join(", ")));
    }

    match (rule.count(), rule.until()) {
        (Some(count), _) if count > 0 => {
            let times = match locale {
                Locale::En => "times",
                Locale::Pt => "vezes",
                Locale::Es => "veces",
            };
            description.push_str(&format!(", {count} {times}"));
        }
        (_, Some(until)) => {
            let clause = match locale {
                Locale::En => format!(" until {}", until.format("%Y-%m-%d")),
                Locale::Pt => format!(" até {}", until.format("%d/%m/%Y")),
                Locale::Es => format!(" hasta {}", until.format("%d/%m/%Y")),
            };
            description.push_str(&clause);
        }
        _ => {}
    }

    description
}

fn frequency_phrase(freq: &Frequency, interval: u32, locale: Locale) -> String {
    let (single, unit) = match (freq, locale) {
        (Frequency::Daily, Locale::En) => ("Daily", "days"),
        (Frequency::Daily, Locale::Pt) => ("Diariamente", "dias"),
        (Frequency::Daily, Locale::Es) => ("Diariamente", "días"),
        (Frequency::Weekly, Locale::En) => ("Weekly", "weeks"),
        (Frequency::Weekly, Locale::Pt | Locale::Es) => ("Semanalmente", "semanas"),
        (Frequency::Monthly, Locale::En) => ("Monthly", "months"),
        (Frequency::Monthly, Locale::Pt) => ("Mensalmente", "meses"),
        (Frequency::Monthly, Locale::Es) => ("Mensualmente", "meses"),
        (Frequency::Yearly, Locale::En) => ("Yearly", "years"),
        (Frequency::Yearly, Locale::Pt) => ("Anualmente", "anos"),
        (Frequency::Yearly, Locale::Es) => ("Anualmente", "años"),
        (Frequency::Unrecognized(_), _) => return String::new(),
    };

    if interval == 1 {
        return single.to_string();
    }
    let every = match locale {
        Locale::En => "Every",
        Locale::Pt => "A cada",
        Locale::Es => "Cada",
    };
    format!("{every} {interval} {unit}")
}

fn weekday_name(day: Weekday, locale: Locale) -> &'static str {
    match locale {
        Locale::En => match day {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        },
        Locale::Pt => match day {
            Weekday::Mon => "Segunda",
            Weekday::Tue => "Terça",
            Weekday::Wed => "Quarta",
            Weekday::Thu => "Quinta",
            Weekday::Fri => "Sexta",
            Weekday::Sat => "Sábado",
            Weekday::Sun => "Domingo",
        },
        Locale::Es => match day {
            Weekday::Mon => "Lunes",
            Weekday::Tue => "Martes",
            Weekday::Wed => "Miércoles",
            Weekday::Thu => "Jueves",
            Weekday::Fri => "Viernes",
            Weekday::Sat => "Sábado",
            Weekday::Sun => "Domingo",
        },
    }
}
