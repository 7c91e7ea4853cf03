//! `recur` CLI — expand, describe, and query recurrence rules from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # List occurrences (one YYYY-MM-DD per line)
//! recur expand 'FREQ=WEEKLY;BYDAY=MO,WE,FR;COUNT=4' --start 2024-01-01
//!
//! # Bound by a horizon and cap, emit JSON
//! recur expand 'FREQ=DAILY' --start 2024-01-01 --horizon 2024-03-01 --max 20 --json
//!
//! # Summarize a rule (locale from --locale or RECUR_LOCALE, default pt)
//! recur describe 'FREQ=WEEKLY;INTERVAL=2;BYDAY=TU,TH' --locale en
//!
//! # Does the event happen on a given day?
//! recur occurs 'FREQ=MONTHLY' --start 2024-01-31 --date 2024-02-29
//!
//! # Occurrences inside a calendar view
//! recur range 'FREQ=WEEKLY;BYDAY=SA' --start 2024-01-01 --from 2024-03-01 --to 2024-03-31
//!
//! # Inspect the parsed rule; --strict rejects anything the expander would drop
//! recur parse 'FREQ=YEARLY;BYMONTH=6' --strict
//! ```
//!
//! Diagnostics go to stderr at the level given by `--log` or `RECUR_LOG`.

mod logger;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use recurrence_engine::{
    describe_rrule_in, expand_with_options, occurrences_in_range, occurs_on, ExpandOptions,
    Locale, RecurrenceRule, DEFAULT_MAX_OCCURRENCES,
};

#[derive(Parser)]
#[command(name = "recur", version, about = "Recurrence rule expansion CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level for stderr diagnostics (off, error, warn, info, debug, trace)
    #[arg(long, env = "RECUR_LOG", default_value = "off", global = true)]
    log: log::LevelFilter,
}

#[derive(Subcommand)]
enum Commands {
    /// List the dates a rule produces
    Expand {
        /// Rule string, e.g. "FREQ=WEEKLY;BYDAY=MO,WE,FR;COUNT=10"
        rule: String,
        /// First day of the event (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,
        /// Last day to consider; the rule's UNTIL takes precedence
        #[arg(long)]
        horizon: Option<NaiveDate>,
        /// Occurrence cap; the rule's COUNT takes precedence
        #[arg(long, default_value_t = DEFAULT_MAX_OCCURRENCES)]
        max: usize,
        /// Print a JSON array instead of one date per line
        #[arg(long)]
        json: bool,
    },
    /// Print a human-readable summary of a rule
    Describe {
        rule: String,
        /// Output language: en, pt or es
        #[arg(long, env = "RECUR_LOCALE", default_value = "pt")]
        locale: Locale,
    },
    /// Check whether the event occurs on a date (prints yes or no)
    Occurs {
        rule: String,
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        date: NaiveDate,
    },
    /// List occurrences inside an inclusive window
    Range {
        rule: String,
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
        #[arg(long)]
        json: bool,
    },
    /// Show the parsed rule as JSON
    Parse {
        rule: String,
        /// Fail on anything the permissive parser would silently drop
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    log::set_max_level(cli.log);
    logger::Logger::init().context("Failed to install logger")?;

    match cli.command {
        Commands::Expand {
            rule,
            start,
            horizon,
            max,
            json,
        } => {
            let options = ExpandOptions {
                horizon,
                max_occurrences: max,
            };
            let dates = expand_with_options(&rule, start, &options);
            log::debug!("expanded '{}' into {} dates", rule, dates.len());
            print_dates(&dates, json)?;
        }
        Commands::Describe { rule, locale } => {
            println!("{}", describe_rrule_in(&rule, locale));
        }
        Commands::Occurs { rule, start, date } => {
            let answer = if occurs_on(date, start, &rule) { "yes" } else { "no" };
            println!("{}", answer);
        }
        Commands::Range {
            rule,
            start,
            from,
            to,
            json,
        } => {
            if to < from {
                anyhow::bail!("Invalid window: --to {} is before --from {}", to, from);
            }
            let dates = occurrences_in_range(start, &rule, from, to);
            print_dates(&dates, json)?;
        }
        Commands::Parse { rule, strict } => {
            let parsed = if strict {
                RecurrenceRule::parse_strict(&rule)
                    .with_context(|| format!("Failed to parse rule: {}", rule))?
            } else {
                RecurrenceRule::parse(&rule)
            };
            let pretty = serde_json::to_string_pretty(&parsed)?;
            println!("{}", pretty);
        }
    }

    Ok(())
}

fn print_dates(dates: &[NaiveDate], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(dates)?);
    } else {
        for date in dates {
            println!("{}", date);
        }
    }
    Ok(())
}
