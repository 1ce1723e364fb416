//! nextdate: repeat rules for task schedulers.
//!
//! A repeat rule is a short string attached to a task:
//!
//! | Rule | Meaning |
//! |---|---|
//! | `d 7` | every 7 days from the task date (1..=400) |
//! | `y` | every year on the task's month and day |
//! | `w 1,4` | on Mondays and Thursdays (1 = Monday .. 7 = Sunday) |
//! | `m 1,-1` | on the 1st and the last day of every month (`-2` = second-to-last) |
//! | `m 15 1,6` | on the 15th of January and June |
//!
//! Evaluation is a pure function of `(now, anchor, rule)`; the caller supplies
//! `now`, nothing here reads the clock.
//!
//! # Examples
//!
//! ```
//! use jiff::civil::date;
//!
//! let next = nextdate::next_date(date(2024, 1, 3), date(2024, 1, 1), "d 5").unwrap();
//! assert_eq!(next, date(2024, 1, 6));
//!
//! let next = nextdate::next_date_compact("20250101", "20240229", "y").unwrap();
//! assert_eq!(next, "20280229");
//! ```

pub mod ast;
pub mod date;
pub mod display;
pub mod error;
pub mod eval;
pub mod parser;
pub mod task;

pub use ast::{Month, MonthDay, Rule, Weekday};
pub use error::{ErrorKind, RuleError};
pub use eval::{Occurrences, SentinelPolicy};
pub use task::{complete_task, normalize_task_date, Completion};

use jiff::civil::Date;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Compute the first date after `now` for `rule`, counting from `anchor`.
pub fn next_date(now: Date, anchor: Date, rule: &str) -> Result<Date, RuleError> {
    Rule::parse(rule)?.next_after(now, anchor)
}

/// [`next_date`] with an explicit sentinel policy.
pub fn next_date_with(
    now: Date,
    anchor: Date,
    rule: &str,
    policy: SentinelPolicy,
) -> Result<Date, RuleError> {
    Rule::parse(rule)?.next_after_with(now, anchor, policy)
}

/// [`next_date`] on `YYYYMMDD` strings.
pub fn next_date_compact(now: &str, date: &str, repeat: &str) -> Result<String, RuleError> {
    let now = crate::date::parse_compact(now)?;
    let anchor = crate::date::parse_compact(date)?;
    next_date(now, anchor, repeat).map(crate::date::format_compact)
}

// --- Rule convenience methods ---

impl Rule {
    /// Parse a repeat rule string.
    pub fn parse(input: &str) -> Result<Self, RuleError> {
        parser::parse(input)
    }

    /// Check whether a string is a valid repeat rule.
    pub fn validate(input: &str) -> bool {
        parser::parse(input).is_ok()
    }

    /// Compute the first date after `now`, counting from `anchor`.
    pub fn next_after(&self, now: Date, anchor: Date) -> Result<Date, RuleError> {
        eval::next_date(self, now, anchor, SentinelPolicy::default())
    }

    pub fn next_after_with(
        &self,
        now: Date,
        anchor: Date,
        policy: SentinelPolicy,
    ) -> Result<Date, RuleError> {
        eval::next_date(self, now, anchor, policy)
    }

    /// Compute the next `n` dates after `now`.
    pub fn next_n(&self, now: Date, anchor: Date, n: usize) -> Result<Vec<Date>, RuleError> {
        eval::next_n(self, now, anchor, n, SentinelPolicy::default())
    }

    /// Lazy iterator over the dates after `now`.
    pub fn occurrences(&self, now: Date, anchor: Date) -> Occurrences<'_> {
        eval::occurrences(self, now, anchor, SentinelPolicy::default())
    }

    /// Fix `-1` / `-2` to the day numbers they denote in the month of
    /// the start date (the later of `now` and `anchor`).
    pub fn resolve_sentinels(&self, now: Date, anchor: Date) -> Self {
        eval::resolve_sentinels(self, eval::start_date(now, anchor))
    }
}

impl FromStr for Rule {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Rule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(None)?;

        match self {
            Rule::Daily { interval } => {
                map.serialize_entry("kind", "daily")?;
                map.serialize_entry("interval", interval)?;
            }
            Rule::Yearly => {
                map.serialize_entry("kind", "yearly")?;
            }
            Rule::Weekly { days } => {
                map.serialize_entry("kind", "weekly")?;
                map.serialize_entry("days", days)?;
            }
            Rule::Monthly { days, months } => {
                map.serialize_entry("kind", "monthly")?;
                map.serialize_entry("days", days)?;
                map.serialize_entry("months", months)?;
            }
        }

        // Canonical text, always present
        map.serialize_entry("rule", &self.to_string())?;

        map.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Rule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Deserialize from the rule string
        let s = String::deserialize(deserializer)?;
        Rule::parse(&s).map_err(serde::de::Error::custom)
    }
}
