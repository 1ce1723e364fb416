use jiff::civil::Date;
use jiff::Span;

use crate::ast::*;
use crate::error::RuleError;

/// Upper bound for monthly searches: five years of months.
const MAX_MONTHS: i32 = 60;

/// Upper bound for the yearly search. Leap days can be eight years apart
/// (2096 -> 2104), plus one year when the current year's date has passed.
const MAX_YEARS: i16 = 10;

/// How `-1` / `-2` in a monthly rule become concrete day numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SentinelPolicy {
    /// Resolve once against the start date's month and reuse that day number
    /// in every later month that is scanned.
    Anchored,
    /// Resolve against each month as it is scanned.
    #[default]
    PerMonth,
}

/// The date a weekly or monthly search counts from: `anchor` when it lies
/// after `now`, otherwise `now`.
pub fn start_date(now: Date, anchor: Date) -> Date {
    if anchor > now {
        anchor
    } else {
        now
    }
}

/// Compute the first date strictly after `now` that satisfies `rule`.
pub fn next_date(
    rule: &Rule,
    now: Date,
    anchor: Date,
    policy: SentinelPolicy,
) -> Result<Date, RuleError> {
    match rule {
        Rule::Daily { interval } => next_daily(rule, *interval, now, anchor),
        Rule::Yearly => next_yearly(rule, now, anchor),
        Rule::Weekly { days } => next_weekly(rule, days, start_date(now, anchor)),
        Rule::Monthly { days, months } if months.is_empty() => {
            next_monthly(rule, days, start_date(now, anchor), policy)
        }
        Rule::Monthly { days, months } => {
            next_monthly_in(rule, days, months, start_date(now, anchor), policy)
        }
    }
}

/// Compute the next `n` dates, each one searched from the previous result.
pub fn next_n(
    rule: &Rule,
    now: Date,
    anchor: Date,
    n: usize,
    policy: SentinelPolicy,
) -> Result<Vec<Date>, RuleError> {
    occurrences(rule, now, anchor, policy).take(n).collect()
}

/// Replace `-1` / `-2` with the day numbers they denote in `start`'s month.
pub fn resolve_sentinels(rule: &Rule, start: Date) -> Rule {
    match rule {
        Rule::Monthly { days, months } => Rule::Monthly {
            days: days
                .iter()
                .map(|d| MonthDay::Day(d.resolve(start.days_in_month()) as u8))
                .collect(),
            months: months.clone(),
        },
        other => other.clone(),
    }
}

/// Lazy iterator over successive dates of a rule.
///
/// Each step feeds the previous date back in as both `now` and `anchor`, so
/// the sequence is strictly increasing. An error is yielded once and ends
/// the iteration.
pub struct Occurrences<'a> {
    rule: &'a Rule,
    now: Date,
    anchor: Date,
    policy: SentinelPolicy,
    done: bool,
}

pub fn occurrences(rule: &Rule, now: Date, anchor: Date, policy: SentinelPolicy) -> Occurrences<'_> {
    Occurrences {
        rule,
        now,
        anchor,
        policy,
        done: false,
    }
}

impl Iterator for Occurrences<'_> {
    type Item = Result<Date, RuleError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match next_date(self.rule, self.now, self.anchor, self.policy) {
            Ok(date) => {
                self.now = date;
                self.anchor = date;
                Some(Ok(date))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl std::iter::FusedIterator for Occurrences<'_> {}

fn days_after(date: Date, days: i64) -> Result<Date, RuleError> {
    Ok(date.checked_add(Span::new().try_days(days)?)?)
}

/// Count days between two dates (signed).
fn days_between(a: Date, b: Date) -> Result<i64, RuleError> {
    Ok(i64::from(a.until(b)?.get_days()))
}

fn days_in_month(year: i16, month: i8) -> Result<i8, RuleError> {
    Ok(Date::new(year, month, 1)?.days_in_month())
}

/// The (year, month) `offset` months after the given one.
fn shift_month(year: i16, month: i8, offset: i32) -> (i16, i8) {
    let index = i32::from(year) * 12 + i32::from(month - 1) + offset;
    (index.div_euclid(12) as i16, (index.rem_euclid(12) + 1) as i8)
}

/// Concrete, sorted day numbers of `days` for `year`/`month`.
///
/// Under [`SentinelPolicy::Anchored`] sentinels always take the length of
/// `start`'s month, even when a later month is being scanned.
fn resolve_days(
    days: &[MonthDay],
    policy: SentinelPolicy,
    start: Date,
    year: i16,
    month: i8,
) -> Result<Vec<i8>, RuleError> {
    let length = match policy {
        SentinelPolicy::Anchored => start.days_in_month(),
        SentinelPolicy::PerMonth => days_in_month(year, month)?,
    };
    let mut resolved: Vec<i8> = days.iter().map(|d| d.resolve(length)).collect();
    resolved.sort_unstable();
    Ok(resolved)
}

fn next_daily(rule: &Rule, interval: u16, now: Date, anchor: Date) -> Result<Date, RuleError> {
    if interval == 0 {
        return Err(RuleError::unsatisfiable(rule, "a zero-day interval"));
    }
    let step = i64::from(interval);
    // Smallest k >= 1 with anchor + k * step > now.
    let elapsed = days_between(anchor, now)?;
    let k = if elapsed < 0 { 1 } else { elapsed / step + 1 };
    days_after(anchor, k * step)
}

fn next_yearly(rule: &Rule, now: Date, anchor: Date) -> Result<Date, RuleError> {
    let first = (anchor.year() + 1).max(now.year());
    for year in first..first.saturating_add(MAX_YEARS) {
        // Feb 29 only exists in leap years; other years are skipped.
        if let Ok(candidate) = Date::new(year, anchor.month(), anchor.day()) {
            if candidate > now {
                return Ok(candidate);
            }
        }
    }
    Err(RuleError::unsatisfiable(
        rule,
        format!("{MAX_YEARS} years after {}", now.year()),
    ))
}

fn next_weekly(rule: &Rule, days: &[Weekday], start: Date) -> Result<Date, RuleError> {
    let mut numbers: Vec<i64> = days.iter().map(|d| i64::from(d.number())).collect();
    numbers.sort_unstable();

    let today = i64::from(Weekday::from_jiff(start.weekday()).number());
    let offset = match numbers.iter().find(|&&n| n > today) {
        Some(n) => n - today,
        None => {
            // Wrap into next week.
            let first = numbers
                .first()
                .ok_or_else(|| RuleError::unsatisfiable(rule, "an empty weekday list"))?;
            7 - today + first
        }
    };
    days_after(start, offset)
}

fn next_monthly(
    rule: &Rule,
    days: &[MonthDay],
    start: Date,
    policy: SentinelPolicy,
) -> Result<Date, RuleError> {
    let (year, month) = (start.year(), start.month());

    let resolved = resolve_days(days, policy, start, year, month)?;
    if let Some(&day) = resolved.iter().find(|&&d| d > start.day()) {
        if day <= start.days_in_month() {
            return Ok(Date::new(year, month, day)?);
        }
        // Too short a month for this day: take the same day next month.
        let (next_year, next_month) = shift_month(year, month, 1);
        if let Ok(date) = Date::new(next_year, next_month, day) {
            return Ok(date);
        }
    }

    for offset in 1..=MAX_MONTHS {
        let (y, m) = shift_month(year, month, offset);
        let length = days_in_month(y, m)?;
        let resolved = resolve_days(days, policy, start, y, m)?;
        if let Some(&day) = resolved.iter().find(|&&d| d <= length) {
            return Ok(Date::new(y, m, day)?);
        }
    }

    Err(RuleError::unsatisfiable(
        rule,
        format!("{MAX_MONTHS} months after {start}"),
    ))
}

fn next_monthly_in(
    rule: &Rule,
    days: &[MonthDay],
    months: &[Month],
    start: Date,
    policy: SentinelPolicy,
) -> Result<Date, RuleError> {
    for offset in 0..MAX_MONTHS {
        let (y, m) = shift_month(start.year(), start.month(), offset);
        if !months.iter().any(|mo| mo.number() == m) {
            continue;
        }
        // Only days after the start date count in the start month itself.
        let baseline = if offset == 0 { start.day() } else { 0 };
        let length = days_in_month(y, m)?;
        let resolved = resolve_days(days, policy, start, y, m)?;
        if let Some(&day) = resolved.iter().find(|&&d| d > baseline && d <= length) {
            return Ok(Date::new(y, m, day)?);
        }
    }

    Err(RuleError::unsatisfiable(
        rule,
        format!("{MAX_MONTHS} months after {start}"),
    ))
}
