//! Date handling for scheduler tasks: the stored date of a task is normalized
//! when the task is saved and moved forward when it is marked done.

use jiff::civil::Date;

use crate::ast::Rule;
use crate::date::parse_compact;
use crate::error::RuleError;

/// What to do with a task that has been marked done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// One-off task: remove it.
    Delete,
    /// Repeating task: move it to the given date.
    Reschedule(Date),
}

fn parse_repeat(repeat: &str) -> Result<Option<Rule>, RuleError> {
    if repeat.is_empty() {
        Ok(None)
    } else {
        Rule::parse(repeat).map(Some)
    }
}

/// Resolve the date a task should be stored with.
///
/// `date` is empty, `"today"` or `YYYYMMDD`. Dates before `today` move to
/// `today` for one-off tasks and to the next occurrence after `today` for
/// repeating ones.
pub fn normalize_task_date(date: &str, repeat: &str, today: Date) -> Result<Date, RuleError> {
    let rule = parse_repeat(repeat)?;
    let date = match date {
        "" | "today" => return Ok(today),
        s => parse_compact(s)?,
    };
    if date >= today {
        return Ok(date);
    }
    match rule {
        None => Ok(today),
        Some(rule) => rule.next_after(today, date),
    }
}

/// Decide what happens to a task dated `date` when it is marked done.
pub fn complete_task(date: Date, repeat: &str, now: Date) -> Result<Completion, RuleError> {
    match parse_repeat(repeat)? {
        None => Ok(Completion::Delete),
        Some(rule) => rule.next_after(now, date).map(Completion::Reschedule),
    }
}
