use std::fmt;

use thiserror::Error;

/// Byte range within the rule string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// The numeric component a value was read for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Interval,
    Weekday,
    Day,
    Month,
}

impl Field {
    /// Human-readable bounds for this field.
    pub fn expected(self) -> &'static str {
        match self {
            Self::Interval => "1..=400",
            Self::Weekday => "1..=7",
            Self::Day => "1..=31, -1 or -2",
            Self::Month => "1..=12",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Interval => "interval",
            Self::Weekday => "weekday",
            Self::Day => "day",
            Self::Month => "month",
        })
    }
}

/// Coarse classification of a [`RuleError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unknown leading token, empty rule, wrong token count.
    Malformed,
    /// A numeric component that does not parse or is outside its bounds.
    OutOfRange,
    /// The bounded search ran out before finding a date.
    Unsatisfiable,
    /// Bad input at the date boundary (wire format, calendar overflow).
    InvalidInput,
}

/// All errors produced by nextdate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RuleError {
    #[error("empty repeat rule")]
    Empty,

    #[error("unknown repeat rule '{token}', expected one of d, w, m, y")]
    UnknownRule {
        token: String,
        span: Span,
        input: String,
    },

    #[error("{message}")]
    Malformed {
        message: String,
        span: Span,
        input: String,
    },

    #[error("invalid {field} '{value}'")]
    InvalidNumber {
        field: Field,
        value: String,
        span: Span,
        input: String,
    },

    #[error("{field} {value} out of range, expected {}", .field.expected())]
    OutOfRange {
        field: Field,
        value: i64,
        span: Span,
        input: String,
    },

    #[error("no date satisfies '{rule}' within {limit}")]
    Unsatisfiable { rule: String, limit: String },

    #[error("invalid date '{value}', expected YYYYMMDD")]
    InvalidDate { value: String },

    #[error("date out of range: {message}")]
    DateRange { message: String },
}

impl RuleError {
    pub fn unknown(token: impl Into<String>, span: Span, input: impl Into<String>) -> Self {
        Self::UnknownRule {
            token: token.into(),
            span,
            input: input.into(),
        }
    }

    pub fn malformed(message: impl Into<String>, span: Span, input: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
            span,
            input: input.into(),
        }
    }

    pub fn invalid_number(
        field: Field,
        value: impl Into<String>,
        span: Span,
        input: impl Into<String>,
    ) -> Self {
        Self::InvalidNumber {
            field,
            value: value.into(),
            span,
            input: input.into(),
        }
    }

    pub fn out_of_range(field: Field, value: i64, span: Span, input: impl Into<String>) -> Self {
        Self::OutOfRange {
            field,
            value,
            span,
            input: input.into(),
        }
    }

    pub fn unsatisfiable(rule: impl fmt::Display, limit: impl Into<String>) -> Self {
        Self::Unsatisfiable {
            rule: rule.to_string(),
            limit: limit.into(),
        }
    }

    pub fn invalid_date(value: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Empty | Self::UnknownRule { .. } | Self::Malformed { .. } => ErrorKind::Malformed,
            Self::InvalidNumber { .. } | Self::OutOfRange { .. } => ErrorKind::OutOfRange,
            Self::Unsatisfiable { .. } => ErrorKind::Unsatisfiable,
            Self::InvalidDate { .. } | Self::DateRange { .. } => ErrorKind::InvalidInput,
        }
    }

    /// The offending token, for errors raised while parsing a rule.
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::UnknownRule { span, .. }
            | Self::Malformed { span, .. }
            | Self::InvalidNumber { span, .. }
            | Self::OutOfRange { span, .. } => Some(*span),
            _ => None,
        }
    }

    /// Format a rich error with the rule underlined at the offending token.
    pub fn display_rich(&self) -> String {
        match self {
            Self::UnknownRule { span, input, .. }
            | Self::Malformed { span, input, .. }
            | Self::InvalidNumber { span, input, .. }
            | Self::OutOfRange { span, input, .. } => {
                format_span_error("error", &self.to_string(), span, input)
            }
            _ => format!("error: {self}"),
        }
    }
}

impl From<jiff::Error> for RuleError {
    fn from(e: jiff::Error) -> Self {
        Self::DateRange {
            message: e.to_string(),
        }
    }
}

fn format_span_error(prefix: &str, message: &str, span: &Span, input: &str) -> String {
    let mut out = format!("{prefix}: {message}\n");
    out.push_str(&format!("  {input}\n"));
    // spans are byte offsets; the caret line is drawn in characters
    let pad = input.get(..span.start).map_or(span.start, |s| s.chars().count());
    let width = input
        .get(span.start..span.end)
        .map_or(span.end - span.start, |s| s.chars().count());
    out.push_str(&" ".repeat(pad + 2));
    out.push_str(&"^".repeat(width.max(1)));
    out
}
