//! The `YYYYMMDD` date format used on the wire and in storage.

use jiff::civil::Date;

use crate::error::RuleError;

/// strftime pattern for the compact format.
pub const COMPACT_FORMAT: &str = "%Y%m%d";

/// Parse exactly eight ASCII digits as `YYYYMMDD`.
pub fn parse_compact(s: &str) -> Result<Date, RuleError> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RuleError::invalid_date(s));
    }
    let field = |range: std::ops::Range<usize>| s[range].parse::<i16>();
    let (Ok(year), Ok(month), Ok(day)) = (field(0..4), field(4..6), field(6..8)) else {
        return Err(RuleError::invalid_date(s));
    };
    Date::new(year, month as i8, day as i8).map_err(|_| RuleError::invalid_date(s))
}

pub fn format_compact(date: Date) -> String {
    date.strftime(COMPACT_FORMAT).to_string()
}
