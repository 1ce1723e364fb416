use std::fmt;

use crate::ast::*;

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Daily { interval } => write!(f, "d {interval}"),
            Rule::Yearly => write!(f, "y"),
            Rule::Weekly { days } => {
                write!(f, "w ")?;
                write_list(f, days.iter().map(|d| d.number()))
            }
            Rule::Monthly { days, months } => {
                write!(f, "m ")?;
                write_list(f, days.iter().map(|d| d.value()))?;
                if !months.is_empty() {
                    write!(f, " ")?;
                    write_list(f, months.iter().map(|m| m.number()))?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn write_list<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = T>,
) -> fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
