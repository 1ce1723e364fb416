#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A parsed repeat rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// `d 7`: every `interval` days counted from the anchor.
    Daily { interval: u16 },
    /// `y`: every year on the anchor's month and day.
    Yearly,
    /// `w 1,4`: on the listed ISO weekdays.
    Weekly { days: Vec<Weekday> },
    /// `m 1,15,-1 [3,6]`: on the listed days of the listed months
    /// (every month when `months` is empty).
    Monthly {
        days: Vec<MonthDay>,
        months: Vec<Month>,
    },
}

impl Rule {
    /// Largest interval accepted by `d`.
    pub const MAX_INTERVAL: u16 = 400;

    /// Whether a monthly rule refers to the last or second-to-last day.
    pub fn has_sentinels(&self) -> bool {
        match self {
            Self::Monthly { days, .. } => days.iter().any(|d| d.is_sentinel()),
            _ => false,
        }
    }
}

/// Day of month in a monthly rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonthDay {
    /// A fixed day, 1..=31.
    Day(u8),
    /// `-1`
    Last,
    /// `-2`
    SecondToLast,
}

impl MonthDay {
    /// Build from the value written in a rule.
    pub fn from_value(n: i64) -> Option<Self> {
        match n {
            -1 => Some(Self::Last),
            -2 => Some(Self::SecondToLast),
            1..=31 => Some(Self::Day(n as u8)),
            _ => None,
        }
    }

    /// The value as written in a rule (`-1`, `-2` for sentinels).
    pub fn value(self) -> i8 {
        match self {
            Self::Day(d) => d as i8,
            Self::Last => -1,
            Self::SecondToLast => -2,
        }
    }

    pub fn is_sentinel(self) -> bool {
        !matches!(self, Self::Day(_))
    }

    /// Concrete day number in a month of `days_in_month` days.
    pub fn resolve(self, days_in_month: i8) -> i8 {
        match self {
            Self::Day(d) => d as i8,
            Self::Last => days_in_month,
            Self::SecondToLast => days_in_month - 1,
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for MonthDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(self.value())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for MonthDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let n = i64::deserialize(deserializer)?;
        MonthDay::from_value(n)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid day of month: {n}")))
    }
}

/// Weekday with ISO numbering (Monday=1 .. Sunday=7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    pub fn from_jiff(wd: jiff::civil::Weekday) -> Self {
        match wd {
            jiff::civil::Weekday::Monday => Self::Monday,
            jiff::civil::Weekday::Tuesday => Self::Tuesday,
            jiff::civil::Weekday::Wednesday => Self::Wednesday,
            jiff::civil::Weekday::Thursday => Self::Thursday,
            jiff::civil::Weekday::Friday => Self::Friday,
            jiff::civil::Weekday::Saturday => Self::Saturday,
            jiff::civil::Weekday::Sunday => Self::Sunday,
        }
    }

    /// ISO 8601 day number: Monday=1, Sunday=7.
    pub fn number(self) -> u8 {
        match self {
            Self::Monday => 1,
            Self::Tuesday => 2,
            Self::Wednesday => 3,
            Self::Thursday => 4,
            Self::Friday => 5,
            Self::Saturday => 6,
            Self::Sunday => 7,
        }
    }

    /// Inverse of [`Weekday::as_str`].
    pub fn from_name(s: &str) -> Option<Self> {
        (1..=7)
            .filter_map(Self::from_number)
            .find(|d| d.as_str() == s)
    }

    pub fn from_number(n: i64) -> Option<Self> {
        match n {
            1 => Some(Self::Monday),
            2 => Some(Self::Tuesday),
            3 => Some(Self::Wednesday),
            4 => Some(Self::Thursday),
            5 => Some(Self::Friday),
            6 => Some(Self::Saturday),
            7 => Some(Self::Sunday),
            _ => None,
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for Weekday {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Weekday {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Weekday::from_name(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown weekday: {s}")))
    }
}

/// Month of the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::January => "january",
            Self::February => "february",
            Self::March => "march",
            Self::April => "april",
            Self::May => "may",
            Self::June => "june",
            Self::July => "july",
            Self::August => "august",
            Self::September => "september",
            Self::October => "october",
            Self::November => "november",
            Self::December => "december",
        }
    }

    pub fn number(self) -> i8 {
        match self {
            Self::January => 1,
            Self::February => 2,
            Self::March => 3,
            Self::April => 4,
            Self::May => 5,
            Self::June => 6,
            Self::July => 7,
            Self::August => 8,
            Self::September => 9,
            Self::October => 10,
            Self::November => 11,
            Self::December => 12,
        }
    }

    pub fn from_number(n: i64) -> Option<Self> {
        match n {
            1 => Some(Self::January),
            2 => Some(Self::February),
            3 => Some(Self::March),
            4 => Some(Self::April),
            5 => Some(Self::May),
            6 => Some(Self::June),
            7 => Some(Self::July),
            8 => Some(Self::August),
            9 => Some(Self::September),
            10 => Some(Self::October),
            11 => Some(Self::November),
            12 => Some(Self::December),
            _ => None,
        }
    }
}
