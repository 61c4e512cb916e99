//! Recurrence rules for tracked activities.
//!
//! Weekday numbers follow the system-calendar convention used by the
//! persisted data: 1 = Sunday, 2 = Monday, ..., 7 = Saturday.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// Calendar number of a weekday (1 = Sunday ... 7 = Saturday).
pub fn weekday_number(day: Weekday) -> u8 {
    day.number_from_sunday() as u8
}

fn weekday_from_number(n: u8) -> Result<Weekday, ScheduleError> {
    match n {
        1 => Ok(Weekday::Sun),
        2 => Ok(Weekday::Mon),
        3 => Ok(Weekday::Tue),
        4 => Ok(Weekday::Wed),
        5 => Ok(Weekday::Thu),
        6 => Ok(Weekday::Fri),
        7 => Ok(Weekday::Sat),
        other => Err(ScheduleError::InvalidWeekday(other)),
    }
}

/// A validated set of weekdays.
///
/// Serialized as a sorted array of calendar numbers; deserialization goes
/// through the same validation as [`WeekdaySet::from_numbers`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const EMPTY: WeekdaySet = WeekdaySet(0);

    /// Build from calendar numbers. Duplicates collapse.
    pub fn from_numbers<I>(numbers: I) -> Result<Self, ScheduleError>
    where
        I: IntoIterator<Item = u8>,
    {
        let mut set = Self::EMPTY;
        for n in numbers {
            set.insert(weekday_from_number(n)?);
        }
        Ok(set)
    }

    pub fn from_weekdays<I>(days: I) -> Self
    where
        I: IntoIterator<Item = Weekday>,
    {
        let mut set = Self::EMPTY;
        for day in days {
            set.insert(day);
        }
        set
    }

    fn bit(day: Weekday) -> u8 {
        1 << (weekday_number(day) - 1)
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= Self::bit(day);
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Calendar numbers in ascending order.
    pub fn numbers(&self) -> Vec<u8> {
        (1..=7u8).filter(|n| self.0 & (1 << (n - 1)) != 0).collect()
    }

    /// Weekdays in calendar order, Sunday first.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.numbers()
            .into_iter()
            .filter_map(|n| weekday_from_number(n).ok())
    }
}

impl TryFrom<Vec<u8>> for WeekdaySet {
    type Error = ScheduleError;

    fn try_from(numbers: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_numbers(numbers)
    }
}

impl From<WeekdaySet> for Vec<u8> {
    fn from(set: WeekdaySet) -> Self {
        set.numbers()
    }
}

/// How often an activity is expected to happen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScheduleRule {
    /// Every calendar day
    #[default]
    Daily,
    /// Monday through Friday
    Weekdays,
    /// Saturday and Sunday
    Weekends,
    /// An explicit set of weekdays; an empty set is never due
    Custom { days: WeekdaySet },
    /// Only on the creation date
    OneTime,
}

impl ScheduleRule {
    /// Custom rule from calendar numbers (1 = Sunday ... 7 = Saturday).
    pub fn custom<I>(numbers: I) -> Result<Self, ScheduleError>
    where
        I: IntoIterator<Item = u8>,
    {
        Ok(ScheduleRule::Custom {
            days: WeekdaySet::from_numbers(numbers)?,
        })
    }

    /// True for a custom rule with no weekdays, which is never due.
    pub fn is_never_due(&self) -> bool {
        matches!(self, ScheduleRule::Custom { days } if days.is_empty())
    }

    /// Whether the rule selects this weekday. `OneTime` is anchored to a date,
    /// not a weekday, and never matches here.
    pub fn matches_weekday(&self, day: Weekday) -> bool {
        match self {
            ScheduleRule::Daily => true,
            ScheduleRule::Weekdays => !matches!(day, Weekday::Sat | Weekday::Sun),
            ScheduleRule::Weekends => matches!(day, Weekday::Sat | Weekday::Sun),
            ScheduleRule::Custom { days } => days.contains(day),
            ScheduleRule::OneTime => false,
        }
    }

    /// Whether an occurrence is expected on `date` for an activity created on
    /// `created`. Nothing is due before the creation date.
    pub fn is_due(&self, created: NaiveDate, date: NaiveDate) -> bool {
        if date < created {
            return false;
        }
        match self {
            ScheduleRule::OneTime => date == created,
            rule => rule.matches_weekday(date.weekday()),
        }
    }
}

impl fmt::Display for ScheduleRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleRule::Daily => write!(f, "daily"),
            ScheduleRule::Weekdays => write!(f, "weekdays"),
            ScheduleRule::Weekends => write!(f, "weekends"),
            ScheduleRule::OneTime => write!(f, "once"),
            ScheduleRule::Custom { days } => {
                let numbers: Vec<String> = days.numbers().iter().map(u8::to_string).collect();
                write!(f, "custom:{}", numbers.join(","))
            }
        }
    }
}

fn parse_weekday_token(token: &str) -> Result<Weekday, ScheduleError> {
    if let Ok(n) = token.parse::<u8>() {
        return weekday_from_number(n);
    }
    token
        .parse::<Weekday>()
        .map_err(|_| ScheduleError::UnknownWeekday(token.to_string()))
}

impl FromStr for ScheduleRule {
    type Err = ScheduleError;

    /// Accepts `daily`, `weekdays`, `weekends`, `once` / `one_time`, and
    /// `custom:<days>` where days are numbers or names (`custom:mon,wed,fri`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "daily" => return Ok(ScheduleRule::Daily),
            "weekdays" => return Ok(ScheduleRule::Weekdays),
            "weekends" => return Ok(ScheduleRule::Weekends),
            "once" | "one_time" | "onetime" => return Ok(ScheduleRule::OneTime),
            _ => {}
        }

        let Some(list) = normalized.strip_prefix("custom:") else {
            return Err(ScheduleError::UnknownRule(s.trim().to_string()));
        };

        let weekdays = list
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(parse_weekday_token)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ScheduleRule::Custom {
            days: WeekdaySet::from_weekdays(weekdays),
        })
    }
}
