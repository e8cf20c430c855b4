//! Target month keys.
//!
//! Generation runs target one calendar month, addressed by a lowercase
//! `"<month>_<year>"` key such as `"october_2025"`.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// A calendar month addressed by a `"october_2025"`-style key.
///
/// # Examples
///
/// ```
/// use fresco_core::MonthKey;
///
/// let key: MonthKey = "october_2025".parse().unwrap();
/// assert_eq!(key.year(), 2025);
/// assert_eq!(key.month(), 10);
/// assert_eq!(key.to_string(), "october_2025");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Create a month key, rejecting out-of-range months.
    pub fn new(year: i32, month: u32) -> Result<Self, String> {
        if !(1..=12).contains(&month) {
            return Err(format!("month out of range: {}", month));
        }
        Ok(Self { year, month })
    }

    /// The month key containing the given instant.
    pub fn from_date(date: &DateTime<Utc>) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Calendar month (1-12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month.
    pub fn month_start(&self) -> NaiveDate {
        // month is validated at construction, so day 1 always exists
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap()
    }

    /// Whether the given instant falls inside this month.
    pub fn contains(&self, date: &DateTime<Utc>) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }
}

impl std::str::FromStr for MonthKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, year) = s
            .rsplit_once('_')
            .ok_or_else(|| format!("malformed month key: {}", s))?;
        let month = MONTH_NAMES
            .iter()
            .position(|m| m.eq_ignore_ascii_case(name))
            .ok_or_else(|| format!("unknown month name: {}", name))?;
        let year: i32 = year
            .parse()
            .map_err(|_| format!("malformed year in month key: {}", s))?;
        Self::new(year, (month + 1) as u32)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_round_trip() {
        let key: MonthKey = "october_2025".parse().unwrap();
        assert_eq!(key, MonthKey::new(2025, 10).unwrap());
        assert_eq!(key.to_string(), "october_2025");
    }

    #[test]
    fn rejects_garbage() {
        assert!("octember_2025".parse::<MonthKey>().is_err());
        assert!("october2025".parse::<MonthKey>().is_err());
        assert!("october_twenty".parse::<MonthKey>().is_err());
        assert!(MonthKey::new(2025, 13).is_err());
    }

    #[test]
    fn contains_instants() {
        let key: MonthKey = "february_2026".parse().unwrap();
        let inside = Utc.with_ymd_and_hms(2026, 2, 28, 12, 0, 0).unwrap();
        let outside = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        assert!(key.contains(&inside));
        assert!(!key.contains(&outside));
    }

    #[test]
    fn month_start_is_first_day() {
        let key: MonthKey = "july_2025".parse().unwrap();
        assert_eq!(key.month_start().to_string(), "2025-07-01");
    }
}
