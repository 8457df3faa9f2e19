use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Inclusive pair of instants bounding record retrieval and filtering.
///
/// Instants are local wall-clock times. The invariant `start <= end` is
/// enforced by [`DateRange::new`]; there is no way to build an inverted range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RangeBounds")]
pub struct DateRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

/// Unchecked wire form of [`DateRange`]
#[derive(Deserialize)]
struct RangeBounds {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TryFrom<RangeBounds> for DateRange {
    type Error = Error;

    fn try_from(bounds: RangeBounds) -> Result<Self> {
        Self::new(bounds.start, bounds.end)
    }
}

impl DateRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if start > end {
            return Err(Error::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Range ending at `end` whose start is pulled back to `end` if it lies later
    pub fn clamped(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start: start.min(end),
            end,
        }
    }

    /// Whole-day range: 00:00:00 of `start` through the last millisecond of `end`.
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        Self::new(start_of_day(start), end_of_day(end))
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// A record date is the instant at midnight of that day.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.contains(start_of_day(date))
    }

    /// Date-granular bounds handed to the record store.
    pub fn to_query(&self) -> RangeQuery {
        RangeQuery {
            from: self.start.date(),
            to: self.end.date(),
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format("%d/%m/%Y"),
            self.end.format("%d/%m/%Y")
        )
    }
}

/// Inclusive date bounds passed to `RecordStore::fetch`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    // 23:59:59.999 is always a valid wall-clock time
    date.and_time(NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN))
}

/// User-facing range specifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeSelector {
    Today,
    Week,
    Month,
    #[serde(alias = "7days")]
    Last7Days,
    #[serde(alias = "30days")]
    Last30Days,
    Custom,
}

impl RangeSelector {
    pub const ALL: [RangeSelector; 6] = [
        RangeSelector::Today,
        RangeSelector::Week,
        RangeSelector::Month,
        RangeSelector::Last7Days,
        RangeSelector::Last30Days,
        RangeSelector::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RangeSelector::Today => "today",
            RangeSelector::Week => "week",
            RangeSelector::Month => "month",
            RangeSelector::Last7Days => "last7days",
            RangeSelector::Last30Days => "last30days",
            RangeSelector::Custom => "custom",
        }
    }

    /// Menu label shown next to the range picker
    pub fn label(&self) -> &'static str {
        match self {
            RangeSelector::Today => "Today",
            RangeSelector::Week => "This Week",
            RangeSelector::Month => "This Month",
            RangeSelector::Last7Days => "Last 7 Days",
            RangeSelector::Last30Days => "Last 30 Days",
            RangeSelector::Custom => "Custom Range...",
        }
    }
}

impl fmt::Display for RangeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RangeSelector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "today" => Ok(RangeSelector::Today),
            "week" => Ok(RangeSelector::Week),
            "month" => Ok(RangeSelector::Month),
            "last7days" | "7days" => Ok(RangeSelector::Last7Days),
            "last30days" | "30days" => Ok(RangeSelector::Last30Days),
            "custom" => Ok(RangeSelector::Custom),
            _ => Err(Error::UnknownSelector(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_rejects_inverted_range() {
        let ok: DateRange =
            serde_json::from_str(r#"{"start":"2024-01-01T00:00:00","end":"2024-01-31T00:00:00"}"#)
                .unwrap();
        assert_eq!(ok.start().date(), date(2024, 1, 1));

        let inverted = serde_json::from_str::<DateRange>(
            r#"{"start":"2024-02-01T00:00:00","end":"2024-01-01T00:00:00"}"#,
        );
        let err = inverted.unwrap_err().to_string();
        assert!(err.contains("Invalid range"), "{}", err);
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_rejects_inverted_bounds() {
        let result = DateRange::from_dates(date(2024, 2, 1), date(2024, 1, 1));
        assert!(matches!(result, Err(Error::InvertedRange { .. })));
    }

    #[test]
    fn test_single_day_range_contains_that_day() {
        let range = DateRange::from_dates(date(2024, 1, 5), date(2024, 1, 5)).unwrap();
        assert!(range.contains_date(date(2024, 1, 5)));
        assert!(!range.contains_date(date(2024, 1, 4)));
        assert!(!range.contains_date(date(2024, 1, 6)));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let range = DateRange::from_dates(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        assert!(range.contains(range.start()));
        assert!(range.contains(range.end()));
    }

    #[test]
    fn test_query_uses_calendar_dates() {
        let range = DateRange::from_dates(date(2024, 1, 25), date(2024, 2, 1)).unwrap();
        let query = range.to_query();
        assert_eq!(query.from, date(2024, 1, 25));
        assert_eq!(query.to, date(2024, 2, 1));
    }

    #[test]
    fn test_selector_parsing_accepts_aliases() {
        assert_eq!(
            "7days".parse::<RangeSelector>().unwrap(),
            RangeSelector::Last7Days
        );
        assert_eq!(
            "Last30Days".parse::<RangeSelector>().unwrap(),
            RangeSelector::Last30Days
        );
        assert!(matches!(
            "fortnight".parse::<RangeSelector>(),
            Err(Error::UnknownSelector(_))
        ));
    }

    #[test]
    fn test_selector_serde_roundtrip_uses_lowercase() {
        let json = serde_json::to_string(&RangeSelector::Last7Days).unwrap();
        assert_eq!(json, "\"last7days\"");
        let parsed: RangeSelector = serde_json::from_str("\"30days\"").unwrap();
        assert_eq!(parsed, RangeSelector::Last30Days);
    }
}
