use chrono::{Datelike, Days, Local, NaiveDate, NaiveDateTime};
use minelog_types::{DateRange, Error as TypesError, RangeSelector, start_of_day};
use serde::{Deserialize, Serialize};

use crate::Result;

/// Window used whenever a consumer needs a range and none is configured
pub const FALLBACK_DAYS: u64 = 30;

/// User-supplied bounds for a custom range. Either side may still be unset
/// while the user is picking dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomBounds {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl CustomBounds {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }
}

/// Resolve a selector against the local clock
pub fn resolve(selector: RangeSelector, custom: Option<CustomBounds>) -> Result<DateRange> {
    resolve_at(selector, custom, Local::now().naive_local())
}

/// Resolve a selector into concrete instants relative to `now`.
///
/// Preset selectors end at `now`. `custom` needs both bounds and fails with
/// `IncompleteRange` otherwise; callers keep their previous range on error.
pub fn resolve_at(
    selector: RangeSelector,
    custom: Option<CustomBounds>,
    now: NaiveDateTime,
) -> Result<DateRange> {
    let today = now.date();
    let range = match selector {
        RangeSelector::Today => DateRange::clamped(start_of_day(today), now),
        RangeSelector::Week => {
            let offset = u64::from(today.weekday().num_days_from_monday());
            DateRange::clamped(start_of_day(days_before(today, offset)), now)
        }
        RangeSelector::Month => {
            let first = today.with_day(1).unwrap_or(today);
            DateRange::clamped(start_of_day(first), now)
        }
        RangeSelector::Last7Days => last_days(now, 7),
        RangeSelector::Last30Days => last_days(now, 30),
        RangeSelector::Custom => {
            let bounds = custom.unwrap_or_default();
            match (bounds.start, bounds.end) {
                (Some(start), Some(end)) => DateRange::from_dates(start, end)?,
                _ => return Err(TypesError::IncompleteRange.into()),
            }
        }
    };
    Ok(range)
}

/// The configured range, or the last 30 days ending at `now`.
///
/// Every consumer (fetch query, filter, export header) goes through here so
/// report boundaries cannot drift between call sites.
pub fn effective_range(range: Option<&DateRange>, now: NaiveDateTime) -> DateRange {
    match range {
        Some(range) => *range,
        None => last_days(now, FALLBACK_DAYS),
    }
}

/// Whole days from `days` days ago until `now`
fn last_days(now: NaiveDateTime, days: u64) -> DateRange {
    DateRange::clamped(start_of_day(days_before(now.date(), days)), now)
}

fn days_before(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN)
}
