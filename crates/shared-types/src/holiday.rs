use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A named non-business date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CourtHoliday {
    pub date: NaiveDate,
    pub name: String,
}

impl CourtHoliday {
    pub fn new(date: NaiveDate, name: impl Into<String>) -> Self {
        Self {
            date,
            name: name.into(),
        }
    }
}

/// Immutable set of court holidays for one jurisdiction.
///
/// Dates are stored at day granularity. A calendar usually covers a single
/// year; [`HolidayCalendar::merge`] produces a multi-year calendar for
/// computations that cross a year boundary. There is no way to mutate a
/// calendar after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayCalendar {
    jurisdiction: String,
    years: BTreeSet<i32>,
    holidays: BTreeMap<NaiveDate, String>,
}

impl HolidayCalendar {
    /// Build a calendar from an externally supplied holiday list.
    ///
    /// When the same date appears twice the first name wins. The covered
    /// years are the years of the supplied dates.
    pub fn new(
        jurisdiction: impl Into<String>,
        holidays: impl IntoIterator<Item = CourtHoliday>,
    ) -> Self {
        let mut map = BTreeMap::new();
        for holiday in holidays {
            map.entry(holiday.date).or_insert(holiday.name);
        }
        let years = map.keys().map(|d| d.year()).collect();
        Self {
            jurisdiction: jurisdiction.into(),
            years,
            holidays: map,
        }
    }

    /// Build a calendar for an explicit year even if that year lists no
    /// holidays.
    pub fn for_year(
        jurisdiction: impl Into<String>,
        year: i32,
        holidays: impl IntoIterator<Item = CourtHoliday>,
    ) -> Self {
        let mut calendar = Self::new(jurisdiction, holidays);
        calendar.years.insert(year);
        calendar
    }

    /// Calendar with no holidays (weekends still apply in date arithmetic).
    pub fn empty(jurisdiction: impl Into<String>) -> Self {
        Self::new(jurisdiction, std::iter::empty())
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains_key(&date)
    }

    pub fn holiday_name(&self, date: NaiveDate) -> Option<&str> {
        self.holidays.get(&date).map(String::as_str)
    }

    pub fn jurisdiction(&self) -> &str {
        &self.jurisdiction
    }

    /// Years this calendar was loaded for, ascending.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.iter().copied()
    }

    pub fn covers_year(&self, year: i32) -> bool {
        self.years.contains(&year)
    }

    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }

    /// Holidays in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = CourtHoliday> + '_ {
        self.holidays
            .iter()
            .map(|(date, name)| CourtHoliday::new(*date, name.clone()))
    }

    /// Combine calendars of one jurisdiction into a new calendar. Inputs are
    /// left untouched; on a date collision the earlier calendar's name wins.
    pub fn merge<'a>(
        jurisdiction: impl Into<String>,
        calendars: impl IntoIterator<Item = &'a HolidayCalendar>,
    ) -> Self {
        let mut years = BTreeSet::new();
        let mut holidays = BTreeMap::new();
        for calendar in calendars {
            years.extend(calendar.years.iter().copied());
            for (date, name) in &calendar.holidays {
                holidays.entry(*date).or_insert_with(|| name.clone());
            }
        }
        Self {
            jurisdiction: jurisdiction.into(),
            years,
            holidays,
        }
    }
}
