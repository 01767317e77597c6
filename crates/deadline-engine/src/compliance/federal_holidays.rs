//! U.S. federal holiday generator
//!
//! Produces the eleven federal holidays (5 U.S.C. 6103) for a year, applying
//! the observation rule for fixed-date holidays: Saturday is observed on the
//! preceding Friday, Sunday on the following Monday. A year's list holds the
//! holidays observed in that year: a Saturday New Year's Day belongs to the
//! prior year's Dec 31. Used to seed `include_federal` calendars in
//! `holidays.toml`.

use chrono::{Datelike, NaiveDate, Weekday};
use shared_types::{CourtHoliday, HolidayCalendar};

/// Jurisdiction label of calendars built by [`federal_calendar`].
pub const FEDERAL_JURISDICTION: &str = "us-federal";

/// Compute the nth occurrence of a given weekday in a month.
fn nth_weekday_of_month(year: i32, month: u32, weekday: Weekday, n: u8) -> Option<NaiveDate> {
    NaiveDate::from_weekday_of_month_opt(year, month, weekday, n)
}

/// Compute the last occurrence of a given weekday in a month.
fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let last_of_month = first_of_next.pred_opt()?;
    let days_back = (last_of_month.weekday().num_days_from_monday() + 7
        - weekday.num_days_from_monday())
        % 7;
    NaiveDate::from_ymd_opt(year, month, last_of_month.day() - days_back)
}

/// Apply federal holiday observation rule (Sat->Friday, Sun->Monday).
fn observed_date(date: NaiveDate) -> Option<NaiveDate> {
    match date.weekday() {
        Weekday::Sat => date.pred_opt(),
        Weekday::Sun => date.succ_opt(),
        _ => Some(date),
    }
}

fn fixed(year: i32, month: u32, day: u32, name: &str) -> Option<CourtHoliday> {
    let actual = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(CourtHoliday::new(observed_date(actual)?, name))
}

fn floating(date: Option<NaiveDate>, name: &str) -> Option<CourtHoliday> {
    date.map(|d| CourtHoliday::new(d, name))
}

/// Get all federal holidays observed in a given year, ascending by observed
/// date.
pub fn federal_holidays(year: i32) -> Vec<CourtHoliday> {
    let mut holidays: Vec<CourtHoliday> = [
        fixed(year, 1, 1, "New Year's Day"),
        floating(
            nth_weekday_of_month(year, 1, Weekday::Mon, 3),
            "Martin Luther King Jr. Day",
        ),
        floating(nth_weekday_of_month(year, 2, Weekday::Mon, 3), "Presidents' Day"),
        floating(last_weekday_of_month(year, 5, Weekday::Mon), "Memorial Day"),
        if year >= 2021 {
            fixed(year, 6, 19, "Juneteenth")
        } else {
            None
        },
        fixed(year, 7, 4, "Independence Day"),
        floating(nth_weekday_of_month(year, 9, Weekday::Mon, 1), "Labor Day"),
        floating(nth_weekday_of_month(year, 10, Weekday::Mon, 2), "Columbus Day"),
        fixed(year, 11, 11, "Veterans Day"),
        floating(nth_weekday_of_month(year, 11, Weekday::Thu, 4), "Thanksgiving Day"),
        fixed(year, 12, 25, "Christmas Day"),
        fixed(year + 1, 1, 1, "New Year's Day"),
    ]
    .into_iter()
    .flatten()
    .filter(|h| h.date.year() == year)
    .collect();

    holidays.sort_by_key(|h| h.date);
    holidays
}

/// Federal holidays for `year` as a calendar.
pub fn federal_calendar(year: i32) -> HolidayCalendar {
    HolidayCalendar::for_year(FEDERAL_JURISDICTION, year, federal_holidays(year))
}

/// Check if a date is an observed federal holiday.
pub fn is_federal_holiday(date: NaiveDate) -> bool {
    federal_holidays(date.year()).iter().any(|h| h.date == date)
}
