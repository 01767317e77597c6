//! Holiday-aware day arithmetic
//!
//! Calendar-day offsets, business-day stepping in either direction, and the
//! landing-date adjustment that moves a candidate date past weekends and
//! court holidays. All functions return `None` instead of panicking when a
//! step would leave chrono's representable date range.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use shared_types::HolidayCalendar;

/// Check if a date is a weekend.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// A day that is neither a weekend day nor a holiday in `calendar`.
pub fn is_business_day(date: NaiveDate, calendar: &HolidayCalendar) -> bool {
    !is_weekend(date) && !calendar.is_holiday(date)
}

/// `base + offset_days` with ordinary calendar semantics.
pub fn add_calendar_days(base: NaiveDate, offset_days: i32) -> Option<NaiveDate> {
    base.checked_add_signed(Duration::days(offset_days as i64))
}

/// Step `offset_days` business days away from `base`.
///
/// Moves one calendar day at a time in the direction of the sign and counts
/// only business days; returns the day on which the count reaches
/// `|offset_days|`. The base date itself is never counted. Zero returns
/// `base` without stepping.
pub fn step_business_days(
    base: NaiveDate,
    offset_days: i32,
    calendar: &HolidayCalendar,
) -> Option<NaiveDate> {
    let target = offset_days.unsigned_abs();
    let mut current = base;
    let mut counted = 0u32;
    while counted < target {
        current = if offset_days > 0 {
            current.succ_opt()?
        } else {
            current.pred_opt()?
        };
        if is_business_day(current, calendar) {
            counted += 1;
        }
    }
    Some(current)
}

/// Landing-date adjustment: advance past weekends, then past a holiday, and
/// re-check the weekend after each holiday so a Friday holiday cannot leave
/// the date on Saturday.
pub fn next_business_day(date: NaiveDate, calendar: &HolidayCalendar) -> Option<NaiveDate> {
    let mut current = date;
    loop {
        while is_weekend(current) {
            current = current.succ_opt()?;
        }
        if !calendar.is_holiday(current) {
            return Some(current);
        }
        current = current.succ_opt()?;
    }
}

/// Business days in the half-open range `(from, to]`. Negative when `to` is
/// before `from`, mirroring the sign convention of [`step_business_days`].
pub fn business_days_between(from: NaiveDate, to: NaiveDate, calendar: &HolidayCalendar) -> i64 {
    let (start, end, sign) = if to >= from { (from, to, 1) } else { (to, from, -1) };
    let count = start
        .iter_days()
        .skip(1)
        .take_while(|d| *d <= end)
        .filter(|d| is_business_day(*d, calendar))
        .count() as i64;
    // Backward stepping counts the days in [to, from), not (to, from].
    let adjust = if sign < 0 {
        (is_business_day(start, calendar) as i64) - (is_business_day(end, calendar) as i64)
    } else {
        0
    };
    sign * (count + adjust)
}
