use crate::date::add_months;
use chrono::prelude::*;
use chrono::Duration;

/// The studio operates on Colombian civil time, a fixed UTC-5 offset with
/// no daylight saving. All "today" computations shift the instant by this
/// offset before extracting the calendar date, so due dates come out the
/// same no matter which timezone the host process runs in.
const STUDIO_UTC_OFFSET_SECS: i32 = -5 * 3600;

pub fn studio_offset() -> FixedOffset {
    FixedOffset::east_opt(STUDIO_UTC_OFFSET_SECS).expect("Studio offset to be in range")
}

/// The current calendar day as observed at the studio
pub fn studio_today(now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&studio_offset()).naive_local().date()
}

/// Clients get two weeks' notice to come pick up their prints
pub fn pickup_reminder_date(today: NaiveDate) -> NaiveDate {
    today + Duration::days(15)
}

/// Storage reminders for delivered photo archives go out after three
/// months and again after ten months. Month addition clamps to the end of
/// shorter months, see [`add_months`](crate::date::add_months).
pub fn storage_reminder_dates(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (add_months(today, 3), add_months(today, 10))
}

/// True iff both instants fall on the same UTC calendar day, ignoring
/// time-of-day entirely.
pub fn same_calendar_day(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.naive_utc().date() == b.naive_utc().date()
}
