use chrono::{DateTime, Datelike, LocalResult, NaiveDate, TimeZone};

/// Inclusive `[start, end]` range of Unix seconds covering one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    pub start: i64,
    pub end: i64,
}

impl MonthWindow {
    pub fn contains(&self, timestamp: i64) -> bool {
        timestamp >= self.start && timestamp <= self.end
    }
}

/// Window of the calendar month containing `now`, in `now`'s time zone.
///
/// The end is the last millisecond before the next month begins, floored to
/// the second, so December closes on Dec 31 23:59:59 of the same year.
pub fn month_window<Tz: TimeZone>(now: &DateTime<Tz>) -> MonthWindow {
    let tz = now.timezone();
    let (year, month) = (now.year(), now.month());
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };

    let start = first_instant(&tz, year, month);
    let next = first_instant(&tz, next_year, next_month);
    MonthWindow {
        start: start.div_euclid(1000),
        end: (next - 1).div_euclid(1000),
    }
}

/// "October 2026"
pub fn period_label<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%B %Y").to_string()
}

/// Midnight on the first of the month as Unix milliseconds. A midnight lost to
/// a DST gap resolves to the first valid instant after it.
fn first_instant<Tz: TimeZone>(tz: &Tz, year: i32, month: u32) -> i64 {
    let day = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_default();
    let mut naive = day.and_hms_opt(0, 0, 0).unwrap_or_default();
    // Gaps are at most a few hours; step forward by minutes until one maps.
    for _ in 0..(24 * 60) {
        match tz.from_local_datetime(&naive) {
            LocalResult::Single(dt) => return dt.timestamp_millis(),
            LocalResult::Ambiguous(earliest, _) => return earliest.timestamp_millis(),
            LocalResult::None => naive += chrono::Duration::minutes(1),
        }
    }
    naive.and_utc().timestamp_millis()
}
