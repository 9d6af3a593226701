use chrono::{TimeZone, Utc};
use chrono_tz::Tz;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmartDateFormat {
    Year,       // 2024
    MonthYear,  // Jan 2024
    DayMonth,   // 12 Jan
    HourMin,    // 10:30
    HourMinSec, // 10:30:15
}

/// Determines the best date format based on the visible time range (in seconds).
pub fn determine_date_format(visible_range_sec: f64) -> SmartDateFormat {
    const MINUTE: f64 = 60.0;
    const HOUR: f64 = 3600.0;
    const DAY: f64 = 24.0 * HOUR;
    const MONTH: f64 = 30.0 * DAY;
    const YEAR: f64 = 365.0 * DAY;

    if visible_range_sec > YEAR * 2.0 {
        SmartDateFormat::Year
    } else if visible_range_sec > MONTH * 2.0 {
        SmartDateFormat::MonthYear
    } else if visible_range_sec > DAY * 1.5 {
        SmartDateFormat::DayMonth
    } else if visible_range_sec > MINUTE * 5.0 {
        SmartDateFormat::HourMin
    } else {
        SmartDateFormat::HourMinSec
    }
}

/// Formats a millisecond timestamp in the given zone.
pub fn format_timestamp(millis: f64, format: SmartDateFormat, tz: Tz) -> String {
    let dt = match Utc.timestamp_millis_opt(millis as i64) {
        chrono::LocalResult::Single(d) => d,
        chrono::LocalResult::Ambiguous(d, _) => d,
        chrono::LocalResult::None => return format!("{:.2}", millis),
    };
    let local = dt.with_timezone(&tz);

    match format {
        SmartDateFormat::Year => local.format("%Y").to_string(),
        SmartDateFormat::MonthYear => local.format("%b %Y").to_string(),
        SmartDateFormat::DayMonth => local.format("%d %b").to_string(),
        SmartDateFormat::HourMin => local.format("%H:%M").to_string(),
        SmartDateFormat::HourMinSec => local.format("%H:%M:%S").to_string(),
    }
}
