#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use gpui::{px, Point};
use gpui_linked_chart::{Dataset, Observation, TimeWindow};

pub fn day(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(n)
}

/// Three days, A:[1,2,3], B:[4,5,6].
pub fn two_series() -> Dataset {
    Dataset::from_columns(
        &["date", "A", "B"],
        vec![
            (day(0), vec![1.0, 4.0]),
            (day(1), vec![2.0, 5.0]),
            (day(2), vec![3.0, 6.0]),
        ],
    )
    .unwrap()
}

/// `days` observations of three series with simple ramps.
pub fn ramps(days: i64) -> Dataset {
    let rows = (0..days)
        .map(|i| {
            let i_f = i as f64;
            (day(i), vec![1.0 + i_f, 10.0 - (i_f % 5.0), 2.5])
        })
        .collect();
    Dataset::from_columns(&["date", "x", "y", "z"], rows).unwrap()
}

pub fn single_key_extra(key_rows: &[(i64, Option<f64>)]) -> Dataset {
    let observations = key_rows
        .iter()
        .map(|(d, extra)| {
            let mut values = vec![("A".to_string(), 1.0)];
            if let Some(v) = extra {
                values.push(("C".to_string(), *v));
            }
            Observation::new(day(*d), values)
        })
        .collect();
    Dataset::new(vec!["A".to_string()], observations).unwrap()
}

pub fn window(a: i64, b: i64) -> TimeWindow {
    TimeWindow::new(day(a), day(b))
}

/// Surface point `x` pixels into the plot, vertically centred, for a view
/// with default margins (left 50, top 20).
pub fn plot_point(x: f32, plot_height: f32) -> Point<gpui::Pixels> {
    Point::new(px(50.0 + x), px(20.0 + plot_height / 2.0))
}

pub fn millis_close(a: DateTime<Utc>, b: DateTime<Utc>, tolerance_ms: i64) -> bool {
    (a - b).num_milliseconds().abs() <= tolerance_ms
}
