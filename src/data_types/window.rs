use super::data::{from_millis, to_millis};
use chrono::{DateTime, Utc};

/// A closed time interval. Start never exceeds end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    /// Orders its arguments, so `new(b, a) == new(a, b)`.
    pub fn new(a: DateTime<Utc>, b: DateTime<Utc>) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    pub fn from_millis(a: f64, b: f64) -> Self {
        Self::new(from_millis(a), from_millis(b))
    }

    /// Zero-width window anchored at `t`.
    pub fn instant(t: DateTime<Utc>) -> Self {
        Self { start: t, end: t }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn as_millis(&self) -> (f64, f64) {
        (to_millis(self.start), to_millis(self.end))
    }

    pub fn span_millis(&self) -> f64 {
        to_millis(self.end) - to_millis(self.start)
    }

    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Part of the window inside `extent`, `None` if less than an instant remains.
    pub fn clamp_to(self, extent: TimeWindow) -> Option<TimeWindow> {
        let start = self.start.max(extent.start);
        let end = self.end.min(extent.end);
        (start < end).then_some(Self { start, end })
    }

    /// Clips to `full`. A degenerate window, or one that misses `full`
    /// entirely, stands for "everything".
    pub fn or_full(self, full: TimeWindow) -> TimeWindow {
        self.clamp_to(full).unwrap_or(full)
    }
}

/// Where a window change came from. Only user-originated changes are
/// forwarded to listeners; programmatic ones are silent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    User,
    Programmatic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowChange {
    pub window: TimeWindow,
    pub origin: Origin,
}

impl WindowChange {
    pub fn user(window: TimeWindow) -> Self {
        Self {
            window,
            origin: Origin::User,
        }
    }

    pub fn programmatic(window: TimeWindow) -> Self {
        Self {
            window,
            origin: Origin::Programmatic,
        }
    }

    pub fn should_notify(&self) -> bool {
        self.origin == Origin::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_window_orders_and_falls_back() {
        let a = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap();
        let w = TimeWindow::new(b, a);
        assert_eq!((w.start(), w.end()), (a, b));

        let full = TimeWindow::new(a, b);
        assert_eq!(TimeWindow::instant(a).or_full(full), full);

        let later = Utc.with_ymd_and_hms(2024, 1, 9, 0, 0, 0).unwrap();
        let mid = Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap();
        assert_eq!(
            TimeWindow::new(mid, later).or_full(full),
            TimeWindow::new(mid, b)
        );
        assert_eq!(TimeWindow::new(b, later).clamp_to(full), None);
        assert!(!WindowChange::programmatic(w).should_notify());
        assert!(WindowChange::user(w).should_notify());
    }
}
