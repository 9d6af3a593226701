use crate::data_types::{AxisFormat, TimeWindow};
use crate::utils::date_formatter::{determine_date_format, format_timestamp};
use chrono_tz::Tz;
use d3rs::scale::{LinearScale, Scale as D3Scale};
use std::fmt;

/// Span used when a time domain collapses to a single instant.
pub const MIN_TIME_SPAN_MS: f64 = 24.0 * 3600.0 * 1000.0;

/// Linear mapping between a data domain and a pixel range.
#[derive(Clone)]
pub struct ChartScale {
    inner: LinearScale,
    domain: (f64, f64),
}

impl fmt::Debug for ChartScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartScale")
            .field("domain", &self.domain)
            .finish()
    }
}

impl ChartScale {
    /// Value scale. A zero-width domain is widened by half a unit each side.
    pub fn new_linear(domain: (f64, f64), range: (f32, f32)) -> Self {
        Self::with_min_span(domain, range, 1.0)
    }

    /// Millisecond time scale over `window`, widened to one day if degenerate.
    pub fn new_time(window: TimeWindow, range: (f32, f32)) -> Self {
        Self::with_min_span(window.as_millis(), range, MIN_TIME_SPAN_MS)
    }

    fn with_min_span(domain: (f64, f64), range: (f32, f32), min_span: f64) -> Self {
        let mut d_min = domain.0;
        let mut d_max = domain.1;
        if (d_max - d_min).abs() < f64::EPSILON {
            d_min -= min_span / 2.0;
            d_max += min_span / 2.0;
        }
        let inner = LinearScale::new()
            .domain(d_min, d_max)
            .range(range.0 as f64, range.1 as f64);
        Self {
            inner,
            domain: (d_min, d_max),
        }
    }

    pub fn map(&self, value: f64) -> f32 {
        let res = self.inner.scale(value) as f32;
        if res.is_nan() || res.is_infinite() {
            0.0
        } else {
            res
        }
    }

    pub fn invert(&self, pixel: f32) -> f64 {
        self.inner.invert(pixel as f64).unwrap_or(self.domain.0)
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        self.inner.ticks(count)
    }

    pub fn format_tick(&self, value: f64, format: AxisFormat, tz: Tz) -> String {
        match format {
            AxisFormat::Time => {
                let span_sec = (self.domain.1 - self.domain.0).abs() / 1000.0;
                format_timestamp(value, determine_date_format(span_sec), tz)
            }
            AxisFormat::Numeric => {
                if value.abs() < 0.001 && value.abs() > 0.0 {
                    format!("{:.4}", value)
                } else if value.abs() >= 1000.0 || value.fract() == 0.0 {
                    format!("{:.0}", value)
                } else {
                    format!("{:.2}", value)
                }
            }
        }
    }
}
