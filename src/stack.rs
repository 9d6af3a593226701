//! Cumulative stacking of series into bands.
//!
//! Bands are laid out bottom to top in exactly the order the keys are given.
//! There is no reordering by magnitude and no normalisation: the first key sits
//! on zero and every following key sits on the upper bound of the one before.

use crate::data_types::{to_millis, Dataset, TimeWindow};
use crate::error::{ChartError, ChartResult};
use chrono::{DateTime, Utc};
use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandPoint {
    pub timestamp: DateTime<Utc>,
    pub lower: f64,
    pub upper: f64,
}

/// The stacked region of a single series.
#[derive(Clone, Debug, PartialEq)]
pub struct StackedBand {
    pub key: String,
    pub points: Vec<BandPoint>,
}

impl StackedBand {
    /// Bounds at `t`, linearly interpolated between neighbouring points.
    /// `None` outside the band's time range.
    pub fn bounds_at(&self, t: DateTime<Utc>) -> Option<(f64, f64)> {
        let idx = self.points.partition_point(|p| p.timestamp < t);
        let right = self.points.get(idx)?;
        if right.timestamp == t {
            return Some((right.lower, right.upper));
        }
        let left = self.points.get(idx.checked_sub(1)?)?;
        let pct = (to_millis(t) - to_millis(left.timestamp))
            / (to_millis(right.timestamp) - to_millis(left.timestamp));
        Some((
            left.lower + (right.lower - left.lower) * pct,
            left.upper + (right.upper - left.upper) * pct,
        ))
    }

    /// Points inside `window`, with interpolated points added on the window
    /// edges so the band is cut exactly at the plot boundary.
    pub fn clipped_to(&self, window: TimeWindow) -> Vec<BandPoint> {
        let mut out = Vec::with_capacity(self.points.len() + 2);
        let edge = |t: DateTime<Utc>| {
            self.bounds_at(t).map(|(lower, upper)| BandPoint {
                timestamp: t,
                lower,
                upper,
            })
        };

        if let Some(p) = edge(window.start()) {
            out.push(p);
        }
        out.extend(
            self.points
                .iter()
                .filter(|p| window.start() < p.timestamp && p.timestamp < window.end()),
        );
        if !window.is_degenerate() {
            if let Some(p) = edge(window.end()) {
                out.push(p);
            }
        }
        out
    }
}

pub struct StackEngine;

impl StackEngine {
    /// One band per key in `active_keys`, stacked in that order.
    ///
    /// Fails with [`ChartError::InvalidKey`] before producing anything if a key
    /// is missing from any observation.
    pub fn compute_stack(dataset: &Dataset, active_keys: &[String]) -> ChartResult<Vec<StackedBand>> {
        for key in active_keys {
            if dataset.observations().iter().any(|o| o.value(key).is_none()) {
                return Err(ChartError::InvalidKey(key.clone()));
            }
        }

        let mut bands: Vec<StackedBand> = active_keys
            .iter()
            .map(|key| StackedBand {
                key: key.clone(),
                points: Vec::with_capacity(dataset.len()),
            })
            .collect();

        for obs in dataset.observations() {
            let mut baseline = 0.0;
            for band in bands.iter_mut() {
                // Presence checked above.
                let value = obs.value(&band.key).unwrap_or_default();
                let upper = baseline + value;
                band.points.push(BandPoint {
                    timestamp: obs.timestamp(),
                    lower: baseline,
                    upper,
                });
                baseline = upper;
            }
        }

        trace!(
            bands = bands.len(),
            observations = dataset.len(),
            "computed stack"
        );
        Ok(bands)
    }

    /// Highest upper bound across all bands, 0 when there is nothing stacked.
    pub fn stack_max(bands: &[StackedBand]) -> f64 {
        bands
            .iter()
            .flat_map(|b| b.points.iter())
            .map(|p| p.upper)
            .fold(0.0, f64::max)
    }
}

/// Free-function form of [`StackEngine::compute_stack`].
pub fn compute_stack(dataset: &Dataset, active_keys: &[String]) -> ChartResult<Vec<StackedBand>> {
    StackEngine::compute_stack(dataset, active_keys)
}
