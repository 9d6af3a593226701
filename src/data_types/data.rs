use crate::data_types::TimeWindow;
use crate::error::{ChartError, ChartResult};
use chrono::{DateTime, Utc};

/// Converts a timestamp to the millisecond axis used by the scales.
pub fn to_millis(t: DateTime<Utc>) -> f64 {
    t.timestamp_millis() as f64
}

/// Inverse of [`to_millis`]; rounds to the nearest millisecond.
pub fn from_millis(ms: f64) -> DateTime<Utc> {
    if !ms.is_finite() {
        return DateTime::<Utc>::default();
    }
    DateTime::<Utc>::from_timestamp_millis(ms.round() as i64).unwrap_or_default()
}

/// One record per timestamp.
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    timestamp: DateTime<Utc>,
    values: Vec<(String, f64)>,
    total: f64,
}

impl Observation {
    pub fn new<K: Into<String>>(
        timestamp: DateTime<Utc>,
        values: impl IntoIterator<Item = (K, f64)>,
    ) -> Self {
        let values: Vec<(String, f64)> = values.into_iter().map(|(k, v)| (k.into(), v)).collect();
        let total = values.iter().map(|(_, v)| *v).sum();
        Self {
            timestamp,
            values,
            total,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn value(&self, key: &str) -> Option<f64> {
        self.values.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }

    /// Sum of every series value in this record.
    pub fn total(&self) -> f64 {
        self.total
    }
}

/// Observations sorted by timestamp, plus the declared series keys.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    keys: Vec<String>,
    observations: Vec<Observation>,
}

impl Dataset {
    /// Validates ordering and completeness. Every observation must carry a
    /// value for every declared key.
    pub fn new(keys: Vec<String>, observations: Vec<Observation>) -> ChartResult<Self> {
        for (index, pair) in observations.windows(2).enumerate() {
            if pair[1].timestamp < pair[0].timestamp {
                return Err(ChartError::UnsortedTimestamps { index: index + 1 });
            }
        }

        for (index, obs) in observations.iter().enumerate() {
            if let Some(key) = keys.iter().find(|k| obs.value(k).is_none()) {
                return Err(ChartError::MissingValue {
                    index,
                    key: key.clone(),
                });
            }
        }

        Ok(Self { keys, observations })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a dataset from a header row and positional rows. The first header
    /// names the timestamp column and is not a series key.
    pub fn from_columns(
        headers: &[&str],
        rows: Vec<(DateTime<Utc>, Vec<f64>)>,
    ) -> ChartResult<Self> {
        let keys: Vec<String> = headers.iter().skip(1).map(|h| h.to_string()).collect();

        let mut observations = Vec::with_capacity(rows.len());
        for (index, (timestamp, values)) in rows.into_iter().enumerate() {
            if values.len() < keys.len() {
                return Err(ChartError::MissingValue {
                    index,
                    key: keys[values.len()].clone(),
                });
            }
            observations.push(Observation::new(
                timestamp,
                keys.iter().cloned().zip(values),
            ));
        }

        Self::new(keys, observations)
    }

    /// Series keys in declared order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn key_index(&self, key: &str) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// First to last timestamp, `None` when empty.
    pub fn time_extent(&self) -> Option<TimeWindow> {
        let first = self.observations.first()?;
        let last = self.observations.last()?;
        Some(TimeWindow::new(first.timestamp, last.timestamp))
    }

    pub fn max_total(&self) -> f64 {
        self.observations
            .iter()
            .map(Observation::total)
            .fold(0.0, f64::max)
    }
}
