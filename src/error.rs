use thiserror::Error;

/// Typed failures raised by dataset construction, stacking and the event API.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ChartError {
    /// A stacked key is missing from at least one observation.
    #[error("series key `{0}` is not present in every observation")]
    InvalidKey(String),

    #[error("observation {index} is earlier than the observation before it")]
    UnsortedTimestamps { index: usize },

    #[error("observation {index} has no value for series `{key}`")]
    MissingValue { index: usize, key: String },

    #[error("unknown event `{0}`")]
    UnknownEvent(String),
}

pub type ChartResult<T> = Result<T, ChartError>;
