//! gpui_linked_chart: an overview area chart with a brush linked to a
//! zoomable stacked-area detail chart.

pub mod chart_view;
pub mod data_types;
pub mod detail_view;
pub mod error;
pub mod linked;
pub mod overview_view;
pub mod rendering;
pub mod scales;
pub mod stack;
pub mod theme;
pub mod transform;
pub mod utils;
pub mod view_controller;

pub use chart_view::LinkedChartView;
pub use data_types::{Dataset, Observation, Origin, SelectionState, TimeWindow, ViewConfig, WindowChange};
pub use detail_view::DetailView;
pub use error::{ChartError, ChartResult};
pub use linked::{LinkMessage, LinkedCharts};
pub use overview_view::OverviewView;
pub use stack::{compute_stack, BandPoint, StackEngine, StackedBand};
